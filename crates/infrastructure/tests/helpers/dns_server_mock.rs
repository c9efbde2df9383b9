#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Upstream resolver stand-in.
///
/// Answers every query with one A record (93.184.216.34) for the queried
/// name, echoing whatever transaction id it received. Queries whose name
/// starts with `slow.` are answered after `slow_delay`; names starting with
/// `silent.` are never answered.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
    query_count: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        Self::start_with_delay(Duration::from_millis(200)).await
    }

    pub async fn start_with_delay(slow_delay: Duration) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await?);
        let addr = socket.local_addr()?;

        let received = Arc::new(Mutex::new(Vec::new()));
        let query_count = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_received = Arc::clone(&received);
        let task_count = Arc::clone(&query_count);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let query = buf[..len].to_vec();
                        task_count.fetch_add(1, Ordering::SeqCst);
                        task_received.lock().unwrap().push(query.clone());

                        let name = Self::query_name(&query);
                        if name.starts_with("silent.") {
                            continue;
                        }

                        let response = Self::build_mock_response(&query);
                        let socket = Arc::clone(&socket);
                        let delay = if name.starts_with("slow.") {
                            slow_delay
                        } else {
                            Duration::ZERO
                        };
                        tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            let _ = socket.send_to(&response, peer).await;
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            query_count,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    fn query_name(query: &[u8]) -> String {
        let mut labels = Vec::new();
        let mut pos = 12;
        while let Some(&len) = query.get(pos) {
            if len == 0 {
                break;
            }
            let start = pos + 1;
            let end = start + len as usize;
            let Some(label) = query.get(start..end) else {
                break;
            };
            labels.push(String::from_utf8_lossy(label).into_owned());
            pos = end;
        }
        labels.join(".")
    }

    fn build_mock_response(query: &[u8]) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(512);

        response.extend_from_slice(&query[0..2]);

        response.push(0x81);
        response.push(0x80);

        response.extend_from_slice(&query[4..6]);

        response.extend_from_slice(&[0x00, 0x01]);

        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&query[12..]);

        response.extend_from_slice(&[
            0xc0, 0x0c,
            0x00, 0x01,
            0x00, 0x01,
            0x00, 0x00, 0x00, 0x3c,
            0x00, 0x04,
            93, 184, 216, 34,
        ]);

        response
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
