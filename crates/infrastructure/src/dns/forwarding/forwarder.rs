//! Upstream forwarding over a single shared UDP socket.
//!
//! Every forwarded query is re-stamped with a fresh transaction id so that
//! concurrent clients reusing the same id cannot collide upstream. A
//! background task reads replies, looks the id up in the pending map, puts
//! the client's id back and hands the bytes to the waiting caller.

use async_trait::async_trait;
use authdns_application::ports::UpstreamForwarder;
use authdns_domain::wire::HEADER_LEN;
use authdns_domain::DomainError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Largest reply read from the upstream resolver.
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

struct PendingQuery {
    ticket: u64,
    original_id: u16,
    reply_tx: oneshot::Sender<Vec<u8>>,
}

type PendingMap = DashMap<u16, PendingQuery>;

pub struct UdpForwarder {
    socket: Arc<UdpSocket>,
    upstream: SocketAddr,
    timeout: Duration,
    pending: Arc<PendingMap>,
    next_ticket: AtomicU64,
    receiver: JoinHandle<()>,
}

impl UdpForwarder {
    /// Binds the forward-facing socket at `local` and starts reading replies.
    pub async fn bind(
        local: SocketAddr,
        upstream: SocketAddr,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let socket = UdpSocket::bind(local).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind forward socket {}: {}", local, e))
        })?;
        Ok(Self::from_socket(socket, upstream, timeout))
    }

    /// Must be called inside a tokio runtime.
    pub fn from_socket(socket: UdpSocket, upstream: SocketAddr, timeout: Duration) -> Self {
        let socket = Arc::new(socket);
        let pending = Arc::new(PendingMap::new());

        let receiver = tokio::spawn(receive_replies(
            Arc::clone(&socket),
            upstream,
            Arc::clone(&pending),
        ));

        Self {
            socket,
            upstream,
            timeout,
            pending,
            next_ticket: AtomicU64::new(0),
            receiver,
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))
    }

    pub fn upstream(&self) -> SocketAddr {
        self.upstream
    }

    /// Queries still waiting for an upstream reply.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn reserve_id(
        &self,
        original_id: u16,
        reply_tx: oneshot::Sender<Vec<u8>>,
    ) -> Result<(u16, u64), DomainError> {
        if self.pending.len() > u16::MAX as usize {
            return Err(DomainError::IoError(
                "no free upstream transaction ids".to_string(),
            ));
        }

        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        loop {
            let id = fastrand::u16(..);
            if let Entry::Vacant(slot) = self.pending.entry(id) {
                slot.insert(PendingQuery {
                    ticket,
                    original_id,
                    reply_tx,
                });
                return Ok((id, ticket));
            }
        }
    }
}

#[async_trait]
impl UpstreamForwarder for UdpForwarder {
    async fn forward(&self, request: &[u8]) -> Result<Vec<u8>, DomainError> {
        if request.len() < HEADER_LEN {
            return Err(DomainError::TruncatedHeader(request.len()));
        }
        let original_id = u16::from_be_bytes([request[0], request[1]]);

        let (reply_tx, reply_rx) = oneshot::channel();
        let (upstream_id, ticket) = self.reserve_id(original_id, reply_tx)?;
        let _pending = PendingGuard {
            pending: &self.pending,
            id: upstream_id,
            ticket,
        };

        let mut outgoing = request.to_vec();
        outgoing[..2].copy_from_slice(&upstream_id.to_be_bytes());

        self.socket
            .send_to(&outgoing, self.upstream)
            .await
            .map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to send query to {}: {}",
                    self.upstream, e
                ))
            })?;

        debug!(
            upstream = %self.upstream,
            client_id = original_id,
            upstream_id,
            "Query forwarded"
        );

        match tokio::time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => Err(DomainError::IoError(
                "forward socket reader stopped".to_string(),
            )),
            Err(_) => {
                warn!(
                    upstream = %self.upstream,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Upstream did not answer in time"
                );
                Err(DomainError::QueryTimeout)
            }
        }
    }
}

impl Drop for UdpForwarder {
    fn drop(&mut self) {
        self.receiver.abort();
    }
}

/// Frees the reserved id once the caller stops waiting, unless the slot has
/// already been answered and handed to another query.
struct PendingGuard<'a> {
    pending: &'a PendingMap,
    id: u16,
    ticket: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending
            .remove_if(&self.id, |_, query| query.ticket == self.ticket);
    }
}

async fn receive_replies(socket: Arc<UdpSocket>, upstream: SocketAddr, pending: Arc<PendingMap>) {
    let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

    loop {
        let (len, from) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "Forward socket receive failed");
                continue;
            }
        };

        if from != upstream {
            warn!(
                expected = %upstream,
                received_from = %from,
                "Reply from unexpected source dropped"
            );
            continue;
        }

        if len < HEADER_LEN {
            debug!(len, "Short upstream reply dropped");
            continue;
        }

        let upstream_id = u16::from_be_bytes([buf[0], buf[1]]);
        let Some((_, query)) = pending.remove(&upstream_id) else {
            debug!(upstream_id, "Reply for unknown or expired query");
            continue;
        };

        let mut reply = buf[..len].to_vec();
        reply[..2].copy_from_slice(&query.original_id.to_be_bytes());

        if query.reply_tx.send(reply).is_err() {
            debug!(upstream_id, "Caller gave up before the reply arrived");
        }
    }
}
