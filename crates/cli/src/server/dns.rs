use authdns_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

const RECV_BUFFER_SIZE: usize = 4096;

/// Serves queries until the socket fails irrecoverably. Each datagram is
/// handled on its own task; at most `max_in_flight` are handled at once.
pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: DnsServerHandler,
    max_in_flight: usize,
) -> anyhow::Result<()> {
    let socket = Arc::new(create_udp_socket(bind_addr)?);
    let handler = Arc::new(handler);
    let permits = Arc::new(Semaphore::new(max_in_flight));

    info!(bind_address = %bind_addr, max_in_flight, "DNS server ready");

    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

    loop {
        let (len, client) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let permit = Arc::clone(&permits).acquire_owned().await?;
        let datagram: Arc<[u8]> = Arc::from(&recv_buf[..len]);
        let handler = Arc::clone(&handler);
        let socket = Arc::clone(&socket);

        tokio::spawn(async move {
            let _permit = permit;
            if let Some(response) = handler.handle_raw_udp(&datagram, client).await {
                if let Err(e) = socket.send_to(&response, client).await {
                    warn!(client = %client, error = %e, "Failed to send reply");
                }
            }
        });
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
