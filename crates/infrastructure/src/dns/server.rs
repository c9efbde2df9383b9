use authdns_application::use_cases::HandleDnsQueryUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Turns client datagrams into reply datagrams.
///
/// Every failure is logged here and results in no reply; the client is
/// left to time out and retry.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle_raw_udp(&self, datagram: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        match self.use_case.execute(datagram).await {
            Ok(Some(reply)) => {
                debug!(
                    client = %client,
                    source = reply.source.as_str(),
                    bytes = reply.bytes.len(),
                    "Query answered"
                );
                Some(reply.bytes)
            }
            Ok(None) => {
                warn!(client = %client, "Zone has no SOA record to answer with, query dropped");
                None
            }
            Err(e) if e.is_decode_error() => {
                debug!(client = %client, error = %e, "Malformed query dropped");
                None
            }
            Err(e) if e.is_transport_error() => {
                warn!(client = %client, error = %e, "Upstream forwarding failed");
                None
            }
            Err(e) => {
                error!(client = %client, error = %e, "Failed to build response");
                None
            }
        }
    }
}
