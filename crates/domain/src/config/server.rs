use crate::wire::DEFAULT_PACKET_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port of the upstream resolver.
    #[serde(default = "default_forward_port")]
    pub forward_port: u16,

    /// Local port of the forward-facing socket; 0 lets the OS pick.
    #[serde(default)]
    pub forward_bind_port: u16,

    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    #[serde(default = "default_max_packet_size")]
    pub max_packet_size: usize,

    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            forward_port: default_forward_port(),
            forward_bind_port: 0,
            upstream_timeout_ms: default_upstream_timeout_ms(),
            max_packet_size: default_max_packet_size(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_forward_port() -> u16 {
    53
}

fn default_upstream_timeout_ms() -> u64 {
    5000
}

fn default_max_packet_size() -> usize {
    DEFAULT_PACKET_SIZE
}

fn default_max_in_flight() -> usize {
    1024
}
