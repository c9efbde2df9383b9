mod forwarder;

pub use forwarder::{UdpForwarder, MAX_UDP_RESPONSE_SIZE};
