pub mod forwarding;
pub mod server;

pub use forwarding::UdpForwarder;
pub use server::DnsServerHandler;
