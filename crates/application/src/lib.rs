//! authdns Application Layer
pub mod ports;
pub mod responders;
pub mod use_cases;

pub use ports::UpstreamForwarder;
pub use responders::Responder;
pub use use_cases::{DnsReply, HandleDnsQueryUseCase, ReplySource};
