pub mod dns;

pub use dns::{DnsReply, HandleDnsQueryUseCase, ReplySource};
