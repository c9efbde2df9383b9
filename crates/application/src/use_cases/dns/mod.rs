mod handle_dns_query;

pub use handle_dns_query::{DnsReply, HandleDnsQueryUseCase, ReplySource};
