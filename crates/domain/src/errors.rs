use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Truncated header: {0} bytes available, 12 required")]
    TruncatedHeader(usize),

    #[error("Truncated question at offset {0}")]
    TruncatedQuestion(usize),

    #[error("Malformed domain name: {0}")]
    MalformedName(String),

    #[error("Message {0} is a response, not a query")]
    NotAQuery(u16),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid rdata for {record_type} record: {reason}")]
    InvalidRdata {
        record_type: &'static str,
        reason: String,
    },

    #[error("Packet capacity exceeded: {requested} bytes requested, {capacity} available")]
    CapacityExceeded { capacity: usize, requested: usize },

    #[error("No responder registered for record type {0}")]
    UnsupportedRecordType(u16),

    #[error("Invalid upstream response: {0}")]
    InvalidUpstreamResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,
}

impl DomainError {
    /// True for errors caused by the bytes a client sent us.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            DomainError::TruncatedHeader(_)
                | DomainError::TruncatedQuestion(_)
                | DomainError::MalformedName(_)
                | DomainError::NotAQuery(_)
        )
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::IoError(_)
                | DomainError::QueryTimeout
                | DomainError::InvalidUpstreamResponse(_)
        )
    }
}
