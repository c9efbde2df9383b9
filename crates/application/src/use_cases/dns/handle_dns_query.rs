use crate::ports::UpstreamForwarder;
use crate::responders::Responder;
use authdns_domain::{DomainError, Header, Message, RecordStore};
use std::sync::Arc;
use tracing::debug;

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Answered from a local zone.
    Local,
    /// Zone known, no matching records: answered with the zone's SOA.
    NotFound,
    /// Relayed from the upstream resolver.
    Forwarded,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Local => "local",
            ReplySource::NotFound => "not_found",
            ReplySource::Forwarded => "forwarded",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DnsReply {
    pub bytes: Vec<u8>,
    pub source: ReplySource,
}

pub struct HandleDnsQueryUseCase {
    store: Arc<RecordStore>,
    forwarder: Arc<dyn UpstreamForwarder>,
    max_packet_size: usize,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        store: Arc<RecordStore>,
        forwarder: Arc<dyn UpstreamForwarder>,
        max_packet_size: usize,
    ) -> Self {
        Self {
            store,
            forwarder,
            max_packet_size,
        }
    }

    /// Answers one client datagram.
    ///
    /// Returns `Ok(None)` when the query should be dropped without a reply
    /// (a known zone that has no SOA to answer a miss with).
    pub async fn execute(&self, datagram: &[u8]) -> Result<Option<DnsReply>, DomainError> {
        let request = Message::from_bytes(datagram)?;
        if request.header.qr {
            return Err(DomainError::NotAQuery(request.header.id));
        }
        let question = request.question()?;

        let Some(apex) = self.store.find_domain(&question.name) else {
            debug!(domain = %question.name, qtype = question.qtype, "No local zone, forwarding");
            let bytes = self.forward(datagram, request.header.id).await?;
            return Ok(Some(DnsReply {
                bytes,
                source: ReplySource::Forwarded,
            }));
        };

        let found = match (question.record_type(), question.record_class()) {
            (Some(record_type), Some(class)) => !self
                .store
                .find_records(&question.name, record_type, class)
                .is_empty(),
            _ => false,
        };

        let (responder, source) = if found {
            let record_type = question
                .record_type()
                .ok_or(DomainError::UnsupportedRecordType(question.qtype))?;
            let responder = Responder::for_type(record_type)
                .ok_or(DomainError::UnsupportedRecordType(question.qtype))?;
            (responder, ReplySource::Local)
        } else {
            debug!(domain = %question.name, zone = %apex, qtype = question.qtype, "No matching records");
            (Responder::NotFound, ReplySource::NotFound)
        };

        let reply = responder.respond(&self.store, &request, self.max_packet_size)?;

        Ok(reply.map(|message| DnsReply {
            bytes: message.to_bytes(),
            source,
        }))
    }

    async fn forward(&self, datagram: &[u8], id: u16) -> Result<Vec<u8>, DomainError> {
        let bytes = self.forwarder.forward(datagram).await?;

        let header = Header::decode(&bytes)
            .map_err(|e| DomainError::InvalidUpstreamResponse(e.to_string()))?;
        if header.id != id {
            return Err(DomainError::InvalidUpstreamResponse(format!(
                "transaction id {} does not match request id {}",
                header.id, id
            )));
        }

        Ok(bytes)
    }
}
