//! Per-record-type answer construction.
//!
//! Each responder decides which zone records go into the answer, authority
//! and additional sections; [`compose_response`] serializes them behind the
//! response header under the datagram capacity.

mod address;
mod canonical_name;
mod mail_exchange;
mod name_server;
mod not_found;
mod start_of_authority;
mod text;

use authdns_domain::wire::{encode_resource_record, Header, Message, PacketBuilder, Question};
use authdns_domain::{DomainError, RecordClass, RecordStore, RecordType, ZoneRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Responder {
    Address,
    NameServer,
    MailExchange,
    StartOfAuthority,
    Text,
    CanonicalName,
    NotFound,
}

const RESPONDERS: [(RecordType, Responder); 7] = [
    (RecordType::A, Responder::Address),
    (RecordType::AAAA, Responder::Address),
    (RecordType::NS, Responder::NameServer),
    (RecordType::MX, Responder::MailExchange),
    (RecordType::SOA, Responder::StartOfAuthority),
    (RecordType::TXT, Responder::Text),
    (RecordType::CNAME, Responder::CanonicalName),
];

impl Responder {
    /// The responder registered for `record_type`, if any.
    pub fn for_type(record_type: RecordType) -> Option<Self> {
        RESPONDERS
            .iter()
            .find(|(rt, _)| *rt == record_type)
            .map(|(_, responder)| *responder)
    }

    /// Builds the reply to `request` from `store`.
    ///
    /// `Ok(None)` means there is nothing to answer with: the queried name is
    /// outside every zone, or (for [`Responder::NotFound`]) the zone has no
    /// SOA record.
    pub fn respond(
        &self,
        store: &RecordStore,
        request: &Message,
        capacity: usize,
    ) -> Result<Option<Message>, DomainError> {
        let question = request.question()?;
        let Some(apex) = store.find_domain(&question.name) else {
            return Ok(None);
        };

        let query = Query {
            store,
            question: &question,
            apex,
        };

        let sections = match self {
            Responder::NotFound => match not_found::sections(&query)? {
                Some(sections) => sections,
                None => return Ok(None),
            },
            Responder::Address => address::sections(&query)?,
            Responder::NameServer => name_server::sections(&query)?,
            Responder::MailExchange => mail_exchange::sections(&query)?,
            Responder::StartOfAuthority => start_of_authority::sections(&query)?,
            Responder::Text => text::sections(&query)?,
            Responder::CanonicalName => canonical_name::sections(&query)?,
        };

        compose_response(&request.header, &question, &sections, capacity).map(Some)
    }
}

/// Everything a responder needs to look up for one question.
pub(crate) struct Query<'a> {
    pub store: &'a RecordStore,
    pub question: &'a Question,
    pub apex: &'a str,
}

impl Query<'_> {
    /// Records for the queried name, type and class. Unknown type or class
    /// codes match nothing.
    pub fn matching_records(&self) -> Vec<&ZoneRecord> {
        match (self.question.record_type(), self.question.record_class()) {
            (Some(record_type), Some(class)) => {
                self.store
                    .find_records(&self.question.name, record_type, class)
            }
            _ => Vec::new(),
        }
    }

    fn class(&self) -> RecordClass {
        self.question.record_class().unwrap_or(RecordClass::IN)
    }

    /// Answer records for the queried name, owned by the queried name.
    pub fn answers(&self) -> Result<Vec<Vec<u8>>, DomainError> {
        self.matching_records()
            .into_iter()
            .map(|record| encode_record(&self.question.name, record))
            .collect()
    }

    /// NS records at the zone apex, owned by the apex.
    pub fn apex_name_servers(&self) -> Result<Vec<Vec<u8>>, DomainError> {
        self.store
            .records_at_apex(self.apex, RecordType::NS, self.class())
            .into_iter()
            .map(|record| encode_record(self.apex, record))
            .collect()
    }

    /// A records for each target of the matched records. Targets the store
    /// has no A record for are skipped.
    pub fn glue(&self) -> Result<Vec<Vec<u8>>, DomainError> {
        let mut glue = Vec::new();
        for record in self.matching_records() {
            let Some(target) = record.target() else {
                continue;
            };

            let addresses = self
                .store
                .find_records(target, RecordType::A, RecordClass::IN);
            if addresses.is_empty() {
                tracing::debug!(name = %target, "No glue address for target");
                continue;
            }

            for address in addresses {
                glue.push(encode_record(target, address)?);
            }
        }
        Ok(glue)
    }
}

/// Serialized records for each section, in order.
#[derive(Debug, Default)]
pub struct ResponseSections {
    pub answers: Vec<Vec<u8>>,
    pub authority: Vec<Vec<u8>>,
    pub additional: Vec<Vec<u8>>,
}

/// Writes the response header, the echoed question and the sections.
///
/// Header counts are taken from the sections so they always agree with the
/// records actually emitted.
pub fn compose_response(
    request: &Header,
    question: &Question,
    sections: &ResponseSections,
    capacity: usize,
) -> Result<Message, DomainError> {
    let mut header = request.to_response();
    header.qdcount = 1;
    header.ancount = section_count(&sections.answers, capacity)?;
    header.nscount = section_count(&sections.authority, capacity)?;
    header.arcount = section_count(&sections.additional, capacity)?;

    let mut builder = PacketBuilder::with_capacity(capacity);
    builder.write(&header.encode())?;
    builder.write(&question.encode()?)?;
    for record in sections
        .answers
        .iter()
        .chain(&sections.authority)
        .chain(&sections.additional)
    {
        builder.write(record)?;
    }

    builder.finalize()
}

fn section_count(records: &[Vec<u8>], capacity: usize) -> Result<u16, DomainError> {
    u16::try_from(records.len()).map_err(|_| DomainError::CapacityExceeded {
        capacity,
        requested: records.iter().map(Vec::len).sum(),
    })
}

pub(crate) fn encode_record(owner: &str, record: &ZoneRecord) -> Result<Vec<u8>, DomainError> {
    encode_resource_record(
        owner,
        record.record_type,
        record.class,
        record.ttl,
        &record.encode_rdata()?,
    )
}
