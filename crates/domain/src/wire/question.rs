use super::name::{decode_name, encode_domain};
use crate::dns_record::{RecordClass, RecordType};
use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Dotted name without the trailing root dot.
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: u16, qclass: u16) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass,
        }
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.qtype)
    }

    pub fn record_class(&self) -> Option<RecordClass> {
        RecordClass::from_u16(self.qclass)
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = encode_domain(&self.name)?;
        out.extend_from_slice(&self.qtype.to_be_bytes());
        out.extend_from_slice(&self.qclass.to_be_bytes());
        Ok(out)
    }
}

/// Parses the question that starts at `offset` of the message `buf`.
pub fn decode_question(buf: &[u8], offset: usize) -> Result<(Question, usize), DomainError> {
    let (name, pos) = decode_name(buf, offset)?;

    let fixed = buf
        .get(pos..pos + 4)
        .ok_or(DomainError::TruncatedQuestion(pos))?;
    let qtype = u16::from_be_bytes([fixed[0], fixed[1]]);
    let qclass = u16::from_be_bytes([fixed[2], fixed[3]]);

    Ok((Question { name, qtype, qclass }, pos + 4))
}
