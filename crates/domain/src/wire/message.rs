use super::header::{Header, HEADER_LEN};
use super::question::{decode_question, Question};
use crate::errors::DomainError;

/// A DNS datagram split into its header and the bytes that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(header: Header, payload: Vec<u8>) -> Self {
        Self { header, payload }
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, DomainError> {
        let header = Header::decode(buf)?;
        Ok(Self {
            header,
            payload: buf[HEADER_LEN..].to_vec(),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        out.extend_from_slice(&self.header.encode());
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn wire_len(&self) -> usize {
        HEADER_LEN + self.payload.len()
    }

    /// Decodes the first question of the message.
    pub fn question(&self) -> Result<Question, DomainError> {
        decode_question(&self.to_bytes(), HEADER_LEN).map(|(question, _)| question)
    }
}
