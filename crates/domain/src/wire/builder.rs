use super::header::{Header, HEADER_LEN};
use super::message::Message;
use crate::errors::DomainError;

/// Datagram ceiling for plain (non-EDNS0) UDP responses.
pub const DEFAULT_PACKET_SIZE: usize = 1024;

/// Accumulates one outgoing datagram. Writes past the capacity fail and
/// leave the buffer untouched.
#[derive(Debug)]
pub struct PacketBuilder {
    buffer: Vec<u8>,
    capacity: usize,
}

impl PacketBuilder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PACKET_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn write(&mut self, bytes: &[u8]) -> Result<&mut Self, DomainError> {
        let requested = self.buffer.len() + bytes.len();
        if requested > self.capacity {
            return Err(DomainError::CapacityExceeded {
                capacity: self.capacity,
                requested,
            });
        }
        self.buffer.extend_from_slice(bytes);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.buffer.len()
    }

    /// Splits the written bytes into header and payload.
    pub fn finalize(self) -> Result<Message, DomainError> {
        let header = Header::decode(&self.buffer)?;
        let mut buffer = self.buffer;
        let payload = buffer.split_off(HEADER_LEN);
        Ok(Message::new(header, payload))
    }
}

impl Default for PacketBuilder {
    fn default() -> Self {
        Self::new()
    }
}
