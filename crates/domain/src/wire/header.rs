use crate::errors::DomainError;

pub const HEADER_LEN: usize = 12;

const QR_MASK: u8 = 0b1000_0000;
const OPCODE_MASK: u8 = 0b0111_1000;
const AA_MASK: u8 = 0b0000_0100;
const TC_MASK: u8 = 0b0000_0010;
const RD_MASK: u8 = 0b0000_0001;
const RA_MASK: u8 = 0b1000_0000;
const Z_MASK: u8 = 0b0111_0000;
const RCODE_MASK: u8 = 0b0000_1111;

/// DNS message header (RFC 1035 §4.1.1).
///
/// ```text
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |          QDCOUNT / ANCOUNT / NSCOUNT / ARCOUNT |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// Fields are kept in host order; `encode` is the only place they are turned
/// into network order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn decode(buf: &[u8]) -> Result<Self, DomainError> {
        if buf.len() < HEADER_LEN {
            return Err(DomainError::TruncatedHeader(buf.len()));
        }

        let flags = buf[2];
        let codes = buf[3];

        Ok(Self {
            id: u16::from_be_bytes([buf[0], buf[1]]),
            qr: flags & QR_MASK != 0,
            opcode: (flags & OPCODE_MASK) >> 3,
            aa: flags & AA_MASK != 0,
            tc: flags & TC_MASK != 0,
            rd: flags & RD_MASK != 0,
            ra: codes & RA_MASK != 0,
            z: (codes & Z_MASK) >> 4,
            rcode: codes & RCODE_MASK,
            qdcount: u16::from_be_bytes([buf[4], buf[5]]),
            ancount: u16::from_be_bytes([buf[6], buf[7]]),
            nscount: u16::from_be_bytes([buf[8], buf[9]]),
            arcount: u16::from_be_bytes([buf[10], buf[11]]),
        })
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut flags = (self.opcode << 3) & OPCODE_MASK;
        if self.qr {
            flags |= QR_MASK;
        }
        if self.aa {
            flags |= AA_MASK;
        }
        if self.tc {
            flags |= TC_MASK;
        }
        if self.rd {
            flags |= RD_MASK;
        }

        let mut codes = ((self.z << 4) & Z_MASK) | (self.rcode & RCODE_MASK);
        if self.ra {
            codes |= RA_MASK;
        }

        let mut buf = [0u8; HEADER_LEN];
        buf[0..2].copy_from_slice(&self.id.to_be_bytes());
        buf[2] = flags;
        buf[3] = codes;
        buf[4..6].copy_from_slice(&self.qdcount.to_be_bytes());
        buf[6..8].copy_from_slice(&self.ancount.to_be_bytes());
        buf[8..10].copy_from_slice(&self.nscount.to_be_bytes());
        buf[10..12].copy_from_slice(&self.arcount.to_be_bytes());
        buf
    }

    /// Header for the reply to this request: QR set, id/opcode/RD echoed,
    /// record counts cleared for the caller to fill in.
    pub fn to_response(&self) -> Header {
        Header {
            id: self.id,
            qr: true,
            opcode: self.opcode,
            aa: false,
            tc: false,
            rd: self.rd,
            ra: false,
            z: 0,
            rcode: 0,
            qdcount: self.qdcount,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }
}
