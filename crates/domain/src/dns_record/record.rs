use super::{RecordClass, RecordType};
use crate::errors::DomainError;
use crate::wire::encode_domain;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Owner name that denotes the zone apex.
pub const APEX: &str = "@";

/// A record as loaded from a zone file. `rdata` keeps the raw tokens; their
/// meaning depends on `record_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub name: String,

    pub record_type: RecordType,

    pub class: RecordClass,

    pub ttl: u32,

    pub rdata: Vec<String>,
}

impl ZoneRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        class: RecordClass,
        ttl: u32,
        rdata: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
            ttl,
            rdata,
        }
    }

    pub fn is_apex(&self) -> bool {
        self.name == APEX
    }

    /// Domain this record points at: the NS/CNAME target or the MX exchange.
    pub fn target(&self) -> Option<&str> {
        match self.record_type {
            RecordType::NS | RecordType::CNAME => self.rdata.first().map(String::as_str),
            RecordType::MX => self.rdata.get(1).map(String::as_str),
            _ => None,
        }
    }

    /// Serializes the rdata tokens into their wire layout.
    pub fn encode_rdata(&self) -> Result<Vec<u8>, DomainError> {
        match self.record_type {
            RecordType::A => {
                let addr: Ipv4Addr = self.token(0)?.parse().map_err(|_| {
                    self.invalid(format!("'{}' is not an IPv4 address", self.rdata[0]))
                })?;
                Ok(addr.octets().to_vec())
            }
            RecordType::AAAA => {
                let addr: Ipv6Addr = self.token(0)?.parse().map_err(|_| {
                    self.invalid(format!("'{}' is not an IPv6 address", self.rdata[0]))
                })?;
                Ok(addr.octets().to_vec())
            }
            RecordType::NS | RecordType::CNAME => encode_domain(self.token(0)?),
            RecordType::MX => {
                let preference: u16 = self.token(0)?.parse().map_err(|_| {
                    self.invalid(format!("preference '{}' is not a u16", self.rdata[0]))
                })?;
                let mut rdata = preference.to_be_bytes().to_vec();
                rdata.extend(encode_domain(self.token(1)?)?);
                Ok(rdata)
            }
            RecordType::SOA => self.encode_soa(),
            RecordType::TXT => {
                let text = self.rdata.join(" ");
                if text.len() > u8::MAX as usize {
                    return Err(self.invalid(format!(
                        "text is {} bytes, a character-string holds at most 255",
                        text.len()
                    )));
                }
                let mut rdata = Vec::with_capacity(text.len() + 1);
                rdata.push(text.len() as u8);
                rdata.extend_from_slice(text.as_bytes());
                Ok(rdata)
            }
        }
    }

    // mname, rname, then serial/refresh/retry/expire/minimum
    fn encode_soa(&self) -> Result<Vec<u8>, DomainError> {
        if self.rdata.len() != 7 {
            return Err(self.invalid(format!(
                "expected 7 tokens (mname rname serial refresh retry expire minimum), got {}",
                self.rdata.len()
            )));
        }

        let mut rdata = encode_domain(&self.rdata[0])?;
        rdata.extend(encode_domain(&self.rdata[1])?);

        for token in &self.rdata[2..] {
            let value: u32 = token
                .parse()
                .map_err(|_| self.invalid(format!("'{}' is not a u32", token)))?;
            rdata.extend_from_slice(&value.to_be_bytes());
        }

        Ok(rdata)
    }

    fn token(&self, index: usize) -> Result<&str, DomainError> {
        self.rdata
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.invalid(format!("missing rdata token #{}", index + 1)))
    }

    fn invalid(&self, reason: String) -> DomainError {
        DomainError::InvalidRdata {
            record_type: self.record_type.as_str(),
            reason,
        }
    }
}
