use super::name::{decode_name, encode_domain};
use crate::dns_record::{RecordClass, RecordType};
use crate::errors::DomainError;

/// type + class + ttl + rdlength
pub const RR_FIXED_LEN: usize = 10;

/// A resource record as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.rtype)
    }
}

pub fn encode_resource_record(
    name: &str,
    record_type: RecordType,
    class: RecordClass,
    ttl: u32,
    rdata: &[u8],
) -> Result<Vec<u8>, DomainError> {
    let rdlength = u16::try_from(rdata.len()).map_err(|_| DomainError::InvalidRdata {
        record_type: record_type.as_str(),
        reason: format!("{} bytes of rdata do not fit a u16 length", rdata.len()),
    })?;

    let mut out = encode_domain(name)?;
    out.reserve(RR_FIXED_LEN + rdata.len());
    out.extend_from_slice(&record_type.to_u16().to_be_bytes());
    out.extend_from_slice(&class.to_u16().to_be_bytes());
    out.extend_from_slice(&ttl.to_be_bytes());
    out.extend_from_slice(&rdlength.to_be_bytes());
    out.extend_from_slice(rdata);
    Ok(out)
}

/// Reads the resource record starting at `offset` of the message `buf`.
pub fn decode_resource_record(
    buf: &[u8],
    offset: usize,
) -> Result<(ResourceRecord, usize), DomainError> {
    let (name, pos) = decode_name(buf, offset)?;

    let fixed = buf
        .get(pos..pos + RR_FIXED_LEN)
        .ok_or_else(|| DomainError::MalformedName(format!("truncated record at offset {}", pos)))?;
    let rtype = u16::from_be_bytes([fixed[0], fixed[1]]);
    let class = u16::from_be_bytes([fixed[2], fixed[3]]);
    let ttl = u32::from_be_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
    let rdlength = u16::from_be_bytes([fixed[8], fixed[9]]) as usize;

    let rdata_start = pos + RR_FIXED_LEN;
    let rdata = buf
        .get(rdata_start..rdata_start + rdlength)
        .ok_or_else(|| {
            DomainError::MalformedName(format!(
                "rdata of {} bytes at offset {} overruns packet",
                rdlength, rdata_start
            ))
        })?
        .to_vec();

    Ok((
        ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            rdata,
        },
        rdata_start + rdlength,
    ))
}
