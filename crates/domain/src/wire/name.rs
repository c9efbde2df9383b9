use crate::errors::DomainError;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const POINTER_TAG: u8 = 0b1100_0000;
const MAX_POINTER_HOPS: usize = 16;

/// Encodes a dotted name as length-prefixed labels ending in the root label.
/// Never emits compression pointers.
pub fn encode_domain(name: &str) -> Result<Vec<u8>, DomainError> {
    let mut out = Vec::with_capacity(name.len() + 2);

    for label in name.split('.').filter(|label| !label.is_empty()) {
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' in '{}' exceeds {} bytes",
                label, name, MAX_LABEL_LEN
            )));
        }
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);

    if out.len() > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' encodes to {} bytes, limit is {}",
            name,
            out.len(),
            MAX_NAME_LEN
        )));
    }

    Ok(out)
}

/// Reads a (possibly compressed) name starting at `offset` within the whole
/// message `buf`. Returns the dotted name without a trailing dot and the
/// offset just past the name at its original position.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(String, usize), DomainError> {
    let mut labels: Vec<String> = Vec::new();
    let mut pos = offset;
    let mut resume_at: Option<usize> = None;
    let mut hops = 0usize;
    let mut encoded_len = 1usize;

    loop {
        let len = *buf.get(pos).ok_or_else(|| {
            DomainError::MalformedName(format!("name runs past end of packet at offset {}", pos))
        })?;

        match len & POINTER_TAG {
            0x00 => {
                if len == 0 {
                    pos += 1;
                    break;
                }

                let start = pos + 1;
                let end = start + len as usize;
                if end > buf.len() {
                    return Err(DomainError::MalformedName(format!(
                        "label of {} bytes at offset {} overruns {}-byte packet",
                        len,
                        pos,
                        buf.len()
                    )));
                }

                encoded_len += len as usize + 1;
                if encoded_len > MAX_NAME_LEN {
                    return Err(DomainError::MalformedName(format!(
                        "name exceeds {} bytes",
                        MAX_NAME_LEN
                    )));
                }

                // Labels must survive a decode/encode round trip unchanged.
                let label = &buf[start..end];
                if let Some(byte) = label.iter().find(|b| **b == b'.' || !b.is_ascii()) {
                    return Err(DomainError::MalformedName(format!(
                        "label at offset {} contains byte 0x{:02x}",
                        pos, byte
                    )));
                }

                labels.push(label.iter().map(|&b| char::from(b)).collect());
                pos = end;
            }
            POINTER_TAG => {
                let low = *buf.get(pos + 1).ok_or_else(|| {
                    DomainError::MalformedName(format!("truncated pointer at offset {}", pos))
                })?;

                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(DomainError::MalformedName(
                        "too many compression pointers".to_string(),
                    ));
                }

                if resume_at.is_none() {
                    resume_at = Some(pos + 2);
                }
                pos = (((len & !POINTER_TAG) as usize) << 8) | low as usize;
            }
            _ => {
                return Err(DomainError::MalformedName(format!(
                    "reserved label type 0x{:02x} at offset {}",
                    len, pos
                )));
            }
        }
    }

    Ok((labels.join("."), resume_at.unwrap_or(pos)))
}
