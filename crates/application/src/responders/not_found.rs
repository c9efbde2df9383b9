use super::{encode_record, Query, ResponseSections};
use authdns_domain::{DomainError, RecordType};

/// The zone's first SOA as the only answer, owned by the apex.
///
/// `None` when the zone has no SOA to answer with.
pub(super) fn sections(query: &Query<'_>) -> Result<Option<ResponseSections>, DomainError> {
    let Some(soa) = query
        .store
        .zone_records(query.apex)
        .iter()
        .find(|record| record.is_apex() && record.record_type == RecordType::SOA)
    else {
        return Ok(None);
    };

    Ok(Some(ResponseSections {
        answers: vec![encode_record(query.apex, soa)?],
        ..ResponseSections::default()
    }))
}
