use super::{Query, ResponseSections};
use authdns_domain::DomainError;

/// A and AAAA: the addresses, with the zone's name servers as authority.
pub(super) fn sections(query: &Query<'_>) -> Result<ResponseSections, DomainError> {
    Ok(ResponseSections {
        answers: query.answers()?,
        authority: query.apex_name_servers()?,
        additional: Vec::new(),
    })
}
