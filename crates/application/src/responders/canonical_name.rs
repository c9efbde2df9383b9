use super::{Query, ResponseSections};
use authdns_domain::DomainError;

/// The alias only; the target is not chased.
pub(super) fn sections(query: &Query<'_>) -> Result<ResponseSections, DomainError> {
    Ok(ResponseSections {
        answers: query.answers()?,
        authority: query.apex_name_servers()?,
        additional: Vec::new(),
    })
}
