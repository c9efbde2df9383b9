use super::{Query, ResponseSections};
use authdns_domain::DomainError;

/// MX answers plus glue addresses for the exchanges we host.
pub(super) fn sections(query: &Query<'_>) -> Result<ResponseSections, DomainError> {
    Ok(ResponseSections {
        answers: query.answers()?,
        authority: query.apex_name_servers()?,
        additional: query.glue()?,
    })
}
