use super::{Query, ResponseSections};
use authdns_domain::DomainError;

pub(super) fn sections(query: &Query<'_>) -> Result<ResponseSections, DomainError> {
    Ok(ResponseSections {
        answers: query.answers()?,
        authority: Vec::new(),
        additional: query.glue()?,
    })
}
