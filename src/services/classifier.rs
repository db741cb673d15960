use crate::errors::SearchError;
use crate::models::search::{Classification, QueryShape, Role, SearchRequest};

/// Picks the caller role and exactly one lookup strategy.
///
/// An identifier beats everything else; otherwise `advanced` selects the
/// structured filter and the free-text term is the fallback.
pub fn classify(request: &SearchRequest) -> Result<Classification, SearchError> {
    let role = Role::from_source(&request.source)?;

    let shape = if request.identifier != 0 {
        QueryShape::ByIdentifier(request.identifier)
    } else if request.advanced {
        QueryShape::ByStructuredFilter(request.structured_filter())
    } else {
        QueryShape::ByTerm(request.term().to_string())
    };

    Ok(Classification { role, shape })
}
