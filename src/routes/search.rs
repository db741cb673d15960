use crate::errors::SearchError;
use crate::models::book::BookRecord;
use crate::models::search::{Classification, SearchParams, SearchRequest};
use crate::routes::AppState;
use crate::services::classifier::classify;
use crate::services::statement::build;
use axum::{
    extract::{Query, State},
    response::Json,
};
use tracing::{debug, info};

pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<BookRecord>>, SearchError> {
    info!("Search query: {:?}", params);

    let request = SearchRequest::try_from(params)?;
    let Classification { role, shape } = classify(&request)?;

    let statement = build(role, &shape, state.term_result_limit);
    debug!(
        "Running {} lookup for {}: {}",
        shape.name(),
        role.as_source(),
        statement.sql
    );

    let books = state.store.search(&statement, role).await?;
    info!("Returning {} books ({} lookup)", books.len(), shape.name());

    Ok(Json(books))
}
