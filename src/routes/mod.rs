use crate::models::storage::BookStore;
use crate::utils::timeout::enforce_deadline;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod health;
pub mod search;

pub type Store = Arc<dyn BookStore + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub term_result_limit: u32,
}

impl AppState {
    pub fn new(store: Store, term_result_limit: u32) -> Self {
        Self {
            store,
            term_result_limit,
        }
    }
}

pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(search::search_books))
        .route("/status", get(health::health_check))
        .layer(middleware::from_fn_with_state(
            request_timeout,
            enforce_deadline,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
