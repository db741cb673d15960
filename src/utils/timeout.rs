use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tracing::{error, warn};

/// Answers `504 Gateway Timeout` once `deadline` passes. The handler keeps
/// running on its own task; only the caller stops waiting.
pub async fn enforce_deadline(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let handler = tokio::spawn(next.run(request));

    match tokio::time::timeout(deadline, handler).await {
        Ok(Ok(response)) => response,
        Ok(Err(join_error)) => {
            error!("Handler for {} failed: {}", path, join_error);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(_) => {
            warn!("Request to {} exceeded {:?}", path, deadline);
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(delay: Duration, deadline: Duration, finished: Arc<AtomicBool>) -> Router {
        Router::new()
            .route(
                "/",
                get(move || {
                    let finished = finished.clone();
                    async move {
                        tokio::time::sleep(delay).await;
                        finished.store(true, Ordering::SeqCst);
                        "done"
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(deadline, enforce_deadline))
    }

    fn get_root() -> Request {
        axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn fast_handler_passes_through() {
        let finished = Arc::new(AtomicBool::new(false));
        let response = app(Duration::ZERO, Duration::from_secs(1), finished.clone())
            .oneshot(get_root())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn slow_handler_gets_gateway_timeout_and_keeps_running() {
        let finished = Arc::new(AtomicBool::new(false));
        let response = app(
            Duration::from_millis(100),
            Duration::from_millis(10),
            finished.clone(),
        )
        .oneshot(get_root())
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert!(!finished.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn panicking_handler_is_a_server_error() {
        async fn boom() -> &'static str {
            panic!("boom")
        }

        let app = Router::new()
            .route("/", get(boom))
            .layer(middleware::from_fn_with_state(
                Duration::from_secs(1),
                enforce_deadline,
            ));

        let response = app.oneshot(get_root()).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
