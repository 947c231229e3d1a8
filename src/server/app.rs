use std::sync::Arc;

use anyhow::Context;
use axum::body::Body;
use axum::http::{header, Method};
use axum::middleware;
use axum::response::Response;
use axum::{extract::FromRef, http::StatusCode, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quiz_router, ApiError};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::TriviaRepository;

pub type Repo = Arc<dyn TriviaRepository>;

#[derive(FromRef, Clone)]
pub struct AppState {
    repo: Repo,
}

impl AppState {
    pub fn new(repo: Repo) -> Self {
        Self { repo }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(quiz_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound
        })
        .layer(middleware::map_response(method_not_allowed_body))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// the router answers a known path with the wrong method with an empty 405
async fn method_not_allowed_body(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return axum::response::IntoResponse::into_response(ApiError::MethodNotAllowed);
    }
    response
}

async fn metrics() -> Result<Response, ApiError> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf).map_err(|e| {
        tracing::error!("Failed to encode metrics: {e}");
        ApiError::Internal
    })?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .map_err(|e| {
            tracing::error!("Failed to build metrics response: {e}");
            ApiError::Internal
        })
}
