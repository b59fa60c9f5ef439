// server/core.rs

use std::io;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{
        get,
        post,
    },
};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::endpoints::{
    index,
    upload,
};
use crate::config::CONFIG;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// # Builds the application router
///
/// The routing table is constructed here and handed to the server bootstrap;
/// nothing registers routes behind its back. The transport body cap sits
/// above `max_upload_size` so the ingestion code is what callers observe
/// rejecting oversized files.
pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(
            CONFIG.max_upload_size.saturating_mul(2) as usize,
        ))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(address: Option<&str>) -> Result<(), ServeError> {
    let addr = address.unwrap_or(&CONFIG.server_address);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!("Listening on {addr}");
    axum::serve(listener, router()).await?;

    Ok(())
}
