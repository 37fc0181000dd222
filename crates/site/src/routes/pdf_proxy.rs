//! PDF proxy route handler.
//!
//! The catalog embeds PDF documents hosted on the retailer's storage host.
//! Browsers cannot fetch them cross-origin, so this endpoint streams them
//! through the site - restricted to the single configured host.

use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the proxy.
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub url: String,
}

/// Stream a PDF from the allowed storage host.
///
/// GET /api/pdf-proxy?url=...
#[instrument(skip(state))]
pub async fn proxy(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response> {
    let Some(allowed_host) = state.config().pdf_allowed_host.as_deref() else {
        tracing::error!("PDF proxy requested but no allowed host configured");
        return Err(AppError::Upstream("pdf proxy not configured".to_string()));
    };

    let url = Url::parse(&query.url)
        .map_err(|_| AppError::BadRequest("Invalid document URL.".to_string()))?;

    if url.scheme() != "https" || url.host_str() != Some(allowed_host) {
        return Err(AppError::BadRequest(
            "Documents can only be loaded from our storage host.".to_string(),
        ));
    }

    let upstream = state
        .http_client()
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("storage fetch failed: {e}")))?;

    if !upstream.status().is_success() {
        tracing::warn!(status = %upstream.status(), "Storage host returned an error");
        return Err(AppError::Upstream(format!(
            "storage returned {}",
            upstream.status()
        )));
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/pdf")
        .to_owned();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, "inline")
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| AppError::Internal(format!("build proxy response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_allowed(raw: &str, allowed: &str) -> bool {
        Url::parse(raw)
            .ok()
            .is_some_and(|u| u.scheme() == "https" && u.host_str() == Some(allowed))
    }

    #[test]
    fn test_allowed_host_passes() {
        assert!(host_allowed(
            "https://storage.verdantgarden.example/media/catalog.pdf",
            "storage.verdantgarden.example"
        ));
    }

    #[test]
    fn test_other_host_rejected() {
        assert!(!host_allowed(
            "https://evil.example/catalog.pdf",
            "storage.verdantgarden.example"
        ));
    }

    #[test]
    fn test_plain_http_rejected() {
        assert!(!host_allowed(
            "http://storage.verdantgarden.example/media/catalog.pdf",
            "storage.verdantgarden.example"
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(!host_allowed("not a url", "storage.verdantgarden.example"));
    }
}
