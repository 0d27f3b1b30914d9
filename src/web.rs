//! axum integration
//!
//! - [`PageRequest`] can be used directly as a handler argument.
//! - [`Paginator`] responds with its JSON envelope.
//! - [`Error`] responds with a JSON error body, so handlers can return
//!   `Result<Paginator<T>, Error>`.
//!
//! ```rust,ignore
//! async fn list_users(
//!     State(source): State<Arc<DuckDbSource>>,
//!     request: PageRequest,
//! ) -> Result<Paginator<Value>, Error> {
//!     source.paginate(&PaginatorConfig::new(25), &request).await
//! }
//! ```

use crate::error::Error;
use crate::pagination::Paginator;
use crate::request::{parse_query, PageRequest};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::convert::Infallible;

impl PageRequest {
    /// Build a request context from an HTTP request URI
    pub fn from_http_uri(uri: &Uri) -> Self {
        let base_uri = match (uri.scheme_str(), uri.authority()) {
            (Some(scheme), Some(authority)) => format!("{scheme}://{authority}{}", uri.path()),
            _ => uri.path().to_string(),
        };

        Self {
            base_uri,
            query: uri.query().map(parse_query).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(Self::from_http_uri(&parts.uri))
    }
}

impl<T: Serialize> IntoResponse for Paginator<T> {
    fn into_response(self) -> Response {
        match self.to_json() {
            Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            Err(e) => e.into_response(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Pagination failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}
