//! Endpoint resolver interface used by the gateway.
use std::borrow::Cow;

use axum::{extract::Request, http::Uri};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use thiserror::Error;

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Logical service/method a request is addressed to.
///
/// `method` is overloaded: some resolvers fill it with an RPC method name
/// (`Users.Read`), others with the HTTP verb. Consumers must accept both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub name: String,
    pub host: String,
    pub method: String,
    pub path: String,
}

impl Endpoint {
    /// Endpoint for a request outside the routable surface (e.g. `/favicon.ico`).
    pub fn passthrough(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid path")]
    InvalidPath,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Internal(String),
}

impl ResolveError {
    /// Soft failures fall back to a passthrough endpoint instead of failing
    /// the request.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::InvalidPath | Self::NotFound)
    }
}

/// Percent-decoded request path. Every path-derived value (endpoint name,
/// resource endpoint, `redirect_to`) is built from this, never from the raw
/// URI. Invalid UTF-8 is replaced with U+FFFD.
pub fn request_path(uri: &Uri) -> Cow<'_, str> {
    percent_decode_str(uri.path()).decode_utf8_lossy()
}

/// Maps a request to the endpoint it addresses.
///
/// Implementations are shared across requests and must be cheap to call
/// concurrently.
pub trait Resolver: Send + Sync + 'static {
    // Resolver name (for logging).
    fn name(&self) -> &'static str;

    fn resolve(&self, req: &Request) -> ResolveResult<Endpoint>;
}
