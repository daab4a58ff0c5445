use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::{StatusCode, request::Parts};

use crate::services::resolver::Endpoint;

/// Handler-side access to the endpoint attached by the gateway.
///
/// Use `Option<ResolvedEndpoint>` for routes that may be reached without a
/// resolvable endpoint; the plain form rejects with 404.
#[derive(Debug, Clone)]
pub struct ResolvedEndpoint(pub Endpoint);

impl<S> FromRequestParts<S> for ResolvedEndpoint
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        super::get(&parts.extensions)
            .cloned()
            .map(ResolvedEndpoint)
            .ok_or(StatusCode::NOT_FOUND)
    }
}

impl<S> OptionalFromRequestParts<S> for ResolvedEndpoint
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(super::get(&parts.extensions).cloned().map(ResolvedEndpoint))
    }
}
