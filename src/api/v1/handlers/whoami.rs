/*
 * Responsibility
 * - echo the request context the gateway forwarded (namespace, credential, endpoint)
 * - also serves as the fallback for paths without a dedicated route
 */
use axum::{Json, http::HeaderMap, http::header};

use crate::api::v1::dto::whoami::WhoAmIResponse;
use crate::api::v1::extractors::ResolvedEndpoint;
use crate::middleware::auth::NAMESPACE_HEADER;

pub async fn whoami(endpoint: Option<ResolvedEndpoint>, headers: HeaderMap) -> Json<WhoAmIResponse> {
    let namespace = headers
        .get(NAMESPACE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    Json(WhoAmIResponse {
        namespace,
        authenticated: headers.contains_key(header::AUTHORIZATION),
        endpoint: endpoint.map(|ResolvedEndpoint(endpoint)| endpoint),
    })
}
