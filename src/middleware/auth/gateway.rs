//! Authorization gateway: one decision per request.
//!
//! Pipeline (strictly in this order):
//! 1. namespace: static, or derived from the Host (`Micro-Namespace` header is set)
//! 2. credential: `Authorization: Bearer` header, else the token cookie
//! 3. account: `Auth::inspect`, falling back to an anonymous account
//! 4. endpoint: `Resolver::resolve`, falling back to a passthrough endpoint
//! 5. decision: `Auth::verify` → forward / 403 / 401 / 307
//!
//! Only the resolved endpoint survives the pipeline, as a request extension.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::endpoint;
use crate::error::AppError;
use crate::services::auth::{Account, Auth, Resource};
use crate::services::credentials::{self, TOKEN_COOKIE_NAME};
use crate::services::namespace::{
    DEFAULT_NAMESPACE, DEFAULT_ROOT_DOMAIN, NamespaceMode, NamespaceResolver,
};
use crate::services::resolver::{Endpoint, Resolver, request_path};
use crate::state::AppState;

use super::decision::Decision;

/// Header carrying the request namespace to the wrapped handler.
pub const NAMESPACE_HEADER: &str = "micro-namespace";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub service_prefix: String,
    pub namespace: NamespaceMode,
    pub root_domain: String,
    pub login_url: Option<String>,
    pub token_cookie: String,
    // Reject accounts from another namespace instead of only logging them.
    pub enforce_namespace: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service_prefix: "go.micro.web".to_owned(),
            namespace: NamespaceMode::Static(DEFAULT_NAMESPACE.to_owned()),
            root_domain: DEFAULT_ROOT_DOMAIN.to_owned(),
            login_url: None,
            token_cookie: TOKEN_COOKIE_NAME.to_owned(),
            enforce_namespace: false,
        }
    }
}

pub struct Gateway {
    config: GatewayConfig,
    namespaces: NamespaceResolver,
    auth: Arc<dyn Auth>,
    resolver: Arc<dyn Resolver>,
}

impl Gateway {
    pub fn new(config: GatewayConfig, auth: Arc<dyn Auth>, resolver: Arc<dyn Resolver>) -> Self {
        let namespaces = NamespaceResolver::new(config.namespace.clone(), &config.root_domain);
        Self {
            config,
            namespaces,
            auth,
            resolver,
        }
    }

    /// Runs the pipeline. `Ok(())` means the request may be forwarded; it has
    /// been augmented with the namespace header, the canonical
    /// `Authorization` header and, when resolvable, the endpoint extension.
    pub async fn authorize(&self, req: &mut Request) -> Result<(), AppError> {
        let namespace = self.namespaces.namespace_for(req.uri(), req.headers());
        match HeaderValue::from_str(&namespace) {
            Ok(value) => {
                req.headers_mut()
                    .insert(HeaderName::from_static(NAMESPACE_HEADER), value);
            }
            Err(err) => {
                // never forward a client-supplied namespace
                req.headers_mut().remove(NAMESPACE_HEADER);
                tracing::debug!(namespace = %namespace, error = %err, "namespace is not a valid header value");
            }
        }

        let path = request_path(req.uri()).into_owned();

        let token = credentials::extract_token(req.headers_mut(), &self.config.token_cookie);

        // Some endpoints are open to unauthenticated callers, so a failed
        // inspection only downgrades the caller to anonymous.
        let account = match self.auth.inspect(&token).await {
            Ok(account) => account,
            Err(err) => {
                tracing::debug!(
                    backend = self.auth.backend_name(),
                    error = %err,
                    "account inspection failed, continuing as anonymous"
                );
                Account::anonymous(namespace.as_str())
            }
        };

        if account.namespace != namespace {
            tracing::warn!(
                account_id = %account.id,
                account_namespace = %account.namespace,
                path = %path,
                namespace = %namespace,
                "cross namespace request"
            );
            if self.config.enforce_namespace {
                return Err(AppError::ForbiddenNamespace);
            }
        }

        let endpoint = self.locate(req, &path)?;

        let resource = Resource::service(
            resource_name(&self.config.service_prefix, &endpoint),
            resource_endpoint(&endpoint),
            namespace,
        );

        let verified = self.auth.verify(&account, &resource).await;
        if let Err(err) = &verified {
            tracing::debug!(
                account_id = %account.id,
                resource = %resource.name,
                endpoint = %resource.endpoint,
                error = %err,
                "verification failed"
            );
        }

        Decision::from_verification(
            &verified,
            &account,
            self.config.login_url.as_deref(),
            &path,
        )
        .into_result()
    }

    /// `path` is the decoded request path.
    fn locate(&self, req: &mut Request, path: &str) -> Result<Endpoint, AppError> {
        match self.resolver.resolve(req) {
            Ok(resolved) => {
                endpoint::attach(req.extensions_mut(), resolved.clone());
                Ok(resolved)
            }
            // e.g. favicon.ico: not part of the routable surface
            Err(err) if err.is_soft() => Ok(Endpoint::passthrough(path)),
            Err(err) => {
                tracing::error!(
                    resolver = self.resolver.name(),
                    path = %path,
                    error = %err,
                    "endpoint resolution failed"
                );
                Err(err.into())
            }
        }
    }
}

/// `go.micro.web` + `users` → `go.micro.web.users`; an unnamed endpoint maps
/// to the bare prefix.
pub fn resource_name(service_prefix: &str, endpoint: &Endpoint) -> String {
    if endpoint.name.is_empty() {
        service_prefix.to_owned()
    } else {
        format!("{service_prefix}.{}", endpoint.name)
    }
}

/// Endpoint path, or the method when the path is empty. The method may be an
/// RPC method name or an HTTP verb depending on the resolver; it is passed on
/// as-is.
pub fn resource_endpoint(endpoint: &Endpoint) -> String {
    if endpoint.path.is_empty() {
        endpoint.method.clone()
    } else {
        endpoint.path.clone()
    }
}

/// Puts the gateway in front of every route of `router`.
///
/// ```ignore
/// let router = api::v1::routes();
/// let router = middleware::auth::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, gateway_middleware))
}

async fn gateway_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    state.gateway.authorize(&mut req).await?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(name: &str, method: &str, path: &str) -> Endpoint {
        Endpoint {
            name: name.to_owned(),
            host: String::new(),
            method: method.to_owned(),
            path: path.to_owned(),
        }
    }

    #[test]
    fn resource_name_appends_endpoint_name() {
        assert_eq!(
            resource_name("go.micro.web", &endpoint("home", "GET", "/home")),
            "go.micro.web.home"
        );
        assert_eq!(
            resource_name("go.micro.web", &Endpoint::passthrough("/favicon.ico")),
            "go.micro.web"
        );
    }

    #[test]
    fn resource_endpoint_prefers_path() {
        assert_eq!(
            resource_endpoint(&endpoint("users", "GET", "/users")),
            "/users"
        );
        assert_eq!(
            resource_endpoint(&endpoint("users", "Users.Read", "")),
            "Users.Read"
        );
    }
}
