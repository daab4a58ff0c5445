//! Auth interface consumed by the gateway (account inspection + policy verification).
use async_trait::async_trait;
use thiserror::Error;

use super::types::{Account, Resource};

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-layer errors.
///
/// Note:
/// - The gateway never surfaces these to the client. A failed inspection
///   means anonymous, a failed verification means "not permitted".
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token")]
    InvalidToken,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("auth backend error: {0}")]
    Backend(String),
}

/// Identity and policy provider.
///
/// Implementations are shared by all in-flight requests (`Arc<dyn Auth>`).
#[async_trait]
pub trait Auth: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Resolve a bearer token into an account.
    async fn inspect(&self, token: &str) -> AuthResult<Account>;

    // `Ok(())` if the account may access the resource.
    async fn verify(&self, account: &Account, resource: &Resource) -> AuthResult<()>;
}
