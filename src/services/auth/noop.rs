//! Auth backend that trusts every caller. Intended for local development.
use async_trait::async_trait;
use uuid::Uuid;

use super::client::{Auth, AuthResult};
use super::types::{Account, Resource};

#[derive(Debug, Clone)]
pub struct NoopAuth {
    namespace: String,
}

impl NoopAuth {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

#[async_trait]
impl Auth for NoopAuth {
    fn backend_name(&self) -> &'static str {
        "noop"
    }

    async fn inspect(&self, _token: &str) -> AuthResult<Account> {
        Ok(Account::new(Uuid::new_v4().to_string(), self.namespace.clone()))
    }

    async fn verify(&self, _account: &Account, _resource: &Resource) -> AuthResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_token_gets_a_fresh_identity() {
        let auth = NoopAuth::new("go.micro");

        let a = auth.inspect("").await.unwrap();
        let b = auth.inspect("anything").await.unwrap();

        assert!(!a.is_anonymous());
        assert_ne!(a.id, b.id);
        assert_eq!(a.namespace, "go.micro");
    }

    #[tokio::test]
    async fn verify_allows_anonymous() {
        let auth = NoopAuth::new("go.micro");
        let resource = Resource::service("go.micro.web", "/", "go.micro");

        assert!(
            auth.verify(&Account::anonymous("go.micro"), &resource)
                .await
                .is_ok()
        );
    }
}
