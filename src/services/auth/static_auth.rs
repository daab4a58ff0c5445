//! Auth backend backed by a fixed token table and a list of public resources.
//!
//! - Tokens map to accounts; empty or unknown tokens fail inspection.
//! - A resource whose name matches a public pattern is open to everyone,
//!   anonymous callers included. Patterns ending in `*` match by prefix.
//! - Any other resource requires an identified account from the resource's
//!   namespace.
use std::collections::HashMap;

use async_trait::async_trait;

use super::client::{Auth, AuthError, AuthResult};
use super::types::{Account, Resource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMapping {
    pub token: String,
    pub account_id: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    accounts: HashMap<String, Account>,
    public: Vec<String>,
}

impl StaticAuth {
    pub fn new(tokens: &[TokenMapping], public: Vec<String>) -> Self {
        let accounts = tokens
            .iter()
            .map(|m| {
                (
                    m.token.clone(),
                    Account::new(m.account_id.clone(), m.namespace.clone()),
                )
            })
            .collect();

        Self { accounts, public }
    }

    fn is_public(&self, resource: &Resource) -> bool {
        self.public
            .iter()
            .any(|pattern| pattern_matches(pattern, &resource.name))
    }
}

fn pattern_matches(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => pattern == name,
    }
}

#[async_trait]
impl Auth for StaticAuth {
    fn backend_name(&self) -> &'static str {
        "static"
    }

    async fn inspect(&self, token: &str) -> AuthResult<Account> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        self.accounts
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }

    async fn verify(&self, account: &Account, resource: &Resource) -> AuthResult<()> {
        if self.is_public(resource) {
            return Ok(());
        }

        if account.is_anonymous() {
            return Err(AuthError::Forbidden(format!(
                "{} requires an account",
                resource.name
            )));
        }

        if account.namespace != resource.namespace {
            return Err(AuthError::Forbidden(format!(
                "account {} is not a member of {}",
                account.id, resource.namespace
            )));
        }

        Ok(())
    }
}
