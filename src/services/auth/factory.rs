//! Factory: build the `Auth` backend from application `Config`.
use std::sync::Arc;

use crate::config::{AuthProvider, Config};
use crate::services::auth::{Auth, NoopAuth, StaticAuth};

pub fn build_auth(config: &Config) -> Arc<dyn Auth> {
    match config.auth_provider {
        AuthProvider::Noop => Arc::new(NoopAuth::new(config.default_account_namespace())),
        AuthProvider::Static => Arc::new(StaticAuth::new(
            &config.auth_tokens,
            config.auth_public.clone(),
        )),
    }
}
