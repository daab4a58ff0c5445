/*
 * Responsibility
 * - load settings from the environment (.env supported)
 * - validate them (invalid values abort startup)
 * - hand the gateway its immutable GatewayConfig
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::middleware::auth::GatewayConfig;
use crate::services::auth::TokenMapping;
use crate::services::credentials::TOKEN_COOKIE_NAME;
use crate::services::namespace::{DEFAULT_NAMESPACE, DEFAULT_ROOT_DOMAIN, NamespaceMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
    Noop,
    Static,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub request_timeout: Duration,
    pub body_limit_bytes: usize,

    pub service_prefix: String,
    // Static namespace, or "domain" to derive it from the Host.
    pub namespace: String,
    pub root_domain: String,
    pub login_url: Option<String>,
    pub token_cookie: String,
    pub enforce_namespace: bool,

    pub auth_provider: AuthProvider,
    pub auth_tokens: Vec<TokenMapping>,
    pub auth_public: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECONDS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            ),
            None => Duration::from_secs(30),
        };

        let body_limit_bytes = match lookup("BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("BODY_LIMIT_BYTES"))?,
            None => 1024 * 1024,
        };

        let service_prefix = non_empty(lookup("SERVICE_PREFIX"))
            .unwrap_or_else(|| "go.micro.web".to_string());

        let namespace =
            non_empty(lookup("NAMESPACE")).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let root_domain =
            non_empty(lookup("ROOT_DOMAIN")).unwrap_or_else(|| DEFAULT_ROOT_DOMAIN.to_string());

        let login_url = non_empty(lookup("LOGIN_URL"));

        let token_cookie =
            non_empty(lookup("TOKEN_COOKIE")).unwrap_or_else(|| TOKEN_COOKIE_NAME.to_string());

        let enforce_namespace = match lookup("ENFORCE_NAMESPACE") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid("ENFORCE_NAMESPACE"))?,
            None => false,
        };

        let auth_provider = match lookup("AUTH_PROVIDER")
            .unwrap_or_else(|| "noop".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "noop" => AuthProvider::Noop,
            "static" => AuthProvider::Static,
            _ => return Err(ConfigError::Invalid("AUTH_PROVIDER")),
        };

        let auth_tokens = parse_token_mappings(
            &lookup("AUTH_TOKENS").unwrap_or_default(),
            &account_namespace(&namespace),
        )?;

        if auth_provider == AuthProvider::Static && auth_tokens.is_empty() {
            return Err(ConfigError::Missing("AUTH_TOKENS"));
        }

        let auth_public = lookup("AUTH_PUBLIC")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        Ok(Self {
            addr,
            app_env,
            request_timeout,
            body_limit_bytes,
            service_prefix,
            namespace,
            root_domain,
            login_url,
            token_cookie,
            enforce_namespace,
            auth_provider,
            auth_tokens,
            auth_public,
        })
    }

    pub fn namespace_mode(&self) -> NamespaceMode {
        NamespaceMode::from_setting(&self.namespace)
    }

    /// Namespace given to accounts that carry none of their own.
    pub fn default_account_namespace(&self) -> String {
        account_namespace(&self.namespace)
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            service_prefix: self.service_prefix.clone(),
            namespace: self.namespace_mode(),
            root_domain: self.root_domain.clone(),
            login_url: self.login_url.clone(),
            token_cookie: self.token_cookie.clone(),
            enforce_namespace: self.enforce_namespace,
        }
    }
}

fn account_namespace(setting: &str) -> String {
    match NamespaceMode::from_setting(setting) {
        NamespaceMode::Static(ns) => ns,
        NamespaceMode::Domain => DEFAULT_NAMESPACE.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses `token=account[@namespace]` entries separated by commas.
fn parse_token_mappings(raw: &str, default_ns: &str) -> Result<Vec<TokenMapping>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (token, identity) = entry
                .split_once('=')
                .ok_or(ConfigError::Invalid("AUTH_TOKENS"))?;
            let (account_id, namespace) = identity.split_once('@').unwrap_or((identity, default_ns));

            if token.is_empty() || account_id.is_empty() || namespace.is_empty() {
                return Err(ConfigError::Invalid("AUTH_TOKENS"));
            }

            Ok(TokenMapping {
                token: token.to_string(),
                account_id: account_id.to_string(),
                namespace: namespace.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.service_prefix, "go.micro.web");
        assert_eq!(config.namespace_mode(), NamespaceMode::Static("go.micro".to_string()));
        assert_eq!(config.root_domain, "micro.mu");
        assert_eq!(config.login_url, None);
        assert_eq!(config.token_cookie, "micro-token");
        assert!(!config.enforce_namespace);
        assert_eq!(config.auth_provider, AuthProvider::Noop);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn domain_mode_and_login_url() {
        let config = config(&[
            ("NAMESPACE", "domain"),
            ("LOGIN_URL", "https://example.com/login"),
            ("ENFORCE_NAMESPACE", "true"),
        ])
        .unwrap();

        let gateway = config.gateway_config();
        assert_eq!(gateway.namespace, NamespaceMode::Domain);
        assert_eq!(gateway.login_url.as_deref(), Some("https://example.com/login"));
        assert!(gateway.enforce_namespace);
        assert_eq!(config.default_account_namespace(), "go.micro");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(config(&[("PORT", "http")]).unwrap_err(), ConfigError::Invalid("PORT"));
        assert_eq!(
            config(&[("ENFORCE_NAMESPACE", "maybe")]).unwrap_err(),
            ConfigError::Invalid("ENFORCE_NAMESPACE")
        );
        assert_eq!(
            config(&[("AUTH_PROVIDER", "ldap")]).unwrap_err(),
            ConfigError::Invalid("AUTH_PROVIDER")
        );
    }

    #[test]
    fn static_provider_needs_tokens() {
        assert_eq!(
            config(&[("AUTH_PROVIDER", "static")]).unwrap_err(),
            ConfigError::Missing("AUTH_TOKENS")
        );
    }

    #[test]
    fn token_mappings_default_to_static_namespace() {
        let config = config(&[
            ("NAMESPACE", "acme"),
            ("AUTH_PROVIDER", "static"),
            ("AUTH_TOKENS", "t1=alice, t2=bob@globex"),
            ("AUTH_PUBLIC", "go.micro.web, go.micro.web.public*"),
        ])
        .unwrap();

        assert_eq!(
            config.auth_tokens,
            vec![
                TokenMapping {
                    token: "t1".to_string(),
                    account_id: "alice".to_string(),
                    namespace: "acme".to_string(),
                },
                TokenMapping {
                    token: "t2".to_string(),
                    account_id: "bob".to_string(),
                    namespace: "globex".to_string(),
                },
            ]
        );
        assert_eq!(config.auth_public, vec!["go.micro.web", "go.micro.web.public*"]);
    }

    #[test]
    fn malformed_token_mapping() {
        assert_eq!(
            parse_token_mappings("no-separator", "go.micro").unwrap_err(),
            ConfigError::Invalid("AUTH_TOKENS")
        );
        assert_eq!(
            parse_token_mappings("t1=", "go.micro").unwrap_err(),
            ConfigError::Invalid("AUTH_TOKENS")
        );
    }
}
