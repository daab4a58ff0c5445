//! Tenant namespace derivation.
//!
//! A gateway either serves one fixed namespace or derives it from the domain
//! the request was sent to. In the latter case the subdomain is read
//! most-general-first, so `team.project.example.com` maps to `project.team`.

use std::net::IpAddr;

use axum::http::{HeaderMap, Uri, header, uri::Authority};
use thiserror::Error;

/// Namespace used whenever no tenant can be derived.
pub const DEFAULT_NAMESPACE: &str = "go.micro";

/// Configured namespace value that switches on domain-derived namespaces.
pub const DOMAIN_MODE: &str = "domain";

/// Root domain whose hosts always map to [`DEFAULT_NAMESPACE`].
pub const DEFAULT_ROOT_DOMAIN: &str = "micro.mu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceMode {
    /// Every request belongs to the same namespace.
    Static(String),
    /// The namespace is read from the request's subdomain.
    Domain,
}

impl NamespaceMode {
    pub fn from_setting(value: &str) -> Self {
        if value == DOMAIN_MODE {
            Self::Domain
        } else {
            Self::Static(value.to_owned())
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("empty label in domain {0:?}")]
    EmptyLabel(String),
    #[error("cannot derive registrable domain for {0:?}")]
    NoRegistrableDomain(String),
}

/// Public-suffix aware "top level domain plus one" of `host`.
///
/// Hosts with empty labels (leading, trailing or doubled dots) are rejected
/// rather than normalised.
pub fn registrable_domain(host: &str) -> Result<&str, DomainError> {
    if host.is_empty() || host.starts_with('.') || host.ends_with('.') || host.contains("..") {
        return Err(DomainError::EmptyLabel(host.to_owned()));
    }

    psl::domain_str(host).ok_or_else(|| DomainError::NoRegistrableDomain(host.to_owned()))
}

/// Host the request was addressed to, without port or IPv6 brackets.
///
/// Absolute-form URIs win over the `Host` header. A `Host` value without a
/// port is used whole; an unparseable one yields an empty host.
pub fn request_host(uri: &Uri, headers: &HeaderMap) -> String {
    if let Some(host) = uri.host() {
        return trim_brackets(host).to_owned();
    }

    let Some(value) = headers.get(header::HOST).and_then(|v| v.to_str().ok()) else {
        return String::new();
    };

    match value.parse::<Authority>() {
        Ok(authority) => trim_brackets(authority.host()).to_owned(),
        Err(_) => String::new(),
    }
}

fn trim_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

#[derive(Debug, Clone)]
pub struct NamespaceResolver {
    mode: NamespaceMode,
    root_domain: String,
}

impl NamespaceResolver {
    pub fn new(mode: NamespaceMode, root_domain: impl Into<String>) -> Self {
        Self {
            mode,
            root_domain: root_domain.into(),
        }
    }

    pub fn namespace_for(&self, uri: &Uri, headers: &HeaderMap) -> String {
        match &self.mode {
            NamespaceMode::Static(namespace) => namespace.clone(),
            NamespaceMode::Domain => self.namespace_for_host(&request_host(uri, headers)),
        }
    }

    pub fn namespace_for_host(&self, host: &str) -> String {
        if host.parse::<IpAddr>().is_ok() || host == "localhost" || host == "127.0.0.1" {
            return DEFAULT_NAMESPACE.to_owned();
        }

        let domain = match registrable_domain(host) {
            Ok(domain) => domain,
            Err(err) => {
                tracing::debug!(host, error = %err, "unable to extract domain from host");
                return DEFAULT_NAMESPACE.to_owned();
            }
        };

        if domain == host || domain == self.root_domain {
            return DEFAULT_NAMESPACE.to_owned();
        }

        let suffix = format!(".{domain}");
        let subdomain = host.strip_suffix(suffix.as_str()).unwrap_or(host);

        let mut components: Vec<&str> = subdomain.split('.').collect();
        components.reverse();
        components.join(".")
    }
}
