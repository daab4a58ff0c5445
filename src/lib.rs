//! Request-authorization gateway.
//!
//! Every inbound request passes through [`middleware::auth`], which derives the
//! tenant namespace, extracts a bearer credential, resolves the addressed
//! endpoint and asks the injected [`services::auth::Auth`] whether the caller
//! may proceed.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
