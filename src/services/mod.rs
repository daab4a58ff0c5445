pub mod auth;
pub mod credentials;
pub mod namespace;
pub mod resolver;
