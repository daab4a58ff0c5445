pub mod client;
pub mod factory;
pub mod noop;
pub mod static_auth;
pub mod types;

pub use client::{Auth, AuthError, AuthResult};
pub use factory::build_auth;
pub use noop::NoopAuth;
pub use static_auth::{StaticAuth, TokenMapping};
pub use types::{Account, RESOURCE_TYPE_SERVICE, Resource};
