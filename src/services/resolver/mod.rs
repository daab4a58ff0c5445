pub mod client;
pub mod path;

pub use client::{Endpoint, ResolveError, ResolveResult, Resolver, request_path};
pub use path::PathResolver;
