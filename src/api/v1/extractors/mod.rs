pub mod endpoint;

pub use endpoint::ResolvedEndpoint;
