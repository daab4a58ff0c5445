/*!
 * Resolved endpoint of the in-flight request
 *
 * Responsibility:
 * - typed side channel from the gateway to handlers (no re-resolution downstream)
 * - attach/get operate on the request's extensions; the stored type is private
 *
 * Public API:
 * - attach / get
 * - ResolvedEndpoint (axum extractor)
 */

mod core;

use axum::http::Extensions;

use crate::services::resolver::Endpoint;

pub use self::core::ResolvedEndpoint;

#[derive(Debug, Clone)]
struct Attached(Endpoint);

/// Stores the endpoint the gateway resolved for this request.
pub fn attach(extensions: &mut Extensions, endpoint: Endpoint) {
    extensions.insert(Attached(endpoint));
}

/// Endpoint resolved for this request, if the resolver produced one.
pub fn get(extensions: &Extensions) -> Option<&Endpoint> {
    extensions.get::<Attached>().map(|attached| &attached.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_then_get() {
        let mut extensions = Extensions::new();
        assert!(get(&extensions).is_none());

        let endpoint = Endpoint {
            name: "users".to_owned(),
            host: "dev.example.com".to_owned(),
            method: "GET".to_owned(),
            path: "/users".to_owned(),
        };
        attach(&mut extensions, endpoint.clone());

        assert_eq!(get(&extensions), Some(&endpoint));
    }

    #[test]
    fn plain_endpoint_extension_is_not_visible() {
        let mut extensions = Extensions::new();
        extensions.insert(Endpoint::passthrough("/favicon.ico"));

        assert!(get(&extensions).is_none());
    }
}
