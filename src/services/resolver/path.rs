//! Resolver that names the service after the first path segment.
use axum::{extract::Request, http::header};

use super::client::{Endpoint, ResolveError, ResolveResult, Resolver, request_path};

/// `/users/42` resolves to service `users`, method = HTTP verb.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl PathResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for PathResolver {
    fn name(&self) -> &'static str {
        "path"
    }

    fn resolve(&self, req: &Request) -> ResolveResult<Endpoint> {
        let decoded = request_path(req.uri());
        let path = decoded.as_ref();
        if path == "/" {
            return Err(ResolveError::NotFound);
        }

        let rest = path.strip_prefix('/').ok_or(ResolveError::InvalidPath)?;
        let name = rest.split('/').next().unwrap_or_default();
        if name.is_empty() {
            return Err(ResolveError::InvalidPath);
        }

        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| req.uri().authority().map(|a| a.as_str()))
            .unwrap_or_default();

        Ok(Endpoint {
            name: name.to_owned(),
            host: host.to_owned(),
            method: req.method().to_string(),
            path: path.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{self, Method};

    fn request(method: Method, uri: &str) -> Request {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "dev.example.com")
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn first_segment_names_the_service() {
        let endpoint = PathResolver::new()
            .resolve(&request(Method::POST, "/users/42/profile"))
            .unwrap();

        assert_eq!(
            endpoint,
            Endpoint {
                name: "users".to_owned(),
                host: "dev.example.com".to_owned(),
                method: "POST".to_owned(),
                path: "/users/42/profile".to_owned(),
            }
        );
    }

    #[test]
    fn encoded_path_resolves_to_decoded_service() {
        let endpoint = PathResolver::new()
            .resolve(&request(Method::GET, "/%61dmin/a%20b"))
            .unwrap();

        assert_eq!(endpoint.name, "admin");
        assert_eq!(endpoint.path, "/admin/a b");
    }

    #[test]
    fn root_is_not_found() {
        let err = PathResolver::new()
            .resolve(&request(Method::GET, "/"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));
        assert!(err.is_soft());
    }

    #[test]
    fn asterisk_form_is_invalid() {
        let err = PathResolver::new()
            .resolve(&request(Method::OPTIONS, "*"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPath));
    }

    #[test]
    fn internal_errors_are_not_soft() {
        assert!(!ResolveError::Internal("registry down".to_owned()).is_soft());
    }
}
