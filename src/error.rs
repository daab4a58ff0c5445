/*
 * Responsibility
 * - terminal responses the gateway emits instead of forwarding a request
 * - IntoResponse impl (status + plain-text body, or a login redirect)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::services::resolver::ResolveError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Forbidden request")]
    Forbidden,
    #[error("Forbidden namespace")]
    ForbiddenNamespace,
    #[error("unauthorized request")]
    Unauthorized,
    #[error("login required")]
    LoginRequired { location: String },
    #[error(transparent)]
    Resolver(#[from] ResolveError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Forbidden | AppError::ForbiddenNamespace => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::LoginRequired { location } => {
                return Redirect::temporary(location).into_response();
            }
            AppError::Resolver(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn statuses() {
        assert_eq!(AppError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::ForbiddenNamespace.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(ResolveError::Internal("registry down".to_owned()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn login_redirect_is_temporary() {
        let response = AppError::LoginRequired {
            location: "/login?redirect_to=%2Fusers".to_owned(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login?redirect_to=%2Fusers"
        );
    }
}
