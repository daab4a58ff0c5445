//! Maps a verification outcome to the gateway's terminal behaviour.
use url::form_urlencoded;

use crate::error::AppError;
use crate::services::auth::{Account, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Forbidden,
    Unauthorized,
    RedirectToLogin(String),
}

impl Decision {
    /// `path` is the original request path, sent back to the login page as
    /// `redirect_to`.
    pub fn from_verification(
        verified: &AuthResult<()>,
        account: &Account,
        login_url: Option<&str>,
        path: &str,
    ) -> Self {
        if verified.is_ok() {
            return Self::Allow;
        }

        if !account.is_anonymous() {
            return Self::Forbidden;
        }

        match login_url {
            Some(login_url) => Self::RedirectToLogin(login_redirect(login_url, path)),
            None => Self::Unauthorized,
        }
    }

    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Self::Allow => Ok(()),
            Self::Forbidden => Err(AppError::Forbidden),
            Self::Unauthorized => Err(AppError::Unauthorized),
            Self::RedirectToLogin(location) => Err(AppError::LoginRequired { location }),
        }
    }
}

fn login_redirect(login_url: &str, path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect_to", path)
        .finish();
    format!("{login_url}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::AuthError;

    fn denied() -> AuthResult<()> {
        Err(AuthError::Forbidden("no rule".to_owned()))
    }

    #[test]
    fn verified_requests_are_allowed_even_when_anonymous() {
        let decision =
            Decision::from_verification(&Ok(()), &Account::anonymous("go.micro"), None, "/");
        assert_eq!(decision, Decision::Allow);
    }

    #[test]
    fn identified_accounts_are_forbidden() {
        let decision = Decision::from_verification(
            &denied(),
            &Account::new("alice", "go.micro"),
            Some("/login"),
            "/users",
        );
        assert_eq!(decision, Decision::Forbidden);
    }

    #[test]
    fn anonymous_without_login_url_is_unauthorized() {
        let decision =
            Decision::from_verification(&denied(), &Account::anonymous("go.micro"), None, "/users");
        assert_eq!(decision, Decision::Unauthorized);
    }

    #[test]
    fn anonymous_with_login_url_is_redirected() {
        let decision = Decision::from_verification(
            &denied(),
            &Account::anonymous("go.micro"),
            Some("https://example.com/login"),
            "/users/42 a",
        );
        assert_eq!(
            decision,
            Decision::RedirectToLogin(
                "https://example.com/login?redirect_to=%2Fusers%2F42+a".to_owned()
            )
        );
    }

    #[test]
    fn into_result_maps_to_errors() {
        assert!(Decision::Allow.into_result().is_ok());
        assert!(matches!(
            Decision::Forbidden.into_result(),
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            Decision::Unauthorized.into_result(),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            Decision::RedirectToLogin("/login".to_owned()).into_result(),
            Err(AppError::LoginRequired { .. })
        ));
    }
}
