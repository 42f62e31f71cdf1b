use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{debug, error};

use crate::prelude::*;

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            // Every auth failure looks the same from the outside.
            Error::Auth(err) => {
                debug!("Rejecting request: {err}");
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }

            Error::InvalidEmail => (StatusCode::BAD_REQUEST, "Invalid email address"),

            Error::MailRejected(_) | Error::Http(_) => {
                error!("Mail delivery failed: {self}");
                (StatusCode::BAD_GATEWAY, "Mail delivery failed")
            }

            // Internal errors - hide details
            Error::Generic(_)
            | Error::IO(_)
            | Error::Json(_)
            | Error::Config(_)
            | Error::PasswordHash(_)
            | Error::AuthTokenCreation
            | Error::CtxMissing => {
                error!("Internal error: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::auth::error::AuthError;

    async fn render(err: Error) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_auth_failures_are_indistinguishable() {
        let expected = render(Error::Auth(AuthError::WrongCredentials)).await;
        assert_eq!(expected.0, StatusCode::UNAUTHORIZED);

        for err in [
            AuthError::MissingCredentials,
            AuthError::TokenMissing,
            AuthError::MalformedToken,
            AuthError::BadSignature,
            AuthError::InvalidPayload,
            AuthError::TokenExpired,
            AuthError::ApiKeyMissing,
            AuthError::ApiKeyMismatch,
            AuthError::NotConfigured,
            AuthError::ModeMismatch,
        ] {
            assert_eq!(render(Error::Auth(err)).await, expected);
        }
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let (status, body) = render(Error::Generic(String::from("db password=xyz"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("xyz"));
    }
}
