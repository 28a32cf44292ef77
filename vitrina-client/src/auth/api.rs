//! Authentication API surface
//!
//! Endpoints: `POST /auth/login`, `POST /auth/forgot-password`,
//! `POST /auth/reset-password`. All requests are JSON; the bearer header is
//! attached by [`HttpClient`] when a session exists.

use super::normalize::{MSG_CONNECTION, classify_failure, normalize_login};
use super::AuthError;
use crate::HttpClient;
use serde::Serialize;
use shared::models::Session;

/// Fixed wording for a reset link missing its token or email
const MSG_RESET_LINK_INCOMPLETE: &str =
    "Falta el token o el correo de recuperación. Usa el link que te enviamos por correo.";

const MSG_EMAIL_REQUIRED: &str = "El correo es obligatorio";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    email: &'a str,
    #[serde(rename = "newPassword")]
    new_password: &'a str,
}

/// Authentication API client
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Log in and normalize whatever the backend answers into a [`Session`].
    ///
    /// The caller persists the session; this method only classifies.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let raw = match self
            .http
            .post_json("/auth/login", &LoginRequest { email, password })
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "Login request failed before a response");
                return Err(AuthError::Connection(MSG_CONNECTION.to_string()));
            }
        };

        normalize_login(email, &raw)
    }

    /// Request a password-recovery link for the given email
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::Validation(MSG_EMAIL_REQUIRED.to_string()));
        }

        let raw = match self
            .http
            .post_json("/auth/forgot-password", &ForgotPasswordRequest { email })
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "Forgot-password request failed before a response");
                return Err(AuthError::Connection(MSG_CONNECTION.to_string()));
            }
        };

        if raw.status.is_success() {
            Ok(())
        } else {
            Err(classify_failure(raw.status, &raw.body))
        }
    }

    /// Reset the password using the token and email from the recovery link
    pub async fn reset_password(
        &self,
        token: &str,
        email: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if token.is_empty() || email.is_empty() {
            return Err(AuthError::Validation(MSG_RESET_LINK_INCOMPLETE.to_string()));
        }

        let raw = match self
            .http
            .post_json(
                "/auth/reset-password",
                &ResetPasswordRequest {
                    token,
                    email,
                    new_password,
                },
            )
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "Reset-password request failed before a response");
                return Err(AuthError::Connection(MSG_CONNECTION.to_string()));
            }
        };

        if raw.status.is_success() {
            Ok(())
        } else {
            Err(classify_failure(raw.status, &raw.body))
        }
    }
}
