//! Login response normalization
//!
//! The backend does not honor a single response contract: successes arrive
//! with any of three token field names and two user field names, failures
//! arrive as assorted status/message/code combinations, and one deployment
//! answers 401 while still carrying the credential. This module maps all of
//! that onto one [`Session`] shape or one [`AuthError`] classification,
//! applied as an ordered ladder where the first matching rule wins.

use super::AuthError;
use crate::http::RawResponse;
use http::StatusCode;
use serde_json::Value;
use shared::models::{Session, UserInfo};

// Fixed user-facing messages; backend wording is replaced wholesale except
// where a rule explicitly passes it through.
pub const MSG_CONNECTION: &str = "Error de conexión. Verifica tu conexión a internet.";
pub const MSG_NOT_REGISTERED: &str = "Este email no está registrado en el sistema";
pub const MSG_BAD_CREDENTIALS: &str = "Email o contraseña incorrectos";
pub const MSG_BAD_CREDENTIALS_GENERIC: &str = "Credenciales incorrectas";
pub const MSG_UNAUTHORIZED: &str = "No autorizado";
pub const MSG_TOKEN_MISSING: &str = "Token no recibido del servidor";
pub const MSG_SERVER_ERROR: &str = "Error interno del servidor";
pub const MSG_GENERIC: &str = "Error en la solicitud";

const DEFAULT_USER_NAME: &str = "Usuario";

/// Token field names, in extraction priority order
const TOKEN_FIELDS: &[&str] = &["token", "accessToken", "jwt"];

/// Message field names, in extraction priority order
const MESSAGE_FIELDS: &[&str] = &["message", "error", "errorMessage", "detail"];

/// Phrases that mean the email has no account (locale-mixed; the backends
/// behind this API answer in either language)
const NOT_REGISTERED_PHRASES: &[&str] = &[
    "no encontrado",
    "not found",
    "no existe",
    "no registrado",
    "usuario no encontrado",
    "user not found",
];
const NOT_REGISTERED_CODES: &[&str] = &["USER_NOT_FOUND", "NOT_FOUND"];

/// Phrases that mean the credential pair was rejected
const BAD_CREDENTIAL_PHRASES: &[&str] = &[
    "incorrect",
    "invalid",
    "wrong",
    "credenciales",
    "contraseña",
    "password",
];
const BAD_CREDENTIAL_CODES: &[&str] = &["INVALID_CREDENTIALS", "UNAUTHORIZED"];

/// A rejected-credential message is passed through verbatim only when it
/// already names the email/contraseña pair; anything vaguer gets the fixed
/// wording so the user always sees which inputs to fix.
const PASSTHROUGH_KEYWORDS: &[&str] = &["email", "contraseña", "credencial"];

/// Normalize a decoded login response into a session or a classification.
///
/// Transport failures never reach this function; the caller maps them to
/// [`AuthError::Connection`] before a response exists to normalize.
pub fn normalize_login(email: &str, raw: &RawResponse) -> Result<Session, AuthError> {
    if !raw.status.is_success() {
        // Some backends misuse 401 as an informational status and still
        // include the credential; any such payload is a success shape.
        if raw.status == StatusCode::UNAUTHORIZED && has_credential_material(&raw.body) {
            return extract_session(email, &raw.body);
        }
        return Err(classify_failure(raw.status, &raw.body));
    }

    extract_session(email, &raw.body)
}

/// Classify a non-success response into the error taxonomy.
///
/// Also used for the forgot/reset flows, which share the backend's loose
/// failure shapes but never carry credentials.
pub fn classify_failure(status: StatusCode, body: &Value) -> AuthError {
    let message = body_message(body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| MSG_GENERIC.to_string());
    let lower = message.to_lowercase();
    let code = body_error_code(body);

    if status == StatusCode::NOT_FOUND
        || contains_any(&lower, NOT_REGISTERED_PHRASES)
        || NOT_REGISTERED_CODES.iter().any(|c| code.contains(c))
    {
        return AuthError::UserNotRegistered(MSG_NOT_REGISTERED.to_string());
    }

    if status == StatusCode::UNAUTHORIZED
        || contains_any(&lower, BAD_CREDENTIAL_PHRASES)
        || BAD_CREDENTIAL_CODES.iter().any(|c| code.contains(c))
    {
        let msg = if contains_any(&lower, PASSTHROUGH_KEYWORDS) {
            message
        } else {
            MSG_BAD_CREDENTIALS.to_string()
        };
        return AuthError::InvalidCredentials(msg);
    }

    if status == StatusCode::UNAUTHORIZED {
        return AuthError::Unauthorized(MSG_UNAUTHORIZED.to_string());
    }

    let msg = match body_message(body) {
        Some(m) => m,
        None if status == StatusCode::INTERNAL_SERVER_ERROR => MSG_SERVER_ERROR.to_string(),
        None => message,
    };
    AuthError::Server(msg)
}

/// Extract a session from a success-shaped body.
///
/// Field priority: token from `token`/`accessToken`/`jwt`, user payload
/// from `user`/`data`. A missing user name is filled from the local part
/// of the email address.
fn extract_session(email: &str, body: &Value) -> Result<Session, AuthError> {
    // An explicit failure marker inside a success-shaped body
    let explicit_error = body.get("error").is_some_and(|v| !v.is_null());
    if body.get("success").and_then(Value::as_bool) == Some(false) || explicit_error {
        let msg =
            body_message(body).unwrap_or_else(|| MSG_BAD_CREDENTIALS_GENERIC.to_string());
        return Err(AuthError::InvalidCredentials(msg));
    }

    let token = string_field(body, TOKEN_FIELDS);
    let Some(token) = token else {
        if body.get("success").and_then(Value::as_bool) == Some(true) {
            return Err(AuthError::Server(MSG_TOKEN_MISSING.to_string()));
        }
        let msg =
            body_message(body).unwrap_or_else(|| MSG_BAD_CREDENTIALS_GENERIC.to_string());
        return Err(AuthError::InvalidCredentials(msg));
    };

    let mut user = body
        .get("user")
        .or_else(|| body.get("data"))
        .and_then(|v| serde_json::from_value::<UserInfo>(v.clone()).ok())
        .unwrap_or_default();

    if user.email.is_empty() {
        user.email = email.to_string();
    }
    if user.id.is_empty() {
        user.id = user.email.clone();
    }
    if user.name.is_empty() {
        let local = email_local_part(&user.email);
        user.name = if local.is_empty() {
            DEFAULT_USER_NAME.to_string()
        } else {
            local.to_string()
        };
    }

    tracing::debug!(email = %user.email, "Login response normalized");
    Ok(Session {
        token: token.to_string(),
        user,
    })
}

/// Whether an error-status body still carries credential material
fn has_credential_material(body: &Value) -> bool {
    string_field(body, TOKEN_FIELDS).is_some()
        || body.get("user").is_some()
        || body.get("data").is_some()
}

/// First non-empty string among the given fields
fn string_field<'a>(body: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| body.get(*f).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Backend message, if the body carries one
fn body_message(body: &Value) -> Option<String> {
    string_field(body, MESSAGE_FIELDS).map(str::to_string)
}

/// Backend error code field (`code` or `errorCode`), empty when absent
fn body_error_code(body: &Value) -> String {
    string_field(body, &["code", "errorCode"])
        .unwrap_or_default()
        .to_string()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or_default()
}
