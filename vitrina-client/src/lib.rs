//! HTTP client for the Vitrina backend
//!
//! Talks to the remote authentication API, absorbs its loosely-typed
//! response shapes into one consistent [`shared::models::Session`], and
//! keeps the single persisted session slot.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use auth::{AuthApi, AuthError};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, RawResponse};
pub use session::{SessionError, SessionStore};
