//! User and session types

use serde::{Deserialize, Serialize};

/// User role as the backend reports it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    #[serde(rename = "vendedor")]
    Seller,
    #[serde(rename = "admin")]
    Admin,
}

/// User information extracted from a login response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// An authenticated session: opaque bearer credential plus user payload.
///
/// Exactly one session exists at a time; logging in overwrites the slot,
/// logging out clears it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}
