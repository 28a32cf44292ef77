//! Shared types for the Vitrina field-sales suite
//!
//! Common types used across the client and application crates: domain
//! models, the unified error system, and id/time utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
