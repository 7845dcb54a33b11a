//! Catalog access error types.

use thiserror::Error;

/// Errors from promotion-catalog or entitlement lookups.
///
/// These never reach the pricing engine; the quote layer degrades to
/// undiscounted prices and reports the failure alongside the result.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The promotion catalog could not be reached.
    #[error("Promotion catalog unavailable: {0}")]
    Unavailable(String),

    /// Entitlement lookup failed for a user.
    #[error("Entitlement lookup failed for {user}: {reason}")]
    Entitlements { user: String, reason: String },

    /// The catalog payload could not be decoded.
    #[error("Failed to decode catalog payload: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}
