//! Identity resolution
//!
//! Maps an external bearer token to a stable subject identifier. Token
//! verification against the identity provider is an external concern; the
//! rest of the application only sees [`SubjectClaims`] coming out of an
//! [`IdentityProvider`].

mod firebase;

pub use firebase::FirebaseIdentity;

use serde::{Deserialize, Serialize};

/// Claims extracted from a verified identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectClaims {
    /// Stable external subject identifier (Firebase UID).
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub name: Option<String>,
}

/// Verifies bearer tokens issued by the external identity provider.
pub trait IdentityProvider: Send + Sync {
    /// Verify a raw ID token and return the subject's claims.
    fn verify_token(&self, token: &str) -> crate::error::AppResult<SubjectClaims>;
}
