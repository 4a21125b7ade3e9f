//! Firebase ID token verification
//!
//! Firebase ID tokens are RS256 JWTs signed by Google's token-signing keys.
//! Deployments provide those keys as a JWKS file on disk (refreshed out of
//! band); the verifier picks the key matching the token's `kid` header and
//! checks signature, issuer, and audience.

use std::collections::HashMap;
use std::path::Path;

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::{
    config::FirebaseConfig,
    constants::FIREBASE_ISSUER_PREFIX,
    error::{AppError, AppResult},
};

use super::{IdentityProvider, SubjectClaims};

/// Raw claims of a Firebase ID token.
#[derive(Debug, Deserialize)]
struct FirebaseTokenClaims {
    sub: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    name: Option<String>,
}

/// One key of a JWKS document.
#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Firebase-backed identity provider.
pub struct FirebaseIdentity {
    keys: HashMap<String, DecodingKey>,
    validation: Validation,
}

impl FirebaseIdentity {
    /// Load the signing key set and build the expected validation rules.
    pub fn from_config(config: &FirebaseConfig) -> AppResult<Self> {
        let keys = Self::load_jwks(&config.jwks_path)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&config.project_id]);
        validation.set_issuer(&[format!("{FIREBASE_ISSUER_PREFIX}{}", config.project_id)]);

        Ok(Self { keys, validation })
    }

    fn load_jwks(path: &Path) -> AppResult<HashMap<String, DecodingKey>> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("cannot read JWKS file {}: {e}", path.display()))
        })?;
        let jwks: JwkSet = serde_json::from_str(&raw)
            .map_err(|e| AppError::Configuration(format!("malformed JWKS file: {e}")))?;

        let mut keys = HashMap::new();
        for jwk in jwks.keys {
            let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
                .map_err(|e| AppError::Configuration(format!("invalid JWK {}: {e}", jwk.kid)))?;
            keys.insert(jwk.kid, key);
        }

        if keys.is_empty() {
            return Err(AppError::Configuration("JWKS file holds no keys".to_string()));
        }

        Ok(keys)
    }
}

impl IdentityProvider for FirebaseIdentity {
    fn verify_token(&self, token: &str) -> AppResult<SubjectClaims> {
        let header = decode_header(token)?;
        let kid = header.kid.ok_or(AppError::InvalidToken)?;
        let key = self.keys.get(&kid).ok_or(AppError::InvalidToken)?;

        let data = decode::<FirebaseTokenClaims>(token, key, &self.validation)?;

        Ok(SubjectClaims {
            uid: data.claims.sub,
            email: data.claims.email,
            email_verified: data.claims.email_verified,
            name: data.claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn jwks_file_with_no_keys_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"keys": []}}"#).unwrap();

        let err = FirebaseIdentity::load_jwks(file.path()).err().unwrap();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn malformed_jwks_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = FirebaseIdentity::load_jwks(file.path()).err().unwrap();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
