//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::{
    config::Config,
    constants::roles,
    db::repositories::{RoleRepository, UserRepository},
    error::{AppError, AppResult},
    identity::{IdentityProvider, SubjectClaims},
    models::User,
};

/// Legacy session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // firebase_uid
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register the subject behind a verified identity token.
    ///
    /// The token is the source of truth for uid and email; the request may
    /// only add a display name and an optional legacy password. Every new
    /// user starts with the default USER role.
    pub async fn register(
        pool: &PgPool,
        identity: &dyn IdentityProvider,
        id_token: &str,
        display_name: Option<&str>,
        password: Option<&str>,
    ) -> AppResult<(User, Vec<String>)> {
        let claims = identity.verify_token(id_token)?;

        let email = claims
            .email
            .as_deref()
            .ok_or_else(|| AppError::Validation("Identity token carries no email".to_string()))?;

        // Check if the subject is already registered
        if UserRepository::find_by_uid(pool, &claims.uid).await?.is_some() {
            return Err(AppError::AlreadyExists("User already registered".to_string()));
        }

        // Check if email is taken by another account
        if UserRepository::find_by_email(pool, email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let password_hash = match password {
            Some(p) => Some(Self::hash_password(p)?),
            None => None,
        };

        let display_name = display_name.or(claims.name.as_deref());

        let user = UserRepository::create(
            pool,
            &claims.uid,
            email,
            display_name,
            password_hash.as_deref(),
        )
        .await?;

        // Default role; created lazily if seeding has not run
        let role = RoleRepository::ensure(pool, roles::USER).await?;
        RoleRepository::assign(pool, &user.id, &role.id).await?;

        let role_names = RoleRepository::roles_of(pool, &user.id).await?;

        Ok((user, role_names))
    }

    /// Login with email and password (legacy credential path)
    pub async fn login(
        pool: &PgPool,
        config: &Config,
        email: &str,
        password: &str,
    ) -> AppResult<(User, Vec<String>, String, i64)> {
        let user = UserRepository::find_by_email(pool, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::AccountInactive);
        }

        // Firebase-only accounts have no stored hash
        let hash = user
            .password_hash
            .as_deref()
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let (token, expires_in) = Self::generate_session_token(&user, config)?;
        let role_names = RoleRepository::roles_of(pool, &user.id).await?;

        Ok((user, role_names, token, expires_in))
    }

    /// Verify an external identity token and report whether the subject is
    /// already registered.
    pub async fn verify_identity(
        pool: &PgPool,
        identity: &dyn IdentityProvider,
        id_token: &str,
    ) -> AppResult<(SubjectClaims, bool)> {
        let claims = identity.verify_token(id_token)?;
        let registered = UserRepository::find_by_uid(pool, &claims.uid).await?.is_some();

        Ok((claims, registered))
    }

    /// Verify a legacy session token and extract its claims
    pub fn verify_session_token(token: &str, secret: &str) -> AppResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate a legacy session token
    fn generate_session_token(user: &User, config: &Config) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.session.expiry_hours);
        let expires_in = config.session.expiry_hours * 3600;

        let claims = SessionClaims {
            sub: user.firebase_uid.clone(),
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.session.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DatabaseConfig, FirebaseConfig, ServerConfig, SessionConfig, StorageConfig,
    };
    use uuid::Uuid;

    fn test_config(expiry_hours: i64) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 1,
            },
            firebase: FirebaseConfig {
                project_id: "test-project".to_string(),
                jwks_path: "/tmp/jwks.json".into(),
            },
            session: SessionConfig {
                secret: "test-secret".to_string(),
                expiry_hours,
            },
            storage: StorageConfig {
                bucket: "test".to_string(),
                region: "us-east-1".to_string(),
                endpoint: None,
                access_key: None,
                secret_key: None,
            },
        }
    }

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            firebase_uid: "uid-123".to_string(),
            email: "user@example.com".to_string(),
            display_name: None,
            password_hash: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn session_token_round_trips() {
        let config = test_config(24);
        let user = test_user();

        let (token, expires_in) = AuthService::generate_session_token(&user, &config).unwrap();
        assert_eq!(expires_in, 24 * 3600);

        let claims = AuthService::verify_session_token(&token, &config.session.secret).unwrap();
        assert_eq!(claims.sub, "uid-123");
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn expired_session_token_is_rejected() {
        let config = test_config(-1);
        let user = test_user();

        let (token, _) = AuthService::generate_session_token(&user, &config).unwrap();
        let err = AuthService::verify_session_token(&token, &config.session.secret).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }

    #[test]
    fn session_token_signed_with_other_secret_is_rejected() {
        let config = test_config(24);
        let user = test_user();

        let (token, _) = AuthService::generate_session_token(&user, &config).unwrap();
        let err = AuthService::verify_session_token(&token, "different-secret").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn password_hash_verifies_only_the_original() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong", &hash).unwrap());
    }
}
