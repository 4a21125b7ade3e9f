//! Auth request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Register request: the identity token is the source of truth for uid and
/// email; a password is only set for the legacy sign-in path.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub id_token: String,

    #[validate(length(max = 100))]
    pub display_name: Option<String>,

    #[validate(length(min = MIN_PASSWORD_LENGTH, max = MAX_PASSWORD_LENGTH))]
    pub password: Option<String>,
}

/// Legacy email/password login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Profile update request for the current subject
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
}

/// Raw identity token verification request
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1))]
    pub id_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_fails_validation() {
        let req = RegisterRequest {
            id_token: "token".to_string(),
            display_name: None,
            password: Some("short".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn password_within_bounds_passes() {
        let req = RegisterRequest {
            id_token: "token".to_string(),
            display_name: None,
            password: Some("long enough secret".to_string()),
        };
        assert!(req.validate().is_ok());
    }
}
