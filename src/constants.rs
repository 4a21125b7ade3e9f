//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default legacy session token expiry in hours
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Firebase token issuer prefix; the project id is appended
pub const FIREBASE_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Minimum password length (legacy credential path)
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length (legacy credential path)
pub const MAX_PASSWORD_LENGTH: u64 = 128;

// =============================================================================
// USER ROLES
// =============================================================================

/// Well-known role tags.
///
/// Roles are open strings, not a closed enum: any tag can be created on first
/// assignment. The constants below are the tags the policy evaluator and the
/// startup seeding know about.
pub mod roles {
    pub const USER: &str = "USER";
    pub const ADMIN: &str = "ADMIN";
    pub const PROBLEM_SETTER: &str = "PROBLEM_SETTER";
    pub const TESTER: &str = "TESTER";
    pub const CONTEST_MANAGER: &str = "CONTEST_MANAGER";
    pub const MODERATOR: &str = "MODERATOR";

    /// Roles seeded at startup
    pub const SEEDED: &[&str] = &[USER, ADMIN, PROBLEM_SETTER, TESTER, CONTEST_MANAGER, MODERATOR];

    /// Roles whose holders may see hidden test cases
    pub const PRIVILEGED: &[&str] = &[ADMIN, TESTER, PROBLEM_SETTER];
}

// =============================================================================
// PROBLEM LIMITS
// =============================================================================

/// Minimum execution time limit in milliseconds
pub const MIN_TIME_LIMIT_MS: i32 = 100;

/// Maximum execution time limit in milliseconds
pub const MAX_TIME_LIMIT_MS: i32 = 30_000;

/// Minimum memory limit in megabytes
pub const MIN_MEMORY_LIMIT_MB: i32 = 16;

/// Maximum memory limit in megabytes
pub const MAX_MEMORY_LIMIT_MB: i32 = 1024;

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum problem description length
pub const MAX_PROBLEM_DESCRIPTION_LENGTH: u64 = 65535;

// =============================================================================
// TEST CASE STORAGE
// =============================================================================

/// Object key prefix for test case content
pub const TEST_CASE_KEY_PREFIX: &str = "testcases";

/// File name of the input blob within a test case's key space
pub const INPUT_FILE_NAME: &str = "input.txt";

/// File name of the expected-output blob within a test case's key space
pub const OUTPUT_FILE_NAME: &str = "output.txt";

/// Maximum test case name length
pub const MAX_TEST_CASE_NAME_LENGTH: u64 = 128;

/// Maximum test case input size in bytes (10 MB)
pub const MAX_TEST_CASE_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Maximum test case output size in bytes (10 MB)
pub const MAX_TEST_CASE_OUTPUT_SIZE: usize = 10 * 1024 * 1024;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
