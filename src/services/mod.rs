//! Business logic services

pub mod auth_service;
pub mod problem_service;
pub mod test_case_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use problem_service::ProblemService;
pub use test_case_service::TestCaseService;
pub use user_service::UserService;
