//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod problem_repo;
pub mod role_repo;
pub mod test_case_repo;
pub mod user_repo;

pub use problem_repo::ProblemRepository;
pub use role_repo::RoleRepository;
pub use test_case_repo::TestCaseRepository;
pub use user_repo::UserRepository;
