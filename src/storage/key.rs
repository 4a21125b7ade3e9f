//! Structured content keys
//!
//! Every test case owns exactly two blobs, addressed as
//! `testcases/{problem_id}/{test_case_id}/{file_name}`.

use std::fmt;

use uuid::Uuid;

use crate::constants::{INPUT_FILE_NAME, OUTPUT_FILE_NAME, TEST_CASE_KEY_PREFIX};

/// Object key for a single test case blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    problem_id: Uuid,
    test_case_id: Uuid,
    file_name: &'static str,
}

impl ContentKey {
    /// Key of the input blob for a test case.
    pub fn input(problem_id: Uuid, test_case_id: Uuid) -> Self {
        Self {
            problem_id,
            test_case_id,
            file_name: INPUT_FILE_NAME,
        }
    }

    /// Key of the expected-output blob for a test case.
    pub fn output(problem_id: Uuid, test_case_id: Uuid) -> Self {
        Self {
            problem_id,
            test_case_id,
            file_name: OUTPUT_FILE_NAME,
        }
    }

    /// Both keys owned by a test case, in (input, output) order.
    pub fn pair(problem_id: Uuid, test_case_id: Uuid) -> (Self, Self) {
        (
            Self::input(problem_id, test_case_id),
            Self::output(problem_id, test_case_id),
        )
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            TEST_CASE_KEY_PREFIX, self.problem_id, self.test_case_id, self.file_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_layout_is_prefix_problem_testcase_file() {
        let problem = Uuid::new_v4();
        let tc = Uuid::new_v4();
        let key = ContentKey::input(problem, tc);
        assert_eq!(key.to_string(), format!("testcases/{problem}/{tc}/input.txt"));
    }

    #[test]
    fn pair_yields_input_then_output() {
        let problem = Uuid::new_v4();
        let tc = Uuid::new_v4();
        let (input, output) = ContentKey::pair(problem, tc);
        assert_eq!(input.file_name(), "input.txt");
        assert_eq!(output.file_name(), "output.txt");
        assert_ne!(input, output);
    }

    #[test]
    fn keys_for_different_test_cases_never_collide() {
        let problem = Uuid::new_v4();
        let a = ContentKey::input(problem, Uuid::new_v4());
        let b = ContentKey::input(problem, Uuid::new_v4());
        assert_ne!(a.to_string(), b.to_string());
    }
}
