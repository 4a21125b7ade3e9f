//! Access policy evaluator
//!
//! Pure decision functions for who may view or mutate problems, test cases,
//! and role assignments. No I/O, no side effects: callers load the subject's
//! role set and the resource's ownership/visibility attributes and translate
//! a `false` into an authorization-denied outcome at the boundary.

use uuid::Uuid;

use crate::constants::roles;

/// Check whether a role set contains a given tag
fn has_role(subject_roles: &[String], tag: &str) -> bool {
    subject_roles.iter().any(|r| r == tag)
}

/// Check whether a role set carries any tag that may see hidden test cases
fn is_privileged(subject_roles: &[String]) -> bool {
    subject_roles
        .iter()
        .any(|r| roles::PRIVILEGED.contains(&r.as_str()))
}

/// True if the subject may mutate a problem: the subject owns it or holds
/// the admin tag. An ownerless (orphaned) problem is manageable only by
/// admins.
pub fn can_manage_problem(
    owner: Option<&Uuid>,
    subject_id: &Uuid,
    subject_roles: &[String],
) -> bool {
    if has_role(subject_roles, roles::ADMIN) {
        return true;
    }
    owner.is_some_and(|o| o == subject_id)
}

/// True if the subject may mutate test cases under a problem: problem
/// management standing, or the tester tag.
pub fn can_manage_test_cases(
    problem_owner: Option<&Uuid>,
    subject_id: &Uuid,
    subject_roles: &[String],
) -> bool {
    can_manage_problem(problem_owner, subject_id, subject_roles)
        || has_role(subject_roles, roles::TESTER)
}

/// True if the subject may view a problem: management standing, or the
/// problem is public.
pub fn can_view_problem(
    is_public: bool,
    owner: Option<&Uuid>,
    subject_id: &Uuid,
    subject_roles: &[String],
) -> bool {
    can_manage_problem(owner, subject_id, subject_roles) || is_public
}

/// True if the subject may view the test cases of a problem at all.
///
/// Managers always may; everyone else only for public problems, and then
/// restricted to non-hidden items (see [`test_case_visible`]).
pub fn can_view_test_cases(
    problem_is_public: bool,
    problem_owner: Option<&Uuid>,
    subject_id: &Uuid,
    subject_roles: &[String],
) -> bool {
    can_manage_test_cases(problem_owner, subject_id, subject_roles) || problem_is_public
}

/// Per-item visibility inside a test case listing.
///
/// Sample and hidden are independent flags checked in that priority order:
/// a sample test case is always visible regardless of its hidden flag, and
/// non-privileged viewers never see hidden non-sample items.
pub fn test_case_visible(is_hidden: bool, is_sample: bool, viewer_is_privileged: bool) -> bool {
    if is_sample {
        return true;
    }
    viewer_is_privileged || !is_hidden
}

/// Whether the stored input/output content may be included in a response.
/// Sample content is readable by anyone who can see the item; otherwise
/// management standing is required.
pub fn content_visible(is_sample: bool, can_manage: bool) -> bool {
    is_sample || can_manage
}

/// Whether the viewer's role set grants hidden-test-case visibility.
pub fn viewer_is_privileged(subject_roles: &[String]) -> bool {
    is_privileged(subject_roles)
}

/// True if removing `role` from a subject is permitted given how many
/// *other* subjects still hold the admin tag. Removing the admin tag from
/// the last remaining admin is refused to prevent lockout.
pub fn can_remove_role(role: &str, other_admins: i64) -> bool {
    role != roles::ADMIN || other_admins > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles_of(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn owner_can_manage_problem() {
        let owner = Uuid::new_v4();
        assert!(can_manage_problem(Some(&owner), &owner, &roles_of(&["USER"])));
    }

    #[test]
    fn admin_can_manage_any_problem() {
        let owner = Uuid::new_v4();
        let admin = Uuid::new_v4();
        assert!(can_manage_problem(Some(&owner), &admin, &roles_of(&["ADMIN"])));
    }

    #[test]
    fn non_owner_non_admin_cannot_manage() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(!can_manage_problem(
            Some(&owner),
            &other,
            &roles_of(&["USER", "PROBLEM_SETTER"])
        ));
    }

    #[test]
    fn orphaned_problem_manageable_only_by_admin() {
        let subject = Uuid::new_v4();
        assert!(!can_manage_problem(None, &subject, &roles_of(&["USER"])));
        assert!(!can_manage_problem(None, &subject, &roles_of(&["PROBLEM_SETTER"])));
        assert!(can_manage_problem(None, &subject, &roles_of(&["ADMIN"])));
    }

    #[test]
    fn tester_can_manage_test_cases_but_not_problem() {
        let owner = Uuid::new_v4();
        let tester = Uuid::new_v4();
        let tester_roles = roles_of(&["TESTER"]);
        assert!(can_manage_test_cases(Some(&owner), &tester, &tester_roles));
        assert!(!can_manage_problem(Some(&owner), &tester, &tester_roles));
    }

    #[test]
    fn public_problem_viewable_by_anyone() {
        // Scenario: setter-1 (PROBLEM_SETTER) creates "Two Sum" (public);
        // user-1 (USER) can view it but cannot update it.
        let setter = Uuid::new_v4();
        let user = Uuid::new_v4();
        let user_roles = roles_of(&["USER"]);
        assert!(can_view_problem(true, Some(&setter), &user, &user_roles));
        assert!(!can_manage_problem(Some(&setter), &user, &user_roles));
    }

    #[test]
    fn private_problem_hidden_from_non_managers() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(!can_view_problem(false, Some(&owner), &other, &roles_of(&["USER"])));
        assert!(can_view_problem(false, Some(&owner), &owner, &roles_of(&["USER"])));
        assert!(can_view_problem(false, Some(&owner), &other, &roles_of(&["ADMIN"])));
    }

    #[test]
    fn sample_always_visible_even_when_hidden() {
        // Sample overrides hidden, never the reverse.
        assert!(test_case_visible(true, true, false));
        assert!(test_case_visible(false, true, false));
        assert!(test_case_visible(true, true, true));
    }

    #[test]
    fn hidden_non_sample_invisible_to_unprivileged() {
        assert!(!test_case_visible(true, false, false));
        assert!(test_case_visible(true, false, true));
        assert!(test_case_visible(false, false, false));
    }

    #[test]
    fn listing_scenario_hidden_case_excluded_for_user_included_for_tester() {
        // tc1: isHidden=true, isSample=false
        let user_privileged = viewer_is_privileged(&roles_of(&["USER"]));
        let tester_privileged = viewer_is_privileged(&roles_of(&["TESTER"]));
        assert!(!test_case_visible(true, false, user_privileged));
        assert!(test_case_visible(true, false, tester_privileged));
    }

    #[test]
    fn content_readable_for_samples_and_managers_only() {
        assert!(content_visible(true, false));
        assert!(content_visible(false, true));
        assert!(!content_visible(false, false));
    }

    #[test]
    fn last_admin_tag_cannot_be_removed() {
        assert!(!can_remove_role("ADMIN", 0));
        assert!(can_remove_role("ADMIN", 1));
        assert!(can_remove_role("ADMIN", 5));
    }

    #[test]
    fn non_admin_roles_always_removable() {
        assert!(can_remove_role("USER", 0));
        assert!(can_remove_role("TESTER", 0));
        assert!(can_remove_role("CUSTOM_ROLE", 0));
    }

    #[test]
    fn unknown_role_tags_grant_nothing() {
        let subject = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let custom = roles_of(&["SUPERUSER", "ROOT"]);
        assert!(!can_manage_problem(Some(&owner), &subject, &custom));
        assert!(!viewer_is_privileged(&custom));
    }

    #[test]
    fn empty_role_set_grants_nothing_beyond_ownership() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(can_manage_problem(Some(&owner), &owner, &[]));
        assert!(!can_manage_problem(Some(&owner), &other, &[]));
        assert!(!can_view_test_cases(false, Some(&owner), &other, &[]));
    }
}
