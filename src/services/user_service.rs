//! User and role management service

use sqlx::PgPool;

use crate::{
    constants::roles,
    db::repositories::{RoleRepository, UserRepository},
    error::{AppError, AppResult},
    models::{Role, User},
    policy,
    utils::validation,
};

/// User management service
pub struct UserService;

impl UserService {
    /// Get a user and their role set by Firebase UID
    pub async fn get_by_uid(pool: &PgPool, uid: &str) -> AppResult<(User, Vec<String>)> {
        let user = UserRepository::find_by_uid(pool, uid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let role_names = RoleRepository::roles_of(pool, &user.id).await?;

        Ok((user, role_names))
    }

    /// List users with their role sets
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        search: Option<&str>,
    ) -> AppResult<(Vec<(User, Vec<String>)>, i64)> {
        let (users, total) = UserRepository::list(pool, offset, limit, search).await?;

        let mut with_roles = Vec::with_capacity(users.len());
        for user in users {
            let role_names = RoleRepository::roles_of(pool, &user.id).await?;
            with_roles.push((user, role_names));
        }

        Ok((with_roles, total))
    }

    /// List all known roles
    pub async fn list_roles(pool: &PgPool) -> AppResult<Vec<Role>> {
        RoleRepository::list(pool).await
    }

    /// Assign a role to a user.
    ///
    /// Unknown role tags are created on first use; re-assigning a held role
    /// succeeds without change. Returns the user's resulting role set.
    pub async fn assign_role(pool: &PgPool, uid: &str, role_name: &str) -> AppResult<Vec<String>> {
        validation::validate_role_name(role_name)?;

        let user = UserRepository::find_by_uid(pool, uid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let role = RoleRepository::ensure(pool, role_name).await?;
        RoleRepository::assign(pool, &user.id, &role.id).await?;

        RoleRepository::roles_of(pool, &user.id).await
    }

    /// Remove a role from a user.
    ///
    /// Removing a role the user does not hold is an error, as is stripping
    /// the admin tag from the last remaining admin. Returns the resulting
    /// role set.
    pub async fn remove_role(pool: &PgPool, uid: &str, role_name: &str) -> AppResult<Vec<String>> {
        let user = UserRepository::find_by_uid(pool, uid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !RoleRepository::holds(pool, &user.id, role_name).await? {
            return Err(AppError::Validation(format!(
                "User does not hold role {role_name}"
            )));
        }

        if role_name == roles::ADMIN {
            let other_admins = RoleRepository::count_other_admins(pool, &user.id).await?;
            if !policy::can_remove_role(role_name, other_admins) {
                return Err(AppError::Invariant(
                    "Cannot remove the last admin".to_string(),
                ));
            }
        }

        // Held role implies the row exists
        let role = RoleRepository::find_by_name(pool, role_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role {role_name} not found")))?;

        RoleRepository::remove(pool, &user.id, &role.id).await?;

        RoleRepository::roles_of(pool, &user.id).await
    }

    /// Deactivate a user account. Accounts are never deleted.
    pub async fn deactivate(pool: &PgPool, uid: &str) -> AppResult<()> {
        let user = UserRepository::find_by_uid(pool, uid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        UserRepository::deactivate(pool, &user.id).await
    }

    /// Update a user's mutable profile fields
    pub async fn update_profile(
        pool: &PgPool,
        uid: &str,
        display_name: Option<&str>,
    ) -> AppResult<(User, Vec<String>)> {
        let user = UserRepository::find_by_uid(pool, uid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let updated = UserRepository::update(pool, &user.id, None, display_name).await?;
        let role_names = RoleRepository::roles_of(pool, &updated.id).await?;

        Ok((updated, role_names))
    }
}
