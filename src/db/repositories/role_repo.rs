//! Role repository
//!
//! Roles are open tags created lazily on first assignment; the join table
//! carries the subject's role set.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{constants::roles, error::AppResult, models::Role};

/// Repository for role and role-assignment database operations
pub struct RoleRepository;

impl RoleRepository {
    /// Find a role by name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> AppResult<Option<Role>> {
        let role = sqlx::query_as::<_, Role>(r#"SELECT * FROM roles WHERE name = $1"#)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        Ok(role)
    }

    /// Create a role if it does not exist yet and return it
    pub async fn ensure(pool: &PgPool, name: &str) -> AppResult<Role> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(role)
    }

    /// List all roles
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Role>> {
        let all = sqlx::query_as::<_, Role>(r#"SELECT * FROM roles ORDER BY name"#)
            .fetch_all(pool)
            .await?;

        Ok(all)
    }

    /// Assign a role to a user. Re-assigning a held role is a no-op.
    pub async fn assign(pool: &PgPool, user_id: &Uuid, role_id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Remove a role from a user; returns whether a row was deleted.
    pub async fn remove(pool: &PgPool, user_id: &Uuid, role_id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2"#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Names of all roles held by a user
    pub async fn roles_of(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT r.name FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(names)
    }

    /// Whether the user currently holds a role
    pub async fn holds(pool: &PgPool, user_id: &Uuid, role_name: &str) -> AppResult<bool> {
        let held: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM user_roles ur
                JOIN roles r ON r.id = ur.role_id
                WHERE ur.user_id = $1 AND r.name = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(role_name)
        .fetch_one(pool)
        .await?;

        Ok(held)
    }

    /// Count admin-tagged users other than the given one.
    ///
    /// Feeds the last-admin lockout check: removal of the admin tag is
    /// refused when this count is zero.
    pub async fn count_other_admins(pool: &PgPool, user_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT ur.user_id) FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE r.name = $1 AND ur.user_id <> $2
            "#,
        )
        .bind(roles::ADMIN)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Seed the well-known roles at startup
    pub async fn seed(pool: &PgPool) -> AppResult<()> {
        for name in roles::SEEDED {
            Self::ensure(pool, name).await?;
        }

        Ok(())
    }
}
