//! Database-backed property tests
//!
//! Each test spins up a disposable Postgres container and exercises the
//! paths that need a live database: cascade deletion of problems and the
//! role-assignment invariants. Content blobs go to the in-memory store.

use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;
use uuid::Uuid;

use codearena::{
    constants::roles,
    db,
    db::repositories::{ProblemRepository, TestCaseRepository, UserRepository},
    error::AppError,
    models::User,
    services::{test_case_service::NewTestCase, ProblemService, TestCaseService, UserService},
    storage::MemoryContentStore,
};

async fn test_db() -> (ContainerAsync<Postgres>, PgPool) {
    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool).await.expect("Failed to run migrations");

    (container, pool)
}

async fn seed_user(pool: &PgPool) -> User {
    let tag = Uuid::new_v4();
    UserRepository::create(
        pool,
        &format!("uid-{tag}"),
        &format!("{tag}@example.com"),
        None,
        None,
    )
    .await
    .unwrap()
}

fn new_test_case(name: &str) -> NewTestCase {
    NewTestCase {
        name: name.to_string(),
        description: None,
        input_content: "1 2".to_string(),
        output_content: "3".to_string(),
        is_hidden: false,
        is_sample: false,
    }
}

#[tokio::test]
async fn problem_delete_leaves_no_rows_or_blobs() {
    let (_pg, pool) = test_db().await;
    let store = MemoryContentStore::new();

    let admin = seed_user(&pool).await;
    let admin_roles = vec![roles::ADMIN.to_string()];

    let problem = ProblemService::create(
        &pool,
        &admin.id,
        &admin_roles,
        &format!("Graph Paths {}", Uuid::new_v4()),
        "Count simple paths in a DAG",
        "medium",
        1000,
        256,
        &[],
        true,
    )
    .await
    .unwrap();

    for name in ["tc1", "tc2"] {
        TestCaseService::create(
            &pool,
            &store,
            &admin.id,
            &admin_roles,
            &problem.id,
            new_test_case(name),
        )
        .await
        .unwrap();
    }
    // Two blobs per test case
    assert_eq!(store.len(), 4);

    ProblemService::delete(&pool, &store, &admin.id, &admin_roles, &problem.id)
        .await
        .unwrap();

    assert!(ProblemRepository::find_by_id(&pool, &problem.id)
        .await
        .unwrap()
        .is_none());
    let remaining = TestCaseRepository::list_by_problem(&pool, &problem.id, true)
        .await
        .unwrap();
    assert!(remaining.is_empty());
    assert!(store.is_empty());
}

#[tokio::test]
async fn assigning_a_held_role_is_a_no_op() {
    let (_pg, pool) = test_db().await;
    let user = seed_user(&pool).await;

    let first = UserService::assign_role(&pool, &user.firebase_uid, roles::MODERATOR)
        .await
        .unwrap();
    let second = UserService::assign_role(&pool, &user.firebase_uid, roles::MODERATOR)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        second.iter().filter(|r| *r == roles::MODERATOR).count(),
        1
    );
}

#[tokio::test]
async fn last_admin_tag_cannot_be_stripped() {
    let (_pg, pool) = test_db().await;

    let only_admin = seed_user(&pool).await;
    UserService::assign_role(&pool, &only_admin.firebase_uid, roles::ADMIN)
        .await
        .unwrap();

    let err = UserService::remove_role(&pool, &only_admin.firebase_uid, roles::ADMIN)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Invariant(_)));

    // A second admin unblocks the removal
    let second = seed_user(&pool).await;
    UserService::assign_role(&pool, &second.firebase_uid, roles::ADMIN)
        .await
        .unwrap();

    let remaining = UserService::remove_role(&pool, &only_admin.firebase_uid, roles::ADMIN)
        .await
        .unwrap();
    assert!(!remaining.contains(&roles::ADMIN.to_string()));
}
