use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    inv_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Inserts a company, returning its id
pub async fn create_test_company(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO companies (name, created_at) VALUES (?, 0)")
        .bind(name)
        .execute(pool)
        .await
        .expect("Failed to create test company")
        .last_insert_rowid()
}

/// Inserts a branch, returning its id
pub async fn create_test_branch(pool: &SqlitePool, company_id: i64, name: &str) -> i64 {
    sqlx::query("INSERT INTO branches (company_id, name, created_at) VALUES (?, ?, 0)")
        .bind(company_id)
        .bind(name)
        .execute(pool)
        .await
        .expect("Failed to create test branch")
        .last_insert_rowid()
}

/// Inserts a user, returning its id
pub async fn create_test_user(
    pool: &SqlitePool,
    name: &str,
    username: &str,
    branch_id: Option<i64>,
) -> i64 {
    sqlx::query(
        "INSERT INTO users (name, username, role, branch_id, created_at) VALUES (?, ?, 'user', ?, 0)",
    )
    .bind(name)
    .bind(username)
    .bind(branch_id)
    .execute(pool)
    .await
    .expect("Failed to create test user")
    .last_insert_rowid()
}
