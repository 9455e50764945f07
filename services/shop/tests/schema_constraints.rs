//! Integration tests for the shop schema constraints
//!
//! These tests run against a real PostgreSQL database and verify that the
//! migration's unique, check, and foreign-key constraints reject invalid
//! writes and that user deletion cascades through dependent tables.
//!
//! They require a `DATABASE_URL` pointing at a disposable database and skip
//! themselves when it is not set.

use common::database::{DatabaseConfig, init_pool};
use sqlx::PgPool;
use std::time::{SystemTime, UNIX_EPOCH};

/// Connect and migrate, or None when DATABASE_URL is not configured.
async fn try_pool() -> Option<PgPool> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping schema constraint tests");
        return None;
    }

    let config = DatabaseConfig::from_env().expect("database config");
    let pool = init_pool(&config).await.expect("database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    Some(pool)
}

/// Unique suffix so tests can rerun against the same database.
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock")
        .as_nanos();
    format!("{prefix}-{nanos}")
}

fn pg_code(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|e| e.code())
        .map(|c| c.into_owned())
}

async fn create_role(pool: &PgPool, name: &str) -> i32 {
    sqlx::query_scalar("INSERT INTO roles (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("create role")
}

async fn create_user(pool: &PgPool, role_id: i32) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (username, email, password_hash, role_id)
        VALUES ($1, $2, 'not-a-real-hash', $3)
        RETURNING id
        "#,
    )
    .bind(unique("user"))
    .bind(format!("{}@example.com", unique("user")))
    .bind(role_id)
    .fetch_one(pool)
    .await
    .expect("create user")
}

async fn create_product(pool: &PgPool) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO products (name, price, stock) VALUES ($1, 9.99, 3) RETURNING id",
    )
    .bind(unique("product"))
    .fetch_one(pool)
    .await
    .expect("create product")
}

async fn create_cart(pool: &PgPool, user_id: i32) -> i32 {
    sqlx::query_scalar("INSERT INTO carts (user_id) VALUES ($1) RETURNING id")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("create cart")
}

async fn create_status(pool: &PgPool, name: &str) -> i32 {
    sqlx::query_scalar("INSERT INTO order_statuses (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("create order status")
}

async fn create_order(pool: &PgPool, user_id: i32, cart_id: i32, status_id: i32) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO orders (user_id, cart_id, status_id, total_amount)
        VALUES ($1, $2, $3, 0)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(cart_id)
    .bind(status_id)
    .fetch_one(pool)
    .await
    .expect("create order")
}

async fn delete_role(pool: &PgPool, role_id: i32) {
    sqlx::query("DELETE FROM roles WHERE id = $1")
        .bind(role_id)
        .execute(pool)
        .await
        .expect("delete role");
}

async fn delete_product(pool: &PgPool, product_id: i32) {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(pool)
        .await
        .expect("delete product");
}

async fn delete_status(pool: &PgPool, status_id: i32) {
    sqlx::query("DELETE FROM order_statuses WHERE id = $1")
        .bind(status_id)
        .execute(pool)
        .await
        .expect("delete order status");
}

#[tokio::test]
async fn test_duplicate_favorite_is_rejected() {
    let Some(pool) = try_pool().await else { return };

    let role_id = create_role(&pool, &unique("role")).await;
    let user_id = create_user(&pool, role_id).await;
    let product_id = create_product(&pool).await;

    sqlx::query("INSERT INTO favorites (user_id, product_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(product_id)
        .execute(&pool)
        .await
        .expect("first favorite insert");

    let err = sqlx::query("INSERT INTO favorites (user_id, product_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(product_id)
        .execute(&pool)
        .await
        .unwrap_err();
    assert_eq!(pg_code(&err).as_deref(), Some("23505"));

    delete_role(&pool, role_id).await;
    delete_product(&pool, product_id).await;
}

#[tokio::test]
async fn test_favorite_re_add_with_conflict_clause_is_noop() {
    let Some(pool) = try_pool().await else { return };

    let role_id = create_role(&pool, &unique("role")).await;
    let user_id = create_user(&pool, role_id).await;
    let product_id = create_product(&pool).await;

    let insert = r#"
        INSERT INTO favorites (user_id, product_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, product_id) DO NOTHING
    "#;

    let first = sqlx::query(insert)
        .bind(user_id)
        .bind(product_id)
        .execute(&pool)
        .await
        .expect("first favorite insert");
    assert_eq!(first.rows_affected(), 1);

    let second = sqlx::query(insert)
        .bind(user_id)
        .bind(product_id)
        .execute(&pool)
        .await
        .expect("second favorite insert");
    assert_eq!(second.rows_affected(), 0);

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM favorites WHERE user_id = $1 AND product_id = $2",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(&pool)
    .await
    .expect("count favorites");
    assert_eq!(count, 1);

    delete_role(&pool, role_id).await;
    delete_product(&pool, product_id).await;
}

#[tokio::test]
async fn test_duplicate_order_status_name_is_rejected() {
    let Some(pool) = try_pool().await else { return };

    let name = unique("status");
    let status_id = create_status(&pool, &name).await;

    let err = sqlx::query("INSERT INTO order_statuses (name) VALUES ($1)")
        .bind(&name)
        .execute(&pool)
        .await
        .unwrap_err();
    assert_eq!(pg_code(&err).as_deref(), Some("23505"));

    delete_status(&pool, status_id).await;
}

#[tokio::test]
async fn test_negative_price_and_stock_are_rejected() {
    let Some(pool) = try_pool().await else { return };

    let err = sqlx::query("INSERT INTO products (name, price, stock) VALUES ($1, -1, 1)")
        .bind(unique("neg-price"))
        .execute(&pool)
        .await
        .unwrap_err();
    assert_eq!(pg_code(&err).as_deref(), Some("23514"));

    let err = sqlx::query("INSERT INTO products (name, price, stock) VALUES ($1, 1, -1)")
        .bind(unique("neg-stock"))
        .execute(&pool)
        .await
        .unwrap_err();
    assert_eq!(pg_code(&err).as_deref(), Some("23514"));
}

#[tokio::test]
async fn test_non_positive_cart_item_quantity_is_rejected() {
    let Some(pool) = try_pool().await else { return };

    let role_id = create_role(&pool, &unique("role")).await;
    let user_id = create_user(&pool, role_id).await;
    let cart_id = create_cart(&pool, user_id).await;
    let product_id = create_product(&pool).await;

    for quantity in [0, -1] {
        let err = sqlx::query(
            "INSERT INTO cart_items (cart_id, product_id, quantity) VALUES ($1, $2, $3)",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&pool)
        .await
        .unwrap_err();
        assert_eq!(pg_code(&err).as_deref(), Some("23514"));
    }

    delete_role(&pool, role_id).await;
    delete_product(&pool, product_id).await;
}

#[tokio::test]
async fn test_deleting_user_cascades_dependent_rows() {
    let Some(pool) = try_pool().await else { return };

    let role_id = create_role(&pool, &unique("role")).await;
    let user_id = create_user(&pool, role_id).await;
    let product_id = create_product(&pool).await;
    let status_id = create_status(&pool, &unique("status")).await;
    let cart_id = create_cart(&pool, user_id).await;

    sqlx::query("INSERT INTO cart_items (cart_id, product_id, quantity) VALUES ($1, $2, 2)")
        .bind(cart_id)
        .bind(product_id)
        .execute(&pool)
        .await
        .expect("create cart item");
    sqlx::query("INSERT INTO favorites (user_id, product_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(product_id)
        .execute(&pool)
        .await
        .expect("create favorite");
    create_order(&pool, user_id, cart_id, status_id).await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .expect("delete user");

    let carts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM carts WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .expect("count carts");
    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE cart_id = $1")
        .bind(cart_id)
        .fetch_one(&pool)
        .await
        .expect("count cart items");
    let favorites: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .expect("count favorites");
    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .expect("count orders");

    assert_eq!(carts, 0, "carts must cascade on user delete");
    assert_eq!(items, 0, "cart items must cascade through the cart");
    assert_eq!(favorites, 0, "favorites must cascade on user delete");
    assert_eq!(orders, 0, "orders must cascade on user delete");

    delete_role(&pool, role_id).await;
    delete_product(&pool, product_id).await;
    delete_status(&pool, status_id).await;
}

#[tokio::test]
async fn test_deleting_referenced_order_status_fails() {
    let Some(pool) = try_pool().await else { return };

    let role_id = create_role(&pool, &unique("role")).await;
    let user_id = create_user(&pool, role_id).await;
    let cart_id = create_cart(&pool, user_id).await;
    let status_id = create_status(&pool, &unique("status")).await;
    create_order(&pool, user_id, cart_id, status_id).await;

    let err = sqlx::query("DELETE FROM order_statuses WHERE id = $1")
        .bind(status_id)
        .execute(&pool)
        .await
        .unwrap_err();
    assert_eq!(pg_code(&err).as_deref(), Some("23503"));

    // Dropping the role cascades user, cart, and order away; the status is
    // unreferenced after that.
    delete_role(&pool, role_id).await;
    delete_status(&pool, status_id).await;
}
