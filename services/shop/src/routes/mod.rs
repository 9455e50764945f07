//! Shop service routes

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod orders;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{
    AppState,
    middleware::{admin_middleware, auth_middleware},
};

/// Create the router for the shop service
pub fn create_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/cart", get(cart::get_cart))
        .route("/cart/items", put(cart::set_item))
        .route("/cart/items/:product_id", delete(cart::remove_item))
        .route("/favorites", get(favorites::list))
        .route(
            "/favorites/:product_id",
            put(favorites::add).delete(favorites::remove),
        )
        .route("/orders", post(orders::create).get(orders::list))
        .route("/orders/:id", get(orders::get))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let admin_routes = Router::new()
        .route("/roles", get(admin::list_roles).post(admin::create_role))
        .route("/roles/:id", delete(admin::delete_role))
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/:id", delete(admin::delete_user))
        .route("/users/:id/favorites", get(admin::list_user_favorites))
        .route(
            "/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/products/:id",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route(
            "/products/:id/deactivate",
            post(admin::deactivate_product),
        )
        .route(
            "/products/:id/characteristics",
            post(admin::attach_characteristic),
        )
        .route(
            "/characteristics",
            get(admin::list_characteristics).post(admin::create_characteristic),
        )
        .route("/characteristics/:id", delete(admin::delete_characteristic))
        .route("/carts", get(admin::list_carts))
        .route("/carts/:id", delete(admin::delete_cart))
        .route("/carts/:id/items", get(admin::list_cart_items))
        .route(
            "/order-statuses",
            get(admin::list_order_statuses).post(admin::create_order_status),
        )
        .route("/order-statuses/:id", delete(admin::delete_order_status))
        .route("/orders", get(admin::list_orders))
        .route("/orders/:id", delete(admin::delete_order))
        .route("/orders/:id/status", put(admin::set_order_status))
        .route_layer(from_fn_with_state(state.clone(), admin_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/products", get(catalog::list_products))
        .route("/products/:id", get(catalog::get_product))
        .merge(user_routes)
        .nest("/admin", admin_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "shop",
    }))
}
