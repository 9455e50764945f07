use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod bootstrap;
mod config;
mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod session;
mod validation;

use sqlx::PgPool;

use crate::{
    config::AppConfig,
    repositories::{
        CartRepository, FavoriteRepository, OrderRepository, ProductRepository, RoleRepository,
        UserRepository,
    },
    session::SessionService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub sessions: SessionService,
    pub roles: RoleRepository,
    pub users: UserRepository,
    pub products: ProductRepository,
    pub carts: CartRepository,
    pub favorites: FavoriteRepository,
    pub orders: OrderRepository,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting shop service");

    // Initialize database connection pool
    let db_config = common::database::DatabaseConfig::from_env()?;
    let pool = common::database::init_pool(&db_config).await?;

    // Check database connectivity
    common::database::health_check(&pool).await?;
    info!("Database connection successful");

    // Apply embedded migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| common::error::DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    // The bootstrap path seeds the admin role and user, then exits.
    if std::env::args().nth(1).as_deref() == Some("bootstrap") {
        let bootstrap_config = config::BootstrapConfig::from_env()?;
        bootstrap::create_admin(pool, &bootstrap_config).await?;
        return Ok(());
    }

    let app_config = AppConfig::from_env()?;
    let sessions = SessionService::new(&app_config.session_secret, app_config.session_ttl);

    let app_state = AppState {
        db_pool: pool.clone(),
        sessions,
        roles: RoleRepository::new(pool.clone()),
        users: UserRepository::new(pool.clone()),
        products: ProductRepository::new(pool.clone()),
        carts: CartRepository::new(pool.clone()),
        favorites: FavoriteRepository::new(pool.clone()),
        orders: OrderRepository::new(pool),
    };

    info!("Shop service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = format!("0.0.0.0:{}", app_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Shop service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
