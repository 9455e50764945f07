//! One-shot seeding of the admin role and user
//!
//! Invoked manually via `shop bootstrap`; both inserts are skipped when the
//! row already exists.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::{
    config::BootstrapConfig,
    models::{NewRole, NewUser},
    repositories::{RoleRepository, UserRepository},
};

const ADMIN_ROLE: &str = "admin";

/// Seed the admin role and admin user if absent
pub async fn create_admin(pool: PgPool, config: &BootstrapConfig) -> Result<()> {
    let roles = RoleRepository::new(pool.clone());
    let users = UserRepository::new(pool);

    let admin_role = match roles.find_by_name(ADMIN_ROLE).await? {
        Some(role) => role,
        None => {
            let role = roles
                .create(&NewRole {
                    name: ADMIN_ROLE.to_string(),
                })
                .await?;
            info!("Created role '{}'", role.name);
            role
        }
    };

    match users.find_by_email(&config.admin_email).await? {
        Some(user) => {
            info!("Admin user {} already exists", user.email);
        }
        None => {
            let user = users
                .create(&NewUser {
                    username: config.admin_username.clone(),
                    email: config.admin_email.clone(),
                    password: config.admin_password.clone(),
                    role_id: admin_role.id,
                })
                .await?;
            info!("Created admin user {}", user.email);
        }
    }

    Ok(())
}
