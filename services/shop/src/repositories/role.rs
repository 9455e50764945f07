//! Role repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{NewRole, Role};

/// Role repository
#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new role
    pub async fn create(&self, new_role: &NewRole) -> Result<Role> {
        info!("Creating new role: {}", new_role.name);

        let row = sqlx::query(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&new_role.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(Role {
            id: row.get("id"),
            name: row.get("name"),
        })
    }

    /// Find a role by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Role>> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Role {
            id: row.get("id"),
            name: row.get("name"),
        }))
    }

    /// Find a role by name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Role {
            id: row.get("id"),
            name: row.get("name"),
        }))
    }

    /// List all roles
    pub async fn list(&self) -> Result<Vec<Role>> {
        let rows = sqlx::query("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Role {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    /// Delete a role. Users referencing it are removed by the cascade.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        info!("Deleting role: {}", id);

        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
