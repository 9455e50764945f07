//! Product and characteristic repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{
    AttachCharacteristic, Characteristic, NewCharacteristic, NewProduct, Product,
    ProductCharacteristic, ProductCharacteristicValue, UpdateProduct,
};

fn product_from_row(row: &sqlx::postgres::PgRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        price: row.get("price"),
        stock: row.get("stock"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, price, stock, description, image_url, is_active, created_at, updated_at";

/// Product repository, also covering characteristics and the join rows
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new product. Negative price or stock is rejected by the
    /// check constraints.
    pub async fn create(&self, new_product: &NewProduct) -> Result<Product> {
        info!("Creating new product: {}", new_product.name);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (name, price, stock, description, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&new_product.name)
        .bind(new_product.price)
        .bind(new_product.stock)
        .bind(&new_product.description)
        .bind(&new_product.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(product_from_row(&row))
    }

    /// Partially update a product; absent fields keep their current value
    pub async fn update(&self, id: i32, update: &UpdateProduct) -> Result<Option<Product>> {
        info!("Updating product: {}", id);

        let row = sqlx::query(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                stock = COALESCE($4, stock),
                description = COALESCE($5, description),
                image_url = COALESCE($6, image_url),
                is_active = COALESCE($7, is_active),
                updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.name)
        .bind(update.price)
        .bind(update.stock)
        .bind(&update.description)
        .bind(&update.image_url)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| product_from_row(&row)))
    }

    /// Deactivate a product without deleting it
    pub async fn deactivate(&self, id: i32) -> Result<Option<Product>> {
        self.update(
            id,
            &UpdateProduct {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| product_from_row(&row)))
    }

    /// List products; the public catalog sees only active ones
    pub async fn list(&self, active_only: bool) -> Result<Vec<Product>> {
        let query = if active_only {
            format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active ORDER BY id")
        } else {
            format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id")
        };

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(product_from_row).collect())
    }

    /// Delete a product. Join rows, cart items and favorites cascade.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        info!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Attach a characteristic value to a product. Repeated attaches of the
    /// same characteristic are allowed; each creates another join row.
    pub async fn attach_characteristic(
        &self,
        product_id: i32,
        attach: &AttachCharacteristic,
    ) -> Result<ProductCharacteristic> {
        info!(
            "Attaching characteristic {} to product {}",
            attach.characteristic_id, product_id
        );

        let row = sqlx::query(
            r#"
            INSERT INTO product_characteristics (product_id, characteristic_id, value)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, characteristic_id, value
            "#,
        )
        .bind(product_id)
        .bind(attach.characteristic_id)
        .bind(&attach.value)
        .fetch_one(&self.pool)
        .await?;

        Ok(ProductCharacteristic {
            id: row.get("id"),
            product_id: row.get("product_id"),
            characteristic_id: row.get("characteristic_id"),
            value: row.get("value"),
        })
    }

    /// Fetch the characteristic values of a product, with their names
    pub async fn characteristics_of(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductCharacteristicValue>> {
        let rows = sqlx::query(
            r#"
            SELECT pc.characteristic_id, c.name, pc.value
            FROM product_characteristics pc
            JOIN characteristics c ON c.id = pc.characteristic_id
            WHERE pc.product_id = $1
            ORDER BY pc.id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ProductCharacteristicValue {
                characteristic_id: row.get("characteristic_id"),
                name: row.get("name"),
                value: row.get("value"),
            })
            .collect())
    }

    /// Create a new characteristic
    pub async fn create_characteristic(
        &self,
        new_characteristic: &NewCharacteristic,
    ) -> Result<Characteristic> {
        info!("Creating new characteristic: {}", new_characteristic.name);

        let row = sqlx::query(
            r#"
            INSERT INTO characteristics (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&new_characteristic.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(Characteristic {
            id: row.get("id"),
            name: row.get("name"),
        })
    }

    /// List all characteristics
    pub async fn list_characteristics(&self) -> Result<Vec<Characteristic>> {
        let rows = sqlx::query("SELECT id, name FROM characteristics ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Characteristic {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    /// Delete a characteristic. Its join rows cascade.
    pub async fn delete_characteristic(&self, id: i32) -> Result<bool> {
        info!("Deleting characteristic: {}", id);

        let result = sqlx::query("DELETE FROM characteristics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
