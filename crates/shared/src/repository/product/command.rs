use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::ProductCommandRepositoryTrait, config::ConnectionPool,
    domain::requests::ProductRequest, errors::RepositoryError, model::Product as ProductModel,
};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &ProductRequest,
        slug: &str,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (
                category_id, name, slug, description, price, compare_price,
                thumbnail, images, status, position, featured, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, current_timestamp, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(req.category_id)
        .bind(&req.name)
        .bind(slug)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.compare_price)
        .bind(&req.thumbnail)
        .bind(&req.images)
        .bind(req.status.as_str())
        .bind(req.position)
        .bind(req.featured)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {err:?}", req.name);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {} ({})", result.product_id, result.slug);
        Ok(result)
    }

    async fn update_product(
        &self,
        id: i32,
        req: &ProductRequest,
        slug: &str,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET category_id = $2,
                name = $3,
                slug = $4,
                description = $5,
                price = $6,
                compare_price = $7,
                thumbnail = $8,
                images = $9,
                status = $10,
                position = $11,
                featured = $12,
                updated_at = current_timestamp
            WHERE product_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.category_id)
        .bind(&req.name)
        .bind(slug)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.compare_price)
        .bind(&req.thumbnail)
        .bind(&req.images)
        .bind(req.status.as_str())
        .bind(req.position)
        .bind(req.featured)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated product ID {}", result.product_id);
        Ok(result)
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET status = $2, updated_at = current_timestamp
            WHERE product_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to set status of product ID {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("🔄 Product ID {id} is now {status}");
        Ok(result)
    }

    async fn trash_product(&self, id: i32) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET deleted_at = current_timestamp, updated_at = current_timestamp
            WHERE product_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to trash product ID {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("🗑️ Trashed product ID {id}");
        Ok(result)
    }

    async fn restore_product(&self, id: i32) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET deleted_at = NULL, updated_at = current_timestamp
            WHERE product_id = $1 AND deleted_at IS NOT NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to restore product ID {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("♻️ Restored product ID {id}");
        Ok(result)
    }
}
