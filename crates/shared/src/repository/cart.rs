use async_trait::async_trait;
use sqlx::types::Json;
use tracing::{error, info};

use crate::{
    abstract_trait::CartRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{Cart as CartModel, CartLine},
};

#[derive(Clone)]
pub struct CartRepository {
    db: ConnectionPool,
}

impl CartRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    async fn find_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Option<CartModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CartModel>("SELECT * FROM carts WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch cart of customer {customer_id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn save_lines(
        &self,
        customer_id: i32,
        lines: &[CartLine],
    ) -> Result<CartModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, CartModel>(
            r#"
            INSERT INTO carts (customer_id, info_product, created_at, updated_at)
            VALUES ($1, $2, current_timestamp, current_timestamp)
            ON CONFLICT (customer_id)
            DO UPDATE SET info_product = EXCLUDED.info_product, updated_at = current_timestamp
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(Json(lines))
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to save cart of customer {customer_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!(
            "🛒 Saved cart of customer {customer_id} with {} lines",
            lines.len()
        );
        Ok(result)
    }
}
