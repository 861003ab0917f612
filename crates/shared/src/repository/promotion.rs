use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::PromotionRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllRecords, PromotionRequest, limit_offset, search_term, status_filter},
    errors::RepositoryError,
    model::Promotion as PromotionModel,
    repository::into_page,
};

#[derive(Clone)]
pub struct PromotionRepository {
    db: ConnectionPool,
}

impl PromotionRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn set_deleted(
        &self,
        id: i32,
        deleted: bool,
    ) -> Result<PromotionModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = if deleted {
            r#"
            UPDATE promotions
            SET deleted_at = current_timestamp, updated_at = current_timestamp
            WHERE promotion_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#
        } else {
            r#"
            UPDATE promotions
            SET deleted_at = NULL, updated_at = current_timestamp
            WHERE promotion_id = $1 AND deleted_at IS NOT NULL
            RETURNING *
            "#
        };

        sqlx::query_as::<_, PromotionModel>(sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to change deleted flag of promotion {id}: {err:?}");
                RepositoryError::from(err)
            })
    }
}

#[async_trait]
impl PromotionRepositoryTrait for PromotionRepository {
    async fn find_all(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<(Vec<PromotionModel>, i64), RepositoryError> {
        info!("🔍 Fetching promotions search={:?} trashed={trashed}", req.search);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;
        let (limit, offset) = limit_offset(req.page, req.page_size);

        let rows = sqlx::query(
            r#"
            SELECT *, COUNT(*) OVER() AS total_count
            FROM promotions
            WHERE (deleted_at IS NOT NULL) = $1
              AND ($2::TEXT IS NULL OR code ILIKE '%' || $2 || '%')
              AND ($3::TEXT IS NULL OR status = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(trashed)
        .bind(search_term(&req.search))
        .bind(status_filter(&req.status))
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch promotions: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(into_page(rows)?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PromotionModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, PromotionModel>("SELECT * FROM promotions WHERE promotion_id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<PromotionModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, PromotionModel>(
            "SELECT * FROM promotions WHERE code = $1 AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn create_promotion(
        &self,
        req: &PromotionRequest,
    ) -> Result<PromotionModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, PromotionModel>(
            r#"
            INSERT INTO promotions (
                code, description, discount_type, discount_value, min_order_value,
                start_date, end_date, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, current_timestamp, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(&req.code)
        .bind(&req.description)
        .bind(req.discount_type.as_str())
        .bind(req.discount_value)
        .bind(req.min_order_value)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.status.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create promotion {}: {err:?}", req.code);
            RepositoryError::from(err)
        })?;

        info!("✅ Created promotion {}", result.code);
        Ok(result)
    }

    async fn update_promotion(
        &self,
        id: i32,
        req: &PromotionRequest,
    ) -> Result<PromotionModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, PromotionModel>(
            r#"
            UPDATE promotions
            SET code = $2,
                description = $3,
                discount_type = $4,
                discount_value = $5,
                min_order_value = $6,
                start_date = $7,
                end_date = $8,
                status = $9,
                updated_at = current_timestamp
            WHERE promotion_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.code)
        .bind(&req.description)
        .bind(req.discount_type.as_str())
        .bind(req.discount_value)
        .bind(req.min_order_value)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.status.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update promotion {id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn trash_promotion(&self, id: i32) -> Result<PromotionModel, RepositoryError> {
        self.set_deleted(id, true).await
    }

    async fn restore_promotion(&self, id: i32) -> Result<PromotionModel, RepositoryError> {
        self.set_deleted(id, false).await
    }
}
