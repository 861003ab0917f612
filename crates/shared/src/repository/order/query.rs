use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::OrderQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllRecords, limit_offset, search_term, status_filter},
    errors::RepositoryError,
    model::Order as OrderModel,
    repository::into_page,
};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
        info!("🔍 Fetching all orders with search: {:?}", req.search);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })?;

        let (limit, offset) = limit_offset(req.page, req.page_size);

        let rows = sqlx::query(
            r#"
            SELECT o.*, COUNT(*) OVER() AS total_count
            FROM orders o
            WHERE o.deleted_at IS NULL
              AND ($1::TEXT IS NULL
                   OR o.order_code ILIKE '%' || $1 || '%'
                   OR o.full_name ILIKE '%' || $1 || '%'
                   OR o.phone ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR o.status = $2)
            ORDER BY o.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search_term(&req.search))
        .bind(status_filter(&req.status))
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(into_page(rows)?)
    }

    async fn find_by_customer(
        &self,
        customer_id: i32,
        page: i32,
        page_size: i32,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;
        let (limit, offset) = limit_offset(page, page_size);

        let rows = sqlx::query(
            r#"
            SELECT o.*, COUNT(*) OVER() AS total_count
            FROM orders o
            WHERE o.customer_id = $1 AND o.deleted_at IS NULL
            ORDER BY o.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders of customer {customer_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(into_page(rows)?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, OrderModel>(
            "SELECT * FROM orders WHERE order_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, OrderModel>(
            "SELECT * FROM orders WHERE order_code = $1 AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }
}
