use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::CustomerRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllRecords, RegisterRequest, limit_offset, search_term, status_filter},
    errors::RepositoryError,
    model::Customer as CustomerModel,
    repository::into_page,
};

#[derive(Clone)]
pub struct CustomerRepository {
    db: ConnectionPool,
}

impl CustomerRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepositoryTrait for CustomerRepository {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<CustomerModel>, i64), RepositoryError> {
        info!("🔍 Fetching customers with search: {:?}", req.search);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;
        let (limit, offset) = limit_offset(req.page, req.page_size);

        let rows = sqlx::query(
            r#"
            SELECT *, COUNT(*) OVER() AS total_count
            FROM customers
            WHERE deleted_at IS NULL
              AND ($1::TEXT IS NULL
                   OR full_name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
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
            error!("❌ Failed to fetch customers: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(into_page(rows)?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CustomerModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CustomerModel>(
            "SELECT * FROM customers WHERE customer_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CustomerModel>("SELECT * FROM customers WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)
    }

    async fn create_customer(
        &self,
        req: &RegisterRequest,
        hashed_password: &str,
    ) -> Result<CustomerModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, CustomerModel>(
            r#"
            INSERT INTO customers
                (full_name, email, password, phone, address, status, created_at, updated_at)
            VALUES ($1, LOWER($2), $3, $4, $5, 'active', current_timestamp, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(hashed_password)
        .bind(&req.phone)
        .bind(&req.address)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create customer {}: {err:?}", req.email);
            RepositoryError::from(err)
        })?;

        info!("✅ Registered customer ID {}", result.customer_id);
        Ok(result)
    }

    async fn update_password(
        &self,
        id: i32,
        hashed_password: &str,
    ) -> Result<CustomerModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CustomerModel>(
            r#"
            UPDATE customers
            SET password = $2, updated_at = current_timestamp
            WHERE customer_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(hashed_password)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update password of customer {id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn update_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<CustomerModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CustomerModel>(
            r#"
            UPDATE customers
            SET status = $2, updated_at = current_timestamp
            WHERE customer_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to set status of customer {id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn trash_customer(&self, id: i32) -> Result<CustomerModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CustomerModel>(
            r#"
            UPDATE customers
            SET deleted_at = current_timestamp, updated_at = current_timestamp
            WHERE customer_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to trash customer {id}: {err:?}");
            RepositoryError::from(err)
        })
    }
}
