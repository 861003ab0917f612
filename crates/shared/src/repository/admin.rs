use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::AdminRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{
        CreateAdminRequest, FindAllRecords, UpdateAdminRequest, limit_offset, search_term,
        status_filter,
    },
    errors::RepositoryError,
    model::AdminAccount as AdminModel,
    repository::into_page,
};

#[derive(Clone)]
pub struct AdminRepository {
    db: ConnectionPool,
}

impl AdminRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepositoryTrait for AdminRepository {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<AdminModel>, i64), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;
        let (limit, offset) = limit_offset(req.page, req.page_size);

        let rows = sqlx::query(
            r#"
            SELECT *, COUNT(*) OVER() AS total_count
            FROM admin_accounts
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
            error!("❌ Failed to fetch admin accounts: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(into_page(rows)?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<AdminModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, AdminModel>(
            "SELECT * FROM admin_accounts WHERE admin_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, AdminModel>(
            r#"
            SELECT * FROM admin_accounts
            WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn create_admin(
        &self,
        req: &CreateAdminRequest,
        hashed_password: &str,
    ) -> Result<AdminModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, AdminModel>(
            r#"
            INSERT INTO admin_accounts
                (full_name, email, password, phone, role_id, status, created_at, updated_at)
            VALUES ($1, LOWER($2), $3, $4, $5, $6, current_timestamp, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(hashed_password)
        .bind(&req.phone)
        .bind(req.role_id)
        .bind(req.status.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create admin {}: {err:?}", req.email);
            RepositoryError::from(err)
        })?;

        info!("✅ Created admin account ID {}", result.admin_id);
        Ok(result)
    }

    async fn update_admin(
        &self,
        id: i32,
        req: &UpdateAdminRequest,
        hashed_password: Option<&str>,
    ) -> Result<AdminModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, AdminModel>(
            r#"
            UPDATE admin_accounts
            SET full_name = $2,
                email = LOWER($3),
                password = COALESCE($4, password),
                phone = $5,
                role_id = $6,
                status = $7,
                updated_at = current_timestamp
            WHERE admin_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(hashed_password)
        .bind(&req.phone)
        .bind(req.role_id)
        .bind(req.status.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update admin {id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn trash_admin(&self, id: i32) -> Result<AdminModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, AdminModel>(
            r#"
            UPDATE admin_accounts
            SET deleted_at = current_timestamp, updated_at = current_timestamp
            WHERE admin_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to trash admin {id}: {err:?}");
            RepositoryError::from(err)
        })
    }
}
