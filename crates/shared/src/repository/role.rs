use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::RoleRepositoryTrait, config::ConnectionPool, domain::requests::RoleRequest,
    errors::RepositoryError, model::Role as RoleModel,
};

#[derive(Clone)]
pub struct RoleRepository {
    db: ConnectionPool,
}

impl RoleRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepositoryTrait for RoleRepository {
    async fn find_all(&self) -> Result<Vec<RoleModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, RoleModel>(
            "SELECT * FROM roles WHERE deleted_at IS NULL ORDER BY role_id ASC",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch roles: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<RoleModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, RoleModel>(
            "SELECT * FROM roles WHERE role_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn create_role(&self, req: &RoleRequest) -> Result<RoleModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, RoleModel>(
            r#"
            INSERT INTO roles (title, description, permissions, created_at, updated_at)
            VALUES ($1, $2, '{}', current_timestamp, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create role {}: {err:?}", req.title);
            RepositoryError::from(err)
        })?;

        info!("✅ Created role ID {}", result.role_id);
        Ok(result)
    }

    async fn update_role(&self, id: i32, req: &RoleRequest) -> Result<RoleModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, RoleModel>(
            r#"
            UPDATE roles
            SET title = $2, description = $3, updated_at = current_timestamp
            WHERE role_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update role {id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn update_permissions(
        &self,
        id: i32,
        permissions: &[String],
    ) -> Result<RoleModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, RoleModel>(
            r#"
            UPDATE roles
            SET permissions = $2, updated_at = current_timestamp
            WHERE role_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(permissions)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update permissions of role {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!(
            "🔐 Role {} now grants {} permission(s)",
            result.role_id,
            result.permissions.len()
        );
        Ok(result)
    }

    async fn trash_role(&self, id: i32) -> Result<RoleModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, RoleModel>(
            r#"
            UPDATE roles
            SET deleted_at = current_timestamp, updated_at = current_timestamp
            WHERE role_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to trash role {id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn find_permissions_for_admin(
        &self,
        admin_id: i32,
    ) -> Result<Option<Vec<String>>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, Vec<String>>(
            r#"
            SELECT r.permissions
            FROM admin_accounts a
            JOIN roles r ON r.role_id = a.role_id
            WHERE a.admin_id = $1
              AND a.status = 'active'
              AND a.deleted_at IS NULL
              AND r.deleted_at IS NULL
            "#,
        )
        .bind(admin_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to load permissions of admin {admin_id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}
