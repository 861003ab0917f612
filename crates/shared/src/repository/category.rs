use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::CategoryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CategoryRequest, FindAllRecords, limit_offset, search_term, status_filter},
    errors::RepositoryError,
    model::Category as CategoryModel,
    repository::into_page,
};

#[derive(Clone)]
pub struct CategoryRepository {
    db: ConnectionPool,
}

impl CategoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn set_deleted(&self, id: i32, deleted: bool) -> Result<CategoryModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = if deleted {
            r#"
            UPDATE product_categories
            SET deleted_at = current_timestamp, updated_at = current_timestamp
            WHERE category_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#
        } else {
            r#"
            UPDATE product_categories
            SET deleted_at = NULL, updated_at = current_timestamp
            WHERE category_id = $1 AND deleted_at IS NOT NULL
            RETURNING *
            "#
        };

        sqlx::query_as::<_, CategoryModel>(sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to change deleted flag of category {id}: {err:?}");
                RepositoryError::from(err)
            })
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn find_visible(&self) -> Result<Vec<CategoryModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT * FROM product_categories
            WHERE deleted_at IS NULL AND status = 'active'
            ORDER BY position ASC, name ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch categories: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_all(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<(Vec<CategoryModel>, i64), RepositoryError> {
        info!("🔍 Fetching categories search={:?} trashed={trashed}", req.search);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;
        let (limit, offset) = limit_offset(req.page, req.page_size);

        let rows = sqlx::query(
            r#"
            SELECT *, COUNT(*) OVER() AS total_count
            FROM product_categories
            WHERE (deleted_at IS NOT NULL) = $1
              AND ($2::TEXT IS NULL OR name ILIKE '%' || $2 || '%')
              AND ($3::TEXT IS NULL OR status = $3)
            ORDER BY position ASC, created_at DESC
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
            error!("❌ Failed to fetch categories: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(into_page(rows)?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CategoryModel>(
            "SELECT * FROM product_categories WHERE category_id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_categories WHERE slug = $1)",
        )
        .bind(slug)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)
    }

    async fn create_category(
        &self,
        req: &CategoryRequest,
        slug: &str,
    ) -> Result<CategoryModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, CategoryModel>(
            r#"
            INSERT INTO product_categories
                (name, slug, description, thumbnail, status, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, current_timestamp, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(slug)
        .bind(&req.description)
        .bind(&req.thumbnail)
        .bind(req.status.as_str())
        .bind(req.position)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create category {}: {err:?}", req.name);
            RepositoryError::from(err)
        })?;

        info!("✅ Created category ID {} ({})", result.category_id, result.slug);
        Ok(result)
    }

    async fn update_category(
        &self,
        id: i32,
        req: &CategoryRequest,
        slug: &str,
    ) -> Result<CategoryModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CategoryModel>(
            r#"
            UPDATE product_categories
            SET name = $2,
                slug = $3,
                description = $4,
                thumbnail = $5,
                status = $6,
                position = $7,
                updated_at = current_timestamp
            WHERE category_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(slug)
        .bind(&req.description)
        .bind(&req.thumbnail)
        .bind(req.status.as_str())
        .bind(req.position)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update category {id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn update_status(
        &self,
        id: i32,
        status: &str,
    ) -> Result<CategoryModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CategoryModel>(
            r#"
            UPDATE product_categories
            SET status = $2, updated_at = current_timestamp
            WHERE category_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to set status of category {id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn trash_category(&self, id: i32) -> Result<CategoryModel, RepositoryError> {
        self.set_deleted(id, true).await
    }

    async fn restore_category(&self, id: i32) -> Result<CategoryModel, RepositoryError> {
        self.set_deleted(id, false).await
    }
}
