use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::ProductQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{FindAllProducts, FindAllRecords, limit_offset, search_term, status_filter},
    errors::RepositoryError,
    model::{Category as CategoryModel, Product as ProductModel},
    repository::into_page,
};

/// Shopper visibility in SQL, for paged listings; `Product::is_visible_in`
/// is the same rule on loaded rows.
const VISIBLE: &str = r#"
    p.deleted_at IS NULL
    AND p.status = 'active'
    AND (p.category_id IS NULL OR (c.deleted_at IS NULL AND c.status = 'active'))
"#;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn find_admin_page(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let (limit, offset) = limit_offset(req.page, req.page_size);

        let sql = format!(
            r#"
            SELECT p.*, COUNT(*) OVER() AS total_count
            FROM products p
            WHERE p.deleted_at IS {} NULL
              AND ($1::TEXT IS NULL OR p.name ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR p.status = $2)
            ORDER BY p.position ASC, p.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            if trashed { "NOT" } else { "" }
        );

        let rows = sqlx::query(&sql)
            .bind(search_term(&req.search))
            .bind(status_filter(&req.status))
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch admin products: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(into_page(rows)?)
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_visible(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching visible products search={:?} category={:?}",
            req.search, req.category
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })?;

        let (limit, offset) = limit_offset(req.page, req.page_size);
        let category = req
            .category
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty());

        let sql = format!(
            r#"
            SELECT p.*, COUNT(*) OVER() AS total_count
            FROM products p
            LEFT JOIN product_categories c ON c.category_id = p.category_id
            WHERE {VISIBLE}
              AND ($1::TEXT IS NULL OR c.slug = $1)
              AND ($2::TEXT IS NULL OR p.name ILIKE '%' || $2 || '%')
            ORDER BY p.position ASC, p.created_at DESC
            LIMIT $3 OFFSET $4
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(category)
            .bind(search_term(&req.search))
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(into_page(rows)?)
    }

    async fn find_featured(&self, limit: i64) -> Result<Vec<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            SELECT p.*
            FROM products p
            LEFT JOIN product_categories c ON c.category_id = p.category_id
            WHERE {VISIBLE} AND p.featured = TRUE
            ORDER BY p.position ASC, p.created_at DESC
            LIMIT $1
            "#
        );

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(limit)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch featured products: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_visible_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product =
            sqlx::query_as::<_, ProductModel>("SELECT * FROM products WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&mut *conn)
                .await
                .map_err(|e| {
                    error!("❌ Failed to fetch product by slug {slug}: {e:?}");
                    RepositoryError::from(e)
                })?;

        let Some(product) = product else {
            return Ok(None);
        };

        let category = match product.category_id {
            Some(id) => sqlx::query_as::<_, CategoryModel>(
                "SELECT * FROM product_categories WHERE category_id = $1",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch category {id} for product {slug}: {e:?}");
                RepositoryError::from(e)
            })?,
            None => None,
        };

        Ok(product
            .is_visible_in(category.as_ref())
            .then_some(product))
    }

    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!("🔍 Fetching admin products search={:?}", req.search);
        self.find_admin_page(req, false).await
    }

    async fn find_trashed(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!("🗑️ Fetching trashed products search={:?}", req.search);
        self.find_admin_page(req, true).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>("SELECT * FROM products WHERE product_id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>("SELECT * FROM products WHERE product_id = ANY($1)")
            .bind(ids)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products {ids:?}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)
    }
}
