use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{
    abstract_trait::{CategoryServiceTrait, DynCategoryRepository},
    domain::{
        requests::{CategoryRequest, FindAllRecords, UpdateStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, CategoryResponse, Pagination},
    },
    errors::{RepositoryError, ServiceError},
    model::Category as CategoryModel,
    service::slug::unique_slug,
    utils::{Method, ServiceObserver, TracingContext},
};

pub struct CategoryService {
    repository: DynCategoryRepository,
    observer: ServiceObserver,
}

impl CategoryService {
    pub async fn new(repository: DynCategoryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("category_service", &registry).await;

        Self {
            repository,
            observer,
        }
    }

    fn finish(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<CategoryModel, RepositoryError>,
        message: &str,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        match result {
            Ok(category) => {
                self.observer.success(tracing_ctx, method, message);
                Ok(ApiResponse::success(message, CategoryResponse::from(category)))
            }
            Err(err) => {
                error!("❌ Category command failed: {err:?}");
                self.observer.failure(tracing_ctx, method, &err.to_string());
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn slug_for(&self, name: &str, current: Option<&str>) -> Result<String, ServiceError> {
        unique_slug(name, current, |slug| async move {
            self.repository.slug_exists(&slug).await
        })
        .await
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn find_visible(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "find_visible_categories",
            vec![KeyValue::new("component", "category")],
        );

        match self.repository.find_visible().await {
            Ok(categories) => {
                self.observer
                    .success(&tracing_ctx, Method::Get, "Categories listed");
                Ok(ApiResponse::success(
                    "Categories retrieved successfully",
                    categories.into_iter().map(CategoryResponse::from).collect(),
                ))
            }
            Err(err) => {
                error!("❌ Failed to list categories: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to list categories");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_all(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<ApiResponsePagination<Vec<CategoryResponse>>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "find_all_categories",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("trashed", trashed),
                KeyValue::new("page", req.page.to_string()),
            ],
        );

        let (categories, total) = match self.repository.find_all(req, trashed).await {
            Ok(page) => page,
            Err(err) => {
                error!("❌ Failed to fetch categories: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to fetch categories");
                return Err(ServiceError::Repo(err));
            }
        };

        self.observer
            .success(&tracing_ctx, Method::Get, "Categories retrieved");

        Ok(ApiResponsePagination::success(
            "Categories retrieved successfully",
            categories.into_iter().map(CategoryResponse::from).collect(),
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        match self.repository.find_by_id(id).await? {
            Some(category) => Ok(ApiResponse::success(
                "Category retrieved successfully",
                CategoryResponse::from(category),
            )),
            None => Err(ServiceError::NotFound(format!("Category {id} not found"))),
        }
    }

    async fn create_category(
        &self,
        req: &CategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("🆕 Creating category: {}", req.name);

        let tracing_ctx = self.observer.start(
            "create_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.name", req.name.clone()),
            ],
        );

        let slug = match self.slug_for(&req.name, None).await {
            Ok(slug) => slug,
            Err(err) => {
                self.observer
                    .failure(&tracing_ctx, Method::Post, "Failed to derive slug");
                return Err(err);
            }
        };

        let result = self.repository.create_category(req, &slug).await;
        self.finish(&tracing_ctx, Method::Post, result, "Category created successfully")
    }

    async fn update_category(
        &self,
        id: i32,
        req: &CategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", id.to_string()),
            ],
        );

        let existing = match self.repository.find_by_id(id).await {
            Ok(Some(category)) if category.deleted_at.is_none() => category,
            Ok(_) => {
                self.observer
                    .failure(&tracing_ctx, Method::Put, "Category not found");
                return Err(ServiceError::NotFound(format!("Category {id} not found")));
            }
            Err(err) => {
                self.observer
                    .failure(&tracing_ctx, Method::Put, "Failed to load category");
                return Err(ServiceError::Repo(err));
            }
        };

        let slug = match self.slug_for(&req.name, Some(&existing.slug)).await {
            Ok(slug) => slug,
            Err(err) => {
                self.observer
                    .failure(&tracing_ctx, Method::Put, "Failed to derive slug");
                return Err(err);
            }
        };

        let result = self.repository.update_category(id, req, &slug).await;
        self.finish(&tracing_ctx, Method::Put, result, "Category updated successfully")
    }

    async fn update_status(
        &self,
        id: i32,
        req: &UpdateStatusRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_category_status",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", id.to_string()),
                KeyValue::new("category.status", req.status.as_str()),
            ],
        );

        let result = self.repository.update_status(id, req.status.as_str()).await;
        self.finish(
            &tracing_ctx,
            Method::Patch,
            result,
            "Category status updated successfully",
        )
    }

    async fn trash_category(
        &self,
        id: i32,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "trash_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", id.to_string()),
            ],
        );

        let result = self.repository.trash_category(id).await;
        self.finish(&tracing_ctx, Method::Delete, result, "Category moved to trash")
    }

    async fn restore_category(
        &self,
        id: i32,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "restore_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", id.to_string()),
            ],
        );

        let result = self.repository.restore_category(id).await;
        self.finish(&tracing_ctx, Method::Patch, result, "Category restored successfully")
    }
}
