use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, ProductCommandServiceTrait,
    },
    domain::{
        requests::{ProductRequest, UpdateStatusRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product as ProductModel,
    service::slug::unique_slug,
    utils::{Method, ServiceObserver, TracingContext},
};

pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    observer: ServiceObserver,
}

impl ProductCommandService {
    pub async fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let observer = ServiceObserver::new("product_command_service", &registry).await;

        Self {
            query,
            command,
            observer,
        }
    }

    async fn slug_for(&self, name: &str, current: Option<&str>) -> Result<String, ServiceError> {
        unique_slug(name, current, |slug| async move {
            self.query.slug_exists(&slug).await
        })
        .await
    }

    fn finish(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<ProductModel, RepositoryError>,
        message: &str,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        match result {
            Ok(product) => {
                self.observer.success(tracing_ctx, method, message);
                info!("✅ {message}: {} (ID: {})", product.name, product.product_id);
                Ok(ApiResponse::success(message, ProductResponse::from(product)))
            }
            Err(err) => {
                error!("❌ Product command failed: {err:?}");
                self.observer.failure(tracing_ctx, method, &err.to_string());
                Err(ServiceError::Repo(err))
            }
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &ProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆕 Creating product: {}", req.name);

        let tracing_ctx = self.observer.start(
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.name", req.name.clone()),
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

        let result = self.command.create_product(req, &slug).await;
        self.finish(&tracing_ctx, Method::Post, result, "Product created successfully")
    }

    async fn update_product(
        &self,
        id: i32,
        req: &ProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("✏️ Updating product ID {id}");

        let tracing_ctx = self.observer.start(
            "update_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let existing = match self.query.find_by_id(id).await {
            Ok(Some(product)) if product.deleted_at.is_none() => product,
            Ok(_) => {
                self.observer
                    .failure(&tracing_ctx, Method::Put, "Product not found");
                return Err(ServiceError::NotFound(format!("Product {id} not found")));
            }
            Err(err) => {
                self.observer
                    .failure(&tracing_ctx, Method::Put, "Failed to load product");
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

        let result = self.command.update_product(id, req, &slug).await;
        self.finish(&tracing_ctx, Method::Put, result, "Product updated successfully")
    }

    async fn update_status(
        &self,
        id: i32,
        req: &UpdateStatusRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_product_status",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
                KeyValue::new("product.status", req.status.as_str()),
            ],
        );

        let result = self.command.update_status(id, req.status.as_str()).await;
        self.finish(
            &tracing_ctx,
            Method::Patch,
            result,
            "Product status updated successfully",
        )
    }

    async fn trash_product(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "trash_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = self.command.trash_product(id).await;
        self.finish(&tracing_ctx, Method::Delete, result, "Product moved to trash")
    }

    async fn restore_product(
        &self,
        id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "restore_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = self.command.restore_product(id).await;
        self.finish(&tracing_ctx, Method::Patch, result, "Product restored successfully")
    }
}
