use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::{
        requests::{FindAllProducts, FindAllRecords},
        responses::{ApiResponse, ApiResponsePagination, Pagination, ProductResponse},
    },
    errors::ServiceError,
    model::Product as ProductModel,
    utils::{Method, ServiceObserver},
};

const FEATURED_LIMIT: i64 = 8;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    observer: ServiceObserver,
}

impl ProductQueryService {
    pub async fn new(query: DynProductQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("product_query_service", &registry).await;

        Self { query, observer }
    }

    async fn admin_page(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let operation = if trashed {
            "find_trashed_products"
        } else {
            "find_all_products"
        };

        let tracing_ctx = self.observer.start(
            operation,
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("page", req.page.to_string()),
                KeyValue::new("search", req.search.clone()),
            ],
        );

        let result = if trashed {
            self.query.find_trashed(req).await
        } else {
            self.query.find_all(req).await
        };

        let (products, total) = match result {
            Ok(page) => page,
            Err(err) => {
                error!("❌ Failed to fetch products: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to fetch products");
                return Err(ServiceError::Repo(err));
            }
        };

        self.observer
            .success(&tracing_ctx, Method::Get, "Products retrieved");

        Ok(ApiResponsePagination::success(
            "Products retrieved successfully",
            to_responses(products),
            Pagination::new(req.page, req.page_size, total),
        ))
    }
}

fn to_responses(products: Vec<ProductModel>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_visible(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!(
            "🔍 Listing products page={} search={:?} category={:?}",
            req.page, req.search, req.category
        );

        let tracing_ctx = self.observer.start(
            "find_visible_products",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("page", req.page.to_string()),
                KeyValue::new("category", req.category.clone().unwrap_or_default()),
            ],
        );

        let (products, total) = match self.query.find_visible(req).await {
            Ok(page) => page,
            Err(err) => {
                error!("❌ Failed to list products: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to list products");
                return Err(ServiceError::Repo(err));
            }
        };

        self.observer
            .success(&tracing_ctx, Method::Get, "Products listed");

        Ok(ApiResponsePagination::success(
            "Products retrieved successfully",
            to_responses(products),
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_featured(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "find_featured_products",
            vec![KeyValue::new("component", "product")],
        );

        match self.query.find_featured(FEATURED_LIMIT).await {
            Ok(products) => {
                self.observer
                    .success(&tracing_ctx, Method::Get, "Featured products listed");
                Ok(ApiResponse::success(
                    "Featured products retrieved successfully",
                    to_responses(products),
                ))
            }
            Err(err) => {
                error!("❌ Failed to list featured products: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to list featured products");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "find_product_by_slug",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.slug", slug.to_string()),
            ],
        );

        match self.query.find_visible_by_slug(slug).await {
            Ok(Some(product)) => {
                self.observer
                    .success(&tracing_ctx, Method::Get, "Product found");
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => {
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Product not found");
                Err(ServiceError::NotFound(format!("Product '{slug}' not found")))
            }
            Err(err) => {
                error!("❌ Failed to fetch product {slug}: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to fetch product");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        self.admin_page(req, false).await
    }

    async fn find_trashed(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        self.admin_page(req, true).await
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "find_product_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                self.observer
                    .success(&tracing_ctx, Method::Get, "Product found");
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => {
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Product not found");
                Err(ServiceError::NotFound(format!("Product {id} not found")))
            }
            Err(err) => {
                error!("❌ Failed to fetch product {id}: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to fetch product");
                Err(ServiceError::Repo(err))
            }
        }
    }
}
