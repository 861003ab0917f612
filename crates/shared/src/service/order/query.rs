use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{
    abstract_trait::{DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::{
        requests::{FindAllRecords, PageQuery},
        responses::{ApiResponse, ApiResponsePagination, OrderResponse, Pagination},
    },
    errors::{RepositoryError, ServiceError},
    model::Order as OrderModel,
    utils::{Method, ServiceObserver, TracingContext},
};

pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    observer: ServiceObserver,
}

impl OrderQueryService {
    pub async fn new(query: DynOrderQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("order_query_service", &registry).await;

        Self { query, observer }
    }

    fn start_lookup(&self, operation: &str, key: &str) -> TracingContext {
        self.observer.start(
            operation,
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.key", key.to_string()),
            ],
        )
    }

    fn finish_lookup(
        &self,
        tracing_ctx: &TracingContext,
        key: &str,
        result: Result<Option<OrderModel>, RepositoryError>,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        match result {
            Ok(Some(order)) => {
                self.observer
                    .success(tracing_ctx, Method::Get, "Order found");
                Ok(ApiResponse::success(
                    "Order retrieved successfully",
                    OrderResponse::from(order),
                ))
            }
            Ok(None) => {
                self.observer
                    .failure(tracing_ctx, Method::Get, "Order not found");
                Err(ServiceError::NotFound(format!("Order {key} not found")))
            }
            Err(err) => {
                error!("❌ Failed to fetch order {key}: {err:?}");
                self.observer
                    .failure(tracing_ctx, Method::Get, "Failed to fetch order");
                Err(ServiceError::Repo(err))
            }
        }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        info!(
            "🔍 Listing orders page={} search={:?} status={:?}",
            req.page, req.search, req.status
        );

        let tracing_ctx = self.observer.start(
            "find_all_orders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("page", req.page.to_string()),
                KeyValue::new("status", req.status.clone().unwrap_or_default()),
            ],
        );

        let (orders, total) = match self.query.find_all(req).await {
            Ok(page) => page,
            Err(err) => {
                error!("❌ Failed to fetch orders: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to fetch orders");
                return Err(ServiceError::Repo(err));
            }
        };

        self.observer
            .success(&tracing_ctx, Method::Get, "Orders retrieved");

        Ok(ApiResponsePagination::success(
            "Orders retrieved successfully",
            orders.into_iter().map(OrderResponse::from).collect(),
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_my_orders(
        &self,
        customer_id: i32,
        req: &PageQuery,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "find_my_orders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("customer.id", customer_id.to_string()),
            ],
        );

        let (orders, total) = match self
            .query
            .find_by_customer(customer_id, req.page, req.page_size)
            .await
        {
            Ok(page) => page,
            Err(err) => {
                error!("❌ Failed to fetch orders of customer {customer_id}: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to fetch orders");
                return Err(ServiceError::Repo(err));
            }
        };

        self.observer
            .success(&tracing_ctx, Method::Get, "Customer orders retrieved");

        Ok(ApiResponsePagination::success(
            "Orders retrieved successfully",
            orders.into_iter().map(OrderResponse::from).collect(),
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let key = id.to_string();
        let tracing_ctx = self.start_lookup("find_order_by_id", &key);
        let result = self.query.find_by_id(id).await;
        self.finish_lookup(&tracing_ctx, &key, result)
    }

    async fn find_by_code(&self, code: &str) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.start_lookup("find_order_by_code", code);
        let result = self.query.find_by_code(code).await;
        self.finish_lookup(&tracing_ctx, code, result)
    }
}
