use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;

use crate::{
    abstract_trait::{CustomerServiceTrait, DynCustomerRepository},
    domain::{
        requests::{FindAllRecords, UpdateCustomerStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, CustomerResponse, Pagination},
    },
    errors::ServiceError,
    utils::{Method, ServiceObserver},
};

pub struct CustomerService {
    repository: DynCustomerRepository,
    observer: ServiceObserver,
}

impl CustomerService {
    pub async fn new(repository: DynCustomerRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("customer_service", &registry).await;

        Self {
            repository,
            observer,
        }
    }
}

#[async_trait]
impl CustomerServiceTrait for CustomerService {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<CustomerResponse>>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "find_all_customers",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("page", req.page.to_string()),
            ],
        );

        let (customers, total) = match self.repository.find_all(req).await {
            Ok(page) => page,
            Err(err) => {
                error!("❌ Failed to fetch customers: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to fetch customers");
                return Err(ServiceError::Repo(err));
            }
        };

        self.observer
            .success(&tracing_ctx, Method::Get, "Customers retrieved");

        Ok(ApiResponsePagination::success(
            "Customers retrieved successfully",
            customers.into_iter().map(CustomerResponse::from).collect(),
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        match self.repository.find_by_id(id).await? {
            Some(customer) => Ok(ApiResponse::success(
                "Customer retrieved successfully",
                CustomerResponse::from(customer),
            )),
            None => Err(ServiceError::NotFound(format!("Customer {id} not found"))),
        }
    }

    async fn update_status(
        &self,
        id: i32,
        req: &UpdateCustomerStatusRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_customer_status",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("customer.id", id.to_string()),
                KeyValue::new("customer.status", req.status.as_str()),
            ],
        );

        match self.repository.update_status(id, req.status.as_str()).await {
            Ok(customer) => {
                self.observer
                    .success(&tracing_ctx, Method::Patch, "Customer status updated");
                Ok(ApiResponse::success(
                    "Customer status updated successfully",
                    CustomerResponse::from(customer),
                ))
            }
            Err(err) => {
                error!("❌ Failed to update customer {id}: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Patch, "Failed to update customer");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn trash_customer(
        &self,
        id: i32,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "trash_customer",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("customer.id", id.to_string()),
            ],
        );

        match self.repository.trash_customer(id).await {
            Ok(customer) => {
                self.observer
                    .success(&tracing_ctx, Method::Delete, "Customer trashed");
                Ok(ApiResponse::success(
                    "Customer moved to trash",
                    CustomerResponse::from(customer),
                ))
            }
            Err(err) => {
                error!("❌ Failed to trash customer {id}: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Delete, "Failed to trash customer");
                Err(ServiceError::Repo(err))
            }
        }
    }
}
