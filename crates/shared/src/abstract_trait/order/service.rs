use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::{
            CreateOrderRequest, FindAllRecords, PageQuery, UpdateOrderStatusRequest,
            UpdatePaymentStatusRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, CreateOrderResponse, OrderResponse},
    },
    errors::ServiceError,
};

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;
pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_my_orders(
        &self,
        customer_id: i32,
        req: &PageQuery,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn find_by_code(&self, code: &str) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}

#[async_trait]
pub trait OrderCommandServiceTrait {
    /// Checkout. `client_ip` is forwarded to VNPay for online payments.
    async fn create_order(
        &self,
        customer_id: Option<i32>,
        req: &CreateOrderRequest,
        client_ip: &str,
    ) -> Result<ApiResponse<CreateOrderResponse>, ServiceError>;
    async fn cancel_order(
        &self,
        customer_id: i32,
        code: &str,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_status(
        &self,
        id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_payment_status(
        &self,
        id: i32,
        req: &UpdatePaymentStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn trash_order(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
