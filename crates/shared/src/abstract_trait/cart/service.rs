use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::AddToCartRequest,
        responses::{ApiResponse, CartResponse},
    },
    errors::ServiceError,
};

pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartServiceTrait {
    async fn get_cart(&self, customer_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn add_items(
        &self,
        customer_id: i32,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn remove_item(
        &self,
        customer_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn clear_cart(&self, customer_id: i32)
    -> Result<ApiResponse<CartResponse>, ServiceError>;
}
