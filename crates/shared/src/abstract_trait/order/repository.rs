use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::requests::FindAllRecords,
    errors::RepositoryError,
    model::{NewOrder, Order as OrderModel, PaymentUpdate},
};

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError>;
    async fn find_by_customer(
        &self,
        customer_id: i32,
        page: i32,
        page_size: i32,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<OrderModel>, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderModel, RepositoryError>;
    /// Moves an order to `next` only while it is still in `expected`.
    async fn transition_status(
        &self,
        id: i32,
        expected: &str,
        next: &str,
    ) -> Result<Option<OrderModel>, RepositoryError>;
    async fn update_payment_status(
        &self,
        id: i32,
        payment_status: &str,
    ) -> Result<OrderModel, RepositoryError>;
    /// Writes a gateway outcome if the order is still awaiting payment.
    /// A paid outcome also confirms a pending order.
    async fn apply_payment_result(
        &self,
        order_code: &str,
        update: &PaymentUpdate,
    ) -> Result<Option<OrderModel>, RepositoryError>;
    async fn trash_order(&self, id: i32) -> Result<OrderModel, RepositoryError>;
}
