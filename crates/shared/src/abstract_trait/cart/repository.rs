use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    errors::RepositoryError,
    model::{Cart as CartModel, CartLine},
};

pub type DynCartRepository = Arc<dyn CartRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartRepositoryTrait {
    async fn find_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Option<CartModel>, RepositoryError>;
    /// Replaces the whole line list, creating the cart if needed.
    async fn save_lines(
        &self,
        customer_id: i32,
        lines: &[CartLine],
    ) -> Result<CartModel, RepositoryError>;
}
