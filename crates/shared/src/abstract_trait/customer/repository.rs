use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::requests::{FindAllRecords, RegisterRequest},
    errors::RepositoryError,
    model::Customer as CustomerModel,
};

pub type DynCustomerRepository = Arc<dyn CustomerRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CustomerRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<CustomerModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<CustomerModel>, RepositoryError>;
    /// Includes soft-deleted rows so callers can refuse them explicitly.
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerModel>, RepositoryError>;
    async fn create_customer(
        &self,
        req: &RegisterRequest,
        hashed_password: &str,
    ) -> Result<CustomerModel, RepositoryError>;
    async fn update_password(
        &self,
        id: i32,
        hashed_password: &str,
    ) -> Result<CustomerModel, RepositoryError>;
    async fn update_status(&self, id: i32, status: &str)
    -> Result<CustomerModel, RepositoryError>;
    async fn trash_customer(&self, id: i32) -> Result<CustomerModel, RepositoryError>;
}
