use async_trait::async_trait;
use std::sync::Arc;

use crate::{errors::ServiceError, utils::EmailTemplateData};

pub type DynEmailService = Arc<dyn EmailServiceTrait + Send + Sync>;

#[derive(Debug, Clone)]
pub struct EmailRequest {
    pub to: String,
    pub data: EmailTemplateData,
}

#[async_trait]
pub trait EmailServiceTrait {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError>;
}
