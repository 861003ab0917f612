use async_trait::async_trait;
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    domain::{
        requests::CreatePaymentRequest,
        responses::{ApiResponse, PaymentResultResponse, PaymentUrlResponse},
    },
    errors::ServiceError,
    vnpay::IpnResponse,
};

pub type DynPaymentService = Arc<dyn PaymentServiceTrait + Send + Sync>;

#[async_trait]
pub trait PaymentServiceTrait {
    async fn create_payment_url(
        &self,
        req: &CreatePaymentRequest,
        client_ip: &str,
    ) -> Result<ApiResponse<PaymentUrlResponse>, ServiceError>;
    async fn vnpay_return(
        &self,
        query: &BTreeMap<String, String>,
    ) -> Result<ApiResponse<PaymentResultResponse>, ServiceError>;
    /// Never fails: every outcome is an `RspCode` for VNPay.
    async fn vnpay_ipn(&self, query: &BTreeMap<String, String>) -> IpnResponse;
}
