use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    abstract_trait::{DynOrderCommandRepository, DynOrderQueryRepository, PaymentServiceTrait},
    domain::{
        requests::CreatePaymentRequest,
        responses::{ApiResponse, PaymentResultResponse, PaymentUrlResponse},
        status::{OrderStatus, PaymentMethod, PaymentStatus},
    },
    errors::ServiceError,
    model::{Order as OrderModel, PaymentUpdate},
    utils::{Method, ServiceObserver},
    vnpay::{IpnResponse, PaymentUrlParams, VnpayGateway, VnpayResult},
};

fn payment_update(result: &VnpayResult) -> PaymentUpdate {
    let status = if result.is_success() {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Failed
    };

    PaymentUpdate {
        payment_status: status.as_str().to_string(),
        transaction_no: result.transaction_no.clone(),
        bank_code: result.bank_code.clone(),
        pay_date: result.pay_date.clone(),
        response_code: Some(result.response_code.clone()),
    }
}

pub struct PaymentService {
    order_query: DynOrderQueryRepository,
    order_command: DynOrderCommandRepository,
    gateway: Arc<VnpayGateway>,
    observer: ServiceObserver,
}

impl PaymentService {
    pub async fn new(
        order_query: DynOrderQueryRepository,
        order_command: DynOrderCommandRepository,
        gateway: Arc<VnpayGateway>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let observer = ServiceObserver::new("payment_service", &registry).await;

        Self {
            order_query,
            order_command,
            gateway,
            observer,
        }
    }

    async fn find_order(&self, code: &str) -> Result<OrderModel, ServiceError> {
        self.order_query
            .find_by_code(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {code} not found")))
    }

    /// Records a verified outcome once; later callbacks leave the order as is.
    async fn settle(
        &self,
        order: OrderModel,
        result: &VnpayResult,
    ) -> Result<OrderModel, ServiceError> {
        match self
            .order_command
            .apply_payment_result(&order.order_code, &payment_update(result))
            .await?
        {
            Some(updated) => Ok(updated),
            None => {
                info!(
                    "ℹ️ Order {} payment already settled as {}",
                    order.order_code, order.payment_status
                );
                Ok(order)
            }
        }
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    async fn create_payment_url(
        &self,
        req: &CreatePaymentRequest,
        client_ip: &str,
    ) -> Result<ApiResponse<PaymentUrlResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "create_payment_url",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new("order.code", req.order_code.clone()),
            ],
        );

        let result: Result<PaymentUrlResponse, ServiceError> = async {
            let order = self.find_order(&req.order_code).await?;

            if order.payment_method != PaymentMethod::Vnpay.as_str() {
                return Err(ServiceError::Payment(format!(
                    "Order {} is not paid online",
                    order.order_code
                )));
            }

            if order.payment_status != PaymentStatus::Pending.as_str()
                || order.status == OrderStatus::Cancelled.as_str()
            {
                return Err(ServiceError::Payment(format!(
                    "Order {} is no longer awaiting payment",
                    order.order_code
                )));
            }

            let params = PaymentUrlParams {
                order_code: order.order_code.clone(),
                total: order.total,
                client_ip: client_ip.to_string(),
                locale: req.locale.clone(),
                bank_code: req.bank_code.clone(),
            };

            let payment_url = self.gateway.build_payment_url(&params, Utc::now())?;

            Ok(PaymentUrlResponse {
                order_code: order.order_code,
                payment_url,
            })
        }
        .await;

        match result {
            Ok(data) => {
                self.observer
                    .success(&tracing_ctx, Method::Post, "Payment url created");
                Ok(ApiResponse::success("Payment url created successfully", data))
            }
            Err(err) => {
                warn!("⚠️ Payment url refused: {err}");
                self.observer
                    .failure(&tracing_ctx, Method::Post, &err.to_string());
                Err(err)
            }
        }
    }

    async fn vnpay_return(
        &self,
        query: &BTreeMap<String, String>,
    ) -> Result<ApiResponse<PaymentResultResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "vnpay_return",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new(
                    "order.code",
                    query.get("vnp_TxnRef").cloned().unwrap_or_default(),
                ),
            ],
        );

        let result: Result<(OrderModel, VnpayResult), ServiceError> = async {
            let outcome = self.gateway.verify_callback(query)?;
            let order = self.find_order(&outcome.order_code).await?;

            if !outcome.matches_total(order.total) {
                return Err(ServiceError::Payment("Invalid amount".to_string()));
            }

            let order = self.settle(order, &outcome).await?;
            Ok((order, outcome))
        }
        .await;

        match result {
            Ok((order, outcome)) => {
                self.observer
                    .success(&tracing_ctx, Method::Get, "Payment return handled");

                let success = order.payment_status == PaymentStatus::Paid.as_str();
                let message = if success {
                    "Payment completed successfully"
                } else {
                    "Payment was not completed"
                };

                Ok(ApiResponse::success(
                    message,
                    PaymentResultResponse {
                        order_code: order.order_code,
                        success,
                        payment_status: order.payment_status,
                        response_code: outcome.response_code,
                    },
                ))
            }
            Err(err) => {
                warn!("⚠️ VNPay return rejected: {err}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, &err.to_string());
                Err(err)
            }
        }
    }

    async fn vnpay_ipn(&self, query: &BTreeMap<String, String>) -> IpnResponse {
        let tracing_ctx = self.observer.start(
            "vnpay_ipn",
            vec![
                KeyValue::new("component", "payment"),
                KeyValue::new(
                    "order.code",
                    query.get("vnp_TxnRef").cloned().unwrap_or_default(),
                ),
            ],
        );

        let response = async {
            if !self.gateway.verify_signature(query) {
                warn!("⚠️ IPN with invalid checksum");
                return IpnResponse::invalid_checksum();
            }

            let outcome = match VnpayResult::from_query(query) {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!("❌ Malformed IPN: {err}");
                    return IpnResponse::unknown_error();
                }
            };

            let order = match self.order_query.find_by_code(&outcome.order_code).await {
                Ok(Some(order)) => order,
                Ok(None) => return IpnResponse::order_not_found(),
                Err(err) => {
                    error!("❌ IPN lookup of {} failed: {err:?}", outcome.order_code);
                    return IpnResponse::unknown_error();
                }
            };

            if !outcome.matches_total(order.total) {
                warn!(
                    "⚠️ IPN vnp_Amount {} does not match order {} total {}",
                    outcome.amount, order.order_code, order.total
                );
                return IpnResponse::invalid_amount();
            }

            if order.payment_status != PaymentStatus::Pending.as_str() {
                return IpnResponse::already_confirmed();
            }

            match self
                .order_command
                .apply_payment_result(&order.order_code, &payment_update(&outcome))
                .await
            {
                Ok(Some(updated)) => {
                    info!(
                        "💳 IPN settled order {} as {}",
                        updated.order_code, updated.payment_status
                    );
                    IpnResponse::confirmed()
                }
                Ok(None) => IpnResponse::already_confirmed(),
                Err(err) => {
                    error!("❌ IPN update of {} failed: {err:?}", order.order_code);
                    IpnResponse::unknown_error()
                }
            }
        }
        .await;

        let message = format!("IPN answered {}", response.rsp_code);
        if response.rsp_code == "00" || response.rsp_code == "02" {
            self.observer.success(&tracing_ctx, Method::Get, &message);
        } else {
            self.observer.failure(&tracing_ctx, Method::Get, &message);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(response_code: &str, transaction_status: &str) -> VnpayResult {
        VnpayResult {
            order_code: "OD240615ABCDEF".into(),
            amount: 15_000_000,
            response_code: response_code.into(),
            transaction_status: transaction_status.into(),
            transaction_no: Some("14012345".into()),
            bank_code: Some("NCB".into()),
            pay_date: Some("20240615101010".into()),
        }
    }

    #[test]
    fn both_codes_zero_means_paid() {
        assert_eq!(payment_update(&outcome("00", "00")).payment_status, "paid");
    }

    #[test]
    fn any_other_code_means_failed() {
        assert_eq!(payment_update(&outcome("24", "02")).payment_status, "failed");
        assert_eq!(payment_update(&outcome("00", "01")).payment_status, "failed");
    }
}
