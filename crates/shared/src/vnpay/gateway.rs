use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    config::VnpayConfig,
    errors::ServiceError,
    vnpay::{
        PAYMENT_EXPIRE_MINUTES, VNP_SECURE_HASH, VNP_VERSION, encode_params, sign_params,
        verify_params,
    },
};

const VN_OFFSET_SECS: i32 = 7 * 3600;
const VNP_DATE_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Clone)]
pub struct PaymentUrlParams {
    pub order_code: String,
    pub total: i64,
    pub client_ip: String,
    pub locale: Option<String>,
    pub bank_code: Option<String>,
}

/// Outcome fields read from a verified return or IPN query.
#[derive(Debug, Clone, PartialEq)]
pub struct VnpayResult {
    pub order_code: String,
    /// `vnp_Amount` as sent: the order total times 100.
    pub amount: i64,
    pub response_code: String,
    pub transaction_status: String,
    pub transaction_no: Option<String>,
    pub bank_code: Option<String>,
    pub pay_date: Option<String>,
}

impl VnpayResult {
    pub fn from_query(query: &BTreeMap<String, String>) -> Result<Self, ServiceError> {
        let field = |name: &str| {
            query
                .get(name)
                .cloned()
                .ok_or_else(|| ServiceError::Payment(format!("Missing {name}")))
        };

        let raw_amount = field("vnp_Amount")?;
        let amount = raw_amount
            .parse::<i64>()
            .map_err(|_| ServiceError::Payment(format!("Invalid vnp_Amount '{raw_amount}'")))?;

        Ok(Self {
            order_code: field("vnp_TxnRef")?,
            amount,
            response_code: field("vnp_ResponseCode")?,
            transaction_status: query.get("vnp_TransactionStatus").cloned().unwrap_or_default(),
            transaction_no: query.get("vnp_TransactionNo").cloned(),
            bank_code: query.get("vnp_BankCode").cloned(),
            pay_date: query.get("vnp_PayDate").cloned(),
        })
    }

    /// Exact comparison in VNPay's ×100 units, so no remainder is dropped.
    pub fn matches_total(&self, total: i64) -> bool {
        total.checked_mul(100) == Some(self.amount)
    }

    pub fn is_success(&self) -> bool {
        self.response_code == "00" && self.transaction_status == "00"
    }
}

/// Body VNPay expects back from the IPN endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IpnResponse {
    #[serde(rename = "RspCode")]
    pub rsp_code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl IpnResponse {
    fn new(code: &str, message: &str) -> Self {
        Self {
            rsp_code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn confirmed() -> Self {
        Self::new("00", "Confirm Success")
    }

    pub fn order_not_found() -> Self {
        Self::new("01", "Order not found")
    }

    pub fn already_confirmed() -> Self {
        Self::new("02", "Order already confirmed")
    }

    pub fn invalid_amount() -> Self {
        Self::new("04", "Invalid amount")
    }

    pub fn invalid_checksum() -> Self {
        Self::new("97", "Invalid Checksum")
    }

    pub fn unknown_error() -> Self {
        Self::new("99", "Unknown error")
    }
}

#[derive(Debug, Clone)]
pub struct VnpayGateway {
    config: VnpayConfig,
}

impl VnpayGateway {
    pub fn new(config: VnpayConfig) -> Self {
        Self { config }
    }

    pub fn build_payment_url(
        &self,
        params: &PaymentUrlParams,
        now: DateTime<Utc>,
    ) -> Result<String, ServiceError> {
        let amount = params
            .total
            .checked_mul(100)
            .filter(|amount| *amount > 0)
            .ok_or_else(|| {
                ServiceError::Payment(format!("Invalid amount for order {}", params.order_code))
            })?;

        let offset = FixedOffset::east_opt(VN_OFFSET_SECS)
            .ok_or_else(|| ServiceError::Internal("Invalid VNPay timezone".to_string()))?;
        let local = now.with_timezone(&offset);
        let expire = local + Duration::minutes(PAYMENT_EXPIRE_MINUTES);

        let mut query = BTreeMap::from([
            ("vnp_Version".to_string(), VNP_VERSION.to_string()),
            ("vnp_Command".to_string(), "pay".to_string()),
            ("vnp_TmnCode".to_string(), self.config.tmn_code.clone()),
            (
                "vnp_Locale".to_string(),
                params.locale.clone().unwrap_or_else(|| "vn".to_string()),
            ),
            ("vnp_CurrCode".to_string(), "VND".to_string()),
            ("vnp_TxnRef".to_string(), params.order_code.clone()),
            (
                "vnp_OrderInfo".to_string(),
                format!("Thanh toan don hang {}", params.order_code),
            ),
            ("vnp_OrderType".to_string(), "other".to_string()),
            ("vnp_Amount".to_string(), amount.to_string()),
            ("vnp_ReturnUrl".to_string(), self.config.return_url.clone()),
            ("vnp_IpAddr".to_string(), params.client_ip.clone()),
            (
                "vnp_CreateDate".to_string(),
                local.format(VNP_DATE_FORMAT).to_string(),
            ),
            (
                "vnp_ExpireDate".to_string(),
                expire.format(VNP_DATE_FORMAT).to_string(),
            ),
        ]);

        if let Some(bank_code) = params.bank_code.as_ref().filter(|code| !code.is_empty()) {
            query.insert("vnp_BankCode".to_string(), bank_code.clone());
        }

        let secure_hash = sign_params(&self.config.hash_secret, &query)?;
        query.insert(VNP_SECURE_HASH.to_string(), secure_hash);

        info!("💳 Built VNPay payment url for order {}", params.order_code);

        Ok(format!("{}?{}", self.config.payment_url, encode_params(&query)))
    }

    pub fn verify_signature(&self, query: &BTreeMap<String, String>) -> bool {
        verify_params(&self.config.hash_secret, query)
    }

    /// Verifies the callback signature and extracts the payment outcome.
    pub fn verify_callback(
        &self,
        query: &BTreeMap<String, String>,
    ) -> Result<VnpayResult, ServiceError> {
        if !self.verify_signature(query) {
            warn!("⚠️ VNPay callback failed checksum verification");
            return Err(ServiceError::Payment("Invalid Checksum".to_string()));
        }

        VnpayResult::from_query(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use url::Url;

    fn gateway() -> VnpayGateway {
        VnpayGateway::new(VnpayConfig {
            tmn_code: "TESTCODE".into(),
            hash_secret: "SECRETKEY".into(),
            payment_url: "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".into(),
            return_url: "http://localhost:5173/payment/vnpay-return".into(),
        })
    }

    fn url_params() -> PaymentUrlParams {
        PaymentUrlParams {
            order_code: "OD20240615ABC".into(),
            total: 150_000,
            client_ip: "127.0.0.1".into(),
            locale: None,
            bank_code: None,
        }
    }

    fn query_of(url: &str) -> BTreeMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn payment_url_carries_amount_times_hundred_and_vn_dates() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 3, 0, 0).unwrap();
        let url = gateway().build_payment_url(&url_params(), now).unwrap();
        let query = query_of(&url);

        assert_eq!(query["vnp_Amount"], "15000000");
        assert_eq!(query["vnp_TxnRef"], "OD20240615ABC");
        assert_eq!(query["vnp_CreateDate"], "20240615100000");
        assert_eq!(query["vnp_ExpireDate"], "20240615101500");
        assert_eq!(query["vnp_Locale"], "vn");
        assert!(!query.contains_key("vnp_BankCode"));
    }

    #[test]
    fn payment_url_signature_round_trips() {
        let gateway = gateway();
        let url = gateway.build_payment_url(&url_params(), Utc::now()).unwrap();

        assert!(verify_params("SECRETKEY", &query_of(&url)));
    }

    fn signed_callback(response_code: &str, status: &str) -> BTreeMap<String, String> {
        let mut query = BTreeMap::from([
            ("vnp_TxnRef".to_string(), "OD20240615ABC".to_string()),
            ("vnp_Amount".to_string(), "15000000".to_string()),
            ("vnp_ResponseCode".to_string(), response_code.to_string()),
            ("vnp_TransactionStatus".to_string(), status.to_string()),
            ("vnp_TransactionNo".to_string(), "14012345".to_string()),
            ("vnp_BankCode".to_string(), "NCB".to_string()),
            ("vnp_PayDate".to_string(), "20240615101010".to_string()),
        ]);
        let hash = sign_params("SECRETKEY", &query).unwrap();
        query.insert(VNP_SECURE_HASH.to_string(), hash);
        query
    }

    #[test]
    fn successful_callback_is_parsed() {
        let result = gateway()
            .verify_callback(&signed_callback("00", "00"))
            .unwrap();

        assert!(result.is_success());
        assert_eq!(result.amount, 15_000_000);
        assert!(result.matches_total(150_000));
        assert_eq!(result.bank_code.as_deref(), Some("NCB"));
    }

    #[test]
    fn declined_callback_is_not_success() {
        let result = gateway()
            .verify_callback(&signed_callback("24", "02"))
            .unwrap();
        assert!(!result.is_success());
    }

    #[test]
    fn payment_url_refuses_an_amount_that_overflows() {
        let mut params = url_params();
        params.total = i64::MAX / 10;

        assert!(matches!(
            gateway().build_payment_url(&params, Utc::now()),
            Err(ServiceError::Payment(_))
        ));
    }

    #[test]
    fn amount_with_a_remainder_does_not_match_the_total() {
        let mut query = signed_callback("00", "00");
        query.insert("vnp_Amount".to_string(), "15000099".to_string());
        query.remove(VNP_SECURE_HASH);
        let hash = sign_params("SECRETKEY", &query).unwrap();
        query.insert(VNP_SECURE_HASH.to_string(), hash);

        let result = gateway().verify_callback(&query).unwrap();
        assert!(!result.matches_total(150_000));
    }

    #[test]
    fn tampered_callback_is_rejected() {
        let mut query = signed_callback("00", "00");
        query.insert("vnp_Amount".to_string(), "100".to_string());

        assert!(matches!(
            gateway().verify_callback(&query),
            Err(ServiceError::Payment(_))
        ));
    }
}
