use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub product_id: i32,
    pub name: String,
    pub thumbnail: Option<String>,
    pub price: i64,
    pub discount: f64,
    pub quantity: i32,
    pub total: i64,
}

/// Terms of the promotion as they were when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PromotionSnapshot {
    pub id: i32,
    pub code: String,
    pub discount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub order_code: String,
    pub customer_id: Option<i32>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub note: Option<String>,
    pub info_product: Json<Vec<OrderLine>>,
    pub promotion: Option<Json<PromotionSnapshot>>,
    pub payment_method: String,
    pub payment_status: String,
    pub vnp_transaction_no: Option<String>,
    pub vnp_bank_code: Option<String>,
    pub vnp_pay_date: Option<String>,
    pub vnp_response_code: Option<String>,
    pub sub_total: i64,
    pub discount: i64,
    pub total: i64,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Row values for a freshly reconciled order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_code: String,
    pub customer_id: Option<i32>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub note: Option<String>,
    pub info_product: Vec<OrderLine>,
    pub promotion: Option<PromotionSnapshot>,
    pub payment_method: String,
    pub sub_total: i64,
    pub discount: i64,
    pub total: i64,
}

/// Gateway outcome written onto an order still awaiting payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentUpdate {
    pub payment_status: String,
    pub transaction_no: Option<String>,
    pub bank_code: Option<String>,
    pub pay_date: Option<String>,
    pub response_code: Option<String>,
}
