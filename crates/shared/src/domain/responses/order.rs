use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{Order, OrderLine, PromotionSnapshot};

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub order_code: String,
    pub customer_id: Option<i32>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub note: Option<String>,
    pub items: Vec<OrderLine>,
    pub promotion: Option<PromotionSnapshot>,
    pub payment_method: String,
    pub payment_status: String,
    pub vnp_transaction_no: Option<String>,
    pub vnp_bank_code: Option<String>,
    pub vnp_pay_date: Option<String>,
    pub sub_total: i64,
    pub discount: i64,
    pub total: i64,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.order_id,
            order_code: value.order_code,
            customer_id: value.customer_id,
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            address: value.address,
            note: value.note,
            items: value.info_product.0,
            promotion: value.promotion.map(|snapshot| snapshot.0),
            payment_method: value.payment_method,
            payment_status: value.payment_status,
            vnp_transaction_no: value.vnp_transaction_no,
            vnp_bank_code: value.vnp_bank_code,
            vnp_pay_date: value.vnp_pay_date,
            sub_total: value.sub_total,
            discount: value.discount,
            total: value.total,
            status: value.status,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
            deleted_at: value.deleted_at.map(|dt| dt.to_string()),
        }
    }
}

/// Result of checkout. `payment_url` is set for VNPay orders.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CreateOrderResponse {
    pub order: OrderResponse,
    pub payment_url: Option<String>,
}
