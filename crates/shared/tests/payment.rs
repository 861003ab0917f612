mod common;

use std::{collections::BTreeMap, sync::Arc};

use common::{HASH_SECRET, MemoryOrders, gateway, order, registry};
use shared::{
    abstract_trait::PaymentServiceTrait,
    domain::requests::CreatePaymentRequest,
    errors::ServiceError,
    service::PaymentService,
    vnpay::{VNP_SECURE_HASH, sign_params},
};

async fn payments(orders: Arc<MemoryOrders>) -> PaymentService {
    PaymentService::new(orders.clone(), orders, gateway(), registry()).await
}

fn callback(code: &str, amount: i64, response_code: &str) -> BTreeMap<String, String> {
    let mut query: BTreeMap<String, String> = [
        ("vnp_TxnRef", code.to_string()),
        ("vnp_Amount", (amount * 100).to_string()),
        ("vnp_ResponseCode", response_code.to_string()),
        ("vnp_TransactionStatus", response_code.to_string()),
        ("vnp_TransactionNo", "14012345".to_string()),
        ("vnp_BankCode", "NCB".to_string()),
        ("vnp_PayDate", "20240615101010".to_string()),
        ("vnp_TmnCode", "TESTCODE".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let hash = sign_params(HASH_SECRET, &query).unwrap();
    query.insert(VNP_SECURE_HASH.to_string(), hash);
    query
}

#[tokio::test]
async fn ipn_settles_once_then_reports_already_confirmed() {
    let orders = Arc::new(MemoryOrders::with(vec![order(1, "OD240615AAAAAA", 150_000, "vnpay")]));
    let service = payments(orders.clone()).await;
    let query = callback("OD240615AAAAAA", 150_000, "00");

    assert_eq!(service.vnpay_ipn(&query).await.rsp_code, "00");

    let stored = &orders.all()[0];
    assert_eq!(stored.payment_status, "paid");
    assert_eq!(stored.status, "confirmed");
    assert_eq!(stored.vnp_transaction_no.as_deref(), Some("14012345"));

    assert_eq!(service.vnpay_ipn(&query).await.rsp_code, "02");
    assert_eq!(orders.all()[0].payment_status, "paid");
}

#[tokio::test]
async fn ipn_with_tampered_field_is_refused() {
    let orders = Arc::new(MemoryOrders::with(vec![order(1, "OD240615AAAAAA", 150_000, "vnpay")]));
    let service = payments(orders.clone()).await;

    let mut query = callback("OD240615AAAAAA", 150_000, "00");
    query.insert("vnp_Amount".into(), "100".into());

    assert_eq!(service.vnpay_ipn(&query).await.rsp_code, "97");
    assert_eq!(orders.all()[0].payment_status, "pending");
}

#[tokio::test]
async fn ipn_for_unknown_order_or_wrong_amount() {
    let orders = Arc::new(MemoryOrders::with(vec![order(1, "OD240615AAAAAA", 150_000, "vnpay")]));
    let service = payments(orders.clone()).await;

    let missing = callback("OD240615ZZZZZZ", 150_000, "00");
    assert_eq!(service.vnpay_ipn(&missing).await.rsp_code, "01");

    let short = callback("OD240615AAAAAA", 140_000, "00");
    assert_eq!(service.vnpay_ipn(&short).await.rsp_code, "04");
    assert_eq!(orders.all()[0].payment_status, "pending");
}

#[tokio::test]
async fn declined_payment_marks_order_failed_but_keeps_it_pending() {
    let orders = Arc::new(MemoryOrders::with(vec![order(1, "OD240615AAAAAA", 150_000, "vnpay")]));
    let service = payments(orders.clone()).await;

    let response = service
        .vnpay_return(&callback("OD240615AAAAAA", 150_000, "24"))
        .await
        .unwrap();

    assert!(!response.data.success);
    assert_eq!(response.data.payment_status, "failed");
    assert_eq!(orders.all()[0].status, "pending");
}

#[tokio::test]
async fn payment_url_only_for_online_orders_awaiting_payment() {
    let orders = Arc::new(MemoryOrders::with(vec![
        order(1, "OD240615AAAAAA", 150_000, "vnpay"),
        order(2, "OD240615BBBBBB", 90_000, "cod"),
    ]));
    let service = payments(orders).await;

    let request = |code: &str| CreatePaymentRequest {
        order_code: code.into(),
        bank_code: None,
        locale: None,
    };

    let url = service
        .create_payment_url(&request("OD240615AAAAAA"), "127.0.0.1")
        .await
        .unwrap();
    assert!(url.data.payment_url.contains("vnp_TxnRef=OD240615AAAAAA"));

    let err = service
        .create_payment_url(&request("OD240615BBBBBB"), "127.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Payment(_)));
}

#[tokio::test]
async fn ipn_amount_with_a_remainder_is_an_invalid_amount() {
    let orders = Arc::new(MemoryOrders::with(vec![order(1, "OD240615AAAAAA", 150_000, "vnpay")]));
    let service = payments(orders.clone()).await;

    let mut query = callback("OD240615AAAAAA", 150_000, "00");
    query.insert("vnp_Amount".into(), "15000099".into());
    query.remove(VNP_SECURE_HASH);
    let hash = sign_params(HASH_SECRET, &query).unwrap();
    query.insert(VNP_SECURE_HASH.to_string(), hash);

    assert_eq!(service.vnpay_ipn(&query).await.rsp_code, "04");
    assert_eq!(orders.all()[0].payment_status, "pending");
}
