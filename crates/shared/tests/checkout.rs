mod common;

use std::sync::Arc;

use common::{
    MemoryCarts, MemoryOrders, MemoryProducts, MemoryPromotions, RecordingMailer, at, gateway,
    product, promotion, registry,
};
use shared::{
    abstract_trait::{CartRepositoryTrait, OrderCommandServiceTrait},
    domain::{
        requests::{CreateOrderRequest, OrderItemRequest},
        status::PaymentMethod,
    },
    errors::ServiceError,
    model::CartLine,
    service::{OrderCommandService, OrderCommandServiceDeps},
};

struct Shop {
    service: OrderCommandService,
    orders: Arc<MemoryOrders>,
    carts: Arc<MemoryCarts>,
    mailer: Arc<RecordingMailer>,
}

async fn shop() -> Shop {
    let orders = Arc::new(MemoryOrders::default());
    let carts = Arc::new(MemoryCarts::default());
    let mailer = Arc::new(RecordingMailer::default());

    let products = MemoryProducts::new(vec![product(1, 80_000, 100_000), product(2, 50_000, 0)]);
    let promotions = MemoryPromotions::new(vec![
        promotion(7, "SALE10", "percent", 10, at(2020, 1, 1), at(2099, 1, 1)),
        promotion(8, "OLD50K", "amount", 50_000, at(2020, 1, 1), at(2021, 1, 1)),
    ]);

    let deps = OrderCommandServiceDeps {
        product_query: Arc::new(products),
        promotion: Arc::new(promotions),
        order_query: orders.clone(),
        order_command: orders.clone(),
        cart: carts.clone(),
        email: mailer.clone(),
        gateway: gateway(),
        client_url: "http://localhost:5173".into(),
    };

    Shop {
        service: OrderCommandService::new(deps, registry()).await,
        orders,
        carts,
        mailer,
    }
}

fn item(product_id: i32, quantity: i32, price: i64, discount: f64) -> OrderItemRequest {
    OrderItemRequest {
        product_id,
        quantity,
        price,
        discount,
        total: price * quantity as i64,
    }
}

fn checkout(items: Vec<OrderItemRequest>, promotion_id: Option<i32>, discount: i64) -> CreateOrderRequest {
    let sub_total: i64 = items.iter().map(|i| i.total).sum();

    CreateOrderRequest {
        full_name: "Nguyen Van A".into(),
        email: "khach@example.com".into(),
        phone: "0901234567".into(),
        address: "1 Le Loi, Q1".into(),
        note: None,
        items,
        promotion_id,
        discount,
        total: sub_total - discount,
        payment_method: PaymentMethod::Cod,
        bank_code: None,
    }
}

#[tokio::test]
async fn cod_checkout_stores_server_figures_and_empties_cart() {
    let shop = shop().await;
    shop.carts
        .save_lines(
            42,
            &[CartLine {
                product_id: 1,
                quantity: 2,
                price: 80_000,
                discount: 20.0,
                total: 160_000,
            }],
        )
        .await
        .unwrap();

    let req = checkout(
        vec![item(1, 2, 80_000, 20.0), item(2, 1, 50_000, 0.0)],
        Some(7),
        21_000,
    );

    let response = shop
        .service
        .create_order(Some(42), &req, "127.0.0.1")
        .await
        .unwrap();

    let order = response.data.order;
    assert_eq!(order.sub_total, 210_000);
    assert_eq!(order.discount, 21_000);
    assert_eq!(order.total, 189_000);
    assert_eq!(order.sub_total, order.total + order.discount);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.promotion.unwrap().code, "SALE10");
    assert_eq!(order.status, "pending");
    assert_eq!(order.payment_status, "pending");
    assert!(order.order_code.starts_with("OD"));
    assert!(response.data.payment_url.is_none());

    assert_eq!(shop.carts.lines_of(42), Some(vec![]));
    assert_eq!(shop.mailer.sent().len(), 1);
    assert_eq!(shop.mailer.sent()[0].to, "khach@example.com");
}

#[tokio::test]
async fn stale_price_rejects_the_whole_order() {
    let shop = shop().await;
    let req = checkout(
        vec![item(1, 1, 75_000, 25.0), item(2, 1, 50_000, 0.0)],
        None,
        0,
    );

    let err = shop
        .service
        .create_order(None, &req, "127.0.0.1")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidOrder(_)));
    assert!(shop.orders.all().is_empty());
    assert!(shop.mailer.sent().is_empty());
}

#[tokio::test]
async fn unknown_product_is_rejected() {
    let shop = shop().await;
    let req = checkout(vec![item(99, 1, 10_000, 0.0)], None, 0);

    let err = shop
        .service
        .create_order(None, &req, "127.0.0.1")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidOrder(_)));
    assert!(shop.orders.all().is_empty());
}

#[tokio::test]
async fn promotion_outside_its_window_is_rejected() {
    let shop = shop().await;
    let req = checkout(vec![item(2, 2, 50_000, 0.0)], Some(8), 50_000);

    let err = shop
        .service
        .create_order(None, &req, "127.0.0.1")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidOrder(ref msg) if msg.contains("OLD50K")));
    assert!(shop.orders.all().is_empty());
}

#[tokio::test]
async fn tampered_total_is_rejected() {
    let shop = shop().await;
    let mut req = checkout(vec![item(2, 1, 50_000, 0.0)], None, 0);
    req.total = 1_000;

    let err = shop
        .service
        .create_order(None, &req, "127.0.0.1")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidOrder(_)));
    assert!(shop.orders.all().is_empty());
}

#[tokio::test]
async fn vnpay_checkout_returns_a_signed_payment_url() {
    let shop = shop().await;
    let mut req = checkout(vec![item(2, 1, 50_000, 0.0)], None, 0);
    req.payment_method = PaymentMethod::Vnpay;

    let response = shop
        .service
        .create_order(None, &req, "10.0.0.9")
        .await
        .unwrap();

    let url = response.data.payment_url.unwrap();
    assert!(url.starts_with("https://sandbox.vnpayment.vn/paymentv2/vpcpay.html?"));
    assert!(url.contains("vnp_Amount=5000000"));
    assert!(url.contains("vnp_SecureHash="));
    assert_eq!(response.data.order.payment_method, "vnpay");
}

#[tokio::test]
async fn customer_cancels_only_their_own_pending_order() {
    let shop = shop().await;
    let req = checkout(vec![item(2, 1, 50_000, 0.0)], None, 0);
    let code = shop
        .service
        .create_order(Some(42), &req, "127.0.0.1")
        .await
        .unwrap()
        .data
        .order
        .order_code;

    let err = shop.service.cancel_order(7, &code).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let cancelled = shop.service.cancel_order(42, &code).await.unwrap();
    assert_eq!(cancelled.data.status, "cancelled");

    let err = shop.service.cancel_order(42, &code).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOrder(_)));
}
