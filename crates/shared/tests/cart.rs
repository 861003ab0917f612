mod common;

use std::sync::Arc;

use common::{MemoryCarts, registry};
use shared::{
    abstract_trait::CartServiceTrait,
    domain::requests::{AddToCartRequest, CartItemRequest},
    service::CartService,
};

fn item(product_id: i32, quantity: i32, price: i64) -> CartItemRequest {
    CartItemRequest {
        product_id,
        quantity,
        price,
        discount: 0.0,
        total: price * quantity as i64,
    }
}

fn add(items: Vec<CartItemRequest>) -> AddToCartRequest {
    AddToCartRequest { items }
}

#[tokio::test]
async fn first_read_creates_an_empty_cart() {
    let carts = Arc::new(MemoryCarts::default());
    let service = CartService::new(carts.clone(), registry()).await;

    let cart = service.get_cart(5).await.unwrap().data;

    assert!(cart.items.is_empty());
    assert_eq!(cart.sub_total, 0);
    assert_eq!(carts.lines_of(5), Some(vec![]));
}

#[tokio::test]
async fn adding_an_existing_product_overwrites_its_line() {
    let carts = Arc::new(MemoryCarts::default());
    let service = CartService::new(carts, registry()).await;

    service
        .add_items(5, &add(vec![item(1, 2, 10_000), item(2, 1, 30_000)]))
        .await
        .unwrap();
    let cart = service
        .add_items(5, &add(vec![item(1, 5, 10_000), item(3, 1, 5_000)]))
        .await
        .unwrap()
        .data;

    let lines: Vec<(i32, i32)> = cart.items.iter().map(|l| (l.product_id, l.quantity)).collect();
    assert_eq!(lines, vec![(1, 5), (2, 1), (3, 1)]);
    assert_eq!(cart.total_quantity, 7);
    assert_eq!(cart.sub_total, 85_000);
}

#[tokio::test]
async fn remove_and_clear() {
    let carts = Arc::new(MemoryCarts::default());
    let service = CartService::new(carts, registry()).await;

    service
        .add_items(5, &add(vec![item(1, 1, 10_000), item(2, 1, 30_000)]))
        .await
        .unwrap();

    let cart = service.remove_item(5, 1).await.unwrap().data;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].product_id, 2);

    let cart = service.remove_item(5, 99).await.unwrap().data;
    assert_eq!(cart.items.len(), 1);

    let cart = service.clear_cart(5).await.unwrap().data;
    assert!(cart.items.is_empty());
}
