use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{
    abstract_trait::{CartServiceTrait, DynCartRepository},
    domain::{
        requests::AddToCartRequest,
        responses::{ApiResponse, CartResponse},
    },
    errors::ServiceError,
    model::{Cart as CartModel, CartLine},
    pricing::{merge_cart_lines, remove_cart_line},
    utils::{Method, ServiceObserver},
};

pub struct CartService {
    repository: DynCartRepository,
    observer: ServiceObserver,
}

impl CartService {
    pub async fn new(repository: DynCartRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("cart_service", &registry).await;

        Self {
            repository,
            observer,
        }
    }

    /// The customer's cart, created empty the first time it is asked for.
    async fn load_or_create(&self, customer_id: i32) -> Result<CartModel, ServiceError> {
        match self.repository.find_by_customer(customer_id).await? {
            Some(cart) => Ok(cart),
            None => {
                info!("🛒 Creating empty cart for customer {customer_id}");
                Ok(self.repository.save_lines(customer_id, &[]).await?)
            }
        }
    }

    async fn replace_lines<F>(
        &self,
        operation: &str,
        method: Method,
        customer_id: i32,
        message: &str,
        update: F,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>
    where
        F: FnOnce(Vec<CartLine>) -> Vec<CartLine> + Send,
    {
        let tracing_ctx = self.observer.start(
            operation,
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("customer.id", customer_id.to_string()),
            ],
        );

        let cart = match self.load_or_create(customer_id).await {
            Ok(cart) => cart,
            Err(err) => {
                error!("❌ Failed to load cart of customer {customer_id}: {err:?}");
                self.observer
                    .failure(&tracing_ctx, method, "Failed to load cart");
                return Err(err);
            }
        };

        let lines = update(cart.info_product.0);

        match self.repository.save_lines(customer_id, &lines).await {
            Ok(saved) => {
                self.observer.success(&tracing_ctx, method, message);
                Ok(ApiResponse::success(message, CartResponse::from(saved)))
            }
            Err(err) => {
                error!("❌ Failed to save cart of customer {customer_id}: {err:?}");
                self.observer
                    .failure(&tracing_ctx, method, "Failed to save cart");
                Err(ServiceError::Repo(err))
            }
        }
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn get_cart(&self, customer_id: i32) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "get_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("customer.id", customer_id.to_string()),
            ],
        );

        match self.load_or_create(customer_id).await {
            Ok(cart) => {
                self.observer
                    .success(&tracing_ctx, Method::Get, "Cart retrieved");
                Ok(ApiResponse::success(
                    "Cart retrieved successfully",
                    CartResponse::from(cart),
                ))
            }
            Err(err) => {
                error!("❌ Failed to load cart of customer {customer_id}: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to load cart");
                Err(err)
            }
        }
    }

    async fn add_items(
        &self,
        customer_id: i32,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!(
            "🛒 Customer {customer_id} adds {} line(s) to cart",
            req.items.len()
        );

        let incoming: Vec<CartLine> = req.items.iter().map(CartLine::from).collect();

        self.replace_lines(
            "add_cart_items",
            Method::Post,
            customer_id,
            "Cart updated successfully",
            move |existing| merge_cart_lines(existing, incoming),
        )
        .await
    }

    async fn remove_item(
        &self,
        customer_id: i32,
        product_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        self.replace_lines(
            "remove_cart_item",
            Method::Delete,
            customer_id,
            "Item removed from cart",
            move |existing| remove_cart_line(existing, product_id),
        )
        .await
    }

    async fn clear_cart(
        &self,
        customer_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        self.replace_lines(
            "clear_cart",
            Method::Delete,
            customer_id,
            "Cart cleared",
            |_| Vec::new(),
        )
        .await
    }
}
