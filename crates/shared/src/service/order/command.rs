use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    abstract_trait::{
        DynCartRepository, DynEmailService, DynOrderCommandRepository, DynOrderQueryRepository,
        DynProductQueryRepository, DynPromotionRepository, EmailRequest,
        OrderCommandServiceTrait,
    },
    domain::{
        requests::{CreateOrderRequest, UpdateOrderStatusRequest, UpdatePaymentStatusRequest},
        responses::{ApiResponse, CreateOrderResponse, OrderResponse},
        status::{OrderStatus, PaymentMethod},
    },
    errors::{RepositoryError, ServiceError},
    model::{NewOrder, Order as OrderModel, OrderLine, Product, Promotion, PromotionSnapshot},
    pricing::{check_order_totals, evaluate_promotion, reconcile_line, sum_line_totals},
    utils::{EmailTemplateData, Method, ServiceObserver, TracingContext, generate_order_code},
    vnpay::{PaymentUrlParams, VnpayGateway},
};

/// Server-side figures for a checkout that passed every price check.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PricedOrder {
    pub lines: Vec<OrderLine>,
    pub sub_total: i64,
    pub discount: i64,
    pub total: i64,
    pub promotion: Option<PromotionSnapshot>,
}

/// Re-prices a checkout against live rows. Any mismatch rejects the
/// whole order.
pub(crate) fn price_order(
    req: &CreateOrderRequest,
    products: &HashMap<i32, Product>,
    promotion: Option<&Promotion>,
    now: NaiveDateTime,
) -> Result<PricedOrder, ServiceError> {
    if req.items.is_empty() {
        return Err(ServiceError::InvalidOrder(
            "Order must contain at least one item".to_string(),
        ));
    }

    let lines = req
        .items
        .iter()
        .map(|item| {
            let product = products.get(&item.product_id).ok_or_else(|| {
                ServiceError::InvalidOrder(format!("Product {} does not exist", item.product_id))
            })?;
            reconcile_line(item, product)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sub_total = sum_line_totals(&lines)?;

    let (discount, snapshot) = match promotion {
        Some(promotion) => {
            let quote = evaluate_promotion(promotion, sub_total, now)?;
            let snapshot = PromotionSnapshot {
                id: quote.promotion_id,
                code: quote.code,
                discount: quote.discount,
            };
            (quote.discount, Some(snapshot))
        }
        None => (0, None),
    };

    check_order_totals(req.discount, req.total, sub_total, discount)?;

    Ok(PricedOrder {
        lines,
        sub_total,
        discount,
        total: sub_total - discount,
        promotion: snapshot,
    })
}

#[derive(Clone)]
pub struct OrderCommandServiceDeps {
    pub product_query: DynProductQueryRepository,
    pub promotion: DynPromotionRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub cart: DynCartRepository,
    pub email: DynEmailService,
    pub gateway: Arc<VnpayGateway>,
    pub client_url: String,
}

pub struct OrderCommandService {
    deps: OrderCommandServiceDeps,
    observer: ServiceObserver,
}

impl OrderCommandService {
    pub async fn new(deps: OrderCommandServiceDeps, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("order_command_service", &registry).await;

        Self { deps, observer }
    }

    fn finish(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<OrderModel, ServiceError>,
        message: &str,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        match result {
            Ok(order) => {
                self.observer.success(tracing_ctx, method, message);
                info!("✅ {message}: {}", order.order_code);
                Ok(ApiResponse::success(message, OrderResponse::from(order)))
            }
            Err(err) => {
                self.observer.failure(tracing_ctx, method, &err.to_string());
                Err(err)
            }
        }
    }

    async fn load_products(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<HashMap<i32, Product>, ServiceError> {
        let mut ids: Vec<i32> = req.items.iter().map(|item| item.product_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let products = self.deps.product_query.find_by_ids(&ids).await?;

        Ok(products
            .into_iter()
            .map(|product| (product.product_id, product))
            .collect())
    }

    async fn load_promotion(&self, id: Option<i32>) -> Result<Option<Promotion>, ServiceError> {
        let Some(id) = id else {
            return Ok(None);
        };

        match self.deps.promotion.find_by_id(id).await? {
            Some(promotion) => Ok(Some(promotion)),
            None => Err(ServiceError::InvalidOrder(format!(
                "Promotion {id} does not exist"
            ))),
        }
    }

    async fn reconcile(&self, req: &CreateOrderRequest) -> Result<PricedOrder, ServiceError> {
        let products = self.load_products(req).await?;
        let promotion = self.load_promotion(req.promotion_id).await?;

        price_order(req, &products, promotion.as_ref(), Utc::now().naive_utc())
    }

    async fn notify(&self, order: &OrderModel) {
        let request = EmailRequest {
            to: order.email.clone(),
            data: EmailTemplateData::order_confirmation(order, &self.deps.client_url),
        };

        if let Err(err) = self.deps.email.send(&request).await {
            error!(
                "❌ Failed to send confirmation for order {}: {err}",
                order.order_code
            );
        }
    }

    fn payment_url(
        &self,
        order: &OrderModel,
        req: &CreateOrderRequest,
        client_ip: &str,
    ) -> Option<String> {
        let params = PaymentUrlParams {
            order_code: order.order_code.clone(),
            total: order.total,
            client_ip: client_ip.to_string(),
            locale: None,
            bank_code: req.bank_code.clone(),
        };

        match self.deps.gateway.build_payment_url(&params, Utc::now()) {
            Ok(url) => Some(url),
            Err(err) => {
                error!(
                    "❌ Failed to build payment url for order {}: {err}",
                    order.order_code
                );
                None
            }
        }
    }

    async fn find_order(&self, id: i32) -> Result<OrderModel, ServiceError> {
        self.deps
            .order_query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {id} not found")))
    }

    async fn move_status(
        &self,
        order: &OrderModel,
        next: OrderStatus,
    ) -> Result<OrderModel, ServiceError> {
        let current = order.status.parse::<OrderStatus>()?;

        if !current.can_transition_to(next) {
            warn!(
                "⚠️ Order {} cannot move from {current} to {next}",
                order.order_code
            );
            return Err(ServiceError::InvalidOrder(format!(
                "Order {} cannot move from {current} to {next}",
                order.order_code
            )));
        }

        self.deps
            .order_command
            .transition_status(order.order_id, current.as_str(), next.as_str())
            .await?
            .ok_or_else(|| {
                ServiceError::Repo(RepositoryError::Conflict(format!(
                    "Order {} was changed by someone else",
                    order.order_code
                )))
            })
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        customer_id: Option<i32>,
        req: &CreateOrderRequest,
        client_ip: &str,
    ) -> Result<ApiResponse<CreateOrderResponse>, ServiceError> {
        info!(
            "🛍️ Checkout with {} line(s), customer={customer_id:?}, method={}",
            req.items.len(),
            req.payment_method.as_str()
        );

        let tracing_ctx = self.observer.start(
            "create_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.items", req.items.len() as i64),
                KeyValue::new("order.payment_method", req.payment_method.as_str()),
            ],
        );

        let priced = match self.reconcile(req).await {
            Ok(priced) => priced,
            Err(err) => {
                warn!("⚠️ Order rejected: {err}");
                self.observer
                    .failure(&tracing_ctx, Method::Post, &err.to_string());
                return Err(err);
            }
        };

        let order_code = match generate_order_code(Utc::now()) {
            Ok(code) => code,
            Err(err) => {
                self.observer
                    .failure(&tracing_ctx, Method::Post, "Failed to generate order code");
                return Err(ServiceError::Internal(format!(
                    "Failed to generate order code: {err}"
                )));
            }
        };

        let new_order = NewOrder {
            order_code,
            customer_id,
            full_name: req.full_name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            address: req.address.clone(),
            note: req.note.clone(),
            info_product: priced.lines,
            promotion: priced.promotion,
            payment_method: req.payment_method.as_str().to_string(),
            sub_total: priced.sub_total,
            discount: priced.discount,
            total: priced.total,
        };

        let order = match self.deps.order_command.create_order(&new_order).await {
            Ok(order) => order,
            Err(err) => {
                error!("❌ Failed to store order: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Post, "Failed to store order");
                return Err(ServiceError::Repo(err));
            }
        };

        if let Some(customer_id) = customer_id {
            if let Err(err) = self.deps.cart.save_lines(customer_id, &[]).await {
                error!("❌ Failed to empty cart of customer {customer_id}: {err:?}");
            }
        }

        self.notify(&order).await;

        let payment_url = match req.payment_method {
            PaymentMethod::Vnpay => self.payment_url(&order, req, client_ip),
            PaymentMethod::Cod => None,
        };

        self.observer
            .success(&tracing_ctx, Method::Post, "Order created");

        info!(
            "✅ Order {} placed: sub_total={} discount={} total={}",
            order.order_code, order.sub_total, order.discount, order.total
        );

        Ok(ApiResponse::success(
            "Order created successfully",
            CreateOrderResponse {
                order: OrderResponse::from(order),
                payment_url,
            },
        ))
    }

    async fn cancel_order(
        &self,
        customer_id: i32,
        code: &str,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "cancel_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.code", code.to_string()),
                KeyValue::new("customer.id", customer_id.to_string()),
            ],
        );

        let result: Result<OrderModel, ServiceError> = async {
            let order = self
                .deps
                .order_query
                .find_by_code(code)
                .await?
                .filter(|order| order.customer_id == Some(customer_id))
                .ok_or_else(|| ServiceError::NotFound(format!("Order {code} not found")))?;

            if order.status != OrderStatus::Pending.as_str() {
                return Err(ServiceError::InvalidOrder(
                    "Only pending orders can be cancelled".to_string(),
                ));
            }

            self.move_status(&order, OrderStatus::Cancelled).await
        }
        .await;

        self.finish(&tracing_ctx, Method::Patch, result, "Order cancelled")
    }

    async fn update_status(
        &self,
        id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_order_status",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
                KeyValue::new("order.status", req.status.as_str()),
            ],
        );

        let result: Result<OrderModel, ServiceError> = async {
            let order = self.find_order(id).await?;
            self.move_status(&order, req.status).await
        }
        .await;

        self.finish(
            &tracing_ctx,
            Method::Patch,
            result,
            "Order status updated successfully",
        )
    }

    async fn update_payment_status(
        &self,
        id: i32,
        req: &UpdatePaymentStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_order_payment_status",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
                KeyValue::new("order.payment_status", req.payment_status.as_str()),
            ],
        );

        let result = self
            .deps
            .order_command
            .update_payment_status(id, req.payment_status.as_str())
            .await
            .map_err(ServiceError::Repo);

        self.finish(
            &tracing_ctx,
            Method::Patch,
            result,
            "Payment status updated successfully",
        )
    }

    async fn trash_order(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "trash_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        let result = self
            .deps
            .order_command
            .trash_order(id)
            .await
            .map_err(ServiceError::Repo);

        self.finish(&tracing_ctx, Method::Delete, result, "Order moved to trash")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::OrderItemRequest;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn product(id: i32, price: i64) -> Product {
        Product {
            product_id: id,
            category_id: Some(1),
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            description: None,
            price,
            compare_price: 0,
            thumbnail: None,
            images: Vec::new(),
            status: "active".into(),
            position: 0,
            featured: false,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    fn request(items: Vec<OrderItemRequest>, discount: i64, total: i64) -> CreateOrderRequest {
        CreateOrderRequest {
            full_name: "Tran Thi B".into(),
            email: "b@example.com".into(),
            phone: "0901234567".into(),
            address: "12 Le Loi, Q1".into(),
            note: None,
            items,
            promotion_id: Some(3),
            discount,
            total,
            payment_method: PaymentMethod::Cod,
            bank_code: None,
        }
    }

    fn item(product_id: i32, price: i64, quantity: i32) -> OrderItemRequest {
        OrderItemRequest {
            product_id,
            quantity,
            price,
            discount: 0.0,
            total: price * quantity as i64,
        }
    }

    fn promotion() -> Promotion {
        Promotion {
            promotion_id: 3,
            code: "SALE10".into(),
            description: None,
            discount_type: "percent".into(),
            discount_value: 10,
            min_order_value: 0,
            start_date: now() - Duration::days(1),
            end_date: now() + Duration::days(1),
            status: "active".into(),
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn priced_order_keeps_sum_invariant() {
        let products = HashMap::from([(1, product(1, 120_000)), (2, product(2, 35_000))]);
        let req = request(vec![item(1, 120_000, 2), item(2, 35_000, 1)], 27_500, 247_500);

        let priced = price_order(&req, &products, Some(&promotion()), now()).unwrap();

        assert_eq!(priced.sub_total, 275_000);
        assert_eq!(priced.discount, 27_500);
        assert_eq!(
            sum_line_totals(&priced.lines).unwrap(),
            priced.total + priced.discount
        );
        assert_eq!(
            priced.promotion,
            Some(PromotionSnapshot {
                id: 3,
                code: "SALE10".into(),
                discount: 27_500,
            })
        );
    }

    #[test]
    fn server_figures_replace_drifted_client_figures() {
        let products = HashMap::from([(1, product(1, 99_999))]);
        let req = request(vec![item(1, 99_999, 1)], 10_001, 89_998);

        let priced = price_order(&req, &products, Some(&promotion()), now()).unwrap();

        assert_eq!(priced.discount, 10_000);
        assert_eq!(priced.total, 89_999);
    }

    #[test]
    fn unknown_product_rejects_order() {
        let products = HashMap::from([(1, product(1, 10_000))]);
        let req = request(vec![item(1, 10_000, 1), item(9, 5_000, 1)], 0, 15_000);

        assert!(matches!(
            price_order(&req, &products, None, now()),
            Err(ServiceError::InvalidOrder(_))
        ));
    }

    #[test]
    fn empty_order_is_rejected() {
        let req = request(Vec::new(), 0, 0);
        assert!(price_order(&req, &HashMap::new(), None, now()).is_err());
    }

    #[test]
    fn expired_promotion_rejects_order() {
        let products = HashMap::from([(1, product(1, 100_000))]);
        let req = request(vec![item(1, 100_000, 1)], 10_000, 90_000);
        let mut expired = promotion();
        expired.end_date = now() - Duration::hours(1);

        assert!(price_order(&req, &products, Some(&expired), now()).is_err());
    }

    #[test]
    fn huge_quantity_is_rejected_instead_of_overflowing() {
        let products = HashMap::from([(1, product(1, 5_000_000_000))]);
        let line = OrderItemRequest {
            product_id: 1,
            quantity: 2_000_000_000,
            price: 5_000_000_000,
            discount: 0.0,
            total: 0,
        };
        let req = request(vec![line], 0, 0);

        assert!(matches!(
            price_order(&req, &products, None, now()),
            Err(ServiceError::InvalidOrder(_))
        ));
    }

    #[test]
    fn sub_total_overflow_rejects_order() {
        let big = 5_000_000_000_000_000_000;
        let products = HashMap::from([(1, product(1, big)), (2, product(2, big))]);
        let req = request(vec![item(1, big, 1), item(2, big, 1)], 0, 0);

        assert!(matches!(
            price_order(&req, &products, None, now()),
            Err(ServiceError::InvalidOrder(_))
        ));
    }
}
