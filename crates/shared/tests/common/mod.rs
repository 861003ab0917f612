#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use prometheus_client::registry::Registry;
use sqlx::types::Json;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex},
};
use tokio::sync::Mutex;

use shared::{
    abstract_trait::{
        CartRepositoryTrait, CustomerRepositoryTrait, EmailRequest, EmailServiceTrait, OrderCommandRepositoryTrait,
        OrderQueryRepositoryTrait, OtpStoreTrait, ProductQueryRepositoryTrait,
        PromotionRepositoryTrait,
    },
    config::VnpayConfig,
    domain::requests::{FindAllProducts, FindAllRecords, PromotionRequest, RegisterRequest},
    errors::{RepositoryError, ServiceError},
    model::{Cart, CartLine, Category, Customer, NewOrder, Order, PaymentUpdate, Product, Promotion},
    vnpay::VnpayGateway,
};

pub const HASH_SECRET: &str = "SECRETKEY";

pub fn registry() -> Arc<Mutex<Registry>> {
    Arc::new(Mutex::new(Registry::default()))
}

pub fn gateway() -> Arc<VnpayGateway> {
    Arc::new(VnpayGateway::new(VnpayConfig {
        tmn_code: "TESTCODE".into(),
        hash_secret: HASH_SECRET.into(),
        payment_url: "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".into(),
        return_url: "http://localhost:5173/payment/vnpay-return".into(),
    }))
}

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap()
}

pub fn product(id: i32, price: i64, compare_price: i64) -> Product {
    Product {
        product_id: id,
        category_id: Some(1),
        name: format!("Product {id}"),
        slug: format!("product-{id}"),
        description: None,
        price,
        compare_price,
        thumbnail: None,
        images: vec![],
        status: "active".into(),
        position: 0,
        featured: false,
        created_at: None,
        updated_at: None,
        deleted_at: None,
    }
}

pub fn category(id: i32) -> Category {
    Category {
        category_id: id,
        name: format!("Category {id}"),
        slug: format!("category-{id}"),
        description: None,
        thumbnail: None,
        status: "active".into(),
        position: 0,
        created_at: None,
        updated_at: None,
        deleted_at: None,
    }
}

pub fn promotion(
    id: i32,
    code: &str,
    discount_type: &str,
    discount_value: i64,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
) -> Promotion {
    Promotion {
        promotion_id: id,
        code: code.into(),
        description: None,
        discount_type: discount_type.into(),
        discount_value,
        min_order_value: 0,
        start_date,
        end_date,
        status: "active".into(),
        created_at: None,
        updated_at: None,
        deleted_at: None,
    }
}

pub struct MemoryProducts {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl MemoryProducts {
    /// Products shelved under the live category 1 that `product()` uses.
    pub fn new(products: Vec<Product>) -> Self {
        Self::with_categories(products, vec![category(1)])
    }

    pub fn with_categories(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    fn page(&self) -> (Vec<Product>, i64) {
        (self.products.clone(), self.products.len() as i64)
    }

    fn visible(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| {
            let category = p
                .category_id
                .and_then(|id| self.categories.iter().find(|c| c.category_id == id));
            p.is_visible_in(category)
        })
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryProducts {
    async fn find_visible(
        &self,
        _req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let products: Vec<Product> = self.visible().cloned().collect();
        let total = products.len() as i64;
        Ok((products, total))
    }

    async fn find_featured(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .visible()
            .filter(|p| p.featured)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_visible_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        Ok(self.visible().find(|p| p.slug == slug).cloned())
    }

    async fn find_all(&self, _req: &FindAllRecords) -> Result<(Vec<Product>, i64), RepositoryError> {
        Ok(self.page())
    }

    async fn find_trashed(
        &self,
        _req: &FindAllRecords,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        Ok((vec![], 0))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.iter().find(|p| p.product_id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.product_id))
            .cloned()
            .collect())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError> {
        Ok(self.products.iter().any(|p| p.slug == slug))
    }
}

pub struct MemoryPromotions {
    promotions: Vec<Promotion>,
}

impl MemoryPromotions {
    pub fn new(promotions: Vec<Promotion>) -> Self {
        Self { promotions }
    }
}

#[async_trait]
impl PromotionRepositoryTrait for MemoryPromotions {
    async fn find_all(
        &self,
        _req: &FindAllRecords,
        _trashed: bool,
    ) -> Result<(Vec<Promotion>, i64), RepositoryError> {
        Ok((self.promotions.clone(), self.promotions.len() as i64))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Promotion>, RepositoryError> {
        Ok(self
            .promotions
            .iter()
            .find(|p| p.promotion_id == id)
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Promotion>, RepositoryError> {
        Ok(self.promotions.iter().find(|p| p.code == code).cloned())
    }

    async fn create_promotion(&self, _req: &PromotionRequest) -> Result<Promotion, RepositoryError> {
        Err(RepositoryError::Custom("read-only".into()))
    }

    async fn update_promotion(
        &self,
        _id: i32,
        _req: &PromotionRequest,
    ) -> Result<Promotion, RepositoryError> {
        Err(RepositoryError::Custom("read-only".into()))
    }

    async fn trash_promotion(&self, _id: i32) -> Result<Promotion, RepositoryError> {
        Err(RepositoryError::Custom("read-only".into()))
    }

    async fn restore_promotion(&self, _id: i32) -> Result<Promotion, RepositoryError> {
        Err(RepositoryError::Custom("read-only".into()))
    }
}

#[derive(Default)]
pub struct MemoryOrders {
    orders: StdMutex<Vec<Order>>,
}

impl MemoryOrders {
    pub fn with(orders: Vec<Order>) -> Self {
        Self {
            orders: StdMutex::new(orders),
        }
    }

    pub fn all(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    fn update<F>(&self, id: i32, change: F) -> Result<Order, RepositoryError>
    where
        F: FnOnce(&mut Order),
    {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.order_id == id)
            .ok_or(RepositoryError::NotFound)?;
        change(order);
        Ok(order.clone())
    }
}

pub fn order(id: i32, code: &str, total: i64, payment_method: &str) -> Order {
    Order {
        order_id: id,
        order_code: code.into(),
        customer_id: None,
        full_name: "Nguyen Van A".into(),
        email: "khach@example.com".into(),
        phone: "0901234567".into(),
        address: "1 Le Loi".into(),
        note: None,
        info_product: Json(vec![]),
        promotion: None,
        payment_method: payment_method.into(),
        payment_status: "pending".into(),
        vnp_transaction_no: None,
        vnp_bank_code: None,
        vnp_pay_date: None,
        vnp_response_code: None,
        sub_total: total,
        discount: 0,
        total,
        status: "pending".into(),
        created_at: None,
        updated_at: None,
        deleted_at: None,
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for MemoryOrders {
    async fn find_all(&self, _req: &FindAllRecords) -> Result<(Vec<Order>, i64), RepositoryError> {
        let orders = self.all();
        let total = orders.len() as i64;
        Ok((orders, total))
    }

    async fn find_by_customer(
        &self,
        customer_id: i32,
        _page: i32,
        _page_size: i32,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let orders: Vec<Order> = self
            .all()
            .into_iter()
            .filter(|o| o.customer_id == Some(customer_id))
            .collect();
        let total = orders.len() as i64;
        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        Ok(self.all().into_iter().find(|o| o.order_id == id))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Order>, RepositoryError> {
        Ok(self.all().into_iter().find(|o| o.order_code == code))
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for MemoryOrders {
    async fn create_order(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.lock().unwrap();
        let now = Utc::now().naive_utc();

        let order = Order {
            order_id: orders.len() as i32 + 1,
            order_code: new.order_code.clone(),
            customer_id: new.customer_id,
            full_name: new.full_name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            address: new.address.clone(),
            note: new.note.clone(),
            info_product: Json(new.info_product.clone()),
            promotion: new.promotion.clone().map(Json),
            payment_method: new.payment_method.clone(),
            payment_status: "pending".into(),
            vnp_transaction_no: None,
            vnp_bank_code: None,
            vnp_pay_date: None,
            vnp_response_code: None,
            sub_total: new.sub_total,
            discount: new.discount,
            total: new.total,
            status: "pending".into(),
            created_at: Some(now),
            updated_at: Some(now),
            deleted_at: None,
        };

        orders.push(order.clone());
        Ok(order)
    }

    async fn transition_status(
        &self,
        id: i32,
        expected: &str,
        next: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut orders = self.orders.lock().unwrap();
        Ok(orders
            .iter_mut()
            .find(|o| o.order_id == id && o.status == expected)
            .map(|o| {
                o.status = next.to_string();
                o.clone()
            }))
    }

    async fn update_payment_status(
        &self,
        id: i32,
        payment_status: &str,
    ) -> Result<Order, RepositoryError> {
        self.update(id, |o| o.payment_status = payment_status.to_string())
    }

    async fn apply_payment_result(
        &self,
        order_code: &str,
        update: &PaymentUpdate,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut orders = self.orders.lock().unwrap();
        Ok(orders
            .iter_mut()
            .find(|o| o.order_code == order_code && o.payment_status == "pending")
            .map(|o| {
                o.payment_status = update.payment_status.clone();
                o.vnp_transaction_no = update.transaction_no.clone();
                o.vnp_bank_code = update.bank_code.clone();
                o.vnp_pay_date = update.pay_date.clone();
                o.vnp_response_code = update.response_code.clone();
                if update.payment_status == "paid" && o.status == "pending" {
                    o.status = "confirmed".into();
                }
                o.clone()
            }))
    }

    async fn trash_order(&self, id: i32) -> Result<Order, RepositoryError> {
        self.update(id, |o| o.deleted_at = Some(Utc::now().naive_utc()))
    }
}

#[derive(Default)]
pub struct MemoryCarts {
    carts: StdMutex<HashMap<i32, Cart>>,
}

impl MemoryCarts {
    pub fn lines_of(&self, customer_id: i32) -> Option<Vec<CartLine>> {
        self.carts
            .lock()
            .unwrap()
            .get(&customer_id)
            .map(|cart| cart.info_product.0.clone())
    }
}

#[async_trait]
impl CartRepositoryTrait for MemoryCarts {
    async fn find_by_customer(&self, customer_id: i32) -> Result<Option<Cart>, RepositoryError> {
        Ok(self.carts.lock().unwrap().get(&customer_id).cloned())
    }

    async fn save_lines(
        &self,
        customer_id: i32,
        lines: &[CartLine],
    ) -> Result<Cart, RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        let next_id = carts.len() as i32 + 1;
        let cart = carts.entry(customer_id).or_insert_with(|| Cart {
            cart_id: next_id,
            customer_id,
            info_product: Json(vec![]),
            created_at: None,
            updated_at: None,
        });
        cart.info_product = Json(lines.to_vec());
        Ok(cart.clone())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: StdMutex<Vec<EmailRequest>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailServiceTrait for RecordingMailer {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        self.sent.lock().unwrap().push(req.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryOtp {
    codes: StdMutex<HashMap<String, String>>,
    attempts: StdMutex<HashMap<String, u32>>,
}

fn otp_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl OtpStoreTrait for MemoryOtp {
    async fn save_otp(&self, email: &str, otp: &str, _ttl_secs: u64) -> Result<(), ServiceError> {
        self.codes
            .lock()
            .unwrap()
            .insert(otp_key(email), otp.to_string());
        self.attempts.lock().unwrap().remove(&otp_key(email));
        Ok(())
    }

    async fn find_otp(&self, email: &str) -> Result<Option<String>, ServiceError> {
        Ok(self.codes.lock().unwrap().get(&otp_key(email)).cloned())
    }

    async fn delete_otp(&self, email: &str) -> Result<(), ServiceError> {
        self.codes.lock().unwrap().remove(&otp_key(email));
        self.attempts.lock().unwrap().remove(&otp_key(email));
        Ok(())
    }

    async fn record_failure(&self, email: &str, _ttl_secs: u64) -> Result<u32, ServiceError> {
        let mut attempts = self.attempts.lock().unwrap();
        let count = attempts.entry(otp_key(email)).or_insert(0);
        *count += 1;
        Ok(*count)
    }
}

#[derive(Default)]
pub struct MemoryCustomers {
    customers: StdMutex<Vec<Customer>>,
}

impl MemoryCustomers {
    fn update<F>(&self, id: i32, change: F) -> Result<Customer, RepositoryError>
    where
        F: FnOnce(&mut Customer),
    {
        let mut customers = self.customers.lock().unwrap();
        let customer = customers
            .iter_mut()
            .find(|c| c.customer_id == id)
            .ok_or(RepositoryError::NotFound)?;
        change(customer);
        Ok(customer.clone())
    }
}

#[async_trait]
impl CustomerRepositoryTrait for MemoryCustomers {
    async fn find_all(
        &self,
        _req: &FindAllRecords,
    ) -> Result<(Vec<Customer>, i64), RepositoryError> {
        let customers = self.customers.lock().unwrap().clone();
        let total = customers.len() as i64;
        Ok((customers, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, RepositoryError> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.customer_id == id && c.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn create_customer(
        &self,
        req: &RegisterRequest,
        hashed_password: &str,
    ) -> Result<Customer, RepositoryError> {
        let mut customers = self.customers.lock().unwrap();
        let customer = Customer {
            customer_id: customers.len() as i32 + 1,
            full_name: req.full_name.clone(),
            email: req.email.trim().to_lowercase(),
            password: hashed_password.to_string(),
            phone: req.phone.clone(),
            address: req.address.clone(),
            status: "active".into(),
            created_at: None,
            updated_at: None,
            deleted_at: None,
        };
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn update_password(
        &self,
        id: i32,
        hashed_password: &str,
    ) -> Result<Customer, RepositoryError> {
        self.update(id, |c| c.password = hashed_password.to_string())
    }

    async fn update_status(&self, id: i32, status: &str) -> Result<Customer, RepositoryError> {
        self.update(id, |c| c.status = status.to_string())
    }

    async fn trash_customer(&self, id: i32) -> Result<Customer, RepositoryError> {
        self.update(id, |c| c.deleted_at = Some(Utc::now().naive_utc()))
    }
}
