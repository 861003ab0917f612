use async_trait::async_trait;
use sqlx::types::Json;
use tracing::{error, info, warn};

use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{NewOrder, Order as OrderModel, PaymentUpdate},
};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (
                order_code, customer_id, full_name, email, phone, address, note,
                info_product, promotion, payment_method, payment_status,
                sub_total, discount, total, status, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending',
                $11, $12, $13, 'pending', current_timestamp, current_timestamp
            )
            RETURNING *
            "#,
        )
        .bind(&order.order_code)
        .bind(order.customer_id)
        .bind(&order.full_name)
        .bind(&order.email)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(&order.note)
        .bind(Json(&order.info_product))
        .bind(order.promotion.as_ref().map(Json))
        .bind(&order.payment_method)
        .bind(order.sub_total)
        .bind(order.discount)
        .bind(order.total)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create order {}: {err:?}", order.order_code);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order {} (total {})",
            result.order_code, result.total
        );
        Ok(result)
    }

    async fn transition_status(
        &self,
        id: i32,
        expected: &str,
        next: &str,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET status = $3, updated_at = current_timestamp
            WHERE order_id = $1 AND status = $2 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to move order {id} to {next}: {err:?}");
            RepositoryError::from(err)
        })?;

        match &result {
            Some(_) => info!("🔄 Order {id}: {expected} -> {next}"),
            None => warn!("⚠️ Order {id} was no longer {expected}, not moved to {next}"),
        }

        Ok(result)
    }

    async fn update_payment_status(
        &self,
        id: i32,
        payment_status: &str,
    ) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET payment_status = $2, updated_at = current_timestamp
            WHERE order_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payment_status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to set payment status of order {id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn apply_payment_result(
        &self,
        order_code: &str,
        update: &PaymentUpdate,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET payment_status = $2,
                vnp_transaction_no = $3,
                vnp_bank_code = $4,
                vnp_pay_date = $5,
                vnp_response_code = $6,
                status = CASE
                    WHEN $2 = 'paid' AND status = 'pending' THEN 'confirmed'
                    ELSE status
                END,
                updated_at = current_timestamp
            WHERE order_code = $1
              AND payment_status = 'pending'
              AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(order_code)
        .bind(&update.payment_status)
        .bind(&update.transaction_no)
        .bind(&update.bank_code)
        .bind(&update.pay_date)
        .bind(&update.response_code)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to record payment of order {order_code}: {err:?}");
            RepositoryError::from(err)
        })?;

        if result.is_some() {
            info!(
                "💳 Order {order_code} payment is now {}",
                update.payment_status
            );
        }

        Ok(result)
    }

    async fn trash_order(&self, id: i32) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET deleted_at = current_timestamp, updated_at = current_timestamp
            WHERE order_id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to trash order {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("🗑️ Trashed order {}", result.order_code);
        Ok(result)
    }
}
