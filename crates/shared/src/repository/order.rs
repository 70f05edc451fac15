use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::OrderRepositoryTrait,
    config::ConnectionPool,
    domain::requests::CreateOrderRequest,
    errors::RepositoryError,
    model::{DailySalesRow, MonthlySalesRow, Order, OrderItem, ProductSalesRow, SalesSummaryRow},
};

#[derive(Clone)]
pub struct OrderRepository {
    db: ConnectionPool,
}

impl OrderRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepositoryTrait for OrderRepository {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_id, customer_name, customer_number, customer_address, total_amount, payment_method, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'Pending')
            RETURNING order_id, customer_id, customer_name, customer_number, customer_address, total_amount, payment_method, status, created_at
            "#,
        )
        .bind(request.customer_id)
        .bind(&request.customer_name)
        .bind(&request.customer_number)
        .bind(&request.customer_address)
        .bind(request.total_amount)
        .bind(&request.payment_method)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to create order: {e}");
            RepositoryError::from(e)
        })?;

        let mut items = Vec::with_capacity(request.items.len());

        for item in &request.items {
            let row = sqlx::query_as::<_, OrderItem>(
                r#"
                INSERT INTO order_items (order_id, product_id, product_name, quantity, price, image)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING order_item_id, order_id, product_id, product_name, quantity, price, image
                "#,
            )
            .bind(order.order_id)
            .bind(item.product_id)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(item.price)
            .bind(&item.image)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to create order item: {e}");
                RepositoryError::from(e)
            })?;

            items.push(row);
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Order {} created with {} item(s)",
            order.order_id,
            items.len()
        );

        Ok((order, items))
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_id, customer_id, customer_name, customer_number, customer_address, total_amount, payment_method, status, created_at
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {e}");
            RepositoryError::from(e)
        })?;

        Ok(orders)
    }

    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_id, customer_id, customer_name, customer_number, customer_address, total_amount, payment_method, status, created_at
            FROM orders
            WHERE customer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders for customer {customer_id}: {e}");
            RepositoryError::from(e)
        })?;

        Ok(orders)
    }

    async fn find_by_id(&self, order_id: i32) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_id, customer_id, customer_name, customer_number, customer_address, total_amount, payment_method, status, created_at
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {order_id}: {e}");
            RepositoryError::from(e)
        })?;

        Ok(order)
    }

    async fn find_today_pending(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_id, customer_id, customer_name, customer_number, customer_address, total_amount, payment_method, status, created_at
            FROM orders
            WHERE created_at::date = CURRENT_DATE AND status = 'Pending'
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch today's pending orders: {e}");
            RepositoryError::from(e)
        })?;

        Ok(orders)
    }

    async fn find_confirmed(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_id, customer_id, customer_name, customer_number, customer_address, total_amount, payment_method, status, created_at
            FROM orders
            WHERE status = 'Confirmed'
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch confirmed orders: {e}");
            RepositoryError::from(e)
        })?;

        Ok(orders)
    }

    async fn confirm_order(&self, order_id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = 'Confirmed'
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to confirm order {order_id}: {e}");
            RepositoryError::from(e)
        })?;

        let confirmed = result.rows_affected() > 0;

        if confirmed {
            info!("🔄 Order {order_id} confirmed");
        }

        Ok(confirmed)
    }

    async fn items_for_orders(&self, order_ids: &[i32]) -> Result<Vec<OrderItem>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT order_item_id, order_id, product_id, product_name, quantity, price, image
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_item_id
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order items: {e}");
            RepositoryError::from(e)
        })?;

        Ok(items)
    }

    async fn sales_summary(&self) -> Result<SalesSummaryRow, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let summary = sqlx::query_as::<_, SalesSummaryRow>(
            r#"
            SELECT COALESCE(SUM(total_amount), 0)::bigint AS total_sales,
                   COUNT(*)::bigint AS total_orders
            FROM orders
            WHERE status = 'Confirmed'
            "#,
        )
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to compute sales summary: {e}");
            RepositoryError::from(e)
        })?;

        Ok(summary)
    }

    async fn daily_sales(&self) -> Result<Vec<DailySalesRow>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let rows = sqlx::query_as::<_, DailySalesRow>(
            r#"
            SELECT created_at::date AS date,
                   COALESCE(SUM(total_amount), 0)::bigint AS daily_sales
            FROM orders
            WHERE status = 'Confirmed'
            GROUP BY created_at::date
            ORDER BY date
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to compute daily sales: {e}");
            RepositoryError::from(e)
        })?;

        Ok(rows)
    }

    async fn monthly_sales(&self) -> Result<Vec<MonthlySalesRow>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let rows = sqlx::query_as::<_, MonthlySalesRow>(
            r#"
            SELECT to_char(created_at, 'YYYY-MM') AS month,
                   COALESCE(SUM(total_amount), 0)::bigint AS monthly_sales
            FROM orders
            WHERE status = 'Confirmed'
            GROUP BY to_char(created_at, 'YYYY-MM')
            ORDER BY month
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to compute monthly sales: {e}");
            RepositoryError::from(e)
        })?;

        Ok(rows)
    }

    async fn best_selling(&self) -> Result<Vec<ProductSalesRow>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let rows = sqlx::query_as::<_, ProductSalesRow>(
            r#"
            SELECT oi.product_name,
                   COALESCE(SUM(oi.quantity), 0)::bigint AS total_sold
            FROM order_items oi
            JOIN orders o ON o.order_id = oi.order_id
            WHERE o.status = 'Confirmed'
            GROUP BY oi.product_name
            ORDER BY total_sold DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to compute best selling products: {e}");
            RepositoryError::from(e)
        })?;

        Ok(rows)
    }
}
