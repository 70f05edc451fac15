use std::collections::HashMap;

use async_trait::async_trait;
use shared::{
    abstract_trait::{DynOrderRepository, OrderServiceTrait},
    domain::{
        requests::CreateOrderRequest,
        responses::{
            ApiResponse, DailySales, MonthlySales, OrderResponse, ProductSales,
            SalesReportResponse, SalesSummary,
        },
    },
    errors::ServiceError,
    model::{
        DailySalesRow, MonthlySalesRow, Order, OrderItem, ProductSalesRow, SalesSummaryRow,
    },
};

pub struct OrderService {
    repository: DynOrderRepository,
}

impl OrderService {
    pub fn new(repository: DynOrderRepository) -> Self {
        Self { repository }
    }

    async fn with_items(
        &self,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderResponse>, ServiceError> {
        let order_ids: Vec<i32> = orders.iter().map(|order| order.order_id).collect();
        let items = self.repository.items_for_orders(&order_ids).await?;
        Ok(attach_items(orders, items))
    }
}

fn attach_items(orders: Vec<Order>, items: Vec<OrderItem>) -> Vec<OrderResponse> {
    let mut by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.order_id).unwrap_or_default();
            OrderResponse::from_parts(order, items)
        })
        .collect()
}

fn build_report(
    summary: SalesSummaryRow,
    daily: Vec<DailySalesRow>,
    monthly: Vec<MonthlySalesRow>,
    best_selling: Vec<ProductSalesRow>,
) -> SalesReportResponse {
    let total_items = best_selling.iter().map(|row| row.total_sold).sum();

    SalesReportResponse {
        summary: SalesSummary {
            total_sales: summary.total_sales,
            total_orders: summary.total_orders,
            total_items,
        },
        daily_sales: daily.into_iter().map(DailySales::from).collect(),
        monthly_sales: monthly.into_iter().map(MonthlySales::from).collect(),
        best_selling_products: best_selling.into_iter().map(ProductSales::from).collect(),
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let (order, items) = self.repository.create_order(request).await?;

        Ok(ApiResponse::success(
            "Order created successfully",
            OrderResponse::from_parts(order, items),
        ))
    }

    async fn get_user_orders(
        &self,
        customer_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        let orders = self.repository.find_by_customer(customer_id).await?;
        let responses = self.with_items(orders).await?;

        Ok(ApiResponse::success(
            "Orders retrieved successfully",
            responses,
        ))
    }

    async fn get_order_details(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self
            .repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id} not found")))?;

        let items = self.repository.items_for_orders(&[order_id]).await?;

        Ok(ApiResponse::success(
            "Order retrieved successfully",
            OrderResponse::from_parts(order, items),
        ))
    }

    async fn get_all_orders(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        let orders = self.repository.find_all().await?;
        let responses = self.with_items(orders).await?;

        Ok(ApiResponse::success(
            "Orders retrieved successfully",
            responses,
        ))
    }

    async fn get_today_orders(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        let orders = self.repository.find_today_pending().await?;
        let responses = self.with_items(orders).await?;

        Ok(ApiResponse::success(
            "Today's pending orders retrieved successfully",
            responses,
        ))
    }

    async fn get_confirmed_orders(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        let orders = self.repository.find_confirmed().await?;
        let responses = self.with_items(orders).await?;

        Ok(ApiResponse::success(
            "Confirmed orders retrieved successfully",
            responses,
        ))
    }

    async fn confirm_order(&self, order_id: i32) -> Result<ApiResponse<bool>, ServiceError> {
        let confirmed = self.repository.confirm_order(order_id).await?;

        if !confirmed {
            return Err(ServiceError::NotFound(format!("Order {order_id} not found")));
        }

        Ok(ApiResponse::success("Order confirmed successfully", true))
    }

    async fn get_sales_report(&self) -> Result<ApiResponse<SalesReportResponse>, ServiceError> {
        let summary = self.repository.sales_summary().await?;
        let daily = self.repository.daily_sales().await?;
        let monthly = self.repository.monthly_sales().await?;
        let best_selling = self.repository.best_selling().await?;

        Ok(ApiResponse::success(
            "Sales report generated successfully",
            build_report(summary, daily, monthly, best_selling),
        ))
    }
}
