use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::CreateOrderRequest,
        responses::{ApiResponse, OrderResponse, SalesReportResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{DailySalesRow, MonthlySalesRow, Order, OrderItem, ProductSalesRow, SalesSummaryRow},
};

pub type DynOrderRepository = Arc<dyn OrderRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderRepositoryTrait {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError>;
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError>;
    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Order>, RepositoryError>;
    async fn find_by_id(&self, order_id: i32) -> Result<Option<Order>, RepositoryError>;
    async fn find_today_pending(&self) -> Result<Vec<Order>, RepositoryError>;
    async fn find_confirmed(&self) -> Result<Vec<Order>, RepositoryError>;
    async fn confirm_order(&self, order_id: i32) -> Result<bool, RepositoryError>;
    async fn items_for_orders(&self, order_ids: &[i32])
    -> Result<Vec<OrderItem>, RepositoryError>;
    async fn sales_summary(&self) -> Result<SalesSummaryRow, RepositoryError>;
    async fn daily_sales(&self) -> Result<Vec<DailySalesRow>, RepositoryError>;
    async fn monthly_sales(&self) -> Result<Vec<MonthlySalesRow>, RepositoryError>;
    async fn best_selling(&self) -> Result<Vec<ProductSalesRow>, RepositoryError>;
}

pub type DynOrderService = Arc<dyn OrderServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderServiceTrait {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn get_user_orders(
        &self,
        customer_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn get_order_details(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn get_all_orders(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn get_today_orders(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn get_confirmed_orders(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn confirm_order(&self, order_id: i32) -> Result<ApiResponse<bool>, ServiceError>;
    async fn get_sales_report(&self) -> Result<ApiResponse<SalesReportResponse>, ServiceError>;
}
