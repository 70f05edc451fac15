use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SalesSummaryRow {
    pub total_sales: i64,
    pub total_orders: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailySalesRow {
    pub date: NaiveDate,
    pub daily_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MonthlySalesRow {
    pub month: String,
    pub monthly_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductSalesRow {
    pub product_name: String,
    pub total_sold: i64,
}
