use crate::model::{DailySalesRow, MonthlySalesRow, ProductSalesRow};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SalesSummary {
    #[serde(rename = "total_sales")]
    pub total_sales: i64,
    #[serde(rename = "total_orders")]
    pub total_orders: i64,
    #[serde(rename = "total_items")]
    pub total_items: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct DailySales {
    pub date: String,
    #[serde(rename = "daily_sales")]
    pub daily_sales: i64,
}

impl From<DailySalesRow> for DailySales {
    fn from(value: DailySalesRow) -> Self {
        DailySales {
            date: value.date.to_string(),
            daily_sales: value.daily_sales,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct MonthlySales {
    pub month: String,
    #[serde(rename = "monthly_sales")]
    pub monthly_sales: i64,
}

impl From<MonthlySalesRow> for MonthlySales {
    fn from(value: MonthlySalesRow) -> Self {
        MonthlySales {
            month: value.month,
            monthly_sales: value.monthly_sales,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductSales {
    #[serde(rename = "product_name")]
    pub product_name: String,
    #[serde(rename = "total_sold")]
    pub total_sold: i64,
}

impl From<ProductSalesRow> for ProductSales {
    fn from(value: ProductSalesRow) -> Self {
        ProductSales {
            product_name: value.product_name,
            total_sold: value.total_sold,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SalesReportResponse {
    pub summary: SalesSummary,
    #[serde(rename = "daily_sales")]
    pub daily_sales: Vec<DailySales>,
    #[serde(rename = "monthly_sales")]
    pub monthly_sales: Vec<MonthlySales>,
    #[serde(rename = "best_selling_products")]
    pub best_selling_products: Vec<ProductSales>,
}
