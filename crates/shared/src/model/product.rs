use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub price: i64,
    pub discount_price: i64,
    pub image: Option<String>,
    pub expire_date: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}
