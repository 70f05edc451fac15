use crate::model::{Order, OrderItem};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderItemResponse {
    #[serde(rename = "product_id")]
    pub product_id: i32,
    #[serde(rename = "product_name")]
    pub product_name: String,
    pub quantity: i32,
    pub price: i64,
    pub image: Option<String>,
}

// model to response
impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        OrderItemResponse {
            product_id: value.product_id,
            product_name: value.product_name,
            quantity: value.quantity,
            price: value.price,
            image: value.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    #[serde(rename = "customer_id")]
    pub customer_id: i32,
    #[serde(rename = "customer_name")]
    pub customer_name: String,
    #[serde(rename = "customer_number")]
    pub customer_number: String,
    #[serde(rename = "customer_address")]
    pub customer_address: String,
    #[serde(rename = "total_amount")]
    pub total_amount: i64,
    #[serde(rename = "payment_method")]
    pub payment_method: String,
    pub status: String,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    pub fn from_parts(order: Order, items: Vec<OrderItem>) -> Self {
        OrderResponse {
            id: order.order_id,
            customer_id: order.customer_id,
            customer_name: order.customer_name,
            customer_number: order.customer_number,
            customer_address: order.customer_address,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            status: order.status,
            created_at: order.created_at.map(|dt| dt.to_string()),
            items: items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}
