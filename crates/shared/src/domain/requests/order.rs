use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "customer_id")]
    pub customer_id: i32,

    #[validate(length(min = 1, message = "Customer name is required"))]
    #[serde(rename = "customer_name")]
    pub customer_name: String,

    #[validate(length(min = 1, message = "Customer number is required"))]
    #[serde(rename = "customer_number")]
    pub customer_number: String,

    #[validate(length(min = 1, message = "Customer address is required"))]
    #[serde(rename = "customer_address")]
    pub customer_address: String,

    #[validate(range(min = 1, message = "Total amount must be greater than zero"))]
    #[serde(rename = "total_amount")]
    pub total_amount: i64,

    #[validate(length(min = 1, message = "Payment method is required"))]
    #[serde(rename = "payment_method")]
    pub payment_method: String,

    #[validate(length(min = 1, message = "Order must have at least one item"))]
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateOrderItemRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "product_id")]
    pub product_id: i32,

    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,

    #[validate(range(min = 1))]
    pub quantity: i32,

    #[validate(range(min = 1))]
    pub price: i64,

    pub image: Option<String>,
}
