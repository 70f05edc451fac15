use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Code is required"))]
    #[schema(example = "P1")]
    pub code: String,

    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Milk")]
    pub name: String,

    pub description: Option<String>,

    pub ingredients: Option<String>,

    #[validate(range(min = 1, message = "Price must be greater than zero"))]
    #[schema(example = 4999)]
    pub price: i64,

    #[validate(range(min = 0, message = "Discount price cannot be negative"))]
    #[schema(example = 3999)]
    pub discount_price: i64,

    /// Expiry instant, RFC 3339 or `YYYY-MM-DD[THH:MM:SS]`. Absent means never expires.
    #[schema(example = "2026-09-01T00:00:00")]
    pub expire_date: Option<String>,
}

/// Raw image upload lifted out of the multipart form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
