use crate::model::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub price: i64,
    #[serde(rename = "discount_price")]
    pub discount_price: i64,
    pub image: Option<String>,
    #[serde(rename = "expire_date")]
    pub expire_date: Option<String>,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
}

// model to response
impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.product_id,
            code: value.code,
            name: value.name,
            description: value.description,
            ingredients: value.ingredients,
            price: value.price,
            discount_price: value.discount_price,
            image: value.image,
            expire_date: value.expire_date.map(|dt| dt.to_string()),
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}

impl ProductResponse {
    /// Rewrites a stored `/uploads/...` path into an absolute URL.
    pub fn resolve_image(mut self, base_url: &str) -> Self {
        self.image = self.image.map(|path| format!("{base_url}{path}"));
        self
    }
}
