use crate::domain::responses::product::ProductResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AnalysisResponse {
    pub product: ProductResponse,
    /// Parsed from the model reply; null when the reply broke the format.
    #[serde(rename = "health_score")]
    pub health_score: Option<i32>,
    #[serde(rename = "ai_analysis")]
    pub ai_analysis: String,
}
