use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::responses::{AnalysisResponse, ApiResponse},
    errors::ServiceError,
};

pub type DynAnalysisService = Arc<dyn AnalysisServiceTrait + Send + Sync>;

#[async_trait]
pub trait AnalysisServiceTrait {
    async fn analyze_product(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<AnalysisResponse>, ServiceError>;
}
