use std::sync::Arc;

use axum::{
    Extension, Json, extract::Path, http::StatusCode, middleware, response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::DynAnalysisService,
    domain::responses::{AnalysisResponse, ApiResponse},
    errors::HttpError,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{middleware::jwt::auth_middleware, state::AppState};

#[utoipa::path(
    get,
    path = "/api/ai/analyze/{product_id}",
    security(("bearer_auth" = [])),
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "AI health analysis for a product", body = ApiResponse<AnalysisResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
        (status = 502, description = "AI provider unavailable")
    ),
    tag = "Analysis"
)]
pub async fn analyze_product_handler(
    Extension(service): Extension<DynAnalysisService>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.analyze_product(product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn analysis_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/ai/analyze/{product_id}", get(analyze_product_handler))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.analysis_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
