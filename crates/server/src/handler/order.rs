use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    abstract_trait::DynOrderService,
    domain::{
        requests::CreateOrderRequest,
        responses::{ApiResponse, OrderResponse, SalesReportResponse},
    },
    errors::HttpError,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    middleware::{jwt::auth_middleware, role::admin_middleware, validate::SimpleValidatedJson},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/orders/create",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Order"
)]
pub async fn create_order_handler(
    Extension(service): Extension<DynOrderService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_order(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/user/{customer_id}",
    security(("bearer_auth" = [])),
    params(("customer_id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Orders for one customer", body = ApiResponse<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Order"
)]
pub async fn get_user_orders_handler(
    Extension(service): Extension<DynOrderService>,
    Path(customer_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_user_orders(customer_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/details/{order_id}",
    security(("bearer_auth" = [])),
    params(("order_id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with its items", body = ApiResponse<OrderResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    ),
    tag = "Order"
)]
pub async fn get_order_details_handler(
    Extension(service): Extension<DynOrderService>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_order_details(order_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/admin/orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All orders", body = ApiResponse<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    ),
    tag = "Order"
)]
pub async fn get_all_orders_handler(
    Extension(service): Extension<DynOrderService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_all_orders().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/admin/today",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Today's pending orders", body = ApiResponse<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    ),
    tag = "Order"
)]
pub async fn get_today_orders_handler(
    Extension(service): Extension<DynOrderService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_today_orders().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/admin/confirmed",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Confirmed orders", body = ApiResponse<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    ),
    tag = "Order"
)]
pub async fn get_confirmed_orders_handler(
    Extension(service): Extension<DynOrderService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_confirmed_orders().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/admin/confirm/{order_id}",
    security(("bearer_auth" = [])),
    params(("order_id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order confirmed", body = ApiResponse<bool>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Order not found")
    ),
    tag = "Order"
)]
pub async fn confirm_order_handler(
    Extension(service): Extension<DynOrderService>,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.confirm_order(order_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/admin/sales-report",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sales report", body = ApiResponse<SalesReportResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    ),
    tag = "Order"
)]
pub async fn sales_report_handler(
    Extension(service): Extension<DynOrderService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_sales_report().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let user_routes = OpenApiRouter::new()
        .route("/api/orders/create", post(create_order_handler))
        .route(
            "/api/orders/user/{customer_id}",
            get(get_user_orders_handler),
        )
        .route(
            "/api/orders/details/{order_id}",
            get(get_order_details_handler),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    let admin_routes = OpenApiRouter::new()
        .route("/api/orders/admin/orders", get(get_all_orders_handler))
        .route("/api/orders/admin/today", get(get_today_orders_handler))
        .route(
            "/api/orders/admin/confirmed",
            get(get_confirmed_orders_handler),
        )
        .route(
            "/api/orders/admin/confirm/{order_id}",
            put(confirm_order_handler),
        )
        .route("/api/orders/admin/sales-report", get(sales_report_handler))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_service.clone()))
        .layer(Extension(app_state.di_container.user_repository.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    user_routes.merge(admin_routes)
}
