use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    Extension, Json,
    extract::{Multipart, Path},
    http::StatusCode,
    middleware,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{delete, get, post},
};
use notifier::RealtimeHub;
use shared::{
    abstract_trait::DynProductService,
    domain::{
        requests::{CreateProductRequest, UploadedImage},
        responses::{ApiResponse, ProductResponse},
    },
    errors::HttpError,
};
use tokio_stream::{
    StreamExt,
    wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};
use utoipa_axum::router::OpenApiRouter;
use validator::Validate;

use crate::{
    middleware::{
        jwt::auth_middleware, role::admin_middleware, validate::format_validation_errors,
    },
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/products/all",
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Product"
)]
pub async fn get_products_handler(
    Extension(service): Extension<DynProductService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_products().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products/add",
    security(("bearer_auth" = [])),
    request_body(content = CreateProductRequest, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Product code already exists")
    ),
    tag = "Product"
)]
pub async fn create_product_handler(
    Extension(service): Extension<DynProductService>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut code = None;
    let mut name = None;
    let mut description = None;
    let mut ingredients = None;
    let mut price = None;
    let mut discount_price = None;
    let mut expire_date = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::BadRequest(format!("Invalid multipart form: {e}")))?
    {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };

        if field_name == "image" {
            let file_name = field.file_name().unwrap_or("upload.bin").to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| HttpError::BadRequest(format!("Failed to read image: {e}")))?;
            if !bytes.is_empty() {
                image = Some(UploadedImage {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| HttpError::BadRequest(format!("Failed to read {field_name}: {e}")))?;

        match field_name.as_str() {
            "code" => code = Some(value),
            "name" => name = Some(value),
            "description" => description = some_nonempty(value),
            "ingredients" => ingredients = some_nonempty(value),
            "price" => price = Some(parse_form_i64("price", &value)?),
            "discount_price" => discount_price = Some(parse_form_i64("discount_price", &value)?),
            "expire_date" => expire_date = some_nonempty(value),
            _ => {}
        }
    }

    let request = CreateProductRequest {
        code: code.unwrap_or_default(),
        name: name.unwrap_or_default(),
        description,
        ingredients,
        price: price.unwrap_or(0),
        discount_price: discount_price.unwrap_or(0),
        expire_date,
    };

    request
        .validate()
        .map_err(|e| HttpError::BadRequest(format_validation_errors(&e)))?;

    let response = service.create_product(&request, image).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/delete/{code}",
    security(("bearer_auth" = [])),
    params(("code" = String, Path, description = "Product code")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<bool>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "Product"
)]
pub async fn delete_product_handler(
    Extension(service): Extension<DynProductService>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_product(&code).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Server-sent events feed carrying `newProduct`, `productExpired` and
/// `productDeleted` notifications to storefront clients.
pub async fn product_events_handler(
    Extension(hub): Extension<RealtimeHub>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(hub.subscribe()).filter_map(|message| match message {
        Ok(incoming) => Some(Ok(Event::default()
            .event(incoming.event)
            .data(incoming.payload.to_string()))),
        // A lagged client misses events instead of stalling the hub.
        Err(BroadcastStreamRecvError::Lagged(_)) => None,
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

fn some_nonempty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_form_i64(field: &str, value: &str) -> Result<i64, HttpError> {
    value
        .trim()
        .parse()
        .map_err(|_| HttpError::BadRequest(format!("{field} must be an integer")))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/products/all", get(get_products_handler))
        .route("/api/products/events", get(product_events_handler))
        .layer(Extension(app_state.di_container.product_service.clone()))
        .layer(Extension(app_state.realtime_hub.clone()));

    let admin_routes = OpenApiRouter::new()
        .route("/api/products/add", post(create_product_handler))
        .route("/api/products/delete/{code}", delete(delete_product_handler))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.product_service.clone()))
        .layer(Extension(app_state.di_container.user_repository.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public_routes.merge(admin_routes)
}
