use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use shared::{abstract_trait::DynUserRepository, errors::ErrorResponse};

/// Runs after `auth_middleware`, which leaves the authenticated user id
/// in the request extensions.
pub async fn admin_middleware(
    Extension(users): Extension<DynUserRepository>,
    Extension(user_id): Extension<i32>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let user = users.find_by_id(user_id).await.map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::error("Failed to load user")),
        )
    })?;

    match user {
        Some(user) if user.role == "admin" => Ok(next.run(req).await),
        Some(_) => Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::fail("Access denied, admin only")),
        )),
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail(
                "User belonging to this token no longer exists",
            )),
        )),
    }
}
