use axum::{
    Extension, Json,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynJwtService,
    errors::{ErrorResponse, ServiceError},
};

/// Pulls the access token from the `token` cookie, falling back to a
/// bearer `Authorization` header.
fn extract_token(cookie_jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
}

/// Only `access` tokens get through here; a `reset` token is valid for
/// the password flow but must not open the API.
fn rejection_message(err: &ServiceError) -> &'static str {
    match err {
        ServiceError::TokenExpired => "Session expired, please log in again",
        ServiceError::InvalidTokenType => "This token cannot be used for API access",
        _ => "Invalid authentication token",
    }
}

pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = extract_token(&cookie_jar, req.headers()).ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail("Missing authentication token")),
        )
    })?;

    let user_id = jwt.verify_token(&token, "access").map_err(|err| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail(rejection_message(&err))),
        )
    })? as i32;

    req.extensions_mut().insert(user_id);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;
    use shared::{abstract_trait::JwtServiceTrait, config::JwtConfig};

    use super::*;

    #[test]
    fn extracts_token_from_bearer_header() {
        let jar = CookieJar::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        assert_eq!(
            extract_token(&jar, &headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn cookie_takes_precedence_over_header() {
        let jar = CookieJar::new().add(Cookie::new("token", "cookie-token"));
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );

        assert_eq!(
            extract_token(&jar, &headers),
            Some("cookie-token".to_string())
        );
    }

    #[test]
    fn missing_credentials_yield_no_token() {
        assert_eq!(extract_token(&CookieJar::new(), &HeaderMap::new()), None);
    }

    #[test]
    fn reset_token_is_rejected_for_api_access() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt.generate_token(1, "reset").unwrap();

        let err = jwt.verify_token(&token, "access").unwrap_err();
        assert_eq!(
            rejection_message(&err),
            "This token cannot be used for API access"
        );
    }

    #[test]
    fn garbage_token_maps_to_generic_message() {
        let jwt = JwtConfig::new("test-secret");

        let err = jwt.verify_token("not-a-jwt", "access").unwrap_err();
        assert_eq!(rejection_message(&err), "Invalid authentication token");
    }
}
