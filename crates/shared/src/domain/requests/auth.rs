use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct AuthRequest {
    #[validate(email)]
    #[serde(rename = "email")]
    pub email: String,

    #[validate(length(min = 6))]
    #[serde(rename = "password")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[serde(rename = "name")]
    pub name: String,

    #[validate(email)]
    #[serde(rename = "email")]
    pub email: String,

    #[validate(length(min = 6))]
    #[serde(rename = "password")]
    pub password: String,

    #[validate(length(min = 6))]
    #[serde(rename = "confirm_password")]
    pub confirm_password: String,

    /// Defaults to `customer` when absent; only seed tooling sends `admin`.
    #[serde(rename = "role")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    #[serde(rename = "email")]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    #[serde(rename = "token")]
    pub token: String,

    #[validate(length(min = 6))]
    #[serde(rename = "new_password")]
    pub new_password: String,

    #[validate(length(min = 6))]
    #[serde(rename = "confirm_password")]
    pub confirm_password: String,
}
