use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::{AuthRequest, ForgotPasswordRequest, RegisterRequest, ResetPasswordRequest},
        responses::{ApiResponse, LoginResponse, UserResponse},
    },
    errors::ServiceError,
};

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn register_user(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn login_user(
        &self,
        request: &AuthRequest,
    ) -> Result<ApiResponse<LoginResponse>, ServiceError>;
    async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<ApiResponse<bool>, ServiceError>;
    async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<ApiResponse<bool>, ServiceError>;
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
