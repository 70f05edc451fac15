use async_trait::async_trait;
use std::sync::Arc;

use crate::{domain::requests::RegisterRequest, errors::RepositoryError, model::User};

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, RepositoryError>;
    async fn create_user(
        &self,
        request: &RegisterRequest,
        hashed_password: &str,
    ) -> Result<User, RepositoryError>;
    async fn update_password(
        &self,
        user_id: i32,
        hashed_password: &str,
    ) -> Result<(), RepositoryError>;
}
