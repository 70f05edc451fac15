use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::RepositoryError;

pub type DynExpiryStore = Arc<dyn ExpiryStoreTrait + Send + Sync>;

/// The narrow store surface the expiry scheduler needs: a row delete where
/// "already gone" is an answer, not an error.
#[async_trait]
pub trait ExpiryStoreTrait {
    async fn delete_by_id(&self, product_id: i32) -> Result<bool, RepositoryError>;
}
