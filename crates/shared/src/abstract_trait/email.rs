use async_trait::async_trait;
use std::sync::Arc;

use crate::{errors::NotifyError, utils::EmailTemplateData};

pub type DynEmailService = Arc<dyn EmailServiceTrait + Send + Sync>;

#[async_trait]
pub trait EmailServiceTrait {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        data: &EmailTemplateData,
    ) -> Result<(), NotifyError>;
}
