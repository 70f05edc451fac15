use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Realtime channel error: {0}")]
    Channel(String),

    #[error("Push gateway error: {0}")]
    Http(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<askama::Error> for NotifyError {
    fn from(error: askama::Error) -> Self {
        NotifyError::Template(error.to_string())
    }
}
