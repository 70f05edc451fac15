mod error;
mod http;
mod notify;
mod repository;
mod service;

pub use self::error::ErrorResponse;
pub use self::http::HttpError;
pub use self::notify::NotifyError;
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
