use serde::Serialize;
use utoipa::ToSchema;

/// Wire shape for every non-2xx response body.
///
/// `status` is `"fail"` for request problems (bad input, missing or bad
/// credentials) and `"error"` when the server itself broke.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn fail(message: impl Into<String>) -> Self {
        ErrorResponse {
            status: "fail".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
