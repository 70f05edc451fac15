mod auth;
mod order;
mod product;

pub use self::auth::{AuthRequest, ForgotPasswordRequest, RegisterRequest, ResetPasswordRequest};
pub use self::order::{CreateOrderItemRequest, CreateOrderRequest};
pub use self::product::{CreateProductRequest, UploadedImage};
