mod analysis;
mod auth;
mod email;
mod expiry;
mod hashing;
mod jwt;
mod notification;
mod order;
mod product;
mod user;

pub use self::analysis::{AnalysisServiceTrait, DynAnalysisService};
pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::email::{DynEmailService, EmailServiceTrait};
pub use self::expiry::{DynExpiryStore, ExpiryStoreTrait};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::notification::{DynNotificationGateway, NotificationGatewayTrait};
pub use self::order::{
    DynOrderRepository, DynOrderService, OrderRepositoryTrait, OrderServiceTrait,
};
pub use self::product::{
    DynProductRepository, DynProductService, ProductRepositoryTrait, ProductServiceTrait,
};
pub use self::user::{DynUserRepository, UserRepositoryTrait};
