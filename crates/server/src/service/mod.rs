mod analysis;
mod auth;
mod order;
mod product;

pub use self::analysis::AnalysisService;
pub use self::auth::AuthService;
pub use self::order::OrderService;
pub use self::product::ProductService;
