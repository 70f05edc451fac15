mod analysis;
mod api;
mod order;
mod product;
mod report;
mod token;
mod user;

pub use self::analysis::AnalysisResponse;
pub use self::api::ApiResponse;
pub use self::order::{OrderItemResponse, OrderResponse};
pub use self::product::ProductResponse;
pub use self::report::{
    DailySales, MonthlySales, ProductSales, SalesReportResponse, SalesSummary,
};
pub use self::token::LoginResponse;
pub use self::user::UserResponse;
