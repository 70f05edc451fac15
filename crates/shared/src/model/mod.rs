mod order;
mod product;
mod report;
mod user;

pub use self::order::{Order, OrderItem};
pub use self::product::Product;
pub use self::report::{DailySalesRow, MonthlySalesRow, ProductSalesRow, SalesSummaryRow};
pub use self::user::User;
