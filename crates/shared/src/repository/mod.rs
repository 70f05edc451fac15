mod order;
mod product;
mod user;

pub use self::order::OrderRepository;
pub use self::product::ProductRepository;
pub use self::user::UserRepository;
