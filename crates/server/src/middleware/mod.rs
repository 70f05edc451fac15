pub mod jwt;
pub mod role;
pub mod validate;

pub use self::jwt::auth_middleware;
pub use self::role::admin_middleware;
pub use self::validate::SimpleValidatedJson;
