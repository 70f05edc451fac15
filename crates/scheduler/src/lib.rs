mod expiry;

pub use self::expiry::{ExpiryRequest, ExpiryScheduler};
