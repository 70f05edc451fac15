mod email;
mod gateway;
mod push;
mod realtime;

pub use self::email::EmailService;
pub use self::gateway::Notifier;
pub use self::push::PushClient;
pub use self::realtime::{RealtimeEvent, RealtimeHub};
