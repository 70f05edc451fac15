mod gracefullshutdown;
mod logs;
mod parse_datetime;
mod template;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::parse_datetime::parse_expire_date;
pub use self::template::{EmailTemplate, EmailTemplateData, render_email};
