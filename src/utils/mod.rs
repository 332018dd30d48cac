pub mod app_time;
pub mod format;

pub use app_time::{AppInstant, elapsed_ms};
pub use format::format_price;
