mod health;
mod record;
mod register;
mod session;
mod stats;
mod validation;

pub use health::health_check;
pub use record::send_record;
pub use register::register;
pub use session::{check_cookie, login, logout};
pub use stats::main_stats;
pub use validation::{parse_time, validate_date};

use serde::Serialize;

/// Standard success body, `{"message": "..."}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
