mod session;
mod time_record;
mod user;

pub use session::SessionRecord;
pub use time_record::TimeRecord;
pub use user::UserRecord;
