use redb::TableDefinition;

/// Users, keyed by username. Values are bincode-encoded `UserRecord`s.
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Active sessions, keyed by token. Values are bincode-encoded
/// `SessionRecord`s.
pub const SESSIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("sessions");

/// Daily time records, keyed by (user id, date). Dates are `YYYY-MM-DD`
/// strings, so each user's records sort chronologically and week and
/// month totals are single range scans.
pub const RECORDS: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("time_records");
