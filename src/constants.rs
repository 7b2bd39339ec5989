/// Date format used for record keys and all externally supplied dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Name of the session cookie set on register/login
pub const AUTH_COOKIE: &str = "auth_token";

/// Minimum username length
pub const MIN_USERNAME_LEN: usize = 3;

/// Maximum username length
pub const MAX_USERNAME_LEN: usize = 32;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Default session lifetime in seconds (30 days)
pub const DEFAULT_SESSION_TTL_SECS: i64 = 2_592_000;

// =============================================================================
// Response Messages
// =============================================================================

/// Returned when a same-day record is incremented
pub const MSG_RECORD_UPDATED: &str = "Time record updated";

/// Returned when the first record of the day is created
pub const MSG_RECORD_CREATED: &str = "New time record created";

/// Returned on successful registration
pub const MSG_REGISTERED: &str = "User registered.";

/// Returned on successful login
pub const MSG_LOGGED_IN: &str = "User logged in";

/// Returned on successful logout
pub const MSG_LOGGED_OUT: &str = "Session finished.";

/// Returned by the cookie check endpoint when the session is valid
pub const MSG_COOKIE_SET: &str = "Cookie set";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for dates that are not valid YYYY-MM-DD
pub const ERR_DATE_FORMAT: &str = "Date format error.";

/// Error message for a login request missing username or password
pub const ERR_MISSING_CREDENTIALS: &str = "Username or password missing.";

/// Error message for a logout request without a session cookie
pub const ERR_NO_SESSION_TOKEN: &str = "No session token provided.";

/// Error message when the record write cannot be persisted
pub const ERR_RECORD_WRITE: &str = "Couldnt update time record";

/// Error message for a time value that is not integer-parseable
pub const ERR_INVALID_TIME: &str = "Invalid time value";

/// Detailed error message for username validation in registration
pub const ERR_INVALID_USERNAME: &str =
    "Username must be 3-32 characters of letters, digits, '.', '_' or '-'";

/// Detailed error message for password validation in registration
pub const ERR_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
