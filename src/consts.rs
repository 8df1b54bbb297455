pub const CSRF_TOKEN_COOKIE_NAME: &str = "csrf_token";
pub const ENROLL_SESSION_COOKIE_NAME: &str = "enroll_state";

/// Raw PAN digit bounds accepted on submit
pub const CARD_NUMBER_MIN_DIGITS: usize = 13;
pub const CARD_NUMBER_MAX_DIGITS: usize = 19;

pub const HOLDER_NAME_MIN_CHARS: usize = 3;

pub const OTP_DIGITS: usize = 6;

/// Session-scoped cap for the OTP attempt log; oldest entries get dropped
pub const MAX_OTP_ATTEMPTS: usize = 10;

/// Two-digit expiry years resolve into [current_year - 20, current_year + 80)
pub const EXPIRY_PAST_WINDOW_YEARS: i32 = 20;

pub const MAX_AGE_COOKIES: i64 = chrono::TimeDelta::hours(4).num_seconds();
