// src/utils/time.rs - Cross-platform time utilities

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Cross-platform time utilities that work on both native and WASM
pub struct Time;

impl Time {
    /// Get current UTC time - works on both native and WASM
    pub fn now() -> DateTime<Utc> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Utc::now()
        }

        #[cfg(target_arch = "wasm32")]
        {
            let millis = js_sys::Date::now() as i64;
            Self::from_millis(millis)
        }
    }

    /// Current time truncated to milliseconds, matching ISO 8601 strings
    /// produced by browsers
    pub fn now_millis_precision() -> DateTime<Utc> {
        Self::now().trunc_subsecs(3)
    }

    /// Create a DateTime from milliseconds since epoch
    pub fn from_millis(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Create a duration from milliseconds
    pub fn duration_millis(millis: i64) -> Duration {
        Duration::milliseconds(millis)
    }
}
