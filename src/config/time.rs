use crate::config::env::read_string;

/// Timezone configuration for the application clock.
///
/// One IANA zone governs the whole app: the activation job, the logical-day
/// window checks, and every persisted timestamp. Defaults to `Asia/Seoul`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeConfig {
    pub timezone: String,
}

impl TimeConfig {
    pub fn from_env() -> Self {
        Self {
            timezone: read_string("APP_TIMEZONE", "Asia/Seoul"),
        }
    }
}
