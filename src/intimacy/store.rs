//! Persistence port for intimacy quiz results.

use anyhow::Result;

use crate::intimacy::domain::{IntimacyScore, NewIntimacyScore};

#[cfg_attr(test, mockall::automock)]
pub trait IntimacyScoreStore: Send + Sync + 'static {
    /// The user's most recent run (latest test date, then latest creation).
    fn find_latest_by_user(&self, user_id: u64) -> Result<Option<IntimacyScore>>;

    /// Inserts a score row and returns its id.
    fn insert_score(&self, new: &NewIntimacyScore) -> Result<u64>;

    /// Records the per-question answers behind a score row.
    fn insert_responses(&self, score_id: u64, answers: &[u8]) -> Result<()>;
}
