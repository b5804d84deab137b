//! Persistence port for emotion rows.

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::emotion::domain::{Emotion, EmotionType, NewEmotion};

#[cfg_attr(test, mockall::automock)]
pub trait EmotionStore: Send + Sync + 'static {
    fn find_by_id(&self, id: u64) -> Result<Option<Emotion>>;

    /// A user has at most one emotion row.
    fn find_by_user(&self, user_id: u64) -> Result<Option<Emotion>>;

    /// Inserts a new emotion and returns its id.
    fn insert(&self, new: &NewEmotion) -> Result<u64>;

    fn update_type(
        &self,
        id: u64,
        emotion_type: EmotionType,
        updated_at: NaiveDateTime,
    ) -> Result<()>;

    fn find_all_by_group(&self, group_id: u64) -> Result<Vec<Emotion>>;
}
