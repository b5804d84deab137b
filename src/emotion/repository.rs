//! MySQL-backed store for emotions.
//!
//! Table: `emotions` (`emotion_id`, `user_id` UNIQUE, `group_id`,
//! `emotion_type`, `created_at`, `updated_at` NULL).

use std::sync::Arc;

use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;

use crate::db::port::{Db, Param, Row};
use crate::emotion::domain::{Emotion, EmotionType, NewEmotion};
use crate::emotion::store::EmotionStore;
use crate::params;

const EMOTION_COLS: &str = "emotion_id, user_id, group_id, emotion_type, created_at, updated_at";

fn emotion_from_row(row: &Row) -> Result<Emotion> {
    let type_raw = row.get_string("emotion_type")?;
    Ok(Emotion {
        id: row.get_u64("emotion_id")?,
        user_id: row.get_u64("user_id")?,
        group_id: row.get_u64("group_id")?,
        emotion_type: EmotionType::parse(&type_raw)
            .ok_or_else(|| anyhow!("unknown emotion type `{type_raw}`"))?,
        created_at: row.get_datetime("created_at")?,
        updated_at: row.get_datetime_opt("updated_at")?,
    })
}

pub struct MySqlEmotionStore {
    db: Arc<dyn Db>,
}

impl MySqlEmotionStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl EmotionStore for MySqlEmotionStore {
    fn find_by_id(&self, id: u64) -> Result<Option<Emotion>> {
        let sql = format!("SELECT {EMOTION_COLS} FROM emotions WHERE emotion_id = ?");
        let row = self.db.fetch_one(&sql, &params![id])?;
        row.as_ref().map(emotion_from_row).transpose()
    }

    fn find_by_user(&self, user_id: u64) -> Result<Option<Emotion>> {
        let sql = format!("SELECT {EMOTION_COLS} FROM emotions WHERE user_id = ?");
        let row = self.db.fetch_one(&sql, &params![user_id])?;
        row.as_ref().map(emotion_from_row).transpose()
    }

    fn insert(&self, new: &NewEmotion) -> Result<u64> {
        self.db.exec_returning_last_insert_id(
            "INSERT INTO emotions (user_id, group_id, emotion_type, created_at) \
             VALUES (?, ?, ?, ?)",
            &params![
                new.user_id,
                new.group_id,
                new.emotion_type.as_str(),
                new.created_at
            ],
        )
    }

    fn update_type(
        &self,
        id: u64,
        emotion_type: EmotionType,
        updated_at: NaiveDateTime,
    ) -> Result<()> {
        self.db.exec(
            "UPDATE emotions SET emotion_type = ?, updated_at = ? WHERE emotion_id = ?",
            &params![emotion_type.as_str(), updated_at, id],
        )?;
        Ok(())
    }

    fn find_all_by_group(&self, group_id: u64) -> Result<Vec<Emotion>> {
        let sql = format!("SELECT {EMOTION_COLS} FROM emotions WHERE group_id = ? ORDER BY emotion_id");
        let rows = self.db.fetch_all(&sql, &params![group_id])?;
        rows.iter().map(emotion_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::port::Value;
    use chrono::NaiveDate;

    #[test]
    fn emotion_row_rejects_unknown_type() {
        let mut row = Row::default();
        row.insert("emotion_id", Value::U64(1));
        row.insert("user_id", Value::U64(2));
        row.insert("group_id", Value::U64(10));
        row.insert("emotion_type", Value::Str("HAPPY".into()));
        row.insert(
            "created_at",
            Value::DateTime(
                NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            ),
        );
        row.insert("updated_at", Value::Null);

        assert_eq!(
            emotion_from_row(&row).unwrap().emotion_type,
            EmotionType::Happy
        );

        row.insert("emotion_type", Value::Str("GRUMPY".into()));
        assert!(emotion_from_row(&row).is_err());
    }
}
