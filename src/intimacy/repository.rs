//! MySQL-backed store for intimacy quiz results.
//!
//! Tables:
//! - `intimacy_scores` (`intimacy_id`, `user_id`, `score`, `test_date`,
//!   `created_at`)
//! - `intimacy_responses` (`response_id`, `intimacy_id`,
//!   `answer1`..`answer10`, `created_at`)

use std::sync::Arc;

use anyhow::{Result, bail};

use crate::db::port::{Db, Param, Row};
use crate::intimacy::domain::{IntimacyScore, NewIntimacyScore, QUESTION_COUNT};
use crate::intimacy::store::IntimacyScoreStore;
use crate::params;

fn score_from_row(row: &Row) -> Result<IntimacyScore> {
    Ok(IntimacyScore {
        id: row.get_u64("intimacy_id")?,
        user_id: row.get_u64("user_id")?,
        score: row.get_u64("score")? as u32,
        test_date: row.get_date("test_date")?,
        created_at: row.get_datetime("created_at")?,
    })
}

pub struct MySqlIntimacyScoreStore {
    db: Arc<dyn Db>,
}

impl MySqlIntimacyScoreStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl IntimacyScoreStore for MySqlIntimacyScoreStore {
    fn find_latest_by_user(&self, user_id: u64) -> Result<Option<IntimacyScore>> {
        let row = self.db.fetch_one(
            "SELECT intimacy_id, user_id, score, test_date, created_at \
             FROM intimacy_scores WHERE user_id = ? \
             ORDER BY test_date DESC, created_at DESC LIMIT 1",
            &params![user_id],
        )?;
        row.as_ref().map(score_from_row).transpose()
    }

    fn insert_score(&self, new: &NewIntimacyScore) -> Result<u64> {
        self.db.exec_returning_last_insert_id(
            "INSERT INTO intimacy_scores (user_id, score, test_date, created_at) \
             VALUES (?, ?, ?, ?)",
            &params![
                new.user_id,
                u64::from(new.score),
                new.test_date,
                new.created_at
            ],
        )
    }

    fn insert_responses(&self, score_id: u64, answers: &[u8]) -> Result<()> {
        if answers.len() != QUESTION_COUNT {
            bail!("expected {QUESTION_COUNT} answers, got {}", answers.len());
        }

        let mut ps = vec![Param::U64(score_id)];
        ps.extend(answers.iter().map(|a| Param::U64(u64::from(*a))));

        self.db.exec(
            "INSERT INTO intimacy_responses \
             (intimacy_id, answer1, answer2, answer3, answer4, answer5, \
              answer6, answer7, answer8, answer9, answer10) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            &ps,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::port::MockDb;

    #[test]
    fn responses_insert_requires_ten_answers() {
        let store = MySqlIntimacyScoreStore::new(Arc::new(MockDb::new()));
        assert!(store.insert_responses(1, &[3; 9]).is_err());
    }

    #[test]
    fn responses_insert_binds_score_id_first() {
        let mut db = MockDb::new();
        db.expect_exec()
            .withf(|_, ps| ps.len() == 11 && matches!(ps[0], Param::U64(9)))
            .times(1)
            .returning(|_, _| Ok(1));

        let store = MySqlIntimacyScoreStore::new(Arc::new(db));
        store.insert_responses(9, &[3; 10]).unwrap();
    }
}
