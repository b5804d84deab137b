//! MySQL-backed stores for questions and answers.
//!
//! Tables:
//! - `questions` (`question_id`, `question` TEXT, `created_at`,
//!   `activation_date` DATE NULL UNIQUE)
//! - `answers` (`answer_id`, `question_id`, `user_id`, `answer_text`,
//!   `created_at`, `updated_at` NULL; UNIQUE (`question_id`, `user_id`))
//!
//! The unique indexes back the two core invariants (one question per
//! activation date, one answer per member per question); these stores rely
//! on them rather than re-checking.

use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use crate::db::port::{Db, Param, Row};
use crate::params;
use crate::qna::domain::{Answer, NewAnswer, Question};
use crate::qna::store::{AnswerStore, QuestionStore};

const QUESTION_COLS: &str = "question_id, question, created_at, activation_date";

fn question_from_row(row: &Row) -> Result<Question> {
    Ok(Question {
        id: row.get_u64("question_id")?,
        text: row.get_string("question")?,
        created_at: row.get_datetime("created_at")?,
        activation_date: row.get_date_opt("activation_date")?,
    })
}

pub struct MySqlQuestionStore {
    db: Arc<dyn Db>,
}

impl MySqlQuestionStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl QuestionStore for MySqlQuestionStore {
    fn find_by_id(&self, id: u64) -> Result<Option<Question>> {
        let sql = format!("SELECT {QUESTION_COLS} FROM questions WHERE question_id = ?");
        let row = self.db.fetch_one(&sql, &params![id])?;
        row.as_ref().map(question_from_row).transpose()
    }

    fn find_by_activation_date(&self, date: NaiveDate) -> Result<Option<Question>> {
        let sql = format!("SELECT {QUESTION_COLS} FROM questions WHERE activation_date = ?");
        let row = self.db.fetch_one(&sql, &params![date])?;
        row.as_ref().map(question_from_row).transpose()
    }

    fn find_activated_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Question>> {
        let sql = format!(
            "SELECT {QUESTION_COLS} FROM questions \
             WHERE activation_date BETWEEN ? AND ? ORDER BY activation_date"
        );
        let rows = self.db.fetch_all(&sql, &params![start, end])?;
        rows.iter().map(question_from_row).collect()
    }

    fn find_first_unactivated(&self) -> Result<Option<Question>> {
        let sql = format!(
            "SELECT {QUESTION_COLS} FROM questions \
             WHERE activation_date IS NULL ORDER BY question_id LIMIT 1"
        );
        let row = self.db.fetch_one(&sql, &[])?;
        row.as_ref().map(question_from_row).transpose()
    }

    fn set_activation_date(&self, id: u64, date: NaiveDate) -> Result<()> {
        self.db.exec(
            "UPDATE questions SET activation_date = ? \
             WHERE question_id = ? AND activation_date IS NULL",
            &params![date, id],
        )?;
        Ok(())
    }
}

const ANSWER_COLS: &str = "answer_id, question_id, user_id, answer_text, created_at, updated_at";

fn answer_from_row(row: &Row) -> Result<Answer> {
    Ok(Answer {
        id: row.get_u64("answer_id")?,
        question_id: row.get_u64("question_id")?,
        user_id: row.get_u64("user_id")?,
        text: row.get_string("answer_text")?,
        created_at: row.get_datetime("created_at")?,
        updated_at: row.get_datetime_opt("updated_at")?,
    })
}

pub struct MySqlAnswerStore {
    db: Arc<dyn Db>,
}

impl MySqlAnswerStore {
    pub fn new(db: Arc<dyn Db>) -> Self {
        Self { db }
    }
}

impl AnswerStore for MySqlAnswerStore {
    fn find_by_question_and_user(
        &self,
        question_id: u64,
        user_id: u64,
    ) -> Result<Option<Answer>> {
        let sql =
            format!("SELECT {ANSWER_COLS} FROM answers WHERE question_id = ? AND user_id = ?");
        let row = self.db.fetch_one(&sql, &params![question_id, user_id])?;
        row.as_ref().map(answer_from_row).transpose()
    }

    fn insert(&self, new: &NewAnswer) -> Result<u64> {
        self.db.exec_returning_last_insert_id(
            "INSERT INTO answers (question_id, user_id, answer_text, created_at) \
             VALUES (?, ?, ?, ?)",
            &params![
                new.question_id,
                new.user_id,
                new.text.as_str(),
                new.created_at
            ],
        )
    }

    fn update_text(&self, id: u64, text: &str, updated_at: NaiveDateTime) -> Result<()> {
        self.db.exec(
            "UPDATE answers SET answer_text = ?, updated_at = ? WHERE answer_id = ?",
            &params![text, updated_at, id],
        )?;
        Ok(())
    }

    fn delete_by_question_and_user(&self, question_id: u64, user_id: u64) -> Result<()> {
        self.db.exec(
            "DELETE FROM answers WHERE question_id = ? AND user_id = ?",
            &params![question_id, user_id],
        )?;
        Ok(())
    }
}
