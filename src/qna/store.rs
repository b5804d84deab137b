//! Persistence ports for questions and answers.
//!
//! The question pool is append-only from this crate's point of view: the
//! only mutation is the one-time activation-date assignment. Answers are
//! fully owned here.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use crate::qna::domain::{Answer, NewAnswer, Question};

#[cfg_attr(test, mockall::automock)]
pub trait QuestionStore: Send + Sync + 'static {
    fn find_by_id(&self, id: u64) -> Result<Option<Question>>;

    /// The question activated on the given date, if any. At most one exists.
    fn find_by_activation_date(&self, date: NaiveDate) -> Result<Option<Question>>;

    /// Activated questions with `start <= activation_date <= end`, ordered
    /// by activation date.
    fn find_activated_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Question>>;

    /// The smallest-id question still waiting in the pool.
    fn find_first_unactivated(&self) -> Result<Option<Question>>;

    /// Records the one-time activation of a question.
    fn set_activation_date(&self, id: u64, date: NaiveDate) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait AnswerStore: Send + Sync + 'static {
    fn find_by_question_and_user(&self, question_id: u64, user_id: u64) -> Result<Option<Answer>>;

    /// Inserts a new answer and returns its id.
    fn insert(&self, new: &NewAnswer) -> Result<u64>;

    fn update_text(&self, id: u64, text: &str, updated_at: NaiveDateTime) -> Result<()>;

    fn delete_by_question_and_user(&self, question_id: u64, user_id: u64) -> Result<()>;
}
