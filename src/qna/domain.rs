//! The shared daily question and its answers.
//!
//! A question's life is one-directional: it is seeded with no activation
//! date, picked up by the activation job exactly once, and from then on ages
//! from "today's question" into a past one as logical days elapse. Nothing
//! ever reverts an activation.

use chrono::{NaiveDate, NaiveDateTime};

use crate::time::logical_day::logical_date_of;

/// A question from the shared pool.
///
/// `activation_date` is `None` while the question waits in the pool and is
/// set exactly once by the activation job. At most one question holds any
/// given activation date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: u64,
    pub text: String,
    pub created_at: NaiveDateTime,
    pub activation_date: Option<NaiveDate>,
}

/// Lifecycle stage of a [`Question`] relative to a logical day.
///
/// Derived from the activation date on every use; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionState {
    /// Still in the pool (or dated ahead of the given day).
    Pending,
    /// The question of the given logical day.
    Active,
    /// Activated on an earlier logical day.
    Past,
}

impl Question {
    /// Classifies this question for the given logical day.
    pub fn state_on(&self, logical_today: NaiveDate) -> QuestionState {
        match self.activation_date {
            None => QuestionState::Pending,
            Some(d) if d == logical_today => QuestionState::Active,
            Some(d) if d < logical_today => QuestionState::Past,
            Some(_) => QuestionState::Pending,
        }
    }
}

/// One member's answer to one question.
///
/// At most one answer exists per (question, user) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    pub id: u64,
    pub question_id: u64,
    pub user_id: u64,
    pub text: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Answer {
    /// The single ownership check used by every mutating operation.
    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.user_id == user_id
    }

    /// Whether this answer was written within the given logical day.
    ///
    /// An answer from 01:00 belongs to the previous calendar day's window,
    /// so it stays editable until that logical day ends at 05:00.
    pub fn written_on(&self, logical_day: NaiveDate) -> bool {
        logical_date_of(self.created_at) == logical_day
    }
}

/// Insert payload for a new answer row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAnswer {
    pub question_id: u64,
    pub user_id: u64,
    pub text: String,
    pub created_at: NaiveDateTime,
}
