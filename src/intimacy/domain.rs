use chrono::{NaiveDate, NaiveDateTime};

/// Number of questions in the intimacy quiz.
pub const QUESTION_COUNT: usize = 10;

/// Valid range of a single quiz answer.
pub const ANSWER_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// One completed quiz run. A user may retake the quiz; the latest run wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntimacyScore {
    pub id: u64,
    pub user_id: u64,
    /// 0..=100.
    pub score: u32,
    pub test_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewIntimacyScore {
    pub user_id: u64,
    pub score: u32,
    pub test_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Total score for a full set of answers: the 10..=50 sum doubled onto a
/// 0..=100 scale.
pub fn compute_score(answers: &[u8]) -> u32 {
    answers.iter().map(|a| u32::from(*a)).sum::<u32>() * 2
}
