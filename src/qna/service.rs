//! The daily question and answer window.
//!
//! All gating here runs against the **logical day** (05:00 rollover, same
//! hour the activation job fires), so the question a night owl answers at
//! 01:00 is still "yesterday's" question and stays editable until 05:00.
//!
//! Rules enforced per operation:
//! - *submit*: only today's active question, one answer per member
//! - *edit*: additionally, only answers written within the current logical day
//! - *delete*: same gating as edit, minus the same-day requirement
//! - *detail*: today's question hides other members' answers until the
//!   caller has answered; past questions are always fully visible

use std::sync::Arc;

use chrono::{Months, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use crate::error::{DomainError, DomainResult};
use crate::qna::domain::{NewAnswer, Question, QuestionState};
use crate::qna::store::{AnswerStore, QuestionStore};
use crate::time::Clock;
use crate::time::logical_day::logical_today;
use crate::user::domain::User;
use crate::user::store::UserStore;

/// Shown in place of an answer for members who have not written one yet.
const NOT_YET_ANSWERED: &str = "not yet answered";

/// Upper bound on answer length, in characters.
const MAX_ANSWER_CHARS: usize = 150;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TodayQuestionResponse {
    pub question_id: u64,
    pub question: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyQuestionResponse {
    pub question_id: u64,
    pub date: NaiveDate,
    pub question: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MemberAnswer {
    pub user_id: u64,
    pub nickname: String,
    pub answer: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct QuestionDetailResponse {
    pub date: NaiveDate,
    pub question_id: u64,
    pub question: String,
    pub answers: Vec<MemberAnswer>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AnswerCreatedResponse {
    pub question_id: u64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AnswerUpdatedResponse {
    pub question_id: u64,
    pub user_id: u64,
    pub answer: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AnswerDeletedResponse {
    pub question_id: u64,
}

pub struct QnaService {
    questions: Arc<dyn QuestionStore>,
    answers: Arc<dyn AnswerStore>,
    users: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
}

impl QnaService {
    pub fn new(
        questions: Arc<dyn QuestionStore>,
        answers: Arc<dyn AnswerStore>,
        users: Arc<dyn UserStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            questions,
            answers,
            users,
            clock,
        }
    }

    /// The question activated for the current logical day.
    ///
    /// Absence is a recoverable client condition ("not prepared yet"), not
    /// a server fault; the pool may be exhausted or the job not yet run.
    pub fn today_question(&self) -> DomainResult<TodayQuestionResponse> {
        let q = self.active_question()?;
        Ok(TodayQuestionResponse {
            question_id: q.id,
            question: q.text,
        })
    }

    /// Activated questions within the given calendar month.
    pub fn monthly_questions(
        &self,
        year: i32,
        month: u32,
    ) -> DomainResult<Vec<MonthlyQuestionResponse>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| DomainError::bad_request("invalid year or month"))?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| DomainError::bad_request("invalid year or month"))?;

        let questions = self.questions.find_activated_between(first, last)?;
        Ok(questions
            .into_iter()
            .filter_map(|q| {
                q.activation_date.map(|date| MonthlyQuestionResponse {
                    question_id: q.id,
                    date,
                    question: q.text,
                })
            })
            .collect())
    }

    /// Detail view listing every family member with their answer.
    ///
    /// For *today's* question the caller must have answered before other
    /// members' answers are revealed; past questions are always visible.
    pub fn question_detail(&self, me: &User, question_id: u64) -> DomainResult<QuestionDetailResponse> {
        let q = self
            .questions
            .find_by_id(question_id)?
            .ok_or_else(|| DomainError::bad_request("unknown question id"))?;

        let today = logical_today(self.clock.as_ref());
        if q.state_on(today) == QuestionState::Active
            && self
                .answers
                .find_by_question_and_user(q.id, me.id)?
                .is_none()
        {
            return Err(DomainError::forbidden(
                "answer today's question before viewing others' answers",
            ));
        }

        let group_id = me
            .family_group_id
            .ok_or_else(|| DomainError::forbidden("no approved family group"))?;
        let members = self.users.find_all_by_group(group_id)?;

        let mut member_answers = Vec::with_capacity(members.len());
        for member in members {
            let text = self
                .answers
                .find_by_question_and_user(q.id, member.id)?
                .map(|a| a.text)
                .unwrap_or_else(|| NOT_YET_ANSWERED.to_string());
            member_answers.push(MemberAnswer {
                user_id: member.id,
                nickname: member.nickname,
                answer: text,
            });
        }

        Ok(QuestionDetailResponse {
            date: q.activation_date.unwrap_or_else(|| q.created_at.date()),
            question_id: q.id,
            question: q.text,
            answers: member_answers,
        })
    }

    /// Submits the caller's answer to today's question.
    pub fn submit_answer(
        &self,
        me: &User,
        question_id: u64,
        text: &str,
    ) -> DomainResult<AnswerCreatedResponse> {
        let text = validated_text(text)?;
        let active = self.active_question()?;
        if active.id != question_id {
            return Err(DomainError::bad_request(
                "can only answer today's active question",
            ));
        }
        if self
            .answers
            .find_by_question_and_user(question_id, me.id)?
            .is_some()
        {
            return Err(DomainError::bad_request("already answered"));
        }

        let created_at = self.clock.now();
        self.answers.insert(&NewAnswer {
            question_id,
            user_id: me.id,
            text: text.to_string(),
            created_at,
        })?;

        info!(question_id, user_id = me.id, "answer submitted");
        Ok(AnswerCreatedResponse {
            question_id,
            created_at,
        })
    }

    /// Rewrites the caller's answer, while its logical day lasts.
    pub fn update_answer(
        &self,
        me: &User,
        question_id: u64,
        text: &str,
    ) -> DomainResult<AnswerUpdatedResponse> {
        let text = validated_text(text)?;
        let active = self.active_question()?;
        if active.id != question_id {
            return Err(DomainError::bad_request(
                "can only edit answers to today's active question",
            ));
        }

        let answer = self
            .answers
            .find_by_question_and_user(question_id, me.id)?
            .ok_or_else(|| DomainError::bad_request("no answer to edit"))?;
        if !answer.is_owned_by(me.id) {
            return Err(DomainError::forbidden("not your answer"));
        }

        let today = logical_today(self.clock.as_ref());
        if !answer.written_on(today) {
            return Err(DomainError::bad_request(
                "only answers written today can be edited",
            ));
        }

        let updated_at = self.clock.now();
        self.answers.update_text(answer.id, text, updated_at)?;

        Ok(AnswerUpdatedResponse {
            question_id,
            user_id: me.id,
            answer: text.to_string(),
            updated_at,
        })
    }

    /// Removes the caller's answer to today's question.
    pub fn delete_answer(&self, me: &User, question_id: u64) -> DomainResult<AnswerDeletedResponse> {
        let active = self.active_question()?;
        if active.id != question_id {
            return Err(DomainError::bad_request(
                "can only delete answers to today's active question",
            ));
        }

        let answer = self
            .answers
            .find_by_question_and_user(question_id, me.id)?
            .ok_or_else(|| DomainError::bad_request("no answer to delete"))?;
        if !answer.is_owned_by(me.id) {
            return Err(DomainError::forbidden("not your answer"));
        }

        self.answers
            .delete_by_question_and_user(question_id, me.id)?;
        info!(question_id, user_id = me.id, "answer deleted");
        Ok(AnswerDeletedResponse { question_id })
    }

    fn active_question(&self) -> DomainResult<Question> {
        let today = logical_today(self.clock.as_ref());
        self.questions
            .find_by_activation_date(today)?
            .ok_or_else(|| DomainError::bad_request("today's question is not ready yet"))
    }
}

fn validated_text(text: &str) -> DomainResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::bad_request("answer must not be empty"));
    }
    if trimmed.chars().count() > MAX_ANSWER_CHARS {
        return Err(DomainError::bad_request("answer is too long"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qna::domain::Answer;
    use crate::qna::store::{MockAnswerStore, MockQuestionStore};
    use crate::time::FixedClock;
    use crate::user::store::MockUserStore;
    use mockall::predicate::eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn member(id: u64, nickname: &str) -> User {
        User {
            id,
            name: nickname.into(),
            email: format!("{nickname}@example.com"),
            password_hash: "x".into(),
            nickname: nickname.into(),
            family_group_id: Some(10),
        }
    }

    fn question(id: u64, activation: Option<NaiveDate>) -> Question {
        Question {
            id,
            text: "What made you smile today?".into(),
            created_at: date(2024, 1, 1).and_hms_opt(12, 0, 0).unwrap(),
            activation_date: activation,
        }
    }

    fn answer(question_id: u64, user_id: u64, created_at: NaiveDateTime) -> Answer {
        Answer {
            id: 100,
            question_id,
            user_id,
            text: "hi".into(),
            created_at,
            updated_at: None,
        }
    }

    fn service(
        questions: MockQuestionStore,
        answers: MockAnswerStore,
        users: MockUserStore,
        clock: FixedClock,
    ) -> QnaService {
        QnaService::new(
            Arc::new(questions),
            Arc::new(answers),
            Arc::new(users),
            Arc::new(clock),
        )
    }

    // ------------------------------
    // today_question
    // ------------------------------

    #[test]
    fn today_question_before_activation_is_not_prepared() {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|_| Ok(None));

        let svc = service(
            questions,
            MockAnswerStore::new(),
            MockUserStore::new(),
            FixedClock::at(2024, 6, 1, 12, 0, 0),
        );
        let err = svc.today_question().unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(m) if m.contains("not ready")));
    }

    #[test]
    fn today_question_uses_the_logical_date() {
        let mut questions = MockQuestionStore::new();
        // At 04:30 on June 2nd the logical day is still June 1st.
        questions
            .expect_find_by_activation_date()
            .with(eq(date(2024, 6, 1)))
            .returning(|d| Ok(Some(question(7, Some(d)))));

        let svc = service(
            questions,
            MockAnswerStore::new(),
            MockUserStore::new(),
            FixedClock::at(2024, 6, 2, 4, 30, 0),
        );
        let resp = svc.today_question().unwrap();

        assert_eq!(resp.question_id, 7);
    }

    // ------------------------------
    // submit
    // ------------------------------

    #[test]
    fn submit_creates_answer_with_clock_timestamp() {
        let clock = FixedClock::at(2024, 6, 1, 12, 0, 0);
        let now = clock.now();

        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|d| Ok(Some(question(7, Some(d)))));

        let mut answers = MockAnswerStore::new();
        answers
            .expect_find_by_question_and_user()
            .returning(|_, _| Ok(None));
        answers
            .expect_insert()
            .withf(move |new: &NewAnswer| {
                new.question_id == 7 && new.user_id == 1 && new.created_at == now
            })
            .times(1)
            .returning(|_| Ok(100));

        let svc = service(questions, answers, MockUserStore::new(), clock);
        let resp = svc.submit_answer(&member(1, "A"), 7, "  hello  ").unwrap();

        assert_eq!(resp.created_at, now);
    }

    #[test]
    fn second_submit_for_same_question_fails() {
        let clock = FixedClock::at(2024, 6, 1, 12, 0, 0);
        let created = clock.now();

        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|d| Ok(Some(question(7, Some(d)))));

        let mut answers = MockAnswerStore::new();
        answers
            .expect_find_by_question_and_user()
            .returning(move |q, u| Ok(Some(answer(q, u, created))));

        let svc = service(questions, answers, MockUserStore::new(), clock);
        let err = svc.submit_answer(&member(1, "A"), 7, "again").unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(m) if m.contains("already answered")));
    }

    #[test]
    fn submit_against_a_past_question_fails() {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|d| Ok(Some(question(8, Some(d)))));

        let svc = service(
            questions,
            MockAnswerStore::new(),
            MockUserStore::new(),
            FixedClock::at(2024, 6, 2, 12, 0, 0),
        );
        // Question 7 was yesterday's; 8 is active now.
        let err = svc.submit_answer(&member(1, "A"), 7, "too late").unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(m) if m.contains("today's active")));
    }

    #[test]
    fn submit_with_no_active_question_fails() {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|_| Ok(None));

        let svc = service(
            questions,
            MockAnswerStore::new(),
            MockUserStore::new(),
            FixedClock::at(2024, 6, 1, 12, 0, 0),
        );
        let err = svc.submit_answer(&member(1, "A"), 7, "hi").unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    #[test]
    fn submit_validates_text() {
        let svc = service(
            MockQuestionStore::new(),
            MockAnswerStore::new(),
            MockUserStore::new(),
            FixedClock::at(2024, 6, 1, 12, 0, 0),
        );

        let err = svc.submit_answer(&member(1, "A"), 7, "   ").unwrap_err();
        assert!(matches!(err, DomainError::BadRequest(m) if m.contains("empty")));

        let long = "a".repeat(MAX_ANSWER_CHARS + 1);
        let err = svc.submit_answer(&member(1, "A"), 7, &long).unwrap_err();
        assert!(matches!(err, DomainError::BadRequest(m) if m.contains("too long")));
    }

    // ------------------------------
    // edit window
    // ------------------------------

    #[test]
    fn edit_within_same_logical_day_succeeds() {
        // Answer written at 23:00 June 1st; edited at 01:00 June 2nd.
        // Both instants share logical day June 1st.
        let clock = FixedClock::at(2024, 6, 2, 1, 0, 0);
        let written = date(2024, 6, 1).and_hms_opt(23, 0, 0).unwrap();

        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .with(eq(date(2024, 6, 1)))
            .returning(|d| Ok(Some(question(7, Some(d)))));

        let mut answers = MockAnswerStore::new();
        answers
            .expect_find_by_question_and_user()
            .returning(move |q, u| Ok(Some(answer(q, u, written))));
        answers
            .expect_update_text()
            .with(eq(100u64), eq("better"), eq(clock.now()))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let svc = service(questions, answers, MockUserStore::new(), clock);
        let resp = svc.update_answer(&member(1, "A"), 7, "better").unwrap();

        assert_eq!(resp.answer, "better");
    }

    #[test]
    fn edit_after_logical_day_ends_fails() {
        // Answer written June 1st at 10:00; the active question for the new
        // logical day (June 2nd) is still question 7 in this setup, but the
        // answer's own window has closed.
        let clock = FixedClock::at(2024, 6, 2, 10, 0, 0);
        let written = date(2024, 6, 1).and_hms_opt(10, 0, 0).unwrap();

        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|d| Ok(Some(question(7, Some(d)))));

        let mut answers = MockAnswerStore::new();
        answers
            .expect_find_by_question_and_user()
            .returning(move |q, u| Ok(Some(answer(q, u, written))));

        let svc = service(questions, answers, MockUserStore::new(), clock);
        let err = svc.update_answer(&member(1, "A"), 7, "too late").unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(m) if m.contains("written today")));
    }

    #[test]
    fn edit_without_existing_answer_fails() {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|d| Ok(Some(question(7, Some(d)))));

        let mut answers = MockAnswerStore::new();
        answers
            .expect_find_by_question_and_user()
            .returning(|_, _| Ok(None));

        let svc = service(
            questions,
            answers,
            MockUserStore::new(),
            FixedClock::at(2024, 6, 1, 12, 0, 0),
        );
        let err = svc.update_answer(&member(1, "A"), 7, "hi").unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(m) if m.contains("no answer")));
    }

    // ------------------------------
    // delete
    // ------------------------------

    #[test]
    fn delete_removes_own_answer_for_active_question() {
        let clock = FixedClock::at(2024, 6, 1, 22, 0, 0);
        let written = date(2024, 6, 1).and_hms_opt(10, 0, 0).unwrap();

        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|d| Ok(Some(question(7, Some(d)))));

        let mut answers = MockAnswerStore::new();
        answers
            .expect_find_by_question_and_user()
            .returning(move |q, u| Ok(Some(answer(q, u, written))));
        answers
            .expect_delete_by_question_and_user()
            .with(eq(7u64), eq(1u64))
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(questions, answers, MockUserStore::new(), clock);
        let resp = svc.delete_answer(&member(1, "A"), 7).unwrap();

        assert_eq!(resp.question_id, 7);
    }

    #[test]
    fn delete_of_non_active_question_fails() {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|d| Ok(Some(question(8, Some(d)))));

        let svc = service(
            questions,
            MockAnswerStore::new(),
            MockUserStore::new(),
            FixedClock::at(2024, 6, 2, 12, 0, 0),
        );
        let err = svc.delete_answer(&member(1, "A"), 7).unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    // ------------------------------
    // detail visibility gate
    // ------------------------------

    fn detail_fixtures(
        caller_answered: bool,
        activation: NaiveDate,
    ) -> (MockQuestionStore, MockAnswerStore, MockUserStore) {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_id()
            .returning(move |id| Ok(Some(question(id, Some(activation)))));

        let mut answers = MockAnswerStore::new();
        let written = activation.and_hms_opt(10, 0, 0).unwrap();
        answers
            .expect_find_by_question_and_user()
            .returning(move |q, u| {
                // User 1 answered only when the fixture says so; user 2
                // always has an answer on file.
                if u == 2 || (u == 1 && caller_answered) {
                    Ok(Some(answer(q, u, written)))
                } else {
                    Ok(None)
                }
            });

        let mut users = MockUserStore::new();
        users
            .expect_find_all_by_group()
            .with(eq(10u64))
            .returning(|_| Ok(vec![member(1, "A"), member(2, "B"), member(3, "C")]));

        (questions, answers, users)
    }

    #[test]
    fn todays_detail_is_forbidden_until_caller_answers() {
        let (questions, answers, users) = detail_fixtures(false, date(2024, 6, 1));
        let svc = service(questions, answers, users, FixedClock::at(2024, 6, 1, 12, 0, 0));

        let err = svc.question_detail(&member(1, "A"), 7).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn todays_detail_opens_after_answering_and_lists_placeholders() {
        let (questions, answers, users) = detail_fixtures(true, date(2024, 6, 1));
        let svc = service(questions, answers, users, FixedClock::at(2024, 6, 1, 12, 0, 0));

        let detail = svc.question_detail(&member(1, "A"), 7).unwrap();
        assert_eq!(detail.answers.len(), 3);
        assert_eq!(detail.answers[0].answer, "hi");
        assert_eq!(detail.answers[1].answer, "hi");
        assert_eq!(detail.answers[2].answer, NOT_YET_ANSWERED);
    }

    #[test]
    fn past_question_detail_skips_the_gate() {
        // Caller never answered question 7, but it was yesterday's.
        let (questions, answers, users) = detail_fixtures(false, date(2024, 6, 1));
        let svc = service(questions, answers, users, FixedClock::at(2024, 6, 2, 12, 0, 0));

        let detail = svc.question_detail(&member(1, "A"), 7).unwrap();
        assert_eq!(detail.date, date(2024, 6, 1));
        assert_eq!(detail.answers.len(), 3);
    }

    #[test]
    fn unknown_question_detail_is_a_bad_request() {
        let mut questions = MockQuestionStore::new();
        questions.expect_find_by_id().returning(|_| Ok(None));

        let svc = service(
            questions,
            MockAnswerStore::new(),
            MockUserStore::new(),
            FixedClock::at(2024, 6, 1, 12, 0, 0),
        );
        let err = svc.question_detail(&member(1, "A"), 999).unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    // ------------------------------
    // monthly listing
    // ------------------------------

    #[test]
    fn monthly_questions_cover_the_whole_month() {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_activated_between()
            .with(eq(date(2024, 6, 1)), eq(date(2024, 6, 30)))
            .returning(|start, _| {
                Ok(vec![
                    question(7, Some(start)),
                    question(8, Some(start.succ_opt().unwrap())),
                ])
            });

        let svc = service(
            questions,
            MockAnswerStore::new(),
            MockUserStore::new(),
            FixedClock::at(2024, 6, 15, 12, 0, 0),
        );
        let list = svc.monthly_questions(2024, 6).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].date, date(2024, 6, 1));
    }

    #[test]
    fn monthly_questions_reject_invalid_month() {
        let svc = service(
            MockQuestionStore::new(),
            MockAnswerStore::new(),
            MockUserStore::new(),
            FixedClock::at(2024, 6, 15, 12, 0, 0),
        );
        assert!(matches!(
            svc.monthly_questions(2024, 13).unwrap_err(),
            DomainError::BadRequest(_)
        ));
    }
}
