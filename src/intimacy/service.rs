//! The family intimacy quiz: ten 1-to-5 answers scored onto a 0..=100
//! scale, with personal and family-average views.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::group::store::GroupStore;
use crate::intimacy::domain::{
    ANSWER_RANGE, NewIntimacyScore, QUESTION_COUNT, compute_score,
};
use crate::intimacy::store::IntimacyScoreStore;
use crate::time::Clock;
use crate::user::domain::User;
use crate::user::store::UserStore;

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerItem {
    pub answer: u8,
}

#[derive(Debug, Deserialize)]
pub struct TestAnswersRequest {
    pub answers: Vec<AnswerItem>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalScoreResponse {
    pub nickname: String,
    pub score: u32,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FamilyScoreResponse {
    pub family_name: String,
    pub average_score: f64,
}

pub struct IntimacyService {
    scores: Arc<dyn IntimacyScoreStore>,
    users: Arc<dyn UserStore>,
    groups: Arc<dyn GroupStore>,
    clock: Arc<dyn Clock>,
}

impl IntimacyService {
    pub fn new(
        scores: Arc<dyn IntimacyScoreStore>,
        users: Arc<dyn UserStore>,
        groups: Arc<dyn GroupStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            scores,
            users,
            groups,
            clock,
        }
    }

    /// Records a quiz run. Requires exactly ten answers, each 1 through 5.
    pub fn submit_answers(&self, me: &User, req: &TestAnswersRequest) -> DomainResult<PersonalScoreResponse> {
        if req.answers.len() != QUESTION_COUNT {
            return Err(DomainError::bad_request(format!(
                "exactly {QUESTION_COUNT} answers are required"
            )));
        }
        let answers: Vec<u8> = req.answers.iter().map(|a| a.answer).collect();
        if answers.iter().any(|a| !ANSWER_RANGE.contains(a)) {
            return Err(DomainError::bad_request("answers must be between 1 and 5"));
        }

        let score = compute_score(&answers);
        let score_id = self.scores.insert_score(&NewIntimacyScore {
            user_id: me.id,
            score,
            test_date: self.clock.today(),
            created_at: self.clock.now(),
        })?;
        self.scores.insert_responses(score_id, &answers)?;

        Ok(PersonalScoreResponse {
            nickname: me.nickname.clone(),
            score,
        })
    }

    /// The caller's latest score.
    pub fn personal_score(&self, me: &User) -> DomainResult<PersonalScoreResponse> {
        let latest = self
            .scores
            .find_latest_by_user(me.id)?
            .ok_or(DomainError::NotFound("Intimacy record"))?;

        Ok(PersonalScoreResponse {
            nickname: me.nickname.clone(),
            score: latest.score,
        })
    }

    /// Average of the family's latest scores; members who never took the
    /// quiz count as zero, like an unanswered survey.
    pub fn family_score(&self, me: &User) -> DomainResult<FamilyScoreResponse> {
        let group_id = me
            .family_group_id
            .ok_or(DomainError::NotFound("Group"))?;
        let group = self
            .groups
            .find_by_id(group_id)?
            .ok_or(DomainError::NotFound("Group"))?;

        let members = self.users.find_all_by_group(group_id)?;
        let mut total: u64 = 0;
        for member in &members {
            total += u64::from(
                self.scores
                    .find_latest_by_user(member.id)?
                    .map(|s| s.score)
                    .unwrap_or(0),
            );
        }
        let average_score = if members.is_empty() {
            0.0
        } else {
            total as f64 / members.len() as f64
        };

        Ok(FamilyScoreResponse {
            family_name: group.name,
            average_score,
        })
    }
}
