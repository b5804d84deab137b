//! Shared emotional state within a family, plus the nickname edits that
//! ride along with it in the app's emotion screen.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::emotion::domain::{Emotion, EmotionType, NewEmotion};
use crate::emotion::store::EmotionStore;
use crate::error::{DomainError, DomainResult};
use crate::group::store::GroupStore;
use crate::time::Clock;
use crate::user::domain::User;
use crate::user::store::UserStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmotionRequest {
    pub emotion_type: EmotionType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmotionRequest {
    pub emotion_type: EmotionType,
    /// Optionally rename oneself in the same call.
    pub nick_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNicknameRequest {
    pub nick_name: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmotionResponse {
    pub emotion_id: u64,
    pub user_id: u64,
    pub nickname: Option<String>,
    pub emotion_type: EmotionType,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupEmotionsResponse {
    pub group_name: String,
    pub emotions: Vec<EmotionResponse>,
}

pub struct EmotionService {
    emotions: Arc<dyn EmotionStore>,
    users: Arc<dyn UserStore>,
    groups: Arc<dyn GroupStore>,
    clock: Arc<dyn Clock>,
}

impl EmotionService {
    pub fn new(
        emotions: Arc<dyn EmotionStore>,
        users: Arc<dyn UserStore>,
        groups: Arc<dyn GroupStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            emotions,
            users,
            groups,
            clock,
        }
    }

    /// Registers the caller's emotion. One per user; afterwards only
    /// updates are allowed.
    pub fn add(&self, me: &User, req: &CreateEmotionRequest) -> DomainResult<EmotionResponse> {
        let group_id = me
            .family_group_id
            .ok_or(DomainError::NotFound("Group"))?;

        if self.emotions.find_by_user(me.id)?.is_some() {
            return Err(DomainError::conflict(
                "emotion already registered, update it instead",
            ));
        }

        let id = self.emotions.insert(&NewEmotion {
            user_id: me.id,
            group_id,
            emotion_type: req.emotion_type,
            created_at: self.clock.now(),
        })?;

        Ok(EmotionResponse {
            emotion_id: id,
            user_id: me.id,
            nickname: Some(me.nickname.clone()),
            emotion_type: req.emotion_type,
        })
    }

    /// Updates the caller's own emotion, optionally renaming them too.
    pub fn update(&self, me: &User, req: &UpdateEmotionRequest) -> DomainResult<EmotionResponse> {
        let emotion = self
            .emotions
            .find_by_user(me.id)?
            .ok_or(DomainError::NotFound("Emotion"))?;

        self.emotions
            .update_type(emotion.id, req.emotion_type, self.clock.now())?;

        let nickname = match &req.nick_name {
            Some(name) if !name.trim().is_empty() => {
                let name = name.trim();
                self.users.update_nickname(me.id, name)?;
                name.to_string()
            }
            _ => me.nickname.clone(),
        };

        Ok(EmotionResponse {
            emotion_id: emotion.id,
            user_id: me.id,
            nickname: Some(nickname),
            emotion_type: req.emotion_type,
        })
    }

    /// A single member's emotion. Same family only.
    pub fn detail(&self, me: &User, emotion_id: u64) -> DomainResult<EmotionResponse> {
        let emotion = self.same_group_emotion(me, emotion_id)?;
        let nickname = self.users.find_by_id(emotion.user_id)?.map(|u| u.nickname);

        Ok(EmotionResponse {
            emotion_id: emotion.id,
            user_id: emotion.user_id,
            nickname,
            emotion_type: emotion.emotion_type,
        })
    }

    /// Every registered emotion in the caller's family.
    pub fn group_emotions(&self, me: &User) -> DomainResult<GroupEmotionsResponse> {
        let group_id = me
            .family_group_id
            .ok_or(DomainError::NotFound("Group"))?;
        let group = self
            .groups
            .find_by_id(group_id)?
            .ok_or(DomainError::NotFound("Group"))?;

        let emotions = self
            .emotions
            .find_all_by_group(group_id)?
            .into_iter()
            .map(|e| {
                let nickname = self.users.find_by_id(e.user_id)?.map(|u| u.nickname);
                Ok(EmotionResponse {
                    emotion_id: e.id,
                    user_id: e.user_id,
                    nickname,
                    emotion_type: e.emotion_type,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(GroupEmotionsResponse {
            group_name: group.name,
            emotions,
        })
    }

    /// Renames the member behind an emotion row. Same family only.
    pub fn update_member_nickname(
        &self,
        me: &User,
        emotion_id: u64,
        req: &UpdateNicknameRequest,
    ) -> DomainResult<EmotionResponse> {
        let emotion = self.same_group_emotion(me, emotion_id)?;

        let name = req.nick_name.trim();
        if name.is_empty() {
            return Err(DomainError::bad_request("nickname must not be empty"));
        }
        self.users.update_nickname(emotion.user_id, name)?;

        Ok(EmotionResponse {
            emotion_id: emotion.id,
            user_id: emotion.user_id,
            nickname: Some(name.to_string()),
            emotion_type: emotion.emotion_type,
        })
    }

    fn same_group_emotion(&self, me: &User, emotion_id: u64) -> DomainResult<Emotion> {
        let emotion = self
            .emotions
            .find_by_id(emotion_id)?
            .ok_or(DomainError::NotFound("Emotion"))?;
        if Some(emotion.group_id) != me.family_group_id {
            return Err(DomainError::forbidden(
                "can only view emotions within your family group",
            ));
        }
        Ok(emotion)
    }
}
