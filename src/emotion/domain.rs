use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The fixed palette of shareable emotional states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmotionType {
    Angry,
    Sad,
    Happy,
    Relaxed,
    Tired,
    Missing,
}

impl EmotionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionType::Angry => "ANGRY",
            EmotionType::Sad => "SAD",
            EmotionType::Happy => "HAPPY",
            EmotionType::Relaxed => "RELAXED",
            EmotionType::Tired => "TIRED",
            EmotionType::Missing => "MISSING",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ANGRY" => Some(EmotionType::Angry),
            "SAD" => Some(EmotionType::Sad),
            "HAPPY" => Some(EmotionType::Happy),
            "RELAXED" => Some(EmotionType::Relaxed),
            "TIRED" => Some(EmotionType::Tired),
            "MISSING" => Some(EmotionType::Missing),
            _ => None,
        }
    }
}

/// One member's current emotional state. One row per user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emotion {
    pub id: u64,
    pub user_id: u64,
    pub group_id: u64,
    pub emotion_type: EmotionType,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEmotion {
    pub user_id: u64,
    pub group_id: u64,
    pub emotion_type: EmotionType,
    pub created_at: NaiveDateTime,
}
