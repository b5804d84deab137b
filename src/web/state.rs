//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::daily::DailyService;
use crate::emotion::EmotionService;
use crate::group::GroupService;
use crate::intimacy::IntimacyService;
use crate::qna::QnaService;
use crate::user::UserService;

/// Bundle of services plus the decoded JWT secret for the request
/// extractor. Cloning is cheap; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub groups: Arc<GroupService>,
    pub qna: Arc<QnaService>,
    pub daily: Arc<DailyService>,
    pub emotions: Arc<EmotionService>,
    pub intimacy: Arc<IntimacyService>,
    pub jwt_secret: Arc<Vec<u8>>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserService>,
        groups: Arc<GroupService>,
        qna: Arc<QnaService>,
        daily: Arc<DailyService>,
        emotions: Arc<EmotionService>,
        intimacy: Arc<IntimacyService>,
        jwt_secret: Arc<Vec<u8>>,
    ) -> Self {
        Self {
            users,
            groups,
            qna,
            daily,
            emotions,
            intimacy,
            jwt_secret,
        }
    }
}
