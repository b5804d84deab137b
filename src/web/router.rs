//! API route table.
//!
//! Handlers stay thin: extract the caller, delegate to a service, wrap the
//! result in JSON. All policy lives in the service layer.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;

use crate::config::web::{CorsConfig, HttpConfig};
use crate::web::cors::build_cors;
use crate::web::state::AppState;
use crate::{daily, emotion, group, intimacy, qna, user};

pub fn build_router(state: AppState, http: &HttpConfig, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api/v1/users", user::handler::routes())
        .nest("/api/v1/groups", group::handler::routes())
        .nest("/api/v1/question", qna::handler::routes())
        .nest("/api/v1/daily", daily::handler::routes())
        .nest("/api/v1/emotions", emotion::handler::routes())
        .nest("/api/v1/intimacy", intimacy::handler::routes())
        .layer(build_cors(cors))
        .layer(DefaultBodyLimit::max(http.max_body_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_access_token;
    use crate::daily::DailyService;
    use crate::daily::store::{CommentStore, DailyStore, LikeStore, MockCommentStore, MockDailyStore, MockLikeStore};
    use crate::emotion::EmotionService;
    use crate::emotion::store::{EmotionStore, MockEmotionStore};
    use crate::group::GroupService;
    use crate::group::store::{GroupStore, JoinRequestStore, MockGroupStore, MockJoinRequestStore};
    use crate::intimacy::IntimacyService;
    use crate::intimacy::store::{IntimacyScoreStore, MockIntimacyScoreStore};
    use crate::qna::QnaService;
    use crate::qna::domain::Question;
    use crate::qna::store::{AnswerStore, MockAnswerStore, MockQuestionStore, QuestionStore};
    use crate::time::{Clock, FixedClock};
    use crate::user::UserService;
    use crate::user::domain::User;
    use crate::user::store::{MockRefreshTokenStore, MockUserStore, RefreshTokenStore, UserStore};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &[u8] = b"router-test-secret-of-enough-len";

    fn grouped_user(id: u64) -> User {
        User {
            id,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: "x".into(),
            nickname: "Al".into(),
            family_group_id: Some(10),
        }
    }

    fn active_question(id: u64, date: NaiveDate) -> Question {
        Question {
            id,
            text: "What made you smile today?".into(),
            created_at: date.and_hms_opt(0, 0, 0).unwrap(),
            activation_date: Some(date),
        }
    }

    /// Wires a full [`AppState`] over the given qna mocks; every other
    /// feature gets inert mock stores.
    fn state_with_qna(
        questions: MockQuestionStore,
        answers: MockAnswerStore,
        mut users_mock: MockUserStore,
    ) -> AppState {
        users_mock
            .expect_find_by_id()
            .returning(|id| Ok(Some(grouped_user(id))));

        let clock: Arc<dyn Clock> = Arc::new(FixedClock::at(2024, 6, 1, 12, 0, 0));
        let secret = Arc::new(SECRET.to_vec());
        let users: Arc<dyn UserStore> = Arc::new(users_mock);
        let refresh: Arc<dyn RefreshTokenStore> = Arc::new(MockRefreshTokenStore::new());
        let scores: Arc<dyn IntimacyScoreStore> = Arc::new(MockIntimacyScoreStore::new());
        let groups: Arc<dyn GroupStore> = Arc::new(MockGroupStore::new());
        let join_requests: Arc<dyn JoinRequestStore> = Arc::new(MockJoinRequestStore::new());
        let questions: Arc<dyn QuestionStore> = Arc::new(questions);
        let answers: Arc<dyn AnswerStore> = Arc::new(answers);
        let dailies: Arc<dyn DailyStore> = Arc::new(MockDailyStore::new());
        let comments: Arc<dyn CommentStore> = Arc::new(MockCommentStore::new());
        let likes: Arc<dyn LikeStore> = Arc::new(MockLikeStore::new());
        let emotions: Arc<dyn EmotionStore> = Arc::new(MockEmotionStore::new());

        AppState::new(
            Arc::new(UserService::new(
                users.clone(),
                refresh,
                scores.clone(),
                clock.clone(),
                secret.clone(),
                60,
                7,
            )),
            Arc::new(GroupService::new(
                groups.clone(),
                join_requests,
                users.clone(),
                clock.clone(),
            )),
            Arc::new(QnaService::new(
                questions,
                answers,
                users.clone(),
                clock.clone(),
            )),
            Arc::new(DailyService::new(
                dailies,
                comments,
                likes,
                users.clone(),
                clock.clone(),
            )),
            Arc::new(EmotionService::new(
                emotions,
                users.clone(),
                groups.clone(),
                clock.clone(),
            )),
            Arc::new(IntimacyService::new(scores, users, groups, clock)),
            secret,
        )
    }

    fn router_with(state: AppState) -> Router {
        let http = HttpConfig {
            port: 0,
            max_body_bytes: 1024 * 1024,
        };
        let cors = CorsConfig {
            origins: String::new(),
            credentials: false,
        };
        build_router(state, &http, &cors)
    }

    fn bearer(user_id: u64) -> String {
        let token = create_access_token(user_id, SECRET, 60).unwrap();
        format!("Bearer {token}")
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_needs_no_auth() {
        let router = router_with(state_with_qna(
            MockQuestionStore::new(),
            MockAnswerStore::new(),
            MockUserStore::new(),
        ));

        let resp = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized_with_json_body() {
        let router = router_with(state_with_qna(
            MockQuestionStore::new(),
            MockAnswerStore::new(),
            MockUserStore::new(),
        ));

        let resp = router
            .oneshot(
                Request::get("/api/v1/question/everyday")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(resp).await;
        assert_eq!(json["status"], 401);
    }

    #[tokio::test]
    async fn today_question_round_trips_through_the_router() {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|d| Ok(Some(active_question(7, d))));

        let router = router_with(state_with_qna(
            questions,
            MockAnswerStore::new(),
            MockUserStore::new(),
        ));

        let resp = router
            .oneshot(
                Request::get("/api/v1/question/everyday")
                    .header(header::AUTHORIZATION, bearer(1))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["question_id"], 7);
    }

    #[tokio::test]
    async fn unanswered_detail_of_todays_question_is_forbidden() {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_id()
            .returning(|id| Ok(Some(active_question(id, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()))));

        let mut answers = MockAnswerStore::new();
        answers
            .expect_find_by_question_and_user()
            .returning(|_, _| Ok(None));

        let router = router_with(state_with_qna(questions, answers, MockUserStore::new()));

        let resp = router
            .oneshot(
                Request::get("/api/v1/question/7")
                    .header(header::AUTHORIZATION, bearer(1))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let json = body_json(resp).await;
        assert_eq!(json["status"], 403);
    }

    #[tokio::test]
    async fn submit_answer_returns_created() {
        let mut questions = MockQuestionStore::new();
        questions
            .expect_find_by_activation_date()
            .returning(|d| Ok(Some(active_question(7, d))));

        let mut answers = MockAnswerStore::new();
        answers
            .expect_find_by_question_and_user()
            .returning(|_, _| Ok(None));
        answers.expect_insert().returning(|_| Ok(100));

        let router = router_with(state_with_qna(questions, answers, MockUserStore::new()));

        let resp = router
            .oneshot(
                Request::post("/api/v1/question/7/answers")
                    .header(header::AUTHORIZATION, bearer(1))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"answer":"ramen for lunch"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["question_id"], 7);
    }
}
