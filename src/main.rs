//! Composition root: configuration, pool, stores, services, the daily
//! activation task, and the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use danran_web::config::AppConfig;
use danran_web::config::db::create_pool;
use danran_web::daily::DailyService;
use danran_web::daily::repository::{MySqlCommentStore, MySqlDailyStore, MySqlLikeStore};
use danran_web::db::{Db, MySqlDb};
use danran_web::emotion::EmotionService;
use danran_web::emotion::repository::MySqlEmotionStore;
use danran_web::group::GroupService;
use danran_web::group::repository::{MySqlGroupStore, MySqlJoinRequestStore};
use danran_web::intimacy::IntimacyService;
use danran_web::intimacy::repository::MySqlIntimacyScoreStore;
use danran_web::qna::repository::{MySqlAnswerStore, MySqlQuestionStore};
use danran_web::qna::{ActivationScheduler, QnaService};
use danran_web::time::{Clock, SystemClock};
use danran_web::user::UserService;
use danran_web::user::repository::{MySqlRefreshTokenStore, MySqlUserStore};
use danran_web::web::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::from_env();
    let jwt_secret = Arc::new(cfg.auth.secret_bytes()?);

    let pool = create_pool(&cfg.db)?;
    let db: Arc<dyn Db> = Arc::new(MySqlDb::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(cfg.time.timezone.clone()));

    // Stores
    let users = Arc::new(MySqlUserStore::new(db.clone()));
    let refresh_tokens = Arc::new(MySqlRefreshTokenStore::new(db.clone()));
    let groups = Arc::new(MySqlGroupStore::new(db.clone()));
    let join_requests = Arc::new(MySqlJoinRequestStore::new(db.clone()));
    let questions = Arc::new(MySqlQuestionStore::new(db.clone()));
    let answers = Arc::new(MySqlAnswerStore::new(db.clone()));
    let dailies = Arc::new(MySqlDailyStore::new(db.clone()));
    let comments = Arc::new(MySqlCommentStore::new(db.clone()));
    let likes = Arc::new(MySqlLikeStore::new(db.clone()));
    let emotions = Arc::new(MySqlEmotionStore::new(db.clone()));
    let scores = Arc::new(MySqlIntimacyScoreStore::new(db.clone()));

    // Services
    let user_service = Arc::new(UserService::new(
        users.clone(),
        refresh_tokens,
        scores.clone(),
        clock.clone(),
        jwt_secret.clone(),
        cfg.auth.access_ttl_minutes,
        cfg.auth.refresh_ttl_days,
    ));
    let group_service = Arc::new(GroupService::new(
        groups.clone(),
        join_requests,
        users.clone(),
        clock.clone(),
    ));
    let qna_service = Arc::new(QnaService::new(
        questions.clone(),
        answers,
        users.clone(),
        clock.clone(),
    ));
    let daily_service = Arc::new(DailyService::new(
        dailies,
        comments,
        likes,
        users.clone(),
        clock.clone(),
    ));
    let emotion_service = Arc::new(EmotionService::new(
        emotions,
        users.clone(),
        groups.clone(),
        clock.clone(),
    ));
    let intimacy_service = Arc::new(IntimacyService::new(
        scores,
        users,
        groups,
        clock.clone(),
    ));

    // Daily question activation at the 05:00 rollover.
    let scheduler = Arc::new(ActivationScheduler::new(questions, clock));
    tokio::spawn({
        let scheduler = scheduler.clone();
        async move { scheduler.run().await }
    });

    let state = AppState::new(
        user_service,
        group_service,
        qna_service,
        daily_service,
        emotion_service,
        intimacy_service,
        jwt_secret,
    );
    let router = build_router(state, &cfg.http, &cfg.cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.http.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}, timezone {}", cfg.time.timezone);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("shutting down");
}
