//! Daily question activation.
//!
//! Once per day, at the same 05:00 boundary the logical-day window uses,
//! exactly one pooled question becomes "today's" question. The job is
//! idempotent within a day and treats both "already activated" and "pool
//! exhausted" as normal completion, so re-running it (restart, catch-up on
//! boot) is always safe.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Days, NaiveDateTime, TimeDelta};
use tracing::{debug, info, warn};

use crate::qna::store::QuestionStore;
use crate::time::Clock;
use crate::time::logical_day::rollover_time;

pub struct ActivationScheduler {
    questions: Arc<dyn QuestionStore>,
    clock: Arc<dyn Clock>,
}

impl ActivationScheduler {
    pub fn new(questions: Arc<dyn QuestionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { questions, clock }
    }

    /// Ensures one question carries today's activation date.
    ///
    /// 1. No-op when a question is already activated for today.
    /// 2. Otherwise activates the smallest-id question still in the pool.
    /// 3. An empty pool is a no-op as well, logged at warn level.
    ///
    /// Mutates at most one row per call and raises no domain errors; only
    /// store failures propagate.
    pub fn activate_next_question(&self) -> Result<()> {
        let today = self.clock.today();

        if self.questions.find_by_activation_date(today)?.is_some() {
            debug!(%today, "question already activated, nothing to do");
            return Ok(());
        }

        match self.questions.find_first_unactivated()? {
            Some(q) => {
                self.questions.set_activation_date(q.id, today)?;
                info!(question_id = q.id, %today, "activated today's question");
            }
            None => warn!(%today, "question pool is exhausted, no activation"),
        }
        Ok(())
    }

    /// Runs forever: activate, then sleep until the next 05:00 local.
    ///
    /// The first activation happens immediately so a deployment after the
    /// rollover hour still gets its question for the day (idempotence makes
    /// the extra run free). Store errors are logged and retried at the next
    /// rollover rather than killing the task.
    pub async fn run(&self) {
        loop {
            if let Err(e) = self.activate_next_question() {
                warn!("question activation failed: {e:#}");
            }

            let pause = until_next_rollover(self.clock.now())
                .to_std()
                .unwrap_or_default();
            debug!(seconds = pause.as_secs(), "sleeping until next rollover");
            tokio::time::sleep(pause).await;
        }
    }
}

/// Time remaining until the next 05:00 local instant, strictly positive.
fn until_next_rollover(now: NaiveDateTime) -> TimeDelta {
    let today_rollover = now.date().and_time(rollover_time());
    let next = if now < today_rollover {
        today_rollover
    } else {
        today_rollover
            .checked_add_days(Days::new(1))
            .expect("date out of range")
    };
    next - now
}
