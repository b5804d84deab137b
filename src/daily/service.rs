//! Journal entries with comments and likes, scoped to a family group.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;
use tracing::info;

use crate::daily::domain::{NewComment, NewDaily};
use crate::daily::store::{CommentStore, DailyStore, LikeStore};
use crate::error::{DomainError, DomainResult};
use crate::time::Clock;
use crate::user::domain::User;
use crate::user::store::UserStore;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyResponse {
    pub daily_id: u64,
    pub user_id: u64,
    pub date: NaiveDate,
    pub content: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: u64,
    pub daily_id: u64,
    pub user_id: u64,
    pub nickname: Option<String>,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeResponse {
    pub liked: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub daily_id: u64,
    pub user_id: u64,
    pub nickname: Option<String>,
    pub date: NaiveDate,
    pub content: String,
    pub like_count: u64,
    pub comment_count: u64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyDetailResponse {
    pub daily_id: u64,
    pub user_id: u64,
    pub nickname: Option<String>,
    pub date: NaiveDate,
    pub content: String,
    pub like_count: u64,
    pub liked: bool,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyDailiesResponse {
    pub dailies: Vec<DailySummary>,
}

pub struct DailyService {
    dailies: Arc<dyn DailyStore>,
    comments: Arc<dyn CommentStore>,
    likes: Arc<dyn LikeStore>,
    users: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
}

impl DailyService {
    pub fn new(
        dailies: Arc<dyn DailyStore>,
        comments: Arc<dyn CommentStore>,
        likes: Arc<dyn LikeStore>,
        users: Arc<dyn UserStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            dailies,
            comments,
            likes,
            users,
            clock,
        }
    }

    /// Creates an entry dated today. Caller must be an approved member.
    pub fn create(&self, me: &User, content: &str) -> DomainResult<DailyResponse> {
        let group_id = me
            .family_group_id
            .ok_or(DomainError::NotFound("Group"))?;

        let date = self.clock.today();
        let id = self.dailies.insert(&NewDaily {
            user_id: me.id,
            group_id,
            date,
            content: content.to_string(),
            created_at: self.clock.now(),
        })?;

        info!(daily_id = id, user_id = me.id, "journal entry created");
        Ok(DailyResponse {
            daily_id: id,
            user_id: me.id,
            date,
            content: content.to_string(),
        })
    }

    /// Rewrites an entry. Author only.
    pub fn update(&self, me: &User, daily_id: u64, content: &str) -> DomainResult<DailyResponse> {
        let daily = self.find_daily(daily_id)?;
        if !daily.is_owned_by(me.id) {
            return Err(DomainError::forbidden("only the author can edit this entry"));
        }

        self.dailies
            .update_content(daily.id, content, self.clock.now())?;
        Ok(DailyResponse {
            daily_id: daily.id,
            user_id: me.id,
            date: daily.date,
            content: content.to_string(),
        })
    }

    /// Deletes an entry with its comments and likes. Author only.
    pub fn delete(&self, me: &User, daily_id: u64) -> DomainResult<DailyResponse> {
        let daily = self.find_daily(daily_id)?;
        if !daily.is_owned_by(me.id) {
            return Err(DomainError::forbidden(
                "only the author can delete this entry",
            ));
        }

        self.comments.delete_all_by_daily(daily.id)?;
        self.likes.delete_all_by_daily(daily.id)?;
        self.dailies.delete(daily.id)?;

        info!(daily_id = daily.id, user_id = me.id, "journal entry deleted");
        Ok(DailyResponse {
            daily_id: daily.id,
            user_id: daily.user_id,
            date: daily.date,
            content: daily.content,
        })
    }

    pub fn add_comment(
        &self,
        me: &User,
        daily_id: u64,
        content: &str,
    ) -> DomainResult<CommentResponse> {
        let daily = self.find_daily(daily_id)?;

        let created_at = self.clock.now();
        let id = self.comments.insert(&NewComment {
            daily_id: daily.id,
            user_id: me.id,
            content: content.to_string(),
            created_at,
        })?;

        Ok(CommentResponse {
            comment_id: id,
            daily_id: daily.id,
            user_id: me.id,
            nickname: Some(me.nickname.clone()),
            content: content.to_string(),
            created_at,
        })
    }

    pub fn update_comment(
        &self,
        me: &User,
        daily_id: u64,
        comment_id: u64,
        content: &str,
    ) -> DomainResult<CommentResponse> {
        self.find_daily(daily_id)?;
        let comment = self
            .comments
            .find_by_id(comment_id)?
            .ok_or(DomainError::NotFound("Comment"))?;
        if !comment.belongs_to(daily_id) {
            return Err(DomainError::bad_request(
                "comment does not belong to this entry",
            ));
        }
        if !comment.is_owned_by(me.id) {
            return Err(DomainError::forbidden("only the author can edit this comment"));
        }

        self.comments
            .update_content(comment.id, content, self.clock.now())?;
        Ok(CommentResponse {
            comment_id: comment.id,
            daily_id,
            user_id: me.id,
            nickname: Some(me.nickname.clone()),
            content: content.to_string(),
            created_at: comment.created_at,
        })
    }

    pub fn delete_comment(
        &self,
        me: &User,
        daily_id: u64,
        comment_id: u64,
    ) -> DomainResult<CommentResponse> {
        self.find_daily(daily_id)?;
        let comment = self
            .comments
            .find_by_id(comment_id)?
            .ok_or(DomainError::NotFound("Comment"))?;
        if !comment.belongs_to(daily_id) {
            return Err(DomainError::bad_request(
                "comment does not belong to this entry",
            ));
        }
        if !comment.is_owned_by(me.id) {
            return Err(DomainError::forbidden(
                "only the author can delete this comment",
            ));
        }

        self.comments.delete(comment.id)?;
        Ok(CommentResponse {
            comment_id: comment.id,
            daily_id,
            user_id: comment.user_id,
            nickname: Some(me.nickname.clone()),
            content: comment.content,
            created_at: comment.created_at,
        })
    }

    /// Likes the entry if the caller has not liked it yet, otherwise
    /// removes the like.
    pub fn toggle_like(&self, me: &User, daily_id: u64) -> DomainResult<ToggleLikeResponse> {
        let daily = self.find_daily(daily_id)?;

        if self.likes.exists(daily.id, me.id)? {
            self.likes.delete(daily.id, me.id)?;
            Ok(ToggleLikeResponse { liked: false })
        } else {
            self.likes.insert(daily.id, me.id, self.clock.now())?;
            Ok(ToggleLikeResponse { liked: true })
        }
    }

    /// Entry with comments and the caller's like state.
    pub fn detail(&self, me: &User, daily_id: u64) -> DomainResult<DailyDetailResponse> {
        let daily = self.find_daily(daily_id)?;

        let comments = self
            .comments
            .find_all_by_daily(daily.id)?
            .into_iter()
            .map(|c| {
                let nickname = self.users.find_by_id(c.user_id)?.map(|u| u.nickname);
                Ok(CommentResponse {
                    comment_id: c.id,
                    daily_id: c.daily_id,
                    user_id: c.user_id,
                    nickname,
                    content: c.content,
                    created_at: c.created_at,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let nickname = self.users.find_by_id(daily.user_id)?.map(|u| u.nickname);
        Ok(DailyDetailResponse {
            daily_id: daily.id,
            user_id: daily.user_id,
            nickname,
            date: daily.date,
            content: daily.content,
            like_count: self.likes.count_by_daily(daily.id)?,
            liked: self.likes.exists(daily.id, me.id)?,
            comments,
        })
    }

    /// This week's entries (Monday through Sunday) for the caller's group.
    pub fn weekly(&self, me: &User) -> DomainResult<WeeklyDailiesResponse> {
        let group_id = me
            .family_group_id
            .ok_or(DomainError::NotFound("Group"))?;

        let week = self.clock.today().week(Weekday::Mon);
        let entries =
            self.dailies
                .find_all_by_group_between(group_id, week.first_day(), week.last_day())?;

        let dailies = entries
            .into_iter()
            .map(|d| {
                let nickname = self.users.find_by_id(d.user_id)?.map(|u| u.nickname);
                Ok(DailySummary {
                    daily_id: d.id,
                    user_id: d.user_id,
                    nickname,
                    date: d.date,
                    content: d.content,
                    like_count: self.likes.count_by_daily(d.id)?,
                    comment_count: self.comments.count_by_daily(d.id)?,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(WeeklyDailiesResponse { dailies })
    }

    fn find_daily(&self, id: u64) -> DomainResult<crate::daily::domain::Daily> {
        self.dailies
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Daily"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::domain::{Comment, Daily};
    use crate::daily::store::{MockCommentStore, MockDailyStore, MockLikeStore};
    use crate::time::FixedClock;
    use crate::user::store::MockUserStore;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn me(id: u64) -> User {
        User {
            id,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: "x".into(),
            nickname: "Al".into(),
            family_group_id: Some(10),
        }
    }

    fn entry(id: u64, author: u64) -> Daily {
        Daily {
            id,
            user_id: author,
            group_id: 10,
            date: date(2024, 6, 1),
            content: "sunny".into(),
            created_at: date(2024, 6, 1).and_hms_opt(9, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn service(
        dailies: MockDailyStore,
        comments: MockCommentStore,
        likes: MockLikeStore,
        users: MockUserStore,
    ) -> DailyService {
        DailyService::new(
            Arc::new(dailies),
            Arc::new(comments),
            Arc::new(likes),
            Arc::new(users),
            Arc::new(FixedClock::at(2024, 6, 5, 12, 0, 0)),
        )
    }

    #[test]
    fn update_by_non_author_is_forbidden() {
        let mut dailies = MockDailyStore::new();
        dailies
            .expect_find_by_id()
            .returning(|id| Ok(Some(entry(id, 99))));

        let svc = service(
            dailies,
            MockCommentStore::new(),
            MockLikeStore::new(),
            MockUserStore::new(),
        );
        let err = svc.update(&me(1), 5, "mine now").unwrap_err();

        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn delete_cascades_comments_and_likes() {
        let mut dailies = MockDailyStore::new();
        dailies
            .expect_find_by_id()
            .returning(|id| Ok(Some(entry(id, 1))));
        dailies
            .expect_delete()
            .with(eq(5u64))
            .times(1)
            .returning(|_| Ok(()));

        let mut comments = MockCommentStore::new();
        comments
            .expect_delete_all_by_daily()
            .with(eq(5u64))
            .times(1)
            .returning(|_| Ok(()));

        let mut likes = MockLikeStore::new();
        likes
            .expect_delete_all_by_daily()
            .with(eq(5u64))
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(dailies, comments, likes, MockUserStore::new());
        svc.delete(&me(1), 5).unwrap();
    }

    #[test]
    fn toggle_like_flips_both_ways() {
        let mut dailies = MockDailyStore::new();
        dailies
            .expect_find_by_id()
            .returning(|id| Ok(Some(entry(id, 2))));

        let mut likes = MockLikeStore::new();
        let mut liked = false;
        likes.expect_exists().returning(move |_, _| {
            let was = liked;
            liked = !liked;
            Ok(was)
        });
        likes.expect_insert().times(1).returning(|_, _, _| Ok(()));
        likes.expect_delete().times(1).returning(|_, _| Ok(()));

        let svc = service(dailies, MockCommentStore::new(), likes, MockUserStore::new());

        assert!(svc.toggle_like(&me(1), 5).unwrap().liked);
        assert!(!svc.toggle_like(&me(1), 5).unwrap().liked);
    }

    #[test]
    fn comment_on_wrong_entry_is_rejected() {
        let mut dailies = MockDailyStore::new();
        dailies
            .expect_find_by_id()
            .returning(|id| Ok(Some(entry(id, 1))));

        let mut comments = MockCommentStore::new();
        comments.expect_find_by_id().returning(|id| {
            Ok(Some(Comment {
                id,
                daily_id: 999, // belongs to another entry
                user_id: 1,
                content: "nice".into(),
                created_at: date(2024, 6, 1).and_hms_opt(10, 0, 0).unwrap(),
                updated_at: None,
            }))
        });

        let svc = service(
            dailies,
            comments,
            MockLikeStore::new(),
            MockUserStore::new(),
        );
        let err = svc.update_comment(&me(1), 5, 3, "edit").unwrap_err();

        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    #[test]
    fn weekly_queries_monday_through_sunday() {
        // 2024-06-05 is a Wednesday; its week is Mon 06-03 .. Sun 06-09.
        let mut dailies = MockDailyStore::new();
        dailies
            .expect_find_all_by_group_between()
            .with(eq(10u64), eq(date(2024, 6, 3)), eq(date(2024, 6, 9)))
            .returning(|_, _, _| Ok(vec![]));

        let svc = service(
            dailies,
            MockCommentStore::new(),
            MockLikeStore::new(),
            MockUserStore::new(),
        );
        let resp = svc.weekly(&me(1)).unwrap();
        assert!(resp.dailies.is_empty());
    }
}
