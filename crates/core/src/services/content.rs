//! Content service (responses, notes, check-ins, moments).
//!
//! Creation, reader tracking and the visibility-filtered listings/feeds.
//! All read-side filtering goes through the visibility resolver.

use daybook_common::{AppError, AppResult, IdGenerator};
use daybook_db::{
    entities::{check_in, moment, note, note::Visibility, response},
    repositories::{
        CheckInRepository, FriendshipRepository, MomentRepository, NoteRepository,
        QuestionRepository, ResponseRepository,
    },
};
use sea_orm::Set;

use crate::services::visibility::VisibilityService;

fn share_json(ids: Vec<String>) -> serde_json::Value {
    serde_json::json!(ids)
}

/// Input for creating a response.
#[derive(Debug, Clone)]
pub struct CreateResponseInput {
    /// Question being answered.
    pub question_id: String,
    /// Response text.
    pub content: String,
    /// Sharing scope.
    pub visibility: Visibility,
    /// Explicit friend share list.
    pub share_friend_ids: Vec<String>,
    /// Explicit friend-group share list.
    pub share_group_ids: Vec<String>,
}

/// Input for creating a check-in.
#[derive(Debug, Clone)]
pub struct CreateCheckInInput {
    /// Mood emoji.
    pub mood: Option<String>,
    /// Status text.
    pub description: Option<String>,
    /// Sharing scope.
    pub visibility: Visibility,
    /// Explicit friend share list.
    pub share_friend_ids: Vec<String>,
    /// Explicit friend-group share list.
    pub share_group_ids: Vec<String>,
}

/// A friend/anonymous feed page.
#[derive(Debug, Default)]
pub struct Feed {
    /// Responses in the feed, newest first.
    pub responses: Vec<response::Model>,
    /// Notes in the feed, newest first.
    pub notes: Vec<note::Model>,
}

/// Feed page size.
const FEED_LIMIT: u64 = 50;

/// Content service.
#[derive(Clone)]
pub struct ContentService {
    response_repo: ResponseRepository,
    note_repo: NoteRepository,
    check_in_repo: CheckInRepository,
    moment_repo: MomentRepository,
    question_repo: QuestionRepository,
    friendship_repo: FriendshipRepository,
    visibility: VisibilityService,
    id_gen: IdGenerator,
}

impl ContentService {
    /// Create a new content service.
    #[must_use]
    pub const fn new(
        response_repo: ResponseRepository,
        note_repo: NoteRepository,
        check_in_repo: CheckInRepository,
        moment_repo: MomentRepository,
        question_repo: QuestionRepository,
        friendship_repo: FriendshipRepository,
        visibility: VisibilityService,
    ) -> Self {
        Self {
            response_repo,
            note_repo,
            check_in_repo,
            moment_repo,
            question_repo,
            friendship_repo,
            visibility,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a response to a question.
    pub async fn create_response(
        &self,
        author_id: &str,
        input: CreateResponseInput,
    ) -> AppResult<response::Model> {
        self.question_repo.get_by_id(&input.question_id).await?;

        let model = response::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author_id.to_string()),
            question_id: Set(input.question_id),
            content: Set(input.content),
            visibility: Set(input.visibility),
            share_friend_ids: Set(share_json(input.share_friend_ids)),
            share_group_ids: Set(share_json(input.share_group_ids)),
            reader_ids: Set(share_json(Vec::new())),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };
        self.response_repo.create(model).await
    }

    /// Create a note.
    ///
    /// The note's sharing scope is inherited from its category.
    pub async fn create_note(
        &self,
        author_id: &str,
        content: &str,
        category_id: &str,
        share_friend_ids: Vec<String>,
        share_group_ids: Vec<String>,
    ) -> AppResult<note::Model> {
        let category = self
            .note_repo
            .find_category(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("category {category_id}")))?;

        let model = note::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author_id.to_string()),
            content: Set(content.to_string()),
            category_id: Set(Some(category.id)),
            visibility: Set(category.sharing_scope),
            share_friend_ids: Set(share_json(share_friend_ids)),
            share_group_ids: Set(share_json(share_group_ids)),
            reader_ids: Set(share_json(Vec::new())),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };
        self.note_repo.create(model).await
    }

    /// Create a check-in, deactivating the author's previous one.
    pub async fn create_check_in(
        &self,
        author_id: &str,
        input: CreateCheckInInput,
    ) -> AppResult<check_in::Model> {
        if input.mood.is_none() && input.description.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::BadRequest(
                "A mood or a description must be provided".to_string(),
            ));
        }

        self.check_in_repo.deactivate_all(author_id).await?;

        let model = check_in::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author_id.to_string()),
            mood: Set(input.mood),
            description: Set(input.description),
            is_active: Set(true),
            visibility: Set(input.visibility),
            share_friend_ids: Set(share_json(input.share_friend_ids)),
            share_group_ids: Set(share_json(input.share_group_ids)),
            reader_ids: Set(share_json(Vec::new())),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.check_in_repo.create(model).await
    }

    /// Create the author's moment for a calendar date.
    ///
    /// One moment per author per day; a second create is a `Conflict`.
    pub async fn create_moment(
        &self,
        author_id: &str,
        date: chrono::NaiveDate,
        mood: Option<String>,
        description: Option<String>,
    ) -> AppResult<moment::Model> {
        if mood.is_none() && description.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::BadRequest(
                "A mood or a description must be provided".to_string(),
            ));
        }
        if self
            .moment_repo
            .find_by_author_date(author_id, date)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A moment for this day already exists".to_string(),
            ));
        }

        let model = moment::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author_id.to_string()),
            date: Set(date),
            mood: Set(mood),
            description: Set(description),
            reader_ids: Set(share_json(Vec::new())),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };
        self.moment_repo.create(model).await
    }

    /// List an author's responses the viewer may see, newest first.
    pub async fn list_user_responses(
        &self,
        viewer_id: &str,
        author_id: &str,
    ) -> AppResult<Vec<response::Model>> {
        let mut visible = Vec::new();
        for response in self.response_repo.find_by_author(author_id).await? {
            if self.visibility.can_view_response(viewer_id, &response).await? {
                visible.push(response);
            }
        }
        Ok(visible)
    }

    /// List an author's notes the viewer may see, newest first.
    pub async fn list_user_notes(
        &self,
        viewer_id: &str,
        author_id: &str,
    ) -> AppResult<Vec<note::Model>> {
        let mut visible = Vec::new();
        for note in self.note_repo.find_by_author(author_id).await? {
            if self.visibility.can_view_note(viewer_id, &note).await? {
                visible.push(note);
            }
        }
        Ok(visible)
    }

    /// The author's active check-in, if the viewer may see it.
    pub async fn active_check_in(
        &self,
        viewer_id: &str,
        author_id: &str,
    ) -> AppResult<Option<check_in::Model>> {
        let Some(check_in) = self.check_in_repo.find_active_by_author(author_id).await? else {
            return Ok(None);
        };
        if self.visibility.can_view_check_in(viewer_id, &check_in).await? {
            Ok(Some(check_in))
        } else {
            Ok(None)
        }
    }

    /// List an author's moments the viewer may see, newest first.
    pub async fn list_user_moments(
        &self,
        viewer_id: &str,
        author_id: &str,
    ) -> AppResult<Vec<moment::Model>> {
        let mut visible = Vec::new();
        for moment in self.moment_repo.find_by_author(author_id).await? {
            if self.visibility.can_view_moment(viewer_id, &moment).await? {
                visible.push(moment);
            }
        }
        Ok(visible)
    }

    /// The friend feed: friends-scoped content by the viewer's friends and
    /// the viewer, filtered through the resolver.
    pub async fn friend_feed(&self, viewer_id: &str) -> AppResult<Feed> {
        let mut author_ids = self.friendship_repo.find_friend_ids(viewer_id).await?;
        author_ids.push(viewer_id.to_string());

        let mut feed = Feed::default();
        for response in self
            .response_repo
            .find_friend_feed(&author_ids, FEED_LIMIT)
            .await?
        {
            if self.visibility.can_view_response(viewer_id, &response).await? {
                feed.responses.push(response);
            }
        }
        for note in self.note_repo.find_friend_feed(&author_ids, FEED_LIMIT).await? {
            if self.visibility.can_view_note(viewer_id, &note).await? {
                feed.notes.push(note);
            }
        }
        Ok(feed)
    }

    /// The anonymous feed, with blocked authors and reported content
    /// filtered out.
    pub async fn anonymous_feed(&self, viewer_id: &str) -> AppResult<Feed> {
        let mut feed = Feed::default();
        for response in self.response_repo.find_anonymous_feed(FEED_LIMIT).await? {
            if self.visibility.can_view_response(viewer_id, &response).await? {
                feed.responses.push(response);
            }
        }
        for note in self.note_repo.find_anonymous_feed(FEED_LIMIT).await? {
            if self.visibility.can_view_note(viewer_id, &note).await? {
                feed.notes.push(note);
            }
        }
        Ok(feed)
    }

    /// Record that the viewer read a response.
    pub async fn mark_response_read(&self, viewer_id: &str, response_id: &str) -> AppResult<()> {
        let response = self
            .response_repo
            .find_by_id(response_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("response {response_id}")))?;
        if !self.visibility.can_view_response(viewer_id, &response).await? {
            return Err(AppError::Forbidden("Not in the audience".to_string()));
        }
        self.response_repo.add_reader(response, viewer_id).await?;
        Ok(())
    }

    /// Record that the viewer read a note.
    pub async fn mark_note_read(&self, viewer_id: &str, note_id: &str) -> AppResult<()> {
        let note = self
            .note_repo
            .find_by_id(note_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("note {note_id}")))?;
        if !self.visibility.can_view_note(viewer_id, &note).await? {
            return Err(AppError::Forbidden("Not in the audience".to_string()));
        }
        self.note_repo.add_reader(note, viewer_id).await?;
        Ok(())
    }

    /// Record that the viewer read a check-in.
    pub async fn mark_check_in_read(&self, viewer_id: &str, check_in_id: &str) -> AppResult<()> {
        let check_in = self
            .check_in_repo
            .find_by_id(check_in_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("check-in {check_in_id}")))?;
        if !self.visibility.can_view_check_in(viewer_id, &check_in).await? {
            return Err(AppError::Forbidden("Not in the audience".to_string()));
        }
        self.check_in_repo.add_reader(check_in, viewer_id).await?;
        Ok(())
    }

    /// Mark all of an author's notes as read by the viewer.
    pub async fn mark_all_notes_read(&self, viewer_id: &str, author_id: &str) -> AppResult<()> {
        for note in self.note_repo.find_by_author(author_id).await? {
            self.note_repo.add_reader(note, viewer_id).await?;
        }
        Ok(())
    }

    /// Mark all of an author's responses as read by the viewer.
    pub async fn mark_all_responses_read(&self, viewer_id: &str, author_id: &str) -> AppResult<()> {
        for response in self.response_repo.find_by_author(author_id).await? {
            self.response_repo.add_reader(response, viewer_id).await?;
        }
        Ok(())
    }

    /// List note categories.
    pub async fn list_categories(
        &self,
    ) -> AppResult<Vec<daybook_db::entities::category::Model>> {
        self.note_repo.list_categories().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use daybook_db::repositories::{FriendGroupRepository, ModerationRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn service() -> ContentService {
        let other = empty_db();
        let visibility = VisibilityService::new(
            FriendshipRepository::new(Arc::clone(&other)),
            ModerationRepository::new(Arc::clone(&other)),
            FriendGroupRepository::new(Arc::clone(&other)),
        );
        ContentService::new(
            ResponseRepository::new(Arc::clone(&other)),
            NoteRepository::new(Arc::clone(&other)),
            CheckInRepository::new(Arc::clone(&other)),
            MomentRepository::new(Arc::clone(&other)),
            QuestionRepository::new(Arc::clone(&other)),
            FriendshipRepository::new(Arc::clone(&other)),
            visibility,
        )
    }

    #[tokio::test]
    async fn test_check_in_requires_mood_or_description() {
        let input = CreateCheckInInput {
            mood: None,
            description: None,
            visibility: Visibility::Friends,
            share_friend_ids: Vec::new(),
            share_group_ids: Vec::new(),
        };
        let result = service().create_check_in("alice", input).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_moment_requires_mood_or_description() {
        let result = service()
            .create_moment(
                "alice",
                chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                None,
                None,
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
