//! Note repository.

use std::sync::Arc;

use crate::entities::{category, note, Category, Note};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

fn json_ids(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Note repository for database operations.
///
/// Finders exclude soft-deleted notes.
#[derive(Clone)]
pub struct NoteRepository {
    db: Arc<DatabaseConnection>,
}

impl NoteRepository {
    /// Create a new note repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a note by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<note::Model>> {
        Note::find_by_id(id)
            .filter(note::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's notes, newest first.
    pub async fn find_by_author(&self, author_id: &str) -> AppResult<Vec<note::Model>> {
        Note::find()
            .filter(note::Column::AuthorId.eq(author_id))
            .filter(note::Column::DeletedAt.is_null())
            .order_by_desc(note::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List friends-scoped notes authored by any of the given users, newest
    /// first.
    pub async fn find_friend_feed(
        &self,
        author_ids: &[String],
        limit: u64,
    ) -> AppResult<Vec<note::Model>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        Note::find()
            .filter(note::Column::AuthorId.is_in(author_ids.iter().cloned()))
            .filter(note::Column::Visibility.eq(note::Visibility::Friends))
            .filter(note::Column::DeletedAt.is_null())
            .order_by_desc(note::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List anonymous-scoped notes, newest first.
    pub async fn find_anonymous_feed(&self, limit: u64) -> AppResult<Vec<note::Model>> {
        Note::find()
            .filter(note::Column::Visibility.eq(note::Visibility::Anonymous))
            .filter(note::Column::DeletedAt.is_null())
            .order_by_desc(note::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a note.
    pub async fn create(&self, model: note::ActiveModel) -> AppResult<note::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a note.
    pub async fn update(&self, model: note::ActiveModel) -> AppResult<note::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Soft-delete a note.
    pub async fn soft_delete(&self, note: note::Model) -> AppResult<()> {
        let mut model: note::ActiveModel = note.into();
        model.deleted_at = Set(Some(chrono::Utc::now().into()));
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Record that a user has read a note; no-op if already recorded.
    pub async fn add_reader(&self, note: note::Model, reader_id: &str) -> AppResult<note::Model> {
        let mut readers = json_ids(&note.reader_ids);
        if readers.iter().any(|r| r == reader_id) {
            return Ok(note);
        }
        readers.push(reader_id.to_string());
        let mut model: note::ActiveModel = note.into();
        model.reader_ids = Set(serde_json::json!(readers));
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a friend from the share lists of all the author's notes.
    ///
    /// Part of the unfriend cascade.
    pub async fn scrub_share_friend(&self, author_id: &str, friend_id: &str) -> AppResult<()> {
        let notes = self.find_by_author(author_id).await?;
        for note in notes {
            let shares = json_ids(&note.share_friend_ids);
            if shares.iter().any(|s| s == friend_id) {
                let remaining: Vec<String> =
                    shares.into_iter().filter(|s| s != friend_id).collect();
                let mut model: note::ActiveModel = note.into();
                model.share_friend_ids = Set(serde_json::json!(remaining));
                model
                    .update(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Find a note category by ID.
    pub async fn find_category(&self, id: &str) -> AppResult<Option<category::Model>> {
        Category::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all note categories.
    pub async fn list_categories(&self) -> AppResult<Vec<category::Model>> {
        Category::find()
            .order_by_asc(category::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a note category.
    pub async fn create_category(
        &self,
        model: category::ActiveModel,
    ) -> AppResult<category::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Soft-delete all of a user's notes (account deletion cascade).
    pub async fn soft_delete_by_author(&self, author_id: &str) -> AppResult<u64> {
        let result = Note::update_many()
            .col_expr(
                note::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(note::Column::AuthorId.eq(author_id))
            .filter(note::Column::DeletedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
