//! Friend group repository.

use std::sync::Arc;

use crate::entities::{friend_group, friend_group_member, FriendGroup, FriendGroupMember};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Friend group repository for database operations.
#[derive(Clone)]
pub struct FriendGroupRepository {
    db: Arc<DatabaseConnection>,
}

impl FriendGroupRepository {
    /// Create a new friend group repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a group by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<friend_group::Model>> {
        FriendGroup::find_by_id(id)
            .filter(friend_group::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's groups in display order.
    pub async fn find_by_owner(&self, user_id: &str) -> AppResult<Vec<friend_group::Model>> {
        FriendGroup::find()
            .filter(friend_group::Column::UserId.eq(user_id))
            .filter(friend_group::Column::DeletedAt.is_null())
            .order_by_asc(friend_group::Column::OrderIndex)
            .order_by_asc(friend_group::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a group.
    pub async fn create(&self, model: friend_group::ActiveModel) -> AppResult<friend_group::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a group.
    pub async fn update(&self, model: friend_group::ActiveModel) -> AppResult<friend_group::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Soft-delete a group.
    pub async fn soft_delete(&self, group: friend_group::Model) -> AppResult<()> {
        let mut model: friend_group::ActiveModel = group.into();
        model.deleted_at = Set(Some(chrono::Utc::now().into()));
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Add a member to a group; no-op if already present.
    pub async fn add_member(
        &self,
        model: friend_group_member::ActiveModel,
    ) -> AppResult<friend_group_member::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a member from a group; no-op if absent.
    pub async fn remove_member(&self, group_id: &str, member_id: &str) -> AppResult<()> {
        FriendGroupMember::delete_many()
            .filter(friend_group_member::Column::GroupId.eq(group_id))
            .filter(friend_group_member::Column::MemberId.eq(member_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Check membership.
    pub async fn is_member(&self, group_id: &str, member_id: &str) -> AppResult<bool> {
        let found = FriendGroupMember::find()
            .filter(friend_group_member::Column::GroupId.eq(group_id))
            .filter(friend_group_member::Column::MemberId.eq(member_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Member IDs of a group.
    pub async fn find_member_ids(&self, group_id: &str) -> AppResult<Vec<String>> {
        let rows = FriendGroupMember::find()
            .filter(friend_group_member::Column::GroupId.eq(group_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|r| r.member_id).collect())
    }

    /// IDs of the given groups that contain the member.
    ///
    /// Used by the visibility resolver to evaluate group share lists.
    pub async fn find_groups_containing(
        &self,
        group_ids: &[String],
        member_id: &str,
    ) -> AppResult<Vec<String>> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = FriendGroupMember::find()
            .filter(friend_group_member::Column::GroupId.is_in(group_ids.iter().cloned()))
            .filter(friend_group_member::Column::MemberId.eq(member_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|r| r.group_id).collect())
    }
}
