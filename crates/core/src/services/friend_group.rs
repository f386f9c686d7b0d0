//! Friend group service.

use daybook_common::{AppError, AppResult, IdGenerator};
use daybook_db::{
    entities::{friend_group, friend_group_member},
    repositories::{FriendGroupRepository, FriendshipRepository},
};
use sea_orm::Set;

/// Friend group service.
#[derive(Clone)]
pub struct FriendGroupService {
    friend_group_repo: FriendGroupRepository,
    friendship_repo: FriendshipRepository,
    id_gen: IdGenerator,
}

impl FriendGroupService {
    /// Create a new friend group service.
    #[must_use]
    pub const fn new(
        friend_group_repo: FriendGroupRepository,
        friendship_repo: FriendshipRepository,
    ) -> Self {
        Self {
            friend_group_repo,
            friendship_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Resolve a group owned by the given user.
    async fn get_owned(&self, owner_id: &str, group_id: &str) -> AppResult<friend_group::Model> {
        let group = self
            .friend_group_repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("group {group_id}")))?;
        if group.user_id != owner_id {
            return Err(AppError::Forbidden(
                "Not the owner of this group".to_string(),
            ));
        }
        Ok(group)
    }

    /// Create a friend group.
    pub async fn create_group(&self, owner_id: &str, name: &str) -> AppResult<friend_group::Model> {
        if name.is_empty() || name.len() > 30 {
            return Err(AppError::Validation(
                "Group name must be between 1 and 30 characters".to_string(),
            ));
        }
        let existing = self.friend_group_repo.find_by_owner(owner_id).await?;
        let order_index = i32::try_from(existing.len()).unwrap_or(i32::MAX);

        let model = friend_group::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner_id.to_string()),
            name: Set(name.to_string()),
            order_index: Set(order_index),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.friend_group_repo.create(model).await
    }

    /// Rename a group.
    pub async fn rename_group(
        &self,
        owner_id: &str,
        group_id: &str,
        name: &str,
    ) -> AppResult<friend_group::Model> {
        let group = self.get_owned(owner_id, group_id).await?;
        let mut model: friend_group::ActiveModel = group.into();
        model.name = Set(name.to_string());
        self.friend_group_repo.update(model).await
    }

    /// Delete a group.
    pub async fn delete_group(&self, owner_id: &str, group_id: &str) -> AppResult<()> {
        let group = self.get_owned(owner_id, group_id).await?;
        self.friend_group_repo.soft_delete(group).await
    }

    /// List a user's groups.
    pub async fn list_groups(&self, owner_id: &str) -> AppResult<Vec<friend_group::Model>> {
        self.friend_group_repo.find_by_owner(owner_id).await
    }

    /// Member IDs of a group.
    pub async fn member_ids(&self, owner_id: &str, group_id: &str) -> AppResult<Vec<String>> {
        self.get_owned(owner_id, group_id).await?;
        self.friend_group_repo.find_member_ids(group_id).await
    }

    /// Add a friend to a group.
    ///
    /// Fails with `PreconditionFailed` when the member is not a friend of
    /// the owner; duplicate adds are a no-op.
    pub async fn add_member(
        &self,
        owner_id: &str,
        group_id: &str,
        member_id: &str,
    ) -> AppResult<()> {
        self.get_owned(owner_id, group_id).await?;

        if !self.friendship_repo.are_friends(owner_id, member_id).await? {
            return Err(AppError::PreconditionFailed(
                "Group members must be friends".to_string(),
            ));
        }
        if self.friend_group_repo.is_member(group_id, member_id).await? {
            return Ok(());
        }

        let model = friend_group_member::ActiveModel {
            id: Set(self.id_gen.generate()),
            group_id: Set(group_id.to_string()),
            member_id: Set(member_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.friend_group_repo.add_member(model).await?;
        Ok(())
    }

    /// Remove a friend from a group. Idempotent.
    pub async fn remove_member(
        &self,
        owner_id: &str,
        group_id: &str,
        member_id: &str,
    ) -> AppResult<()> {
        self.get_owned(owner_id, group_id).await?;
        self.friend_group_repo
            .remove_member(group_id, member_id)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    #[tokio::test]
    async fn test_group_name_length_is_validated() {
        let service = FriendGroupService::new(
            FriendGroupRepository::new(empty_db()),
            FriendshipRepository::new(empty_db()),
        );

        let result = service.create_group("alice", "").await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = service.create_group("alice", &"x".repeat(31)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_member_requires_owned_group() {
        let group_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![friend_group::Model {
                    id: "g1".to_string(),
                    user_id: "bob".to_string(),
                    name: "close friends".to_string(),
                    order_index: 0,
                    deleted_at: None,
                    created_at: chrono::Utc::now().into(),
                }]])
                .into_connection(),
        );
        let service = FriendGroupService::new(
            FriendGroupRepository::new(group_db),
            FriendshipRepository::new(empty_db()),
        );

        let result = service.add_member("alice", "g1", "carol").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
