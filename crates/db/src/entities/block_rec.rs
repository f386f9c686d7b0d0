//! Block recommendation entity.
//!
//! A directed suppression edge: the user does not want friend
//! recommendations involving `blocked_user_id`. Distinct from user/content
//! reports, which are owned by the moderation subsystem.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "block_rec")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user who created the block
    pub user_id: String,

    /// The user excluded from recommendations
    pub blocked_user_id: String,

    /// Soft-delete marker
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BlockedUserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    BlockedUser,
}

impl ActiveModelBehavior for ActiveModel {}
