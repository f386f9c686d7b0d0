//! Friend request entity.
//!
//! `accepted` is NULL while the request is pending, `true` once accepted and
//! `false` once rejected. The requestee is the only party that may flip it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friend_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user who sent the request
    pub requester_id: String,

    /// The user who received the request
    pub requestee_id: String,

    /// NULL = pending, true = accepted, false = rejected
    #[sea_orm(nullable)]
    pub accepted: Option<bool>,

    /// Soft-delete marker (withdrawn requests, unfriend cleanup)
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RequesterId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Requester,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RequesteeId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Requestee,
}

impl ActiveModelBehavior for ActiveModel {}
