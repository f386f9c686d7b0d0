//! Ping room entity (one room per unordered friend pair).
//!
//! `user1_id` always sorts before `user2_id`, matching the friendship
//! canonicalization.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ping_room")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Lexicographically smaller user ID of the pair
    pub user1_id: String,

    /// Lexicographically larger user ID of the pair
    pub user2_id: String,

    /// Soft-delete marker
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::User1Id",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User1,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::User2Id",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User2,

    #[sea_orm(has_many = "super::ping::Entity")]
    Pings,
}

impl Related<super::ping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
