//! Ping entity (tiny emoji/text messages between two friends).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The fixed set of ping emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "camelCase")]
pub enum PingEmoji {
    #[sea_orm(string_value = "wave")]
    Wave,
    #[sea_orm(string_value = "smile")]
    Smile,
    #[sea_orm(string_value = "heart")]
    Heart,
    #[sea_orm(string_value = "cry")]
    Cry,
    #[sea_orm(string_value = "laugh")]
    Laugh,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ping")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Room this ping belongs to
    #[sea_orm(indexed)]
    pub ping_room_id: String,

    /// Sender user ID
    pub sender_id: String,

    /// Receiver user ID
    #[sea_orm(indexed)]
    pub receiver_id: String,

    /// At least one of `emoji` and `content` must be present
    #[sea_orm(nullable)]
    pub emoji: Option<PingEmoji>,

    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    /// Has the receiver read this ping?
    #[sea_orm(default_value = false)]
    pub is_read: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ping_room::Entity",
        from = "Column::PingRoomId",
        to = "super::ping_room::Column::Id",
        on_delete = "Cascade"
    )]
    Room,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SenderId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Sender,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReceiverId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Receiver,
}

impl Related<super::ping_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
