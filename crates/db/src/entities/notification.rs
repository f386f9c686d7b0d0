//! Notification entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kinds of entities a notification can point at.
///
/// Consumption sites match exhaustively on this instead of inspecting the
/// target at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
#[serde(rename_all = "camelCase")]
pub enum NotificationTarget {
    #[sea_orm(string_value = "friendRequest")]
    FriendRequest,
    #[sea_orm(string_value = "responseRequest")]
    ResponseRequest,
    #[sea_orm(string_value = "response")]
    Response,
    #[sea_orm(string_value = "note")]
    Note,
    #[sea_orm(string_value = "checkIn")]
    CheckIn,
    #[sea_orm(string_value = "ping")]
    Ping,
    #[sea_orm(string_value = "user")]
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user receiving the notification
    #[sea_orm(indexed)]
    pub user_id: String,

    /// The user whose action caused the notification
    #[sea_orm(nullable)]
    pub actor_id: Option<String>,

    /// Kind of the entity the notification concerns
    pub target_kind: NotificationTarget,

    /// ID of the entity the notification concerns
    pub target_id: String,

    /// Localization key; message text itself is rendered by clients
    pub message_key: String,

    /// Template arguments for the message key
    #[sea_orm(column_type = "JsonBinary")]
    pub message_args: Json,

    /// Where the client should navigate when the notification is opened
    pub redirect_url: String,

    /// Has this notification been read?
    #[sea_orm(default_value = false)]
    pub is_read: bool,

    /// Hidden notifications are retained as an audit trail but not listed
    #[sea_orm(default_value = true)]
    pub is_visible: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
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
        from = "Column::ActorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Actor,
}

impl ActiveModelBehavior for ActiveModel {}
