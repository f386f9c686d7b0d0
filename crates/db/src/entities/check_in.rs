//! Check-in entity (short status posts; only the latest one is active).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::note::Visibility;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "check_in")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author user ID
    #[sea_orm(indexed)]
    pub author_id: String,

    /// Mood emoji
    #[sea_orm(nullable)]
    pub mood: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Only the author's most recent check-in is active
    #[sea_orm(default_value = true)]
    pub is_active: bool,

    pub visibility: Visibility,

    /// Explicit friend share list (empty = no restriction)
    #[sea_orm(column_type = "JsonBinary")]
    pub share_friend_ids: Json,

    /// Explicit friend-group share list (empty = no restriction)
    #[sea_orm(column_type = "JsonBinary")]
    pub share_group_ids: Json,

    /// Users who have read this check-in
    #[sea_orm(column_type = "JsonBinary")]
    pub reader_ids: Json,

    /// Soft-delete marker
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
