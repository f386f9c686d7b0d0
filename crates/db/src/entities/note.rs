//! Note entity (free-form journal posts).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sharing scopes for content items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    /// Visible to the author's friends (optionally narrowed by share lists)
    #[sea_orm(string_value = "friends")]
    Friends,
    /// Visible to anyone, with the author anonymized
    #[sea_orm(string_value = "anonymous")]
    Anonymous,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "note")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author user ID
    #[sea_orm(indexed)]
    pub author_id: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Category the note was posted under; its sharing rule is copied onto
    /// `visibility` at creation time
    #[sea_orm(nullable, indexed)]
    pub category_id: Option<String>,

    pub visibility: Visibility,

    /// Explicit friend share list (empty = no restriction)
    #[sea_orm(column_type = "JsonBinary")]
    pub share_friend_ids: Json,

    /// Explicit friend-group share list (empty = no restriction)
    #[sea_orm(column_type = "JsonBinary")]
    pub share_group_ids: Json,

    /// Users who have read this note
    #[sea_orm(column_type = "JsonBinary")]
    pub reader_ids: Json,

    /// Soft-delete marker
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
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Author,

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
