//! Response entity (answers to daily questions).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::note::Visibility;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "response")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author user ID
    #[sea_orm(indexed)]
    pub author_id: String,

    /// Question this response answers
    #[sea_orm(indexed)]
    pub question_id: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub visibility: Visibility,

    /// Explicit friend share list (empty = no restriction)
    #[sea_orm(column_type = "JsonBinary")]
    pub share_friend_ids: Json,

    /// Explicit friend-group share list (empty = no restriction)
    #[sea_orm(column_type = "JsonBinary")]
    pub share_group_ids: Json,

    /// Users who have read this response
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
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id",
        on_delete = "Cascade"
    )]
    Question,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
