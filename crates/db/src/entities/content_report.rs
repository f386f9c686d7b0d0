//! Content report entity (viewer-filed reports on individual posts).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Content kinds a report can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    #[sea_orm(string_value = "response")]
    Response,
    #[sea_orm(string_value = "note")]
    Note,
    #[sea_orm(string_value = "checkIn")]
    CheckIn,
    #[sea_orm(string_value = "moment")]
    Moment,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user who filed the report
    pub reporter_id: String,

    /// Kind of the reported content item
    pub target_kind: ContentKind,

    /// ID of the reported content item
    pub target_id: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReporterId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Reporter,
}

impl ActiveModelBehavior for ActiveModel {}
