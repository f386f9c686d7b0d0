//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Unique handle the user signs in and is addressed with
    #[sea_orm(unique)]
    pub handle: String,

    pub handle_lower: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 password hash
    pub password_hash: String,

    /// Access token (bearer credential)
    #[sea_orm(unique, nullable)]
    pub token: Option<String>,

    /// Display name
    #[sea_orm(nullable)]
    pub display_name: Option<String>,

    /// Short profile text
    #[sea_orm(nullable)]
    pub bio: Option<String>,

    /// Fallback avatar color, e.g. "#1A2B3C"
    pub profile_color: String,

    /// Preferred language code for localized clients
    pub language: String,

    /// IANA timezone name
    pub timezone: String,

    /// Is this the system actor used for onboarding notifications?
    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    /// Soft-delete marker; non-null means the account is removed
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::note::Entity")]
    Notes,

    #[sea_orm(has_many = "super::response::Entity")]
    Responses,

    #[sea_orm(has_many = "super::check_in::Entity")]
    CheckIns,

    #[sea_orm(has_many = "super::friend_group::Entity")]
    FriendGroups,
}

impl Related<super::note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notes.def()
    }
}

impl Related<super::response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responses.def()
    }
}

impl Related<super::friend_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FriendGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
