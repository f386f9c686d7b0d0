//! Friendship entity (symmetric friend edges).
//!
//! One row per unordered pair; `user_a_id` always sorts before `user_b_id`,
//! so symmetry holds by construction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friendship")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Lexicographically smaller user ID of the pair
    pub user_a_id: String,

    /// Lexicographically larger user ID of the pair
    pub user_b_id: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserAId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    UserA,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserBId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    UserB,
}

impl ActiveModelBehavior for ActiveModel {}
