//! Department entity
//!
//! `parent_id` and `leader_id` use `0` for "none". The ancestor set of each
//! department lives in `department_ancestors`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub parent_id: i64,
    pub leader_id: i64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub phone_number: String,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub remark: String,
    pub is_reserved: bool,
    /// `Some(true)` on the reserved root only. A unique index on this column
    /// allows a single root; every other department stores NULL.
    pub root_guard: Option<bool>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::LeaderId",
        to = "super::employees::Column::Id"
    )]
    Leader,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Leader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
