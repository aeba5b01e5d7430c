//! Materialized ancestor closure of the department tree
//!
//! One row per (department, ancestor) pair. `position` orders the ancestors of
//! a department: `0` is the oldest root, the immediate parent has the highest
//! position.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "department_ancestors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub department_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub ancestor_id: i64,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id",
        on_delete = "Cascade"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::AncestorId",
        to = "super::departments::Column::Id"
    )]
    Ancestor,
}

impl ActiveModelBehavior for ActiveModel {}
