//! Employee entity
//!
//! `department_id` uses `0` for "not assigned". The password column only ever
//! holds a bcrypt hash.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub account: String,
    pub name: String,
    pub nick_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub position: String,
    pub job_title: String,
    pub department_id: i64,
    pub mobile_phone: String,
    /// One of `male`, `female`, `un_know`
    pub gender: String,
    pub email: String,
    pub external_email: String,
    pub avatar: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// One of `enabled`, `disabled`
    pub status: String,
    pub is_reserved: bool,
    pub is_activated: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
