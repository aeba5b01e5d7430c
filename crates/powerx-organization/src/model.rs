//! Organization models
//!
//! This file defines the employee and department domain types, the query
//! options accepted by the directory and hierarchy services, and the
//! conversions from the persisted entity models.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use powerx_persistence::entity::{departments, employees};

pub const ROOT_DEPARTMENT_NAME: &str = "组织架构";
pub const ROOT_DEPARTMENT_DESC: &str = "根节点, 别删除";

/// Employee gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "un_know",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "un_know" => Ok(Gender::Unknown),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

/// Employee account status, independent of `is_activated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[default]
    Enabled,
    Disabled,
}

impl EmployeeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeStatus::Enabled => "enabled",
            EmployeeStatus::Disabled => "disabled",
        }
    }
}

impl Display for EmployeeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(EmployeeStatus::Enabled),
            "disabled" => Ok(EmployeeStatus::Disabled),
            _ => Err(format!("Invalid employee status: {}", s)),
        }
    }
}

/// Employee record
///
/// `id == 0` marks a record that has not been persisted yet. `department_id`
/// uses `0` for "not assigned"; `department` is only populated by queries
/// that resolve the relation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub account: String,
    pub name: String,
    pub nick_name: String,
    pub desc: String,
    pub position: String,
    pub job_title: String,
    pub department_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Box<Department>>,
    pub mobile_phone: String,
    pub gender: Gender,
    pub email: String,
    pub external_email: String,
    pub avatar: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub status: EmployeeStatus,
    pub is_reserved: bool,
    pub is_activated: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<employees::Model> for Employee {
    fn from(value: employees::Model) -> Self {
        Self {
            id: value.id,
            account: value.account,
            name: value.name,
            nick_name: value.nick_name,
            desc: value.description,
            position: value.position,
            job_title: value.job_title,
            department_id: value.department_id,
            department: None,
            mobile_phone: value.mobile_phone,
            gender: value.gender.parse().unwrap_or_default(),
            email: value.email,
            external_email: value.external_email,
            avatar: value.avatar,
            password: value.password,
            status: value.status.parse().unwrap_or_default(),
            is_reserved: value.is_reserved,
            is_activated: value.is_activated,
            created_at: Some(value.created_at),
            updated_at: Some(value.updated_at),
        }
    }
}

impl Employee {
    pub(crate) fn with_department(mut self, department: Option<departments::Model>) -> Self {
        self.department = department.map(|d| Box::new(Department::from(d)));
        self
    }
}

/// Partial employee update. `None` fields are left untouched.
///
/// The reserved flag is not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    pub account: Option<String>,
    pub name: Option<String>,
    pub nick_name: Option<String>,
    pub desc: Option<String>,
    pub position: Option<String>,
    pub job_title: Option<String>,
    pub department_id: Option<i64>,
    pub mobile_phone: Option<String>,
    pub gender: Option<Gender>,
    pub email: Option<String>,
    pub external_email: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub is_activated: Option<bool>,
}

/// Department record
///
/// `ancestors` is ordered from the oldest root to the immediate parent. The
/// departments inside `ancestors` carry neither leader nor ancestors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub parent_id: i64,
    pub leader_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<Box<Employee>>,
    pub ancestors: Vec<Department>,
    pub desc: String,
    pub phone_number: String,
    pub email: String,
    pub remark: String,
    pub is_reserved: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<departments::Model> for Department {
    fn from(value: departments::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            parent_id: value.parent_id,
            leader_id: value.leader_id,
            leader: None,
            ancestors: Vec::new(),
            desc: value.description,
            phone_number: value.phone_number,
            email: value.email,
            remark: value.remark,
            is_reserved: value.is_reserved,
            created_at: Some(value.created_at),
            updated_at: Some(value.updated_at),
        }
    }
}

impl Department {
    /// The bootstrap root of the department tree.
    pub fn root() -> Self {
        Self {
            name: ROOT_DEPARTMENT_NAME.to_string(),
            parent_id: 0,
            desc: ROOT_DEPARTMENT_DESC.to_string(),
            is_reserved: true,
            ..Default::default()
        }
    }

    pub fn ancestor_ids(&self) -> Vec<i64> {
        self.ancestors.iter().map(|a| a.id).collect()
    }
}

/// Employee search filter
///
/// Fields are AND-combined. For name, email and phone an exact list takes
/// precedence over the prefix match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindManyEmployeesOption {
    pub ids: Vec<i64>,
    pub accounts: Vec<String>,
    pub names: Vec<String>,
    pub like_name: String,
    pub emails: Vec<String>,
    pub like_email: String,
    pub dep_ids: Vec<i64>,
    pub positions: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub like_phone_number: String,
    pub statuses: Vec<EmployeeStatus>,
}

/// Identifying fields used to look an employee up at login
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginOption {
    pub account: String,
    pub phone_number: String,
    pub email: String,
}

impl EmployeeLoginOption {
    pub fn is_empty(&self) -> bool {
        self.account.is_empty() && self.phone_number.is_empty() && self.email.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindManyDepartmentsOption {
    pub dep_ids: Vec<i64>,
}
