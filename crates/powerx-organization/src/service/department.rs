//! Department hierarchy
//!
//! Departments form a tree under a single reserved root. The full ancestor
//! chain of every department is materialized in `department_ancestors` when
//! the department is created, so ancestry queries never walk the tree.

use std::collections::HashMap;

use chrono::Local;
use powerx_common::{OrgError, OrgResult, Page, PageOption};
use powerx_persistence::entity::{department_ancestors, departments, employees};
use powerx_persistence::sea_orm::*;
use powerx_persistence::{DepartmentAncestors, Departments, Employees};
use tracing::{info, instrument, warn};

use super::{count_rows, is_unique_violation};
use crate::model::{Department, Employee, FindManyDepartmentsOption};

#[derive(Debug, Clone)]
pub struct DepartmentHierarchy {
    db: DatabaseConnection,
}

impl DepartmentHierarchy {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the reserved root department when the table is empty.
    ///
    /// Returns `true` if the root was created by this call.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> OrgResult<bool> {
        let tx = self.db.begin().await?;

        if count_rows(Departments::find(), &tx).await? > 0 {
            return Ok(false);
        }

        // A concurrent initializer that committed first trips the root_guard
        // unique index; that counts as already initialized.
        let Some(root) = insert_root(&tx).await? else {
            return Ok(false);
        };
        match tx.commit().await {
            Ok(()) => {}
            Err(e) if is_unique_violation(&e) => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        info!(id = root.id, "root department created");
        Ok(true)
    }

    /// Creates a department under `department.parent_id`.
    ///
    /// The new department inherits the parent's ancestors followed by the
    /// parent itself. A non-zero `leader_id` must name an existing employee.
    /// Parent and leader lookups and both inserts share one transaction.
    #[instrument(skip(self, department), fields(name = %department.name, parent_id = department.parent_id))]
    pub async fn create(&self, department: &Department) -> OrgResult<Department> {
        if department.parent_id == 0 {
            return Err(OrgError::validation("parent department id is required"));
        }
        if department.name.trim().is_empty() {
            return Err(OrgError::validation("department name is required"));
        }

        let tx = self.db.begin().await?;

        let parent = Departments::find_by_id(department.parent_id)
            .one(&tx)
            .await?
            .ok_or_else(|| {
                OrgError::not_found(format!(
                    "parent department {} not found",
                    department.parent_id
                ))
            })?;

        // Shared lock: an employee deletion waits for this transaction and
        // then resets the leader reference it commits.
        if department.leader_id != 0
            && Employees::find_by_id(department.leader_id)
                .lock_shared()
                .one(&tx)
                .await?
                .is_none()
        {
            return Err(OrgError::not_found(format!(
                "leader employee {} not found",
                department.leader_id
            )));
        }

        let mut ancestors = load_ancestors(&tx, &[parent.id])
            .await?
            .remove(&parent.id)
            .unwrap_or_default();
        ancestors.push(Department::from(parent));

        let model = new_active_model(department, department.parent_id, false)
            .insert(&tx)
            .await?;

        let rows = ancestors
            .iter()
            .enumerate()
            .map(|(position, ancestor)| department_ancestors::ActiveModel {
                department_id: Set(model.id),
                ancestor_id: Set(ancestor.id),
                position: Set(position as i32),
            });
        DepartmentAncestors::insert_many(rows)
            .exec_without_returning(&tx)
            .await
            .map_err(|e| parent_removed_or_store(e, department.parent_id))?;

        tx.commit()
            .await
            .map_err(|e| parent_removed_or_store(e, department.parent_id))?;

        info!(id = model.id, depth = ancestors.len(), "department created");

        let mut created = Department::from(model);
        created.ancestors = ancestors;
        Ok(created)
    }

    /// Finds a department with its leader and ancestor chain resolved.
    pub async fn find_by_id(&self, id: i64) -> OrgResult<Department> {
        let (model, leader) = Departments::find_by_id(id)
            .find_also_related(Employees)
            .one(&self.db)
            .await?
            .ok_or_else(|| OrgError::not_found(format!("department {} not found", id)))?;

        let mut department = with_leader(model, leader);
        department.ancestors = load_ancestors(&self.db, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        Ok(department)
    }

    pub async fn find_many_page(
        &self,
        option: &PageOption<FindManyDepartmentsOption>,
    ) -> OrgResult<Page<Department>> {
        let mut condition = Condition::all();
        if !option.option.dep_ids.is_empty() {
            condition = condition.add(departments::Column::Id.is_in(option.option.dep_ids.clone()));
        }

        let total_count =
            count_rows(Departments::find().filter(condition.clone()), &self.db).await?;
        if total_count == 0 {
            return Ok(Page::new(0, option.page_index, option.page_size, vec![]));
        }

        let mut query_select = Departments::find()
            .filter(condition)
            .order_by_asc(departments::Column::Id);
        if let Some((offset, limit)) = option.window() {
            query_select = query_select.offset(offset).limit(limit);
        }

        let items = query_select
            .find_also_related(Employees)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(model, leader)| with_leader(model, leader))
            .collect();

        Ok(Page::new(
            total_count,
            option.page_index,
            option.page_size,
            items,
        ))
    }

    /// Returns `root_id` and every department below it, each with leader and
    /// ancestor chain resolved.
    pub async fn find_all_by_root_id(&self, root_id: i64) -> OrgResult<Vec<Department>> {
        let mut ids: Vec<i64> = DepartmentAncestors::find()
            .select_only()
            .column(department_ancestors::Column::DepartmentId)
            .filter(department_ancestors::Column::AncestorId.eq(root_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;
        ids.push(root_id);

        let mut departments: Vec<Department> = Departments::find()
            .filter(departments::Column::Id.is_in(ids.clone()))
            .order_by_asc(departments::Column::Id)
            .find_also_related(Employees)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(model, leader)| with_leader(model, leader))
            .collect();

        if departments.is_empty() {
            return Err(OrgError::not_found(format!(
                "root department {} not found",
                root_id
            )));
        }

        let mut ancestors = load_ancestors(&self.db, &ids).await?;
        for department in departments.iter_mut() {
            department.ancestors = ancestors.remove(&department.id).unwrap_or_default();
        }

        Ok(departments)
    }

    pub async fn find_all(&self) -> OrgResult<Vec<Department>> {
        let departments = Departments::find()
            .order_by_asc(departments::Column::Id)
            .find_also_related(Employees)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(model, leader)| with_leader(model, leader))
            .collect();

        Ok(departments)
    }

    /// Counts the employees whose department is one of `dep_ids`. An empty
    /// list counts nothing.
    pub async fn count_employees_in_departments(&self, dep_ids: &[i64]) -> OrgResult<u64> {
        if dep_ids.is_empty() {
            return Ok(0);
        }

        let count = count_rows(
            Employees::find().filter(employees::Column::DepartmentId.is_in(dep_ids.to_vec())),
            &self.db,
        )
        .await?;
        Ok(count)
    }

    pub async fn exists(&self, id: i64) -> OrgResult<bool> {
        let count = count_rows(
            Departments::find().filter(departments::Column::Id.eq(id)),
            &self.db,
        )
        .await?;
        Ok(count > 0)
    }

    /// Deletes a leaf department.
    ///
    /// Missing and reserved departments both fail with `NotFound`; a department
    /// that still has descendants fails with `Conflict`.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> OrgResult<()> {
        let tx = self.db.begin().await?;

        match Departments::find_by_id(id).one(&tx).await? {
            Some(model) if !model.is_reserved => {}
            Some(_) => {
                warn!(id, "deletion of reserved department rejected");
                return Err(OrgError::not_found(format!("department {} not found", id)));
            }
            None => return Err(OrgError::not_found(format!("department {} not found", id))),
        }

        let descendants = count_rows(
            DepartmentAncestors::find()
                .filter(department_ancestors::Column::AncestorId.eq(id)),
            &tx,
        )
        .await?;
        if descendants > 0 {
            return Err(OrgError::conflict(format!(
                "department {} still has {} sub-departments",
                id, descendants
            )));
        }

        DepartmentAncestors::delete_many()
            .filter(department_ancestors::Column::DepartmentId.eq(id))
            .exec(&tx)
            .await?;
        Departments::delete_by_id(id).exec(&tx).await?;

        tx.commit().await?;

        info!(id, "department deleted");
        Ok(())
    }

    /// Checks that exactly one reserved root department exists and returns it.
    pub async fn ensure_single_root(&self) -> OrgResult<Department> {
        let mut roots = Departments::find()
            .filter(departments::Column::ParentId.eq(0))
            .filter(departments::Column::IsReserved.eq(true))
            .all(&self.db)
            .await?;

        match roots.len() {
            1 => Ok(Department::from(roots.remove(0))),
            0 => Err(OrgError::Invariant(
                "no reserved root department exists".to_string(),
            )),
            n => Err(OrgError::Invariant(format!(
                "{} reserved root departments exist, expected exactly one",
                n
            ))),
        }
    }
}

fn new_active_model(
    department: &Department,
    parent_id: i64,
    is_reserved: bool,
) -> departments::ActiveModel {
    let now = Local::now().naive_local();

    departments::ActiveModel {
        id: NotSet,
        name: Set(department.name.clone()),
        parent_id: Set(parent_id),
        leader_id: Set(department.leader_id),
        description: Set(department.desc.clone()),
        phone_number: Set(department.phone_number.clone()),
        email: Set(department.email.clone()),
        remark: Set(department.remark.clone()),
        is_reserved: Set(is_reserved),
        root_guard: Set(is_reserved.then_some(true)),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Inserts the reserved root. Returns `None` when another root already holds
/// the `root_guard` slot.
async fn insert_root<C: ConnectionTrait>(db: &C) -> OrgResult<Option<departments::Model>> {
    match new_active_model(&Department::root(), 0, true).insert(db).await {
        Ok(root) => Ok(Some(root)),
        Err(e) if is_unique_violation(&e) => {
            warn!("reserved root department already exists");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn with_leader(model: departments::Model, leader: Option<employees::Model>) -> Department {
    let mut department = Department::from(model);
    department.leader = leader.map(|e| Box::new(Employee::from(e)));
    department
}

/// Loads the ordered ancestor chains of `ids`, keyed by department id.
async fn load_ancestors<C: ConnectionTrait>(
    db: &C,
    ids: &[i64],
) -> Result<HashMap<i64, Vec<Department>>, DbErr> {
    let rows = DepartmentAncestors::find()
        .filter(department_ancestors::Column::DepartmentId.is_in(ids.to_vec()))
        .order_by_asc(department_ancestors::Column::DepartmentId)
        .order_by_asc(department_ancestors::Column::Position)
        .all(db)
        .await?;
    if rows.is_empty() {
        return Ok(HashMap::new());
    }

    let mut ancestor_ids: Vec<i64> = rows.iter().map(|r| r.ancestor_id).collect();
    ancestor_ids.sort_unstable();
    ancestor_ids.dedup();

    let by_id: HashMap<i64, departments::Model> = Departments::find()
        .filter(departments::Column::Id.is_in(ancestor_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    let mut chains: HashMap<i64, Vec<Department>> = HashMap::new();
    for row in rows {
        if let Some(ancestor) = by_id.get(&row.ancestor_id) {
            chains
                .entry(row.department_id)
                .or_default()
                .push(Department::from(ancestor.clone()));
        }
    }

    Ok(chains)
}

fn parent_removed_or_store(err: DbErr, parent_id: i64) -> OrgError {
    if matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
        OrgError::not_found(format!("parent department {} not found", parent_id))
    } else {
        OrgError::Store(err)
    }
}
