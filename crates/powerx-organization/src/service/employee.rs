//! Employee directory
//!
//! Owns the `employees` table. Every mutation runs inside a transaction and
//! applies the reserved-row guard: a reserved or missing row surfaces as
//! `NotFound` without distinguishing the two cases.

use chrono::Local;
use powerx_common::{OrgError, OrgResult, Page, PageOption};
use powerx_persistence::entity::{departments, employees};
use powerx_persistence::sea_orm::prelude::Expr;
use powerx_persistence::sea_orm::*;
use powerx_persistence::{Departments, Employees};
use tracing::{info, instrument, warn};

use super::{count_rows, is_unique_violation, prefix_like};
use crate::credential::CredentialService;
use crate::model::{Employee, EmployeeLoginOption, EmployeePatch, FindManyEmployeesOption};

#[derive(Debug, Clone)]
pub struct EmployeeDirectory {
    db: DatabaseConnection,
    credentials: CredentialService,
}

impl EmployeeDirectory {
    pub fn new(db: DatabaseConnection, credentials: CredentialService) -> Self {
        Self { db, credentials }
    }

    /// Creates an employee and returns its id.
    ///
    /// A non-empty password is hashed before it reaches the store.
    #[instrument(skip(self, employee), fields(account = %employee.account))]
    pub async fn create(&self, employee: &Employee) -> OrgResult<i64> {
        if employee.account.trim().is_empty() {
            return Err(OrgError::validation("employee account is required"));
        }

        let password = self.hash_if_present(&employee.password)?;
        let now = Local::now().naive_local();

        let tx = self.db.begin().await?;

        ensure_account_free(&tx, &employee.account, None).await?;

        let entity = employees::ActiveModel {
            id: NotSet,
            account: Set(employee.account.clone()),
            name: Set(employee.name.clone()),
            nick_name: Set(employee.nick_name.clone()),
            description: Set(employee.desc.clone()),
            position: Set(employee.position.clone()),
            job_title: Set(employee.job_title.clone()),
            department_id: Set(employee.department_id),
            mobile_phone: Set(employee.mobile_phone.clone()),
            gender: Set(employee.gender.as_str().to_string()),
            email: Set(employee.email.clone()),
            external_email: Set(employee.external_email.clone()),
            avatar: Set(employee.avatar.clone()),
            password: Set(password),
            status: Set(employee.status.as_str().to_string()),
            is_reserved: Set(employee.is_reserved),
            is_activated: Set(employee.is_activated),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = entity
            .insert(&tx)
            .await
            .map_err(|e| conflict_or_store(e, &employee.account))?;
        tx.commit()
            .await
            .map_err(|e| conflict_or_store(e, &employee.account))?;

        info!(id = model.id, "employee created");
        Ok(model.id)
    }

    /// Applies the `Some` fields of `patch` to employee `id`.
    #[instrument(skip(self, patch))]
    pub async fn patch_by_id(&self, patch: &EmployeePatch, id: i64) -> OrgResult<()> {
        if patch.account.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err(OrgError::validation("employee account is required"));
        }
        let password = patch
            .password
            .as_deref()
            .map(|p| self.hash_if_present(p))
            .transpose()?;

        let tx = self.db.begin().await?;

        let current = find_mutable(&tx, id).await?;
        if let Some(account) = &patch.account {
            ensure_account_free(&tx, account, Some(id)).await?;
        }

        let mut entity: employees::ActiveModel = current.into();
        if let Some(v) = &patch.account {
            entity.account = Set(v.clone());
        }
        if let Some(v) = &patch.name {
            entity.name = Set(v.clone());
        }
        if let Some(v) = &patch.nick_name {
            entity.nick_name = Set(v.clone());
        }
        if let Some(v) = &patch.desc {
            entity.description = Set(v.clone());
        }
        if let Some(v) = &patch.position {
            entity.position = Set(v.clone());
        }
        if let Some(v) = &patch.job_title {
            entity.job_title = Set(v.clone());
        }
        if let Some(v) = patch.department_id {
            entity.department_id = Set(v);
        }
        if let Some(v) = &patch.mobile_phone {
            entity.mobile_phone = Set(v.clone());
        }
        if let Some(v) = patch.gender {
            entity.gender = Set(v.as_str().to_string());
        }
        if let Some(v) = &patch.email {
            entity.email = Set(v.clone());
        }
        if let Some(v) = &patch.external_email {
            entity.external_email = Set(v.clone());
        }
        if let Some(v) = &patch.avatar {
            entity.avatar = Set(v.clone());
        }
        // An empty password in a patch keeps the stored hash.
        if let Some(v) = password.filter(|p| !p.is_empty()) {
            entity.password = Set(v);
        }
        if let Some(v) = patch.status {
            entity.status = Set(v.as_str().to_string());
        }
        if let Some(v) = patch.is_activated {
            entity.is_activated = Set(v);
        }
        entity.updated_at = Set(Local::now().naive_local());

        let account = patch.account.clone().unwrap_or_default();
        entity
            .update(&tx)
            .await
            .map_err(|e| conflict_or_store(e, &account))?;
        tx.commit().await?;

        Ok(())
    }

    /// Replaces every mutable attribute of employee `id` with the values of
    /// `employee`. An empty password keeps the stored hash; the reserved flag
    /// is never changed.
    #[instrument(skip(self, employee), fields(account = %employee.account))]
    pub async fn update_by_id(&self, employee: &Employee, id: i64) -> OrgResult<()> {
        if employee.account.trim().is_empty() {
            return Err(OrgError::validation("employee account is required"));
        }
        let password = self.hash_if_present(&employee.password)?;

        let tx = self.db.begin().await?;

        let current = find_mutable(&tx, id).await?;
        ensure_account_free(&tx, &employee.account, Some(id)).await?;

        let mut entity: employees::ActiveModel = current.into();
        entity.account = Set(employee.account.clone());
        entity.name = Set(employee.name.clone());
        entity.nick_name = Set(employee.nick_name.clone());
        entity.description = Set(employee.desc.clone());
        entity.position = Set(employee.position.clone());
        entity.job_title = Set(employee.job_title.clone());
        entity.department_id = Set(employee.department_id);
        entity.mobile_phone = Set(employee.mobile_phone.clone());
        entity.gender = Set(employee.gender.as_str().to_string());
        entity.email = Set(employee.email.clone());
        entity.external_email = Set(employee.external_email.clone());
        entity.avatar = Set(employee.avatar.clone());
        if !password.is_empty() {
            entity.password = Set(password);
        }
        entity.status = Set(employee.status.as_str().to_string());
        entity.is_activated = Set(employee.is_activated);
        entity.updated_at = Set(Local::now().naive_local());

        entity
            .update(&tx)
            .await
            .map_err(|e| conflict_or_store(e, &employee.account))?;
        tx.commit().await?;

        Ok(())
    }

    /// Deletes employee `id` and clears any department leadership it held.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> OrgResult<()> {
        let tx = self.db.begin().await?;

        find_mutable(&tx, id).await?;

        Departments::update_many()
            .col_expr(departments::Column::LeaderId, Expr::value(0i64))
            .filter(departments::Column::LeaderId.eq(id))
            .exec(&tx)
            .await?;

        let result = Employees::delete_many()
            .filter(employees::Column::Id.eq(id))
            .filter(employees::Column::IsReserved.eq(false))
            .exec(&tx)
            .await?;
        if result.rows_affected == 0 {
            return Err(OrgError::not_found(format!("employee {} not found", id)));
        }

        tx.commit().await?;

        info!(id, "employee deleted");
        Ok(())
    }

    /// Finds an employee with its department resolved.
    pub async fn find_by_id(&self, id: i64) -> OrgResult<Employee> {
        Employees::find_by_id(id)
            .find_also_related(Departments)
            .one(&self.db)
            .await?
            .map(|(employee, department)| Employee::from(employee).with_department(department))
            .ok_or_else(|| OrgError::not_found(format!("employee {} not found", id)))
    }

    /// Finds the employee matching every non-empty field of `option`.
    pub async fn find_by_login_option(&self, option: &EmployeeLoginOption) -> OrgResult<Employee> {
        if option.is_empty() {
            return Err(OrgError::validation(
                "one of account, email or phone number is required",
            ));
        }

        let mut select = Employees::find();
        if !option.account.is_empty() {
            select = select.filter(employees::Column::Account.eq(option.account.as_str()));
        }
        if !option.email.is_empty() {
            select = select.filter(employees::Column::Email.eq(option.email.as_str()));
        }
        if !option.phone_number.is_empty() {
            select =
                select.filter(employees::Column::MobilePhone.eq(option.phone_number.as_str()));
        }

        select
            .order_by_asc(employees::Column::Id)
            .one(&self.db)
            .await?
            .map(Employee::from)
            .ok_or_else(|| OrgError::not_found("employee does not exist, check the login info"))
    }

    /// Searches employees. The total is counted over the filtered set before
    /// the page window is applied.
    pub async fn find_many_page(
        &self,
        option: &PageOption<FindManyEmployeesOption>,
    ) -> OrgResult<Page<Employee>> {
        let condition = build_find_many_condition(&option.option);

        let total_count =
            count_rows(Employees::find().filter(condition.clone()), &self.db).await?;
        if total_count == 0 {
            return Ok(Page::new(0, option.page_index, option.page_size, vec![]));
        }

        let mut query_select = Employees::find()
            .filter(condition)
            .order_by_asc(employees::Column::Id);
        if let Some((offset, limit)) = option.window() {
            query_select = query_select.offset(offset).limit(limit);
        }

        let items = query_select
            .find_also_related(Departments)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(employee, department)| Employee::from(employee).with_department(department))
            .collect();

        Ok(Page::new(
            total_count,
            option.page_index,
            option.page_size,
            items,
        ))
    }

    /// Distinct, non-empty positions currently in use.
    pub async fn find_all_positions(&self) -> OrgResult<Vec<String>> {
        let positions = Employees::find()
            .select_only()
            .column(employees::Column::Position)
            .distinct()
            .filter(employees::Column::Position.ne(""))
            .order_by_asc(employees::Column::Position)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(positions)
    }

    pub async fn exists(&self, id: i64) -> OrgResult<bool> {
        let count = count_rows(
            Employees::find().filter(employees::Column::Id.eq(id)),
            &self.db,
        )
        .await?;
        Ok(count > 0)
    }

    fn hash_if_present(&self, password: &str) -> OrgResult<String> {
        if password.is_empty() {
            return Ok(String::new());
        }
        self.credentials.hash(password)
    }
}

/// Builds the AND-combined filter of [`FindManyEmployeesOption`].
pub(crate) fn build_find_many_condition(option: &FindManyEmployeesOption) -> Condition {
    let mut condition = Condition::all();

    if !option.ids.is_empty() {
        condition = condition.add(employees::Column::Id.is_in(option.ids.clone()));
    }
    if !option.names.is_empty() {
        condition = condition.add(employees::Column::Name.is_in(option.names.clone()));
    } else if !option.like_name.is_empty() {
        condition = condition.add(employees::Column::Name.like(prefix_like(&option.like_name)));
    }
    if !option.emails.is_empty() {
        condition = condition.add(employees::Column::Email.is_in(option.emails.clone()));
    } else if !option.like_email.is_empty() {
        condition = condition.add(employees::Column::Email.like(prefix_like(&option.like_email)));
    }
    if !option.phone_numbers.is_empty() {
        condition =
            condition.add(employees::Column::MobilePhone.is_in(option.phone_numbers.clone()));
    } else if !option.like_phone_number.is_empty() {
        condition = condition.add(
            employees::Column::MobilePhone.like(prefix_like(&option.like_phone_number)),
        );
    }
    if !option.positions.is_empty() {
        condition = condition.add(employees::Column::Position.is_in(option.positions.clone()));
    }
    if !option.accounts.is_empty() {
        condition = condition.add(employees::Column::Account.is_in(option.accounts.clone()));
    }
    if !option.dep_ids.is_empty() {
        condition = condition.add(employees::Column::DepartmentId.is_in(option.dep_ids.clone()));
    }
    if !option.statuses.is_empty() {
        condition = condition.add(
            employees::Column::Status.is_in(option.statuses.iter().map(|s| s.as_str())),
        );
    }

    condition
}

/// Loads and row-locks employee `id` unless it is missing or reserved.
///
/// The exclusive lock orders a deletion against a concurrent department
/// create that holds a shared lock on the same employee as its leader.
async fn find_mutable<C: ConnectionTrait>(db: &C, id: i64) -> OrgResult<employees::Model> {
    match Employees::find_by_id(id).lock_exclusive().one(db).await? {
        Some(model) if !model.is_reserved => Ok(model),
        Some(_) => {
            warn!(id, "mutation of reserved employee rejected");
            Err(OrgError::not_found(format!("employee {} not found", id)))
        }
        None => Err(OrgError::not_found(format!("employee {} not found", id))),
    }
}

/// Fails with `Conflict` when `account` belongs to an employee other than `except`.
async fn ensure_account_free<C: ConnectionTrait>(
    db: &C,
    account: &str,
    except: Option<i64>,
) -> OrgResult<()> {
    let mut select = Employees::find().filter(employees::Column::Account.eq(account));
    if let Some(id) = except {
        select = select.filter(employees::Column::Id.ne(id));
    }

    if count_rows(select, db).await? > 0 {
        return Err(OrgError::conflict(format!(
            "employee account '{}' already exists",
            account
        )));
    }
    Ok(())
}

fn conflict_or_store(err: DbErr, account: &str) -> OrgError {
    if is_unique_violation(&err) {
        OrgError::conflict(format!("employee account '{}' already exists", account))
    } else {
        OrgError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmployeeStatus, Gender};
    use crate::testing::{credentials, setup_db};

    fn employee(account: &str) -> Employee {
        Employee {
            account: account.to_string(),
            name: account.to_string(),
            ..Default::default()
        }
    }

    async fn directory() -> EmployeeDirectory {
        EmployeeDirectory::new(setup_db().await, credentials())
    }

    async fn insert_reserved(directory: &EmployeeDirectory) -> i64 {
        directory
            .create(&Employee {
                account: "admin".to_string(),
                name: "admin".to_string(),
                is_reserved: true,
                ..Default::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let directory = directory().await;
        let id = directory
            .create(&Employee {
                password: "p@ssw0rd".to_string(),
                ..employee("alice")
            })
            .await
            .unwrap();

        let stored = directory.find_by_id(id).await.unwrap();
        assert_ne!(stored.password, "p@ssw0rd");
        assert!(credentials().verify(&stored.password, "p@ssw0rd"));
    }

    #[tokio::test]
    async fn test_create_without_password_stores_empty() {
        let directory = directory().await;
        let id = directory.create(&employee("bob")).await.unwrap();

        let stored = directory.find_by_id(id).await.unwrap();
        assert!(stored.password.is_empty());
        assert_eq!(stored.status, EmployeeStatus::Enabled);
        assert_eq!(stored.gender, Gender::Unknown);
    }

    #[tokio::test]
    async fn test_create_requires_account() {
        let directory = directory().await;
        let err = directory.create(&employee("  ")).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_create_duplicate_account_conflicts() {
        let directory = directory().await;
        directory.create(&employee("carol")).await.unwrap();

        let err = directory.create(&employee("carol")).await.unwrap_err();
        assert!(err.is_conflict());

        let page = directory
            .find_many_page(&PageOption::new(
                FindManyEmployeesOption {
                    accounts: vec!["carol".to_string()],
                    ..Default::default()
                },
                0,
                0,
            ))
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let directory = directory().await;
        assert!(directory.find_by_id(42).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_patch_updates_only_given_fields() {
        let directory = directory().await;
        let id = directory
            .create(&Employee {
                email: "dave@x".to_string(),
                position: "engineer".to_string(),
                ..employee("dave")
            })
            .await
            .unwrap();

        directory
            .patch_by_id(
                &EmployeePatch {
                    position: Some("manager".to_string()),
                    status: Some(EmployeeStatus::Disabled),
                    password: Some("new-secret".to_string()),
                    ..Default::default()
                },
                id,
            )
            .await
            .unwrap();

        let stored = directory.find_by_id(id).await.unwrap();
        assert_eq!(stored.position, "manager");
        assert_eq!(stored.email, "dave@x");
        assert_eq!(stored.status, EmployeeStatus::Disabled);
        assert!(credentials().verify(&stored.password, "new-secret"));
    }

    #[tokio::test]
    async fn test_patch_missing_employee() {
        let directory = directory().await;
        let err = directory
            .patch_by_id(&EmployeePatch::default(), 7)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_patch_account_to_existing_conflicts() {
        let directory = directory().await;
        directory.create(&employee("erin")).await.unwrap();
        let id = directory.create(&employee("frank")).await.unwrap();

        let err = directory
            .patch_by_id(
                &EmployeePatch {
                    account: Some("erin".to_string()),
                    ..Default::default()
                },
                id,
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_reserved_employee_is_protected() {
        let directory = directory().await;
        let id = insert_reserved(&directory).await;

        let err = directory
            .patch_by_id(
                &EmployeePatch {
                    name: Some("hijacked".to_string()),
                    ..Default::default()
                },
                id,
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = directory
            .update_by_id(&employee("hijacked"), id)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = directory.delete_by_id(id).await.unwrap_err();
        assert!(err.is_not_found());

        let stored = directory.find_by_id(id).await.unwrap();
        assert_eq!(stored.account, "admin");
        assert_eq!(stored.name, "admin");
        assert!(stored.is_reserved);
    }

    #[tokio::test]
    async fn test_update_replaces_attributes_and_keeps_password() {
        let directory = directory().await;
        let id = directory
            .create(&Employee {
                password: "keep-me".to_string(),
                position: "engineer".to_string(),
                ..employee("grace")
            })
            .await
            .unwrap();

        directory
            .update_by_id(
                &Employee {
                    name: "Grace H".to_string(),
                    gender: Gender::Female,
                    ..employee("grace")
                },
                id,
            )
            .await
            .unwrap();

        let stored = directory.find_by_id(id).await.unwrap();
        assert_eq!(stored.name, "Grace H");
        assert_eq!(stored.position, "");
        assert_eq!(stored.gender, Gender::Female);
        assert!(credentials().verify(&stored.password, "keep-me"));
    }

    #[tokio::test]
    async fn test_delete_employee() {
        let directory = directory().await;
        let id = directory.create(&employee("heidi")).await.unwrap();

        directory.delete_by_id(id).await.unwrap();
        assert!(directory.find_by_id(id).await.unwrap_err().is_not_found());
        assert!(directory.delete_by_id(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_login_option() {
        let directory = directory().await;
        directory
            .create(&Employee {
                email: "ivan@x".to_string(),
                mobile_phone: "13800000000".to_string(),
                ..employee("ivan")
            })
            .await
            .unwrap();

        let by_account = directory
            .find_by_login_option(&EmployeeLoginOption {
                account: "ivan".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_account.email, "ivan@x");

        let by_phone = directory
            .find_by_login_option(&EmployeeLoginOption {
                phone_number: "13800000000".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_phone.account, "ivan");

        let err = directory
            .find_by_login_option(&EmployeeLoginOption {
                email: "nobody@x".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = directory
            .find_by_login_option(&EmployeeLoginOption::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_find_many_filter_composition() {
        let directory = directory().await;
        let a = directory
            .create(&Employee {
                name: "al".to_string(),
                email: "a@x".to_string(),
                ..employee("a")
            })
            .await
            .unwrap();
        let b = directory
            .create(&Employee {
                name: "al".to_string(),
                email: "b@x".to_string(),
                ..employee("b")
            })
            .await
            .unwrap();
        directory
            .create(&Employee {
                name: "bert".to_string(),
                email: "c@x".to_string(),
                ..employee("c")
            })
            .await
            .unwrap();

        let by_like_name = directory
            .find_many_page(&PageOption::new(
                FindManyEmployeesOption {
                    like_name: "al".to_string(),
                    ..Default::default()
                },
                0,
                0,
            ))
            .await
            .unwrap();
        let ids: Vec<i64> = by_like_name.page_items.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b]);

        let by_email = directory
            .find_many_page(&PageOption::new(
                FindManyEmployeesOption {
                    emails: vec!["a@x".to_string()],
                    ..Default::default()
                },
                0,
                0,
            ))
            .await
            .unwrap();
        assert_eq!(by_email.total_count, 1);
        assert_eq!(by_email.page_items[0].id, a);

        // exact list wins over the prefix match on the same field
        let exact_wins = directory
            .find_many_page(&PageOption::new(
                FindManyEmployeesOption {
                    names: vec!["bert".to_string()],
                    like_name: "al".to_string(),
                    ..Default::default()
                },
                0,
                0,
            ))
            .await
            .unwrap();
        assert_eq!(exact_wins.total_count, 1);
        assert_eq!(exact_wins.page_items[0].name, "bert");

        let and_combined = directory
            .find_many_page(&PageOption::new(
                FindManyEmployeesOption {
                    like_name: "al".to_string(),
                    like_email: "b@".to_string(),
                    ..Default::default()
                },
                0,
                0,
            ))
            .await
            .unwrap();
        assert_eq!(and_combined.total_count, 1);
        assert_eq!(and_combined.page_items[0].id, b);
    }

    #[tokio::test]
    async fn test_prefix_filter_escapes_wildcards() {
        let directory = directory().await;
        directory
            .create(&Employee {
                name: "100%".to_string(),
                ..employee("pct")
            })
            .await
            .unwrap();
        directory
            .create(&Employee {
                name: "1000".to_string(),
                ..employee("zeros")
            })
            .await
            .unwrap();

        let page = directory
            .find_many_page(&PageOption::new(
                FindManyEmployeesOption {
                    like_name: "100%".to_string(),
                    ..Default::default()
                },
                0,
                0,
            ))
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.page_items[0].account, "pct");
    }

    #[tokio::test]
    async fn test_find_many_paging() {
        let directory = directory().await;
        for i in 0..5 {
            directory
                .create(&Employee {
                    status: if i % 2 == 0 {
                        EmployeeStatus::Enabled
                    } else {
                        EmployeeStatus::Disabled
                    },
                    ..employee(&format!("user{}", i))
                })
                .await
                .unwrap();
        }

        let all = directory
            .find_many_page(&PageOption::new(FindManyEmployeesOption::default(), 0, 2))
            .await
            .unwrap();
        assert_eq!(all.total_count, 5);
        assert_eq!(all.page_items.len(), 5);

        let second = directory
            .find_many_page(&PageOption::new(FindManyEmployeesOption::default(), 2, 2))
            .await
            .unwrap();
        assert_eq!(second.total_count, 5);
        assert_eq!(second.pages_available, 3);
        let accounts: Vec<&str> = second
            .page_items
            .iter()
            .map(|e| e.account.as_str())
            .collect();
        assert_eq!(accounts, vec!["user2", "user3"]);

        let enabled = directory
            .find_many_page(&PageOption::new(
                FindManyEmployeesOption {
                    statuses: vec![EmployeeStatus::Enabled],
                    ..Default::default()
                },
                1,
                2,
            ))
            .await
            .unwrap();
        assert_eq!(enabled.total_count, 3);
        assert_eq!(enabled.page_items.len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_positions() {
        let directory = directory().await;
        for (account, position) in [("p1", "engineer"), ("p2", "engineer"), ("p3", "sales"), ("p4", "")] {
            directory
                .create(&Employee {
                    position: position.to_string(),
                    ..employee(account)
                })
                .await
                .unwrap();
        }

        let positions = directory.find_all_positions().await.unwrap();
        assert_eq!(positions, vec!["engineer".to_string(), "sales".to_string()]);
    }

    #[test]
    fn test_empty_option_builds_empty_condition() {
        let condition = build_find_many_condition(&FindManyEmployeesOption::default());
        assert!(condition.is_empty());
    }
}
