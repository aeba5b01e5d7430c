//! Organization use case
//!
//! Single entry point combining the employee directory, the department
//! hierarchy and the credential service, plus startup initialization.

use std::future::Future;

use powerx_common::{OrgError, OrgResult, Page, PageOption};
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::credential::CredentialService;
use crate::model::{
    Department, Employee, EmployeeLoginOption, EmployeePatch, FindManyDepartmentsOption,
    FindManyEmployeesOption,
};
use crate::service::department::DepartmentHierarchy;
use crate::service::employee::EmployeeDirectory;

#[derive(Debug, Clone)]
pub struct OrganizationUseCase {
    employees: EmployeeDirectory,
    departments: DepartmentHierarchy,
    credentials: CredentialService,
}

impl OrganizationUseCase {
    pub fn new(db: DatabaseConnection, credentials: CredentialService) -> Self {
        Self {
            employees: EmployeeDirectory::new(db.clone(), credentials),
            departments: DepartmentHierarchy::new(db),
            credentials,
        }
    }

    /// Creates the root department if needed and checks that exactly one
    /// exists. Must complete before the use case serves requests.
    pub async fn init(&self) -> OrgResult<Department> {
        let created = self.departments.initialize().await?;
        let root = self.departments.ensure_single_root().await?;
        info!(root_id = root.id, created, "organization initialized");
        Ok(root)
    }

    /// Runs `fut` until it completes or `token` is cancelled.
    ///
    /// On cancellation the operation future is dropped, which aborts the
    /// in-flight store call and rolls back any open transaction.
    pub async fn run_cancellable<T, F>(&self, token: &CancellationToken, fut: F) -> OrgResult<T>
    where
        F: Future<Output = OrgResult<T>>,
    {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("organization operation cancelled");
                Err(OrgError::Cancelled)
            }
            result = fut => result,
        }
    }

    pub fn verify_password(&self, hashed: &str, plaintext: &str) -> bool {
        self.credentials.verify(hashed, plaintext)
    }

    /// Looks the employee up by login option and checks the password.
    ///
    /// An unknown employee and a wrong password both fail with `NotFound`.
    pub async fn authenticate_employee(
        &self,
        option: &EmployeeLoginOption,
        password: &str,
    ) -> OrgResult<Employee> {
        let employee = self.employees.find_by_login_option(option).await?;
        if !self.verify_password(&employee.password, password) {
            warn!(employee_id = employee.id, "employee password mismatch");
            return Err(OrgError::not_found(
                "employee does not exist, check the login info",
            ));
        }
        Ok(employee)
    }

    // Employees

    pub async fn create_employee(&self, employee: &Employee) -> OrgResult<i64> {
        self.employees.create(employee).await
    }

    pub async fn patch_employee_by_id(&self, patch: &EmployeePatch, id: i64) -> OrgResult<()> {
        self.employees.patch_by_id(patch, id).await
    }

    pub async fn update_employee_by_id(&self, employee: &Employee, id: i64) -> OrgResult<()> {
        self.employees.update_by_id(employee, id).await
    }

    pub async fn delete_employee_by_id(&self, id: i64) -> OrgResult<()> {
        self.employees.delete_by_id(id).await
    }

    pub async fn find_one_employee_by_id(&self, id: i64) -> OrgResult<Employee> {
        self.employees.find_by_id(id).await
    }

    pub async fn find_one_employee_by_login_option(
        &self,
        option: &EmployeeLoginOption,
    ) -> OrgResult<Employee> {
        self.employees.find_by_login_option(option).await
    }

    pub async fn find_many_employees_page(
        &self,
        option: &PageOption<FindManyEmployeesOption>,
    ) -> OrgResult<Page<Employee>> {
        self.employees.find_many_page(option).await
    }

    pub async fn find_all_positions(&self) -> OrgResult<Vec<String>> {
        self.employees.find_all_positions().await
    }

    // Departments

    /// Creates a department. A non-zero `leader_id` must reference an
    /// existing employee.
    pub async fn create_department(&self, department: &Department) -> OrgResult<Department> {
        self.departments.create(department).await
    }

    pub async fn find_one_department(&self, id: i64) -> OrgResult<Department> {
        self.departments.find_by_id(id).await
    }

    pub async fn find_many_departments_page(
        &self,
        option: &PageOption<FindManyDepartmentsOption>,
    ) -> OrgResult<Page<Department>> {
        self.departments.find_many_page(option).await
    }

    pub async fn find_many_departments_by_root_id(&self, root_id: i64) -> OrgResult<Vec<Department>> {
        self.departments.find_all_by_root_id(root_id).await
    }

    pub async fn find_all_departments(&self) -> OrgResult<Vec<Department>> {
        self.departments.find_all().await
    }

    pub async fn count_employees_in_departments(&self, dep_ids: &[i64]) -> OrgResult<u64> {
        self.departments.count_employees_in_departments(dep_ids).await
    }

    pub async fn delete_department_by_id(&self, id: i64) -> OrgResult<()> {
        self.departments.delete_by_id(id).await
    }

    pub async fn ensure_single_root(&self) -> OrgResult<Department> {
        self.departments.ensure_single_root().await
    }

    pub fn employees(&self) -> &EmployeeDirectory {
        &self.employees
    }

    pub fn departments(&self) -> &DepartmentHierarchy {
        &self.departments
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{credentials, setup_db};

    async fn use_case() -> OrganizationUseCase {
        let use_case = OrganizationUseCase::new(setup_db().await, credentials());
        use_case.init().await.unwrap();
        use_case
    }

    #[tokio::test]
    async fn test_init_twice_keeps_single_root() {
        let use_case = use_case().await;
        let first = use_case.ensure_single_root().await.unwrap();
        let second = use_case.init().await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(use_case.find_all_departments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_department_with_unknown_leader() {
        let use_case = use_case().await;
        let root = use_case.ensure_single_root().await.unwrap();

        let err = use_case
            .create_department(&Department {
                name: "ghost-led".to_string(),
                parent_id: root.id,
                leader_id: 404,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(use_case.find_all_departments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_hierarchy_accessor_checks_leader() {
        let use_case = use_case().await;
        let root = use_case.ensure_single_root().await.unwrap();

        let err = use_case
            .departments()
            .create(&Department {
                name: "ghost".to_string(),
                parent_id: root.id,
                leader_id: 404,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let tree = use_case
            .find_many_departments_by_root_id(root.id)
            .await
            .unwrap();
        assert!(tree.iter().all(|d| d.leader_id != 404));
    }

    #[tokio::test]
    async fn test_authenticate_employee() {
        let use_case = use_case().await;
        use_case
            .create_employee(&Employee {
                account: "judy".to_string(),
                password: "correct horse".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let option = EmployeeLoginOption {
            account: "judy".to_string(),
            ..Default::default()
        };
        let employee = use_case
            .authenticate_employee(&option, "correct horse")
            .await
            .unwrap();
        assert_eq!(employee.account, "judy");

        let err = use_case
            .authenticate_employee(&option, "wrong")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_deleting_leader_clears_department_leader() {
        let use_case = use_case().await;
        let root = use_case.ensure_single_root().await.unwrap();
        let leader_id = use_case
            .create_employee(&Employee {
                account: "boss".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let dep = use_case
            .create_department(&Department {
                name: "Sales".to_string(),
                parent_id: root.id,
                leader_id,
                ..Default::default()
            })
            .await
            .unwrap();

        use_case.delete_employee_by_id(leader_id).await.unwrap();

        let stored = use_case.find_one_department(dep.id).await.unwrap();
        assert_eq!(stored.leader_id, 0);
        assert!(stored.leader.is_none());
    }

    #[tokio::test]
    async fn test_run_cancellable_returns_cancelled() {
        let use_case = use_case().await;
        let token = CancellationToken::new();
        token.cancel();

        let result: OrgResult<()> = use_case
            .run_cancellable(&token, async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(OrgError::Cancelled)));
    }

    #[tokio::test]
    async fn test_run_cancellable_passes_result_through() {
        let use_case = use_case().await;
        let token = CancellationToken::new();

        let positions = use_case
            .run_cancellable(&token, use_case.find_all_positions())
            .await
            .unwrap();
        assert!(positions.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_create_leaves_no_row() {
        let use_case = use_case().await;
        let token = CancellationToken::new();
        token.cancel();

        let employee = Employee {
            account: "never".to_string(),
            ..Default::default()
        };
        let err = use_case
            .run_cancellable(&token, use_case.create_employee(&employee))
            .await
            .unwrap_err();
        assert!(matches!(err, OrgError::Cancelled));

        let err = use_case
            .find_one_employee_by_login_option(&EmployeeLoginOption {
                account: "never".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
