pub use super::department_ancestors::Entity as DepartmentAncestors;
pub use super::departments::Entity as Departments;
pub use super::employees::Entity as Employees;
