pub mod prelude;

pub mod department_ancestors;
pub mod departments;
pub mod employees;
