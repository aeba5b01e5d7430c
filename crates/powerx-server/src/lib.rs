//! PowerX Server
//!
//! Process bootstrap for the organization subsystem: configuration loading,
//! multi-file logging, database connection, migrations and root department
//! initialization.

pub mod model;
pub mod startup;
