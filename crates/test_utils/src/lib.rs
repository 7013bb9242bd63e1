//! Test Utilities Crate
//!
//! Shared test infrastructure for the CRM workspace.
//!
//! - `fixtures`: fixed dates, sample clients and a seeded admin account
//! - `builders`: [`TestClienteBuilder`] with `fake`-generated defaults
//! - `generators`: proptest strategies that respect the domain invariants
//! - `assertions`: comparisons that ignore server-assigned fields
//! - `database`: a throwaway PostgreSQL container with migrations applied

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;
