//! Repositories
//!
//! Each repository owns the SQL for one table and speaks in row types.
//! Mapping rows to domain types happens in [`crate::adapters`].

pub mod clientes;
pub mod settings;
pub mod usuarios;

pub use clientes::{escape_like, push_predicate, ClienteRepository, ClienteRow};
pub use settings::{SettingsRepository, SettingsRow};
pub use usuarios::{UsuarioRepository, UsuarioRow};
