//! User Domain
//!
//! Accounts that may sign in to the CRM. Emails are unique and stored
//! trimmed and lowercased; passwords are kept only as bcrypt hashes.

pub mod credentials;
pub mod error;
pub mod password;
pub mod ports;
pub mod usuario;

pub use credentials::{normalize_email, validate_email, validate_password, MIN_PASSWORD_LEN};
pub use error::UserError;
pub use password::{hash_password, verify_password, BCRYPT_COST};
pub use ports::{UserPort, UserPortExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockUserPort;
pub use usuario::{NewUsuario, Rol, Usuario, UsuarioChanges};
