//! Client Management Domain
//!
//! This crate owns the brokerage's client records ("clientes") and the rules
//! that govern them:
//!
//! - **Cliente**: contact data, commercial status, cargo and transport profile
//! - **Póliza**: the optional main policy with its validity period
//! - **Vencimientos**: up to five independently tracked renewal dates
//! - **Filter Builder**: list filters, including the `sin_definir` sentinel,
//!   compiled into a [`Predicate`] that adapters evaluate or translate to SQL
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_client::{Cliente, NewCliente, Poliza};
//!
//! let poliza = Poliza::new(
//!     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
//! )
//! .unwrap();
//!
//! let cliente = Cliente::create(NewCliente {
//!     empresa: "Transportes Martínez S.L.".to_string(),
//!     contacto: "Juan Martínez".to_string(),
//!     poliza: Some(poliza),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! assert_eq!(cliente.tracked_dates().len(), 1);
//! ```

pub mod cliente;
pub mod error;
pub mod filter;
pub mod ports;
pub mod validation;

pub use cliente::{
    Cliente, ClienteChanges, EstadoCliente, NewCliente, Poliza, Transporte, Vencimientos,
    TIPOS_CARGA_CONOCIDOS,
};
pub use error::ClientError;
pub use filter::{ClienteFilter, DateField, FilterParams, Predicate, SelectField, Selection, SIN_DEFINIR};
pub use ports::{ClientePort, ClientePortExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockClientePort;
