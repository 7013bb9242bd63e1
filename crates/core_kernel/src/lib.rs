//! Core Kernel - Foundational types and utilities for the brokerage CRM
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Strongly-typed identifiers for clients and users
//! - The business calendar (timezone-aware "today", date parsing, month ranges)
//! - Port error and health-check abstractions for hexagonal adapters

pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use temporal::{BusinessCalendar, DateRange, TemporalError, Timezone, YearMonth, days_until};
pub use identifiers::{ClienteId, InvalidId, UsuarioId};
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
