//! Request handlers, one module per resource

pub mod auth;
pub mod clientes;
pub mod config;
pub mod dashboard;
pub mod health;
pub mod vencimientos;
