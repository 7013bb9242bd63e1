//! Client Domain Ports
//!
//! `ClientePort` is the storage interface the HTTP layer talks to. The
//! PostgreSQL adapter lives in `infra_db`; [`mock::MockClientePort`] keeps
//! clients in memory for tests.
//!
//! Listing takes a [`Predicate`] built by the filter module, so filter
//! semantics are decided once in this crate and every adapter honours them.
//!
//! ```rust,ignore
//! let filter = ClienteFilter::from_params(params)?;
//! let predicate = filter.to_predicate(calendar.today())?;
//! let clientes = port.list(&predicate).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{ClienteId, DomainPort, HealthCheckable, PortError};

use crate::cliente::Cliente;
use crate::filter::Predicate;

/// Storage operations for clients
#[async_trait]
pub trait ClientePort: DomainPort + HealthCheckable {
    /// Clients matching `predicate`, newest first (by `created_at`)
    async fn list(&self, predicate: &Predicate) -> Result<Vec<Cliente>, PortError>;

    /// Retrieves a client, or `PortError::NotFound`
    async fn get(&self, id: ClienteId) -> Result<Cliente, PortError>;

    /// Stores a newly created client
    async fn insert(&self, cliente: &Cliente) -> Result<Cliente, PortError>;

    /// Overwrites a stored client; last write wins
    async fn update(&self, cliente: &Cliente) -> Result<Cliente, PortError>;

    /// Deletes a client, or `PortError::NotFound`
    async fn delete(&self, id: ClienteId) -> Result<(), PortError>;

    /// Deletes every listed client that exists; returns how many were removed
    async fn delete_many(&self, ids: &[ClienteId]) -> Result<u64, PortError>;
}

/// Convenience methods built on top of [`ClientePort`]
#[async_trait]
pub trait ClientePortExt: ClientePort {
    async fn list_all(&self) -> Result<Vec<Cliente>, PortError> {
        self.list(&Predicate::everything()).await
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64, PortError> {
        Ok(self.list(predicate).await?.len() as u64)
    }

    async fn exists(&self, id: ClienteId) -> Result<bool, PortError> {
        match self.get(id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<T: ClientePort + ?Sized> ClientePortExt for T {}

/// Mock implementation of ClientePort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    /// In-memory mock implementation of ClientePort
    #[derive(Debug, Default, Clone)]
    pub struct MockClientePort {
        clientes: Arc<RwLock<HashMap<ClienteId, Cliente>>>,
    }

    impl MockClientePort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with clients for testing
        pub async fn with_clientes(clientes: Vec<Cliente>) -> Self {
            let port = Self::new();
            {
                let mut store = port.clientes.write().await;
                for cliente in clientes {
                    store.insert(cliente.id, cliente);
                }
            }
            port
        }

        pub async fn len(&self) -> usize {
            self.clientes.read().await.len()
        }
    }

    impl DomainPort for MockClientePort {}

    #[async_trait]
    impl HealthCheckable for MockClientePort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-cliente-port", 0)
        }
    }

    #[async_trait]
    impl ClientePort for MockClientePort {
        async fn list(&self, predicate: &Predicate) -> Result<Vec<Cliente>, PortError> {
            let clientes = self.clientes.read().await;
            let mut results: Vec<Cliente> = clientes
                .values()
                .filter(|c| predicate.matches(c))
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(results)
        }

        async fn get(&self, id: ClienteId) -> Result<Cliente, PortError> {
            self.clientes
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Cliente", id))
        }

        async fn insert(&self, cliente: &Cliente) -> Result<Cliente, PortError> {
            let mut clientes = self.clientes.write().await;
            if clientes.contains_key(&cliente.id) {
                return Err(PortError::conflict(format!("Cliente {} ya existe", cliente.id)));
            }
            clientes.insert(cliente.id, cliente.clone());
            Ok(cliente.clone())
        }

        async fn update(&self, cliente: &Cliente) -> Result<Cliente, PortError> {
            let mut clientes = self.clientes.write().await;
            let slot = clientes
                .get_mut(&cliente.id)
                .ok_or_else(|| PortError::not_found("Cliente", cliente.id))?;
            *slot = cliente.clone();
            Ok(cliente.clone())
        }

        async fn delete(&self, id: ClienteId) -> Result<(), PortError> {
            self.clientes
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Cliente", id))
        }

        async fn delete_many(&self, ids: &[ClienteId]) -> Result<u64, PortError> {
            let mut clientes = self.clientes.write().await;
            Ok(ids.iter().filter(|id| clientes.remove(*id).is_some()).count() as u64)
        }
    }
}
