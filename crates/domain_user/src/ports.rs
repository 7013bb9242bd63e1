//! User Domain Ports

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, UsuarioId};

use crate::usuario::Usuario;

/// Account storage. Emails are unique; a clash is reported as `PortError::Conflict`.
#[async_trait]
pub trait UserPort: DomainPort + HealthCheckable {
    async fn get(&self, id: UsuarioId) -> Result<Usuario, PortError>;

    /// Looks up by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, PortError>;

    async fn insert(&self, usuario: &Usuario) -> Result<Usuario, PortError>;

    async fn update(&self, usuario: &Usuario) -> Result<Usuario, PortError>;
}

#[async_trait]
pub trait UserPortExt: UserPort {
    async fn email_taken(&self, email: &str) -> Result<bool, PortError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}

impl<T: UserPort + ?Sized> UserPortExt for T {}

/// Mock implementation of UserPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    const EMAIL_TAKEN: &str = "Ya existe un usuario con este email";

    #[derive(Debug, Default, Clone)]
    pub struct MockUserPort {
        usuarios: Arc<RwLock<HashMap<UsuarioId, Usuario>>>,
    }

    impl MockUserPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn with_usuarios(usuarios: Vec<Usuario>) -> Self {
            let port = Self::new();
            {
                let mut map = port.usuarios.write().await;
                for u in usuarios {
                    map.insert(u.id, u);
                }
            }
            port
        }

        pub async fn len(&self) -> usize {
            self.usuarios.read().await.len()
        }
    }

    impl DomainPort for MockUserPort {}

    #[async_trait]
    impl HealthCheckable for MockUserPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-user-port", 0)
        }
    }

    #[async_trait]
    impl UserPort for MockUserPort {
        async fn get(&self, id: UsuarioId) -> Result<Usuario, PortError> {
            self.usuarios
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Usuario", id))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, PortError> {
            Ok(self
                .usuarios
                .read()
                .await
                .values()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn insert(&self, usuario: &Usuario) -> Result<Usuario, PortError> {
            let mut map = self.usuarios.write().await;
            if map.values().any(|u| u.email == usuario.email) || map.contains_key(&usuario.id) {
                return Err(PortError::conflict(EMAIL_TAKEN));
            }
            map.insert(usuario.id, usuario.clone());
            Ok(usuario.clone())
        }

        async fn update(&self, usuario: &Usuario) -> Result<Usuario, PortError> {
            let mut map = self.usuarios.write().await;
            if !map.contains_key(&usuario.id) {
                return Err(PortError::not_found("Usuario", usuario.id));
            }
            if map
                .values()
                .any(|u| u.id != usuario.id && u.email == usuario.email)
            {
                return Err(PortError::conflict(EMAIL_TAKEN));
            }
            map.insert(usuario.id, usuario.clone());
            Ok(usuario.clone())
        }
    }
}
