//! Entity identifiers
//!
//! Clients and users are keyed by UUID v7 so that ids sort by creation
//! time. On the wire an id is the bare UUID; `Display` prepends a short
//! prefix (`CLI-…`, `USR-…`) for log lines, and parsing accepts both forms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Input that is neither a UUID nor a prefixed id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identificador no válido: {0}")]
pub struct InvalidId(pub String);

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Fresh time-ordered id
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let raw = trimmed
                    .strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .unwrap_or(trimmed);
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| InvalidId(s.to_string()))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

entity_id!(
    /// A brokerage client
    ClienteId => "CLI"
);
entity_id!(
    /// A CRM account
    UsuarioId => "USR"
);
