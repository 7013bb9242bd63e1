//! Tests for strongly-typed identifiers

use core_kernel::{ClienteId, UsuarioId};
use uuid::Uuid;

#[test]
fn test_new_generates_unique_ids() {
    assert_ne!(ClienteId::new(), ClienteId::new());
}

#[test]
fn test_ids_sort_by_creation() {
    let id1 = ClienteId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let id2 = ClienteId::new();
    assert!(id1 < id2);
}

#[test]
fn test_prefixes() {
    assert_eq!(ClienteId::PREFIX, "CLI");
    assert_eq!(UsuarioId::PREFIX, "USR");
}

#[test]
fn test_uuid_conversions() {
    let uuid = Uuid::new_v4();
    let id = UsuarioId::from_uuid(uuid);
    assert_eq!(*id.as_uuid(), uuid);
    let back: Uuid = id.into();
    assert_eq!(back, uuid);
}

#[test]
fn test_from_str_rejects_invalid() {
    assert!("not-a-uuid".parse::<ClienteId>().is_err());
    assert!("CLI-".parse::<ClienteId>().is_err());
    assert!(" ".parse::<ClienteId>().is_err());
}

#[test]
fn test_deserialize_from_bare_uuid() {
    let uuid = Uuid::new_v4();
    let id: ClienteId = serde_json::from_str(&format!("\"{}\"", uuid)).unwrap();
    assert_eq!(*id.as_uuid(), uuid);
}
