//! Custom Test Assertions

use domain_client::Cliente;

/// Asserts two clients carry the same data, ignoring id and timestamps
pub fn assert_same_cliente_data(actual: &Cliente, expected: &Cliente) {
    let mut normalized = actual.clone();
    normalized.id = expected.id;
    normalized.created_at = expected.created_at;
    normalized.updated_at = expected.updated_at;
    assert_eq!(
        normalized, *expected,
        "client data differs (ignoring id and timestamps)"
    );
}

/// Asserts the list is ordered by `created_at` descending
pub fn assert_newest_first(clientes: &[Cliente]) {
    for pair in clientes.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "{} (created {}) listed before newer {} (created {})",
            pair[0].empresa,
            pair[0].created_at,
            pair[1].empresa,
            pair[1].created_at
        );
    }
}

/// Asserts the listed company names, in order
pub fn assert_empresas(clientes: &[Cliente], expected: &[&str]) {
    let actual: Vec<&str> = clientes.iter().map(|c| c.empresa.as_str()).collect();
    assert_eq!(actual, expected, "unexpected client list");
}
