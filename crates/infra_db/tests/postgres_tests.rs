//! Repository and adapter tests against a real PostgreSQL
//!
//! Require Docker: `cargo test -p infra_db -- --ignored`

use chrono::{Duration, Utc};

use core_kernel::{ClienteId, PortError};
use domain_client::{
    ClienteFilter, ClientePort, ClientePortExt, ClienteChanges, EstadoCliente, FilterParams,
    SIN_DEFINIR,
};
use domain_settings::{HexColor, SettingsPatch, SettingsPort};
use domain_user::{UserPort, UserPortExt};
use infra_db::{PostgresClienteAdapter, PostgresSettingsAdapter, PostgresUserAdapter};
use test_utils::{
    assert_empresas, assert_newest_first, assert_same_cliente_data, create_isolated_test_database,
    ClienteFixtures, DateFixtures, TestClienteBuilder, UsuarioFixtures,
};

async fn seeded_clientes(port: &PostgresClienteAdapter) {
    let base = Utc::now() - Duration::hours(1);
    for (i, cliente) in ClienteFixtures::sample_set().into_iter().enumerate() {
        let mut cliente = cliente;
        cliente.created_at = base + Duration::minutes(i as i64);
        port.insert(&cliente).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_cliente_round_trip() {
    let db = create_isolated_test_database().await.unwrap();
    let port = PostgresClienteAdapter::new(db.pool.clone());

    let cliente = ClienteFixtures::transportes_ebro();
    port.insert(&cliente).await.unwrap();
    let fetched = port.get(cliente.id).await.unwrap();
    assert_same_cliente_data(&fetched, &cliente);
    assert_eq!(fetched.id, cliente.id);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_list_is_newest_first_and_honours_sentinel() {
    let db = create_isolated_test_database().await.unwrap();
    let port = PostgresClienteAdapter::new(db.pool.clone());
    seeded_clientes(&port).await;

    let all = port.list_all().await.unwrap();
    assert_eq!(all.len(), 4);
    assert_newest_first(&all);

    let filter = ClienteFilter::from_params(FilterParams {
        estados: vec!["contratado".to_string(), SIN_DEFINIR.to_string()],
        ..Default::default()
    })
    .unwrap();
    let predicate = filter.to_predicate(DateFixtures::today()).unwrap();
    let listed = port.list(&predicate).await.unwrap();
    assert_empresas(&listed, &["Mudanzas Rápidas", "Transportes Ebro S.L."]);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_search_treats_wildcards_literally() {
    let db = create_isolated_test_database().await.unwrap();
    let port = PostgresClienteAdapter::new(db.pool.clone());
    port.insert(&TestClienteBuilder::new().with_empresa("Cien% Carga").build())
        .await
        .unwrap();
    port.insert(&TestClienteBuilder::new().with_empresa("Cien Carga").build())
        .await
        .unwrap();

    let filter = ClienteFilter::from_params(FilterParams {
        search: Some("n% c".to_string()),
        ..Default::default()
    })
    .unwrap();
    let listed = port
        .list(&filter.to_predicate(DateFixtures::today()).unwrap())
        .await
        .unwrap();
    assert_empresas(&listed, &["Cien% Carga"]);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_search_contact_columns_then_clear() {
    let db = create_isolated_test_database().await.unwrap();
    let port = PostgresClienteAdapter::new(db.pool.clone());
    let flota = TestClienteBuilder::new()
        .with_empresa("Flota Máxima")
        .with_telefono("976 000 111")
        .with_correo("flota@maxima.es")
        .with_num_vehiculos(i32::MAX as u32)
        .build();
    port.insert(&flota).await.unwrap();
    port.insert(&TestClienteBuilder::new().with_empresa("Otra").build())
        .await
        .unwrap();

    for needle in ["000 111", "MAXIMA.ES"] {
        let filter = ClienteFilter::from_params(FilterParams {
            search: Some(needle.to_string()),
            ..Default::default()
        })
        .unwrap();
        let listed = port
            .list(&filter.to_predicate(DateFixtures::today()).unwrap())
            .await
            .unwrap();
        assert_empresas(&listed, &["Flota Máxima"]);
    }
    assert_eq!(port.get(flota.id).await.unwrap().num_vehiculos, Some(i32::MAX as u32));

    db.clear_data().await.unwrap();
    assert!(port.list_all().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_update_and_delete() {
    let db = create_isolated_test_database().await.unwrap();
    let port = PostgresClienteAdapter::new(db.pool.clone());
    seeded_clientes(&port).await;

    let mut cliente = ClienteFixtures::sin_definir();
    port.insert(&cliente).await.unwrap();
    cliente
        .apply(ClienteChanges {
            estado: Some(Some(EstadoCliente::Contratado)),
            ..Default::default()
        })
        .unwrap();
    let updated = port.update(&cliente).await.unwrap();
    assert_eq!(updated.estado, Some(EstadoCliente::Contratado));

    port.delete(cliente.id).await.unwrap();
    assert!(port.get(cliente.id).await.unwrap_err().is_not_found());
    assert!(port.delete(cliente.id).await.unwrap_err().is_not_found());

    let ids: Vec<ClienteId> = port.list_all().await.unwrap().iter().map(|c| c.id).collect();
    let deleted = port
        .delete_many(&[ids[0], ids[1], ClienteId::new()])
        .await
        .unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(port.count(&domain_client::Predicate::everything()).await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_settings_singleton() {
    let db = create_isolated_test_database().await.unwrap();
    let port = PostgresSettingsAdapter::new(db.pool.clone());

    let settings = port.get_or_create().await.unwrap();
    assert_eq!(settings.alert_window_days, 60);

    let mut patch = SettingsPatch {
        alert_window_days: Some(30),
        ..Default::default()
    };
    patch.month_colors.insert(4, HexColor::parse("#000000").unwrap());
    let updated = port.update(patch).await.unwrap();
    assert_eq!(updated.alert_window_days, 30);
    assert_eq!(updated.month_colors.get(4).unwrap().as_str(), "#000000");
    assert_eq!(updated.month_colors.get(5).unwrap().as_str(), "#22c55e");

    assert_eq!(port.get_or_create().await.unwrap(), updated);
    assert_eq!(port.reset().await.unwrap().alert_window_days, 60);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_user_email_is_unique() {
    let db = create_isolated_test_database().await.unwrap();
    let port = PostgresUserAdapter::new(db.pool.clone());

    let admin = UsuarioFixtures::admin();
    port.insert(&admin).await.unwrap();
    assert!(port.email_taken("admin@crm.com").await.unwrap());
    assert_eq!(port.get(admin.id).await.unwrap().email, "admin@crm.com");

    let err = port.insert(&UsuarioFixtures::admin()).await.unwrap_err();
    assert!(matches!(err, PortError::Conflict { .. }));
}
