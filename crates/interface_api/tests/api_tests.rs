//! HTTP API tests
//!
//! The full router runs against the in-memory ports, so every test owns
//! its data. Dates are relative to the real business "today" because the
//! handlers read the clock through the calendar.

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use chrono::{Days, NaiveDate};
use serde_json::{json, Value};

use core_kernel::BusinessCalendar;
use domain_client::{Cliente, EstadoCliente, MockClientePort, Poliza, Transporte, Vencimientos};
use domain_settings::{MockSettingsPort, Settings};
use domain_user::{MockUserPort, Usuario};
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::{TestClienteBuilder, UsuarioFixtures, TEST_BCRYPT_COST};

struct TestApp {
    server: TestServer,
    clientes: MockClientePort,
    settings: MockSettingsPort,
    admin: Usuario,
    token: String,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_clientes(Vec::new()).await
    }

    async fn with_clientes(clientes: Vec<Cliente>) -> Self {
        Self::with_data(clientes, MockSettingsPort::new()).await
    }

    async fn with_data(clientes: Vec<Cliente>, settings: MockSettingsPort) -> Self {
        let admin = UsuarioFixtures::admin();
        let config = ApiConfig {
            bcrypt_cost: TEST_BCRYPT_COST,
            ..ApiConfig::default()
        };
        let token = create_token(&admin, &config.jwt_secret, config.jwt_expiration_secs).unwrap();

        let clientes = MockClientePort::with_clientes(clientes).await;
        let usuarios = MockUserPort::with_usuarios(vec![admin.clone()]).await;
        let calendar = BusinessCalendar::default();

        let state = AppState::new(
            Arc::new(clientes.clone()),
            Arc::new(settings.clone()),
            Arc::new(usuarios),
            config,
            calendar,
        );
        let server = TestServer::new(create_router(state)).unwrap();

        Self {
            server,
            clientes,
            settings,
            admin,
            token,
        }
    }

    fn bearer(&self, request: TestRequest) -> TestRequest {
        request.add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token)).unwrap(),
        )
    }

    fn get(&self, path: &str) -> TestRequest {
        self.bearer(self.server.get(path))
    }

    fn post(&self, path: &str) -> TestRequest {
        self.bearer(self.server.post(path))
    }

    fn put(&self, path: &str) -> TestRequest {
        self.bearer(self.server.put(path))
    }

    fn delete(&self, path: &str) -> TestRequest {
        self.bearer(self.server.delete(path))
    }
}

fn in_days(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_add_days(Days::new(days)).unwrap()
}

fn days_ago(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap()
}

/// Four clients covering the interesting cases, relative to `today`
fn cartera(today: NaiveDate) -> Vec<Cliente> {
    vec![
        TestClienteBuilder::new()
            .with_empresa("Transportes Ebro S.L.")
            .with_contacto("Lucía Martín")
            .with_estado(EstadoCliente::Contratado)
            .with_tipo_carga("frigorifica")
            .with_transporte(Transporte::Nacional)
            .with_poliza(Poliza::new(days_ago(today, 345), in_days(today, 20)).unwrap())
            .with_vencimientos(Vencimientos {
                rc: Some(in_days(today, 10)),
                ..Default::default()
            })
            .build(),
        TestClienteBuilder::new()
            .with_empresa("Logística del Norte")
            .with_contacto("Iker Etxeberria")
            .with_estado(EstadoCliente::EnNegociacion)
            .with_transporte(Transporte::EspanaFrancia)
            .with_vencimientos(Vencimientos {
                flotas: Some(in_days(today, 45)),
                ..Default::default()
            })
            .build(),
        TestClienteBuilder::new()
            .with_empresa("Mudanzas Rápidas")
            .with_contacto("Carmen Ruiz")
            .build(),
        TestClienteBuilder::new()
            .with_empresa("Graneles Castilla")
            .with_contacto("Andrés Pérez")
            .with_estado(EstadoCliente::Descartado)
            .with_tipo_carga("a_granel")
            .with_vencimientos(Vencimientos {
                pyme: Some(days_ago(today, 40)),
                ..Default::default()
            })
            .build(),
    ]
}

fn empresas(items: &Value) -> Vec<String> {
    let mut names: Vec<String> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["empresa"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let app = TestApp::new().await;
        let response = app.server.get("/api/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["env"], "development");
    }

    #[tokio::test]
    async fn test_readiness_with_healthy_ports() {
        let app = TestApp::new().await;
        let response = app.server.get("/api/health/ready").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["adapters"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_cors_and_request_id_headers() {
        let app = TestApp::new().await;
        let response = app
            .server
            .get("/api/health")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
            .await;
        response.assert_status_ok();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert!(headers.get("x-request-id").is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = TestApp::new().await;
        let response = app.server.get("/no-existe").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "Ruta no encontrada");

        app.server
            .get("/api/no-existe")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let app = TestApp::new().await;
        let response = app.server.get("/api/clientes").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["error"], "No autorizado. Token no proporcionado.");
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let app = TestApp::new().await;
        let response = app
            .server
            .get("/api/dashboard")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_static("Bearer not-a-jwt"),
            )
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["error"], "No autorizado. Token inválido o expirado.");
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let app = TestApp::new().await;
        let body = json!({
            "email": "  Nueva@Correduria.ES ",
            "password": "secreto1",
            "nombre": "Nueva Usuaria"
        });

        let response = app.server.post("/api/auth/register").json(&body).await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["message"], "Usuario registrado exitosamente");
        assert_eq!(created["user"]["email"], "nueva@correduria.es");
        assert_eq!(created["user"]["rol"], "admin");
        assert!(created["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert!(created["user"].get("passwordHash").is_none());

        let response = app.server.post("/api/auth/register").json(&body).await;
        response.assert_status(StatusCode::CONFLICT);
        let error: Value = response.json();
        assert_eq!(error["error"], "Ya existe un usuario con este email");
    }

    #[tokio::test]
    async fn test_register_existing_email_in_other_case() {
        let app = TestApp::new().await;
        let response = app
            .server
            .post("/api/auth/register")
            .json(&json!({
                "email": app.admin.email.to_uppercase(),
                "password": "otraClave9",
                "nombre": "Duplicado"
            }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let error: Value = response.json();
        assert_eq!(error["error"], "Ya existe un usuario con este email");
    }

    #[tokio::test]
    async fn test_register_validation() {
        let app = TestApp::new().await;
        let response = app
            .server
            .post("/api/auth/register")
            .json(&json!({ "email": "a@b.es" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = app
            .server
            .post("/api/auth/register")
            .json(&json!({ "email": "a@b.es", "password": "123", "nombre": "Corta" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"], "La contraseña debe tener al menos 6 caracteres");
    }

    #[tokio::test]
    async fn test_login() {
        let app = TestApp::new().await;
        let response = app
            .server
            .post("/api/auth/login")
            .json(&json!({
                "email": UsuarioFixtures::ADMIN_EMAIL,
                "password": UsuarioFixtures::ADMIN_PASSWORD
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Login exitoso");
        assert_eq!(body["user"]["id"], json!(app.admin.id));

        let token = body["token"].as_str().unwrap().to_string();
        let me = app
            .server
            .get("/api/auth/me")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
            )
            .await;
        me.assert_status_ok();
    }

    #[tokio::test]
    async fn test_login_failures_share_a_message() {
        let app = TestApp::new().await;
        for body in [
            json!({ "email": UsuarioFixtures::ADMIN_EMAIL, "password": "incorrecta" }),
            json!({ "email": "nadie@crm.com", "password": "admin123" }),
        ] {
            let response = app.server.post("/api/auth/login").json(&body).await;
            response.assert_status(StatusCode::UNAUTHORIZED);
            let error: Value = response.json();
            assert_eq!(error["error"], "Email o contraseña incorrectos");
        }

        app.server
            .post("/api/auth/login")
            .json(&json!({ "email": "" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_me_and_profile() {
        let app = TestApp::new().await;
        let me: Value = app.get("/api/auth/me").await.json();
        assert_eq!(me["user"]["email"], UsuarioFixtures::ADMIN_EMAIL);
        assert_eq!(me["user"]["nombre"], "Administrador");

        let response = app
            .put("/api/auth/profile")
            .json(&json!({ "nombre": "Admin Principal" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Perfil actualizado exitosamente");
        assert_eq!(body["user"]["nombre"], "Admin Principal");
        assert_eq!(body["user"]["email"], UsuarioFixtures::ADMIN_EMAIL);
    }

    #[tokio::test]
    async fn test_change_password() {
        let app = TestApp::new().await;
        let response = app
            .put("/api/auth/change-password")
            .json(&json!({ "currentPassword": "mal", "newPassword": "nueva123" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = app
            .put("/api/auth/change-password")
            .json(&json!({
                "currentPassword": UsuarioFixtures::ADMIN_PASSWORD,
                "newPassword": "nueva123"
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Contraseña actualizada exitosamente");

        app.server
            .post("/api/auth/login")
            .json(&json!({ "email": UsuarioFixtures::ADMIN_EMAIL, "password": "nueva123" }))
            .await
            .assert_status_ok();
    }
}

mod clientes {
    use super::*;

    #[tokio::test]
    async fn test_create_and_fetch() {
        let app = TestApp::new().await;
        let response = app
            .post("/api/clientes")
            .json(&json!({
                "empresa": "Transportes Sierra",
                "contacto": "Pablo Gil",
                "estado": "en_negociacion",
                "transporte": "peninsular",
                "numVehiculos": "7",
                "poliza": {
                    "aseguradora": "Allianz",
                    "fechaInicio": "2025-01-01",
                    "fechaFin": "2025-12-31",
                    "prima": 1234.5
                },
                "vencimientos": { "rc": "2025-06-30", "acc": "" }
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["estado"], "en_negociacion");
        assert_eq!(created["numVehiculos"], 7);
        assert_eq!(created["poliza"]["fechaFin"], "2025-12-31");
        assert_eq!(created["vencimientos"]["rc"], "2025-06-30");
        assert!(created["vencimientos"]["acc"].is_null());

        let id = created["id"].as_str().unwrap();
        let fetched = app.get(&format!("/api/clientes/{}", id)).await;
        fetched.assert_status_ok();
        let fetched: Value = fetched.json();
        assert_eq!(fetched["empresa"], "Transportes Sierra");
        assert_eq!(app.clientes.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let app = TestApp::new().await;
        let response = app
            .post("/api/clientes")
            .json(&json!({ "empresa": "Sin contacto" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"], "Empresa y contacto son campos requeridos");

        let response = app
            .post("/api/clientes")
            .json(&json!({
                "empresa": "Fechas",
                "contacto": "Al revés",
                "poliza": { "fechaInicio": "2025-12-31", "fechaFin": "2025-01-01" }
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = app
            .post("/api/clientes")
            .json(&json!({ "empresa": "X", "contacto": "Y", "estado": "inventado" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(app.clientes.len().await, 0);
    }

    #[tokio::test]
    async fn test_vehicle_count_out_of_range() {
        let app = TestApp::new().await;
        let response = app
            .post("/api/clientes")
            .json(&json!({ "empresa": "Flota", "contacto": "Enorme", "numVehiculos": 3000000000u64 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(app.clientes.len().await, 0);

        let response = app
            .post("/api/clientes")
            .json(&json!({ "empresa": "Flota", "contacto": "Normal", "numVehiculos": 12 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

        let response = app
            .put(&format!("/api/clientes/{}", id))
            .json(&json!({ "numVehiculos": 3000000000u64 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let app = TestApp::new().await;
        let response = app
            .post("/api/clientes")
            .text("{ no es json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_and_unknown_ids() {
        let app = TestApp::new().await;
        let response = app.get("/api/clientes/no-es-un-id").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"], "ID de cliente inválido");

        let unknown = uuid_like();
        let response = app.get(&format!("/api/clientes/{}", unknown)).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let error: Value = response.json();
        assert_eq!(error["error"], "Cliente no encontrado");

        app.delete(&format!("/api/clientes/{}", unknown))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    fn uuid_like() -> String {
        core_kernel::ClienteId::new().as_uuid().to_string()
    }

    #[tokio::test]
    async fn test_partial_update() {
        let cliente = TestClienteBuilder::new()
            .with_empresa("Antes S.L.")
            .with_contacto("Contacto")
            .with_notas("Llamar en septiembre")
            .with_estado(EstadoCliente::EnNegociacion)
            .build();
        let id = cliente.id.as_uuid().to_string();
        let app = TestApp::with_clientes(vec![cliente]).await;

        let response = app
            .put(&format!("/api/clientes/{}", id))
            .json(&json!({ "empresa": "Después S.L.", "notas": null }))
            .await;
        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["empresa"], "Después S.L.");
        assert_eq!(updated["contacto"], "Contacto");
        assert!(updated["notas"].is_null());
        assert_eq!(updated["estado"], "en_negociacion");

        let response = app
            .put(&format!("/api/clientes/{}", id))
            .json(&json!({ "empresa": null }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete() {
        let cliente = TestClienteBuilder::new().build();
        let id = cliente.id.as_uuid().to_string();
        let app = TestApp::with_clientes(vec![cliente]).await;

        app.delete(&format!("/api/clientes/{}", id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.get(&format!("/api/clientes/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bulk_delete() {
        let a = TestClienteBuilder::new().build();
        let b = TestClienteBuilder::new().build();
        let keep = TestClienteBuilder::new().build();
        let ids = json!([
            a.id.as_uuid().to_string(),
            b.id.to_string(),
            core_kernel::ClienteId::new().as_uuid().to_string()
        ]);
        let app = TestApp::with_clientes(vec![a, b, keep]).await;

        let response = app
            .post("/api/clientes/bulk-delete")
            .json(&json!({ "ids": [] }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"], "Se requiere un array de IDs");

        let response = app
            .post("/api/clientes/bulk-delete")
            .json(&json!({ "ids": ids }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["deletedCount"], 2);
        assert_eq!(app.clientes.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let today = BusinessCalendar::default().today();
        let app = TestApp::with_clientes(cartera(today)).await;

        let all: Value = app.get("/api/clientes").await.json();
        assert_eq!(all["total"], 4);

        let response = app
            .get("/api/clientes")
            .add_query_param("estados", "sin_definir")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(empresas(&body["items"]), vec!["Mudanzas Rápidas"]);

        let body: Value = app
            .get("/api/clientes")
            .add_query_param("estados", "contratado,sin_definir")
            .await
            .json();
        assert_eq!(
            empresas(&body["items"]),
            vec!["Mudanzas Rápidas", "Transportes Ebro S.L."]
        );

        let body: Value = app
            .get("/api/clientes")
            .add_query_param("transportes", "sin_definir")
            .add_query_param("estados", "descartado")
            .await
            .json();
        assert_eq!(empresas(&body["items"]), vec!["Graneles Castilla"]);

        let body: Value = app
            .get("/api/clientes")
            .add_query_param("search", "norte")
            .await
            .json();
        assert_eq!(empresas(&body["items"]), vec!["Logística del Norte"]);

        let body: Value = app
            .get("/api/clientes")
            .add_query_param("proximosDias", "15")
            .await
            .json();
        assert_eq!(empresas(&body["items"]), vec!["Transportes Ebro S.L."]);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_month() {
        let app = TestApp::new().await;
        app.get("/api/clientes")
            .add_query_param("mesVencimiento", "13")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

mod vencimientos {
    use super::*;

    #[tokio::test]
    async fn test_list_ordered_by_nearest() {
        let today = BusinessCalendar::default().today();
        let app = TestApp::with_clientes(cartera(today)).await;

        let response = app.get("/api/vencimientos").await;
        response.assert_status_ok();
        let body: Value = response.json();
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["empresa"], "Transportes Ebro S.L.");
        assert_eq!(items[0]["proximoVencimiento"]["dias"], 10);
        assert_eq!(items[0]["proximoVencimiento"]["tipo"], "RC");
        assert_eq!(items[0]["proximoVencimiento"]["urgencia"], "high");
        assert_eq!(items[1]["empresa"], "Logística del Norte");
        assert_eq!(items[1]["proximoVencimiento"]["urgenciaLabel"], "Baja");
    }

    #[tokio::test]
    async fn test_list_query_constraints() {
        let today = BusinessCalendar::default().today();
        let app = TestApp::with_clientes(cartera(today)).await;

        let body: Value = app
            .get("/api/vencimientos")
            .add_query_param("days", "30")
            .await
            .json();
        assert_eq!(body.as_array().unwrap().len(), 1);

        let body: Value = app
            .get("/api/vencimientos")
            .add_query_param("estado", "en_negociacion")
            .await
            .json();
        assert_eq!(body[0]["empresa"], "Logística del Norte");

        app.get("/api/vencimientos")
            .add_query_param("days", "muchos")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resumen() {
        let today = BusinessCalendar::default().today();
        let app = TestApp::with_clientes(cartera(today)).await;

        let response = app.get("/api/vencimientos/resumen").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["vencimientos30Dias"], 1);
        assert_eq!(body["vencimientos60Dias"], 1);
        assert_eq!(body["totalClientes"], 4);
        assert_eq!(body["clientesContratados"], 1);
        assert_eq!(body["clientesNegociacion"], 1);
    }

    #[tokio::test]
    async fn test_por_mes_window() {
        let today = BusinessCalendar::default().today();
        let app = TestApp::with_clientes(cartera(today)).await;

        let body: Value = app.get("/api/vencimientos/por-mes").await.json();
        let buckets = body.as_array().unwrap();
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0]["esActual"], true);
        assert!(buckets
            .iter()
            .all(|b| b["color"].as_str().is_some_and(|c| c.starts_with('#'))));

        let total: u64 = buckets
            .iter()
            .map(|b| b["vencimientos"].as_u64().unwrap())
            .sum();
        // poliza + rc of Ebro, flotas of Norte; the overdue pyme is outside the window
        assert_eq!(total, 3);
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_summary() {
        let today = BusinessCalendar::default().today();
        let app = TestApp::with_clientes(cartera(today)).await;

        let response = app.get("/api/dashboard").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["totalClientes"], 4);
        assert_eq!(body["contratados"], 1);
        assert_eq!(body["tasaCierre"], 25.0);
        assert_eq!(body["alertWindowDays"], 60);
        assert_eq!(body["vencenEnVentana"], 2);
        assert_eq!(body["porMes"].as_array().unwrap().len(), 12);

        let proximos = body["proximos"].as_array().unwrap();
        assert_eq!(proximos.len(), 4);
        assert_eq!(proximos[0]["empresa"], "Graneles Castilla");
        assert_eq!(proximos[0]["vencido"], true);
        assert_eq!(proximos[1]["empresa"], "Transportes Ebro S.L.");
        assert_eq!(proximos[1]["dias"], 10);
        assert_eq!(proximos[1]["tipo"], "RC");
    }

    #[tokio::test]
    async fn test_dashboard_follows_alert_window() {
        let today = BusinessCalendar::default().today();
        let app = TestApp::with_clientes(cartera(today)).await;

        app.put("/api/config")
            .json(&json!({ "alertWindowDays": 15 }))
            .await
            .assert_status_ok();

        let body: Value = app.get("/api/dashboard").await.json();
        assert_eq!(body["alertWindowDays"], 15);
        assert_eq!(body["vencenEnVentana"], 1);
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let app = TestApp::new().await;
        let body: Value = app.get("/api/dashboard").await.json();
        assert_eq!(body["totalClientes"], 0);
        assert_eq!(body["tasaCierre"], 0.0);
        assert!(body["proximos"].as_array().unwrap().is_empty());
    }
}

mod config {
    use super::*;

    #[tokio::test]
    async fn test_defaults_created_on_first_read() {
        let app = TestApp::new().await;
        assert!(!app.settings.is_initialized().await);

        let response = app.get("/api/config").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["alertWindowDays"], 60);
        assert_eq!(body["monthColors"].as_object().unwrap().len(), 12);
        assert!(app.settings.is_initialized().await);
    }

    #[tokio::test]
    async fn test_stored_settings_drive_the_dashboard() {
        let stored = Settings {
            alert_window_days: 15,
            ..Settings::default()
        };
        let app = TestApp::with_data(Vec::new(), MockSettingsPort::with_settings(stored).await).await;

        let body: Value = app.get("/api/config").await.json();
        assert_eq!(body["alertWindowDays"], 15);
        let body: Value = app.get("/api/dashboard").await.json();
        assert_eq!(body["alertWindowDays"], 15);
    }

    #[tokio::test]
    async fn test_update_merges_colors() {
        let app = TestApp::new().await;
        let before: Value = app.get("/api/config").await.json();

        let response = app
            .put("/api/config")
            .json(&json!({ "monthColors": { "3": "#123abc" } }))
            .await;
        response.assert_status_ok();
        let after: Value = response.json();
        assert_eq!(after["monthColors"]["3"], "#123abc");
        assert_eq!(after["monthColors"]["4"], before["monthColors"]["4"]);
        assert_eq!(after["alertWindowDays"], 60);
    }

    #[tokio::test]
    async fn test_update_validation() {
        let app = TestApp::new().await;
        for body in [
            json!({ "alertWindowDays": 0 }),
            json!({ "alertWindowDays": "treinta" }),
            json!({ "monthColors": "rojo" }),
            json!({ "monthColors": { "13": "#ffffff" } }),
            json!({ "monthColors": { "5": "red" } }),
        ] {
            app.put("/api/config")
                .json(&body)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        let config: Value = app.get("/api/config").await.json();
        assert_eq!(config["alertWindowDays"], 60);
    }
}
