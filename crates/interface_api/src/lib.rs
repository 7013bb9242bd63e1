//! HTTP API Layer
//!
//! This crate provides the REST API of the brokerage CRM using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per resource (clientes, vencimientos,
//!   dashboard, config, auth, health)
//! - **Middleware**: JWT authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: `{"error": "..."}` bodies with Spanish messages
//!
//! Handlers only talk to the storage ports held in [`AppState`], so the
//! whole surface runs against the in-memory mocks in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::with_postgres(pool, config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod seed;
pub mod telemetry;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{BusinessCalendar, TemporalError};
use domain_client::ClientePort;
use domain_settings::SettingsPort;
use domain_user::UserPort;
use infra_db::{DatabasePool, PostgresClienteAdapter, PostgresSettingsAdapter, PostgresUserAdapter};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{auth as auth_handlers, clientes, config as config_handlers, dashboard, health, vencimientos};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub clientes: Arc<dyn ClientePort>,
    pub settings: Arc<dyn SettingsPort>,
    pub usuarios: Arc<dyn UserPort>,
    pub config: ApiConfig,
    pub calendar: BusinessCalendar,
}

impl AppState {
    pub fn new(
        clientes: Arc<dyn ClientePort>,
        settings: Arc<dyn SettingsPort>,
        usuarios: Arc<dyn UserPort>,
        config: ApiConfig,
        calendar: BusinessCalendar,
    ) -> Self {
        Self {
            clientes,
            settings,
            usuarios,
            config,
            calendar,
        }
    }

    /// Wires the PostgreSQL adapters and the configured business timezone
    pub fn with_postgres(pool: DatabasePool, config: ApiConfig) -> Result<Self, TemporalError> {
        let calendar = BusinessCalendar::from_timezone_name(&config.timezone)?;
        Ok(Self::new(
            Arc::new(PostgresClienteAdapter::new(pool.clone())),
            Arc::new(PostgresSettingsAdapter::new(pool.clone())),
            Arc::new(PostgresUserAdapter::new(pool)),
            config,
            calendar,
        ))
    }
}

/// Creates the main API router
///
/// Everything lives under `/api`. Health, register and login are public;
/// every other route requires a bearer token.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login));

    let protected_routes = Router::new()
        .route("/auth/me", get(auth_handlers::me))
        .route("/auth/profile", put(auth_handlers::update_profile))
        .route("/auth/change-password", put(auth_handlers::change_password))
        .route(
            "/clientes",
            get(clientes::list_clientes).post(clientes::create_cliente),
        )
        .route("/clientes/bulk-delete", post(clientes::bulk_delete_clientes))
        .route(
            "/clientes/:id",
            get(clientes::get_cliente)
                .put(clientes::update_cliente)
                .delete(clientes::delete_cliente),
        )
        .route("/vencimientos", get(vencimientos::list))
        .route("/vencimientos/resumen", get(vencimientos::get_resumen))
        .route("/vencimientos/por-mes", get(vencimientos::por_mes))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route(
            "/config",
            get(config_handlers::get_config).put(config_handlers::update_config),
        )
        .route_layer(axum_middleware::from_fn(audit_middleware))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let cors = cors_layer(&state.config);

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .origins()
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Ruta no encontrada".to_string())
}
