//! Resets the database to a demo state
//!
//! Wipes users, clients and settings, then creates the admin account
//! (`admin@crm.com` / `admin123`), the default settings and ten sample
//! clients dated relative to today. Reads the same `CRM_` variables as
//! `crm-api`.

use anyhow::Context;

use core_kernel::BusinessCalendar;
use domain_client::{Cliente, ClientePort};
use domain_settings::SettingsPort;
use domain_user::{UserPort, Usuario};
use infra_db::{
    create_pool, run_migrations, DatabaseConfig, PostgresClienteAdapter, PostgresSettingsAdapter,
    PostgresUserAdapter,
};
use interface_api::config::ApiConfig;
use interface_api::seed::{admin_account, sample_clientes, ADMIN_EMAIL, ADMIN_PASSWORD};
use interface_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    init_tracing(&config);
    let calendar = BusinessCalendar::from_timezone_name(&config.timezone)?;

    let pool = create_pool(DatabaseConfig::new(config.database_url.clone()))
        .await
        .context("database connection failed")?;
    run_migrations(&pool).await?;

    let clientes = PostgresClienteAdapter::new(pool.clone());
    let settings = PostgresSettingsAdapter::new(pool.clone());
    let usuarios = PostgresUserAdapter::new(pool);

    let removed_usuarios = usuarios.repository().delete_all().await?;
    let removed_clientes = clientes.repository().delete_all().await?;
    settings.repository().delete().await?;
    tracing::info!(
        usuarios = removed_usuarios,
        clientes = removed_clientes,
        "Existing data removed"
    );

    let cost = config.bcrypt_cost;
    let admin = tokio::task::spawn_blocking(move || Usuario::register(admin_account(), cost)).await??;
    let admin = usuarios.insert(&admin).await?;
    tracing::info!(user = %admin.id, email = ADMIN_EMAIL, "Admin account created");

    let defaults = settings.reset().await?;
    tracing::info!(
        alert_window_days = defaults.alert_window_days,
        "Default settings stored"
    );

    let today = calendar.today();
    let mut created = 0;
    for new in sample_clientes(today)? {
        let cliente = Cliente::create(new)?;
        clientes.insert(&cliente).await?;
        created += 1;
    }
    tracing::info!(clientes = created, %today, "Sample clients created");

    println!("Seed complete. Sign in with {} / {}", ADMIN_EMAIL, ADMIN_PASSWORD);
    Ok(())
}
