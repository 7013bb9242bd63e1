//! Pre-built Test Fixtures

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use domain_client::{Cliente, EstadoCliente, Poliza, Transporte, Vencimientos};
use domain_user::{NewUsuario, Rol, Usuario};

use crate::builders::TestClienteBuilder;

/// bcrypt cost for tests; the minimum the algorithm allows
pub const TEST_BCRYPT_COST: u32 = 4;

/// The "today" every fixture is relative to
pub static TODAY: Lazy<NaiveDate> = Lazy::new(|| DateFixtures::date(2025, 3, 15));

pub struct DateFixtures;

impl DateFixtures {
    /// Panics on an invalid calendar date
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| panic!("invalid fixture date {}-{}-{}", year, month, day))
    }

    pub fn today() -> NaiveDate {
        *TODAY
    }

    pub fn in_days(days: i64) -> NaiveDate {
        Self::today() + Duration::days(days)
    }
}

pub struct ClienteFixtures;

impl ClienteFixtures {
    /// Contracted client whose policy ends in 10 days
    pub fn transportes_ebro() -> Cliente {
        TestClienteBuilder::new()
            .with_empresa("Transportes Ebro S.L.")
            .with_contacto("Lucía Martín")
            .with_estado(EstadoCliente::Contratado)
            .with_tipo_carga("frigorifica")
            .with_transporte(Transporte::Nacional)
            .with_poliza(
                Poliza::new(DateFixtures::in_days(-355), DateFixtures::in_days(10))
                    .expect("fixture policy period")
                    .with_aseguradora("Mapfre")
                    .with_prima(dec!(1850.00)),
            )
            .build()
    }

    /// Negotiating client with only typed renewal dates
    pub fn logistica_norte() -> Cliente {
        TestClienteBuilder::new()
            .with_empresa("Logística del Norte")
            .with_contacto("Iker Etxeberria")
            .with_estado(EstadoCliente::EnNegociacion)
            .with_transporte(Transporte::EspanaFrancia)
            .with_vencimientos(Vencimientos {
                rc: Some(DateFixtures::in_days(20)),
                flotas: Some(DateFixtures::in_days(45)),
                ..Default::default()
            })
            .build()
    }

    /// Client without status, transport or dates
    pub fn sin_definir() -> Cliente {
        TestClienteBuilder::new()
            .with_empresa("Mudanzas Rápidas")
            .with_contacto("Carmen Ruiz")
            .build()
    }

    /// Discarded client whose only date is already overdue
    pub fn descartado_vencido() -> Cliente {
        TestClienteBuilder::new()
            .with_empresa("Graneles Castilla")
            .with_contacto("Andrés Pérez")
            .with_estado(EstadoCliente::Descartado)
            .with_tipo_carga("a_granel")
            .with_vencimientos(Vencimientos {
                pyme: Some(DateFixtures::in_days(-5)),
                ..Default::default()
            })
            .build()
    }

    pub fn sample_set() -> Vec<Cliente> {
        vec![
            Self::transportes_ebro(),
            Self::logistica_norte(),
            Self::sin_definir(),
            Self::descartado_vencido(),
        ]
    }
}

pub struct UsuarioFixtures;

impl UsuarioFixtures {
    pub const ADMIN_EMAIL: &'static str = "admin@crm.com";
    pub const ADMIN_PASSWORD: &'static str = "admin123";

    pub fn admin() -> Usuario {
        Usuario::register(
            NewUsuario {
                email: Self::ADMIN_EMAIL.to_string(),
                password: Self::ADMIN_PASSWORD.to_string(),
                nombre: "Administrador".to_string(),
                rol: Rol::Admin,
            },
            TEST_BCRYPT_COST,
        )
        .expect("fixture admin account")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_set_is_distinct() {
        let set = ClienteFixtures::sample_set();
        assert_eq!(set.len(), 4);
        let mut ids: Vec<_> = set.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_admin_password_verifies() {
        assert!(UsuarioFixtures::admin().check_password(UsuarioFixtures::ADMIN_PASSWORD));
    }
}
