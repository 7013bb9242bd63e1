//! Test Data Builders
//!
//! Unspecified names, phones and emails are filled in with `fake`.

use chrono::{DateTime, NaiveDate, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;

use domain_client::{Cliente, EstadoCliente, NewCliente, Poliza, Transporte, Vencimientos};

/// Builds valid [`Cliente`] values
#[derive(Debug, Clone)]
pub struct TestClienteBuilder {
    new: NewCliente,
    created_at: Option<DateTime<Utc>>,
}

impl Default for TestClienteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClienteBuilder {
    pub fn new() -> Self {
        Self {
            new: NewCliente {
                empresa: CompanyName().fake(),
                contacto: Name().fake(),
                telefono: Some(PhoneNumber().fake()),
                correo: Some(SafeEmail().fake()),
                ..Default::default()
            },
            created_at: None,
        }
    }

    pub fn with_empresa(mut self, empresa: impl Into<String>) -> Self {
        self.new.empresa = empresa.into();
        self
    }

    pub fn with_contacto(mut self, contacto: impl Into<String>) -> Self {
        self.new.contacto = contacto.into();
        self
    }

    pub fn with_telefono(mut self, telefono: impl Into<String>) -> Self {
        self.new.telefono = Some(telefono.into());
        self
    }

    pub fn with_correo(mut self, correo: impl Into<String>) -> Self {
        self.new.correo = Some(correo.into());
        self
    }

    pub fn with_estado(mut self, estado: EstadoCliente) -> Self {
        self.new.estado = Some(estado);
        self
    }

    pub fn with_tipo_carga(mut self, tipo_carga: impl Into<String>) -> Self {
        self.new.tipo_carga = Some(tipo_carga.into());
        self
    }

    pub fn with_transporte(mut self, transporte: Transporte) -> Self {
        self.new.transporte = Some(transporte);
        self
    }

    pub fn with_poliza(mut self, poliza: Poliza) -> Self {
        self.new.poliza = Some(poliza);
        self
    }

    /// One-year policy ending on `fecha_fin`
    pub fn with_poliza_fin(self, fecha_fin: NaiveDate) -> Self {
        let inicio = fecha_fin
            .checked_sub_months(chrono::Months::new(12))
            .unwrap_or(NaiveDate::MIN);
        match Poliza::new(inicio, fecha_fin) {
            Ok(poliza) => self.with_poliza(poliza),
            Err(_) => self,
        }
    }

    pub fn with_vencimientos(mut self, vencimientos: Vencimientos) -> Self {
        self.new.vencimientos = Some(vencimientos);
        self
    }

    pub fn with_num_vehiculos(mut self, n: u32) -> Self {
        self.new.num_vehiculos = Some(n);
        self
    }

    pub fn with_notas(mut self, notas: impl Into<String>) -> Self {
        self.new.notas = Some(notas.into());
        self
    }

    /// Overrides the creation timestamp, for ordering tests
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Panics if the accumulated data violates a domain rule
    pub fn build(self) -> Cliente {
        let mut cliente = Cliente::create(self.new).expect("builder produced an invalid cliente");
        if let Some(at) = self.created_at {
            cliente.created_at = at;
            cliente.updated_at = at;
        }
        cliente
    }
}
