//! Demo data for `crm-seed`
//!
//! Dates are relative to the day the seed runs so the dashboard always has
//! something due in the coming weeks and months.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use domain_client::{ClientError, EstadoCliente, NewCliente, Poliza, Transporte, Vencimientos};
use domain_user::{NewUsuario, Rol};

pub const ADMIN_EMAIL: &str = "admin@crm.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub fn admin_account() -> NewUsuario {
    NewUsuario {
        email: ADMIN_EMAIL.to_string(),
        password: ADMIN_PASSWORD.to_string(),
        nombre: "Administrador".to_string(),
        rol: Rol::Admin,
    }
}

#[derive(Clone, Copy)]
enum Offset {
    Days(u64),
    Months(u32),
}

impl Offset {
    fn from(self, today: NaiveDate) -> NaiveDate {
        match self {
            Offset::Days(n) => today.checked_add_days(Days::new(n)),
            Offset::Months(n) => today.checked_add_months(Months::new(n)),
        }
        .unwrap_or(today)
    }
}

struct Sample {
    empresa: &'static str,
    contacto: &'static str,
    cif: &'static str,
    telefono: &'static str,
    correo: &'static str,
    estado: EstadoCliente,
    tipo_carga: &'static str,
    transporte: Transporte,
    aseguradora: &'static str,
    policy_months: u32,
    prima: i64,
    /// rc, mercancias, acc, flotas, pyme
    renewals: [Option<Offset>; 5],
    num_vehiculos: u32,
    facturacion: &'static str,
    conversacion: &'static str,
    called_days_ago: Option<u64>,
}

use Offset::{Days as D, Months as M};

const SAMPLES: [Sample; 10] = [
    Sample {
        empresa: "Transportes Moncayo S.L.",
        contacto: "Javier Lacasa",
        cif: "B50123456",
        telefono: "976112233",
        correo: "javier@moncayo.es",
        estado: EstadoCliente::ContactadoBuenaPinta,
        tipo_carga: "general_fraccionada",
        transporte: Transporte::Nacional,
        aseguradora: "Mutua Madrileña",
        policy_months: 2,
        prima: 2400,
        renewals: [Some(D(12)), Some(M(2)), None, None, None],
        num_vehiculos: 4,
        facturacion: "450mil",
        conversacion: "Pendiente de enviar propuesta",
        called_days_ago: Some(0),
    },
    Sample {
        empresa: "Frigoríficos del Turia S.A.",
        contacto: "Elena Navarro",
        cif: "A46987654",
        telefono: "963445566",
        correo: "elena@frigoturia.es",
        estado: EstadoCliente::EnNegociacion,
        tipo_carga: "frigorifica",
        transporte: Transporte::Internacional,
        aseguradora: "Mapfre",
        policy_months: 5,
        prima: 4700,
        renewals: [Some(D(40)), Some(M(3)), Some(M(5)), None, None],
        num_vehiculos: 14,
        facturacion: "2,3M",
        conversacion: "Ajustando franquicias",
        called_days_ago: None,
    },
    Sample {
        empresa: "Logística Cantábrica",
        contacto: "Iñigo Etxeberria",
        cif: "B48334455",
        telefono: "944556677",
        correo: "inigo@logcantabrica.es",
        estado: EstadoCliente::Contratado,
        tipo_carga: "frigorifica",
        transporte: Transporte::Peninsular,
        aseguradora: "Catalana Occidente",
        policy_months: 4,
        prima: 3100,
        renewals: [Some(D(28)), None, None, Some(M(4)), None],
        num_vehiculos: 9,
        facturacion: "1,1M",
        conversacion: "Cliente activo",
        called_days_ago: Some(6),
    },
    Sample {
        empresa: "Mudanzas Giralda",
        contacto: "Rocío Benítez",
        cif: "B41778899",
        telefono: "954667788",
        correo: "rocio@mudanzasgiralda.es",
        estado: EstadoCliente::ContactadoBuenaPinta,
        tipo_carga: "completa_ftl",
        transporte: Transporte::Nacional,
        aseguradora: "Zurich",
        policy_months: 6,
        prima: 1750,
        renewals: [Some(D(55)), Some(M(2)), Some(M(4)), None, Some(M(6))],
        num_vehiculos: 3,
        facturacion: "280mil",
        conversacion: "Esperando respuesta",
        called_days_ago: Some(11),
    },
    Sample {
        empresa: "Graneles Meseta S.L.",
        contacto: "Alberto Castaño",
        cif: "B47221133",
        telefono: "983221144",
        correo: "alberto@granelesmeseta.es",
        estado: EstadoCliente::Contratado,
        tipo_carga: "a_granel",
        transporte: Transporte::EspanaFrancia,
        aseguradora: "Allianz",
        policy_months: 8,
        prima: 5600,
        renewals: [Some(M(1)), Some(M(3)), None, Some(M(6)), None],
        num_vehiculos: 16,
        facturacion: "5,2M",
        conversacion: "Renovación automática",
        called_days_ago: None,
    },
    Sample {
        empresa: "Paquetería Exprés Levante",
        contacto: "Marta Soler",
        cif: "B03556677",
        telefono: "965889900",
        correo: "marta@expreslevante.es",
        estado: EstadoCliente::EnNegociacion,
        tipo_carga: "fraccionada_ltl",
        transporte: Transporte::Peninsular,
        aseguradora: "AXA",
        policy_months: 3,
        prima: 2750,
        renewals: [Some(D(18)), None, Some(M(2)), None, None],
        num_vehiculos: 6,
        facturacion: "750mil",
        conversacion: "Pendiente de firma",
        called_days_ago: Some(2),
    },
    Sample {
        empresa: "Hortofrutícola Segura Transportes",
        contacto: "Antonio Ruiz",
        cif: "B30112244",
        telefono: "968334455",
        correo: "antonio@hortosegura.es",
        estado: EstadoCliente::Contratado,
        tipo_carga: "frigorifica",
        transporte: Transporte::EspanaFranciaPortugal,
        aseguradora: "Generali",
        policy_months: 7,
        prima: 4150,
        renewals: [Some(M(2)), Some(M(5)), None, Some(M(7)), Some(M(4))],
        num_vehiculos: 11,
        facturacion: "3,4M",
        conversacion: "Cliente satisfecho",
        called_days_ago: None,
    },
    Sample {
        empresa: "Químicos Tarraco Logística",
        contacto: "Núria Puig",
        cif: "B43998877",
        telefono: "977556644",
        correo: "nuria@tarracolog.es",
        estado: EstadoCliente::ContactadoBuenaPinta,
        tipo_carga: "adr_peligrosas",
        transporte: Transporte::Internacional,
        aseguradora: "Pelayo",
        policy_months: 10,
        prima: 6900,
        renewals: [Some(D(85)), Some(M(4)), Some(M(7)), None, None],
        num_vehiculos: 22,
        facturacion: "7,9M",
        conversacion: "Estudiando propuesta",
        called_days_ago: None,
    },
    Sample {
        empresa: "Distribuciones Miño",
        contacto: "Xosé Otero",
        cif: "B27445566",
        telefono: "982667788",
        correo: "xose@distmino.es",
        estado: EstadoCliente::Descartado,
        tipo_carga: "general_fraccionada",
        transporte: Transporte::EspanaPortugal,
        aseguradora: "Caser",
        policy_months: 1,
        prima: 1450,
        renewals: [Some(D(24)), None, None, None, None],
        num_vehiculos: 2,
        facturacion: "140mil",
        conversacion: "No interesa por ahora",
        called_days_ago: None,
    },
    Sample {
        empresa: "Portavehículos Pirineo",
        contacto: "Carmen Aznar",
        cif: "B22889911",
        telefono: "974223344",
        correo: "carmen@pirineoauto.es",
        estado: EstadoCliente::Contratado,
        tipo_carga: "vehiculos",
        transporte: Transporte::Peninsular,
        aseguradora: "Mutua Madrileña",
        policy_months: 9,
        prima: 3450,
        renewals: [Some(M(3)), Some(M(6)), None, Some(M(9)), None],
        num_vehiculos: 7,
        facturacion: "1,7M",
        conversacion: "Renovación pactada",
        called_days_ago: None,
    },
];

/// Ten varied clients with their policies starting `today`
pub fn sample_clientes(today: NaiveDate) -> Result<Vec<NewCliente>, ClientError> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let poliza = Poliza::new(today, Offset::Months(s.policy_months).from(today))?
                .with_aseguradora(s.aseguradora)
                .with_num_poliza(format!("POL-{}-{:03}", today.year(), i + 1))
                .with_prima(Decimal::from(s.prima));
            let [rc, mercancias, acc, flotas, pyme] = s.renewals.map(|o| o.map(|o| o.from(today)));

            Ok(NewCliente {
                empresa: s.empresa.to_string(),
                contacto: s.contacto.to_string(),
                cif: Some(s.cif.to_string()),
                telefono: Some(s.telefono.to_string()),
                correo: Some(s.correo.to_string()),
                estado: Some(s.estado),
                tipo_carga: Some(s.tipo_carga.to_string()),
                transporte: Some(s.transporte),
                poliza: Some(poliza),
                vencimientos: Some(Vencimientos {
                    rc,
                    mercancias,
                    acc,
                    flotas,
                    pyme,
                }),
                num_vehiculos: Some(s.num_vehiculos),
                facturacion: Some(s.facturacion.to_string()),
                fecha_llamada: s
                    .called_days_ago
                    .and_then(|n| today.checked_sub_days(Days::new(n))),
                estado_conversacion: Some(s.conversacion.to_string()),
                ..Default::default()
            })
        })
        .collect()
}
