//! Property-Based Test Generators

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use domain_client::{
    Cliente, EstadoCliente, NewCliente, Poliza, Transporte, Vencimientos, SIN_DEFINIR,
    TIPOS_CARGA_CONOCIDOS,
};

use crate::fixtures::DateFixtures;

pub fn estado_strategy() -> impl Strategy<Value = EstadoCliente> {
    proptest::sample::select(EstadoCliente::ALL.to_vec())
}

pub fn transporte_strategy() -> impl Strategy<Value = Transporte> {
    proptest::sample::select(Transporte::ALL.to_vec())
}

pub fn tipo_carga_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(TIPOS_CARGA_CONOCIDOS.to_vec()).prop_map(str::to_string)
}

/// Dates from 2024-01-01 through roughly four years later
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..1500).prop_map(|offset| DateFixtures::date(2024, 1, 1) + Duration::days(offset))
}

pub fn poliza_strategy() -> impl Strategy<Value = Poliza> {
    (date_strategy(), 1i64..800).prop_map(|(inicio, len)| Poliza {
        aseguradora: None,
        num_poliza: None,
        fecha_inicio: inicio,
        fecha_fin: inicio + Duration::days(len),
        prima: None,
    })
}

pub fn vencimientos_strategy() -> impl Strategy<Value = Vencimientos> {
    (
        proptest::option::of(date_strategy()),
        proptest::option::of(date_strategy()),
        proptest::option::of(date_strategy()),
        proptest::option::of(date_strategy()),
        proptest::option::of(date_strategy()),
    )
        .prop_map(|(rc, mercancias, acc, flotas, pyme)| Vencimientos {
            rc,
            mercancias,
            acc,
            flotas,
            pyme,
        })
}

/// Valid clients with every optional section independently present or absent
pub fn cliente_strategy() -> impl Strategy<Value = Cliente> {
    (
        "[A-Z][a-z]{2,12}( [A-Z][a-z]{2,10})?",
        "[A-Z][a-z]{2,10} [A-Z][a-z]{2,10}",
        proptest::option::of(estado_strategy()),
        proptest::option::of(tipo_carga_strategy()),
        proptest::option::of(transporte_strategy()),
        proptest::option::of(poliza_strategy()),
        proptest::option::of(vencimientos_strategy()),
    )
        .prop_filter_map(
            "cliente must validate",
            |(empresa, contacto, estado, tipo_carga, transporte, poliza, vencimientos)| {
                Cliente::create(NewCliente {
                    empresa,
                    contacto,
                    estado,
                    tipo_carga,
                    transporte,
                    poliza,
                    vencimientos,
                    ..Default::default()
                })
                .ok()
            },
        )
}

/// Raw multi-select values for the estado filter, sometimes with the sentinel
pub fn estado_selection_strategy() -> impl Strategy<Value = Vec<String>> {
    (
        proptest::collection::vec(estado_strategy(), 0..3),
        any::<bool>(),
    )
        .prop_map(|(estados, sentinel)| {
            let mut raw: Vec<String> = estados.iter().map(|e| e.as_str().to_string()).collect();
            if sentinel {
                raw.push(SIN_DEFINIR.to_string());
            }
            raw
        })
}
