//! Client validation and normalisation rules
//!
//! - `empresa` and `contacto` are required and may not be blank
//! - blank optional text collapses to `None`, so "absent", "null" and ""
//!   are one state
//! - a policy's end date must be strictly after its start date
//! - a `Vencimientos` record with no dates is the same as no record

use chrono::NaiveDate;

use crate::cliente::Vencimientos;
use crate::error::ClientError;

pub fn require_text(value: String) -> Result<String, ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::MissingRequired);
    }
    Ok(value)
}

pub fn normalize_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn validate_policy_period(inicio: NaiveDate, fin: NaiveDate) -> Result<(), ClientError> {
    if fin <= inicio {
        return Err(ClientError::InvalidPolicyPeriod);
    }
    Ok(())
}

pub fn normalize_vencimientos(value: Option<Vencimientos>) -> Option<Vencimientos> {
    value.filter(|v| !v.is_empty())
}
