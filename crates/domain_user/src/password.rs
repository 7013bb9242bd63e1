//! bcrypt password hashing

use crate::error::UserError;

pub const BCRYPT_COST: u32 = 10;

pub fn hash_password(plain: &str, cost: u32) -> Result<String, UserError> {
    Ok(bcrypt::hash(plain, cost)?)
}

/// Malformed stored hashes verify as `false`
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}
