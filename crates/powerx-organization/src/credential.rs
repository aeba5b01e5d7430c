//! Credential service
//!
//! One-way password hashing and verification backed by bcrypt. The salt is
//! generated per hash and embedded in the output, and the hash comparison
//! inside `bcrypt::verify` is constant-time.

use powerx_common::{OrgError, OrgResult};

/// Cost range supported by bcrypt.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt only reads the first 72 bytes; longer inputs are rejected instead
/// of silently truncated.
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Lowest cost accepted by the server configuration.
pub const MIN_PRODUCTION_COST: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialService {
    cost: u32,
}

impl Default for CredentialService {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl CredentialService {
    /// Creates a service hashing with the given bcrypt cost.
    ///
    /// Any cost bcrypt supports is accepted here so tests can use
    /// [`MIN_COST`]; deployments go through [`CredentialService::production`].
    pub fn new(cost: u32) -> OrgResult<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(OrgError::validation(format!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_COST, MAX_COST, cost
            )));
        }
        Ok(Self { cost })
    }

    /// Creates a service for a deployment, refusing costs below [`MIN_PRODUCTION_COST`].
    pub fn production(cost: u32) -> OrgResult<Self> {
        if cost < MIN_PRODUCTION_COST {
            return Err(OrgError::validation(format!(
                "bcrypt cost {} is below the production minimum {}",
                cost, MIN_PRODUCTION_COST
            )));
        }
        Self::new(cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, plaintext: &str) -> OrgResult<String> {
        if plaintext.len() > MAX_PASSWORD_LENGTH {
            return Err(OrgError::validation(format!(
                "password must not exceed {} bytes",
                MAX_PASSWORD_LENGTH
            )));
        }
        bcrypt::hash(plaintext, self.cost).map_err(|e| OrgError::Hash(e.to_string()))
    }

    /// Malformed hashes verify as `false`.
    pub fn verify(&self, hashed: &str, plaintext: &str) -> bool {
        bcrypt::verify(plaintext, hashed).unwrap_or(false)
    }
}
