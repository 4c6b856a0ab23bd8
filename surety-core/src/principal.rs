//! Principal types for escrow authorization.
//!
//! A principal is the authenticated host-chain identity behind a call. The
//! escrow trusts the host's authentication entirely: a `PrincipalId` is an
//! opaque, unforgeable identifier, not something verified at this layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Unique identifier for a host-chain principal.
///
/// Principals are the unit of authorization: an address binding belongs to
/// exactly one principal, and only that principal may submit payments for
/// the bound address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId {
    /// The principal's identifier on the host chain.
    id: String,

    /// Type of principal.
    kind: PrincipalKind,
}

impl PrincipalId {
    /// Create a new principal ID.
    ///
    /// # Errors
    /// Returns error if `id` is empty.
    pub fn new(id: impl Into<String>, kind: PrincipalKind) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::invalid_principal("principal ID cannot be empty"));
        }

        Ok(Self { id, kind })
    }

    /// Create an account principal (an externally-controlled address).
    pub fn account(id: impl Into<String>) -> Result<Self> {
        Self::new(id, PrincipalKind::Account)
    }

    /// Create a contract principal (code deployed on the host chain).
    pub fn contract(id: impl Into<String>) -> Result<Self> {
        Self::new(id, PrincipalKind::Contract)
    }

    /// Get the principal's ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the principal's kind.
    pub fn kind(&self) -> &PrincipalKind {
        &self.kind
    }

    /// Check if this is an account principal.
    pub fn is_account(&self) -> bool {
        matches!(self.kind, PrincipalKind::Account)
    }

    /// Check if this is a contract principal.
    pub fn is_contract(&self) -> bool {
        matches!(self.kind, PrincipalKind::Contract)
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.type_name(), self.id)
    }
}

/// Type of principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    /// An externally-controlled account.
    Account,

    /// A contract deployed on the host chain.
    Contract,
}

impl PrincipalKind {
    /// Get the type name for display/serialization.
    pub fn type_name(&self) -> &'static str {
        match self {
            PrincipalKind::Account => "account",
            PrincipalKind::Contract => "contract",
        }
    }
}
