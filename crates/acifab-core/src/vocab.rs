//! # Schema Vocabulary
//!
//! Closed value sets for the constrained fields of the tenancy model:
//! contract scope, contract binding role, and subnet visibility.
//!
//! Each vocabulary is an enum with a fallible [`parse`](ContractScope::parse)
//! constructor; membership testing is "does `parse` succeed". The engine
//! turns a failed parse into an `InvalidEnumValue` error carrying the
//! [`names`](ContractScope::names) of the legal values.

use serde::{Deserialize, Serialize};

/// Enforcement scope of a security contract.
///
/// Controls how far a contract's permit rules reach when the same contract
/// name is consumed and provided across profile or tenant boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractScope {
    /// Rules apply only between endpoint groups of one application profile.
    ApplicationProfile,
    /// Rules apply within one routing context (vrf).
    Context,
    /// Rules apply fabric-wide, across tenants.
    Global,
    /// Rules apply within the owning tenant.
    Tenant,
}

impl ContractScope {
    /// All contract scopes.
    pub fn all() -> &'static [ContractScope] {
        &[
            Self::ApplicationProfile,
            Self::Context,
            Self::Global,
            Self::Tenant,
        ]
    }

    /// The canonical string names of all contract scopes.
    pub fn names() -> &'static [&'static str] {
        &["application-profile", "context", "global", "tenant"]
    }

    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationProfile => "application-profile",
            Self::Context => "context",
            Self::Global => "global",
            Self::Tenant => "tenant",
        }
    }

    /// Parse a candidate value. `None` means the value is outside the
    /// vocabulary.
    pub fn parse(value: &str) -> Option<ContractScope> {
        Self::all().iter().copied().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for ContractScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of an endpoint group in a contract binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractRole {
    /// The endpoint group consumes the contract.
    Consumer,
    /// The endpoint group provides the contract.
    Provider,
}

impl ContractRole {
    /// All contract roles.
    pub fn all() -> &'static [ContractRole] {
        &[Self::Consumer, Self::Provider]
    }

    /// The canonical string names of all contract roles.
    pub fn names() -> &'static [&'static str] {
        &["consumer", "provider"]
    }

    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consumer => "consumer",
            Self::Provider => "provider",
        }
    }

    /// Parse a candidate value. `None` means the value is outside the
    /// vocabulary.
    pub fn parse(value: &str) -> Option<ContractRole> {
        Self::all().iter().copied().find(|r| r.as_str() == value)
    }
}

impl std::fmt::Display for ContractRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Advertisement visibility of a bridge-domain subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetVisibility {
    /// Confined to the owning bridge domain's vrf.
    Private,
    /// Advertised outside the fabric via L3 outs.
    Public,
    /// Leaked to other vrfs that import it.
    Shared,
}

impl SubnetVisibility {
    /// All subnet visibilities.
    pub fn all() -> &'static [SubnetVisibility] {
        &[Self::Private, Self::Public, Self::Shared]
    }

    /// The canonical string names of all subnet visibilities.
    pub fn names() -> &'static [&'static str] {
        &["private", "public", "shared"]
    }

    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
            Self::Shared => "shared",
        }
    }

    /// Parse a candidate value. `None` means the value is outside the
    /// vocabulary.
    pub fn parse(value: &str) -> Option<SubnetVisibility> {
        Self::all().iter().copied().find(|v| v.as_str() == value)
    }
}

impl std::fmt::Display for SubnetVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
