//! # Reference Tracker
//!
//! Per-scope registries of declared names, used both to enforce uniqueness
//! and to resolve references during the single ordered pass over the tenant
//! tree.
//!
//! A [`ScopeId`] is a kind label plus the ancestor path that distinguishes
//! sibling scopes of the same kind — the `subnets` scope of one bridge
//! domain is a different scope from the `subnets` scope of its sibling.
//! Scopes are created lazily on first registration and are never merged.
//!
//! `register` followed by `require` over one ordered traversal is what
//! encodes declaration-before-use: `require` only sees what has been
//! registered so far, not the full future document, so a reference to a
//! name declared later in the tree is rejected.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Breadcrumb, FlattenError};

/// Identifies one uniqueness scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScopeId {
    kind: &'static str,
    path: String,
}

impl ScopeId {
    /// A document-global scope (e.g. tenant names).
    pub fn global(kind: &'static str) -> Self {
        Self {
            kind,
            path: String::new(),
        }
    }

    /// A scope nested under an ancestor path. Sibling subtrees must pass
    /// distinct paths to keep their scopes disjoint.
    pub fn under(kind: &'static str, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// The kind label, used to name the scope in diagnostics.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// The per-invocation registry of every scope populated so far.
#[derive(Debug, Default)]
pub struct ScopeLedger {
    scopes: BTreeMap<ScopeId, BTreeSet<String>>,
}

impl ScopeLedger {
    /// An empty ledger. One is created per validation run and discarded with
    /// it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` in `scope`, failing on collision with an earlier
    /// registration.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::DuplicateName`] if `name` is already present
    /// in `scope`.
    pub fn register(
        &mut self,
        scope: &ScopeId,
        name: &str,
        at: &Breadcrumb,
    ) -> Result<(), FlattenError> {
        let names = self.scopes.entry(scope.clone()).or_default();
        if !names.insert(name.to_string()) {
            return Err(FlattenError::DuplicateName {
                name: name.to_string(),
                scope: scope.kind(),
                at: at.clone(),
            });
        }
        Ok(())
    }

    /// Require that `name` has already been registered in `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::UnresolvedReference`] if `name` is absent
    /// from the scope's current contents. `field` names the referencing key
    /// in the diagnostic.
    pub fn require(
        &self,
        scope: &ScopeId,
        field: &'static str,
        name: &str,
        at: &Breadcrumb,
    ) -> Result<(), FlattenError> {
        if !self.contains(scope, name) {
            return Err(FlattenError::UnresolvedReference {
                field,
                name: name.to_string(),
                scope: scope.kind(),
                at: at.clone(),
            });
        }
        Ok(())
    }

    /// Record a sighting of `name` in `scope` without a uniqueness check.
    /// Returns `true` on the first sighting. Used for entities that
    /// deduplicate instead of colliding (filters).
    pub fn observe(&mut self, scope: &ScopeId, name: &str) -> bool {
        self.scopes
            .entry(scope.clone())
            .or_default()
            .insert(name.to_string())
    }

    /// Whether `name` is currently registered in `scope`.
    pub fn contains(&self, scope: &ScopeId, name: &str) -> bool {
        self.scopes
            .get(scope)
            .is_some_and(|names| names.contains(name))
    }
}
