//! # Validation Errors
//!
//! The error taxonomy of the validation engine and the [`Breadcrumb`] trail
//! that locates a violation inside the tenant tree.
//!
//! Validation is fail-fast: the first violation anywhere in the traversal
//! aborts the whole run, so every [`FlattenError`] describes exactly one
//! defect. No aggregation, no warnings.

/// Ordered ancestor identifiers from the tenant down to the immediate
/// parent of the offending node.
///
/// Rendered with `" -> "` between segments, the separator the downstream
/// tooling greps for in diagnostics. An empty breadcrumb means the violation
/// is at the document's top level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumb(Vec<String>);

impl Breadcrumb {
    /// The empty trail at the document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A new trail extended by one context identifier. The receiver is
    /// unchanged, so sibling subtrees share their ancestors' trail.
    #[must_use]
    pub fn child(&self, id: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(id.into());
        Self(segments)
    }

    /// The trail segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether the trail is at the document root.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `": a -> b"` for a non-empty trail, `""` at the root. Keeps error
    /// messages free of a dangling separator for top-level violations.
    fn suffix(&self) -> String {
        if self.0.is_empty() {
            String::new()
        } else {
            format!(": {self}")
        }
    }
}

impl std::fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}

impl<S: Into<String>> FromIterator<S> for Breadcrumb {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A single validation violation. Terminal for the invocation that raised it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    /// A required key is absent, empty, or of an unusable shape.
    #[error("\"{field}\" missing in {kind}{}", .at.suffix())]
    MissingField {
        /// The required key.
        field: &'static str,
        /// Entity kind the key was required on.
        kind: &'static str,
        /// Where in the tree the violation occurred.
        at: Breadcrumb,
    },

    /// A name collides with an earlier declaration in the same uniqueness
    /// scope.
    #[error("\"{name}\" redeclared in {scope}{}", .at.suffix())]
    DuplicateName {
        /// The colliding name.
        name: String,
        /// The uniqueness scope the collision happened in.
        scope: &'static str,
        /// Where in the tree the violation occurred.
        at: Breadcrumb,
    },

    /// A reference to a name that has not been registered in its scope at
    /// this point of the traversal. Declaration order matters: a name
    /// declared later in the document does not resolve.
    #[error("{field} \"{name}\" not declared in {scope}{}", .at.suffix())]
    UnresolvedReference {
        /// The referencing key.
        field: &'static str,
        /// The unresolved name.
        name: String,
        /// The scope the name was looked up in.
        scope: &'static str,
        /// Where in the tree the violation occurred.
        at: Breadcrumb,
    },

    /// A value outside the closed vocabulary for its field.
    #[error("\"{value}\" is not a valid {field} (expected one of: {}){}", .allowed.join(", "), .at.suffix())]
    InvalidEnumValue {
        /// The constrained key.
        field: &'static str,
        /// The offending value.
        value: String,
        /// The legal values for the field.
        allowed: &'static [&'static str],
        /// Where in the tree the violation occurred.
        at: Breadcrumb,
    },
}
