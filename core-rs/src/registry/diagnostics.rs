//! Diagnostics side channel - what the resolver dropped and why
//!
//! Exclusions never fail registry construction. They are collected here so
//! hosts can report misbehaving contributors without changing lookup results.

use serde::Serialize;
use thiserror::Error;

/// Why a definition was left out of the registry
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    #[error("invalid project type id")]
    InvalidIdentifier,

    #[error("id is reserved for the base project type")]
    ReservedIdentifier,

    #[error("id declared by {count} definitions")]
    DuplicateIdentifier { count: usize },

    #[error("parent '{parent}' is not a registered project type")]
    UnresolvedParent { parent: String },

    #[error("ancestor cycle: {}", .cycle.join(" -> "))]
    AncestorCycle { cycle: Vec<String> },

    #[error("attribute '{attribute}' declared by both '{first}' and '{second}'")]
    AttributeConflict {
        attribute: String,
        first: String,
        second: String,
    },
}

/// One dropped definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    /// `None` when the definition carried no id
    pub type_id: Option<String>,
    pub reason: ExclusionReason,
}

impl Exclusion {
    pub fn new(type_id: Option<&str>, reason: ExclusionReason) -> Self {
        let exclusion = Self {
            type_id: type_id.map(str::to_string),
            reason,
        };
        tracing::warn!(
            type_id = %exclusion.label(),
            reason = %exclusion.reason,
            "Project type excluded from registry"
        );
        exclusion
    }

    /// Printable id, `<none>` for id-less definitions
    #[must_use]
    pub fn label(&self) -> &str {
        self.type_id.as_deref().unwrap_or("<none>")
    }
}
