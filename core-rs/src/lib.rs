//! # Project Types - composable project type registry
//!
//! A project type is a named schema of attributes describing a kind of
//! software project. Types are contributed independently (plugins, manifests)
//! and may inherit from several parents. This crate resolves a batch of such
//! definitions into one immutable, conflict-free registry.
//!
//! ## Core Principle
//!
//! **Fail open at composition, fail loudly at lookup**: a definition with a
//! bad id, an unresolved parent, an ancestor cycle or an attribute clash is
//! silently left out of the registry (and listed in its diagnostics). Only a
//! lookup of a missing id is an error.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  ProjectTypeDefinition (many, raw)   │
//! │  manifests / plugin contributions    │
//! └──────────────────────────────────────┘
//!                   │ once
//!                   ▼
//!         ┌───────────────────┐
//!         │ TypeGraphResolver │  ids → cycles → parents → ancestors → attributes
//!         └───────────────────┘
//!                   │
//!                   ▼
//!       ┌───────────────────────┐
//!       │  ProjectTypeRegistry  │  immutable, shared read-only
//!       └───────────────────────┘
//! ```

pub mod errors;
pub mod types;
pub mod registry;
pub mod manifest;

pub use errors::{RegistryError, ValueStorageError};
pub use types::{
    AttributeDefinition, AttributeKind, AttributeValue, ProjectTypeDefinition, ValueProvider, ValueProviderFactory,
    BASE_TYPE_ID,
};
pub use registry::{
    AttributeDescriptor, Exclusion, ExclusionReason, ProjectTypeDescriptor, ProjectTypeRegistry, ResolvedProjectType,
    TypeGraphResolver, TypeOrder,
};
pub use manifest::{load_manifest_dir, ProjectTypeManifest, ValueProviderCatalog};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
