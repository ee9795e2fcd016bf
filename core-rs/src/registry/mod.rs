/**
 * registry module
 *
 * - resolver: builds the registry from a batch of definitions
 * - resolved: registry entries and serializable descriptors
 * - order: listing orders (child-to-parent, parent-to-child, by id)
 * - diagnostics: definitions dropped during resolution and why
 */

pub mod diagnostics;
pub mod order;
pub mod resolved;
pub mod resolver;

pub use diagnostics::{Exclusion, ExclusionReason};
pub use order::TypeOrder;
pub use resolved::{AttributeDescriptor, ProjectTypeDescriptor, ResolvedProjectType};
pub use resolver::{is_valid_type_id, TypeGraphResolver};

use std::collections::BTreeMap;

use crate::errors::{RegistryError, Result};
use crate::types::ProjectTypeDefinition;

/// Immutable, resolved set of project types
///
/// # Examples
///
/// ```
/// use ptype_core::{ProjectTypeDefinition, ProjectTypeRegistry, TypeOrder};
///
/// let mut parent = ProjectTypeDefinition::new("parent", "Parent", true, false);
/// parent.add_constant("parent_const", "Parent Const", "p");
///
/// let mut child = ProjectTypeDefinition::new("child", "Child", true, false);
/// child.add_parent("parent").add_constant("child_const", "Child Const", "c");
///
/// let registry = ProjectTypeRegistry::new(vec![child, parent]);
///
/// assert_eq!(registry.len(), 3);
/// let child = registry.get_project_type("child").unwrap();
/// assert_eq!(child.attributes().len(), 2);
/// assert!(child.is_type_of("parent"));
///
/// let ids: Vec<&str> = registry
///     .project_types_ordered(TypeOrder::ChildToParent)
///     .iter()
///     .map(|t| t.id())
///     .collect();
/// assert_eq!(ids, vec!["child", "parent", "blank"]);
/// ```
#[derive(Debug, Clone)]
pub struct ProjectTypeRegistry {
    types: BTreeMap<String, ResolvedProjectType>,
    exclusions: Vec<Exclusion>,
}

impl ProjectTypeRegistry {
    /// Resolve `definitions` into a registry. Invalid definitions are
    /// dropped, never reported as errors.
    pub fn new(definitions: impl IntoIterator<Item = ProjectTypeDefinition>) -> Self {
        definitions.into_iter().collect::<TypeGraphResolver>().resolve()
    }

    pub(crate) fn from_parts(types: BTreeMap<String, ResolvedProjectType>, exclusions: Vec<Exclusion>) -> Self {
        Self { types, exclusions }
    }

    /// Look up a resolved type
    ///
    /// # Errors
    /// `RegistryError::NotFound` if `id` is unknown or was excluded
    pub fn get_project_type(&self, id: &str) -> Result<&ResolvedProjectType> {
        self.types
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// All resolved types, including the base type
    pub fn project_types(&self) -> Vec<&ResolvedProjectType> {
        self.types.values().collect()
    }

    /// All resolved types in the requested order
    pub fn project_types_ordered(&self, order: TypeOrder) -> Vec<&ResolvedProjectType> {
        let mut types = self.project_types();
        types.sort_by(|a, b| order.compare(a, b));
        types
    }

    /// Whether `type_id` is `candidate` or inherits from it
    ///
    /// # Errors
    /// `RegistryError::NotFound` if `type_id` is not registered
    pub fn is_type_of(&self, type_id: &str, candidate: &str) -> Result<bool> {
        Ok(self.get_project_type(type_id)?.is_type_of(candidate))
    }

    pub fn primary_types(&self) -> Vec<&ResolvedProjectType> {
        self.types.values().filter(|t| t.is_primary()).collect()
    }

    pub fn mixin_types(&self) -> Vec<&ResolvedProjectType> {
        self.types.values().filter(|t| t.is_mixable()).collect()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Never true in practice; the base type is always registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Definitions dropped during resolution
    #[must_use]
    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    pub fn descriptors(&self, order: TypeOrder) -> Vec<ProjectTypeDescriptor> {
        self.project_types_ordered(order)
            .into_iter()
            .map(ResolvedProjectType::descriptor)
            .collect()
    }
}

impl Default for ProjectTypeRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
