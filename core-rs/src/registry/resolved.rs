//! Resolved project types and their serializable descriptors

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{AttributeDefinition, ProjectTypeDefinition};

/// A registry entry: a valid definition plus its computed ancestry and
/// merged attributes. Owns copies of everything it exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProjectType {
    id: String,
    definition: ProjectTypeDefinition,
    ancestors: BTreeSet<String>,
    attributes: BTreeMap<String, AttributeDefinition>,
}

impl ResolvedProjectType {
    pub(crate) fn new(
        definition: ProjectTypeDefinition,
        ancestors: BTreeSet<String>,
        attributes: BTreeMap<String, AttributeDefinition>,
    ) -> Self {
        Self {
            id: definition.id().unwrap_or_default().to_string(),
            definition,
            ancestors,
            attributes,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.definition.display_name()
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.definition.is_primary()
    }

    #[must_use]
    pub fn is_mixable(&self) -> bool {
        self.definition.is_mixable()
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.definition.is_persisted()
    }

    #[must_use]
    pub fn parents(&self) -> &[String] {
        self.definition.parents()
    }

    /// Every type reachable through declared parents, excluding self
    #[must_use]
    pub fn ancestors(&self) -> &BTreeSet<String> {
        &self.ancestors
    }

    /// Own and inherited attributes
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, AttributeDefinition> {
        &self.attributes
    }

    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.get(name)
    }

    /// The definition this entry was resolved from
    #[must_use]
    pub fn definition(&self) -> &ProjectTypeDefinition {
        &self.definition
    }

    /// True for the type itself and any of its ancestors
    #[must_use]
    pub fn is_type_of(&self, candidate: &str) -> bool {
        self.id == candidate || self.ancestors.contains(candidate)
    }

    pub fn descriptor(&self) -> ProjectTypeDescriptor {
        ProjectTypeDescriptor {
            id: self.id.clone(),
            display_name: self.display_name().to_string(),
            primary: self.is_primary(),
            mixable: self.is_mixable(),
            persisted: self.is_persisted(),
            parents: self.parents().to_vec(),
            ancestors: self.ancestors.iter().cloned().collect(),
            attributes: self.attributes.values().map(AttributeDescriptor::from).collect(),
        }
    }
}

/// Serializable view of a resolved project type for service and CLI output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTypeDescriptor {
    pub id: String,
    pub display_name: String,
    pub primary: bool,
    pub mixable: bool,
    pub persisted: bool,
    pub parents: Vec<String>,
    pub ancestors: Vec<String>,
    pub attributes: Vec<AttributeDescriptor>,
}

/// Serializable view of an attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub project_type: String,
    pub required: bool,
    pub variable: bool,
    pub value_provided: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<String>>,
}

impl From<&AttributeDefinition> for AttributeDescriptor {
    fn from(attribute: &AttributeDefinition) -> Self {
        Self {
            id: attribute.qualified_id(),
            name: attribute.name().to_string(),
            display_name: attribute.display_name().to_string(),
            project_type: attribute.project_type().to_string(),
            required: attribute.is_required(),
            variable: attribute.is_variable(),
            value_provided: attribute.is_value_provided(),
            value: attribute.value().map(|v| v.values().to_vec()),
        }
    }
}
