//! Project type definitions - declared, unresolved nodes of the type graph
//!
//! A definition only knows what it declares itself: identity, flags, parent
//! ids and its own attributes. Nothing here is validated; whether a
//! definition makes it into the registry is decided at resolution time.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::attribute::{AttributeDefinition, AttributeValue, ValueProviderFactory};

/// Id of the universal base type every other type inherits from
pub const BASE_TYPE_ID: &str = "blank";

/// Display name of the universal base type
pub const BASE_TYPE_DISPLAY_NAME: &str = "Blank";

/// A declared project type
///
/// # Examples
///
/// ```
/// use ptype_core::{ProjectTypeDefinition, BASE_TYPE_ID};
///
/// let mut maven = ProjectTypeDefinition::new("maven", "Maven", true, false);
/// maven
///     .add_parent("java")
///     .add_constant("build_tool", "Build Tool", "maven")
///     .add_variable("artifact_id", "Artifact Id", true, None);
///
/// assert_eq!(maven.parents(), &[BASE_TYPE_ID.to_string(), "java".to_string()]);
/// assert!(maven.get_own_attribute("build_tool").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTypeDefinition {
    id: Option<String>,
    display_name: String,
    primary: bool,
    mixable: bool,
    persisted: bool,
    parents: Vec<String>,
    attributes: BTreeMap<String, AttributeDefinition>,
}

impl ProjectTypeDefinition {
    /// Create a definition. Every type except the base implicitly declares
    /// the base as its first parent.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, primary: bool, mixable: bool) -> Self {
        Self::with_optional_id(Some(id.into()), display_name.into(), primary, mixable)
    }

    /// Create a definition that carries no id at all. The resolver always
    /// excludes it; manifests with a missing `id` produce these.
    pub fn without_id(display_name: impl Into<String>, primary: bool, mixable: bool) -> Self {
        Self::with_optional_id(None, display_name.into(), primary, mixable)
    }

    /// The synthetic universal base type
    pub fn base() -> Self {
        Self::new(BASE_TYPE_ID, BASE_TYPE_DISPLAY_NAME, true, false)
    }

    fn with_optional_id(id: Option<String>, display_name: String, primary: bool, mixable: bool) -> Self {
        let parents = match id.as_deref() {
            Some(BASE_TYPE_ID) => Vec::new(),
            _ => vec![BASE_TYPE_ID.to_string()],
        };

        Self {
            id,
            display_name,
            primary,
            mixable,
            persisted: true,
            parents,
            attributes: BTreeMap::new(),
        }
    }

    /// Mark whether projects of this type are persisted in project config
    pub fn set_persisted(&mut self, persisted: bool) -> &mut Self {
        self.persisted = persisted;
        self
    }

    /// Append a declared parent id (duplicates are kept)
    pub fn add_parent(&mut self, parent_id: impl Into<String>) -> &mut Self {
        self.parents.push(parent_id.into());
        self
    }

    /// Declare a constant attribute
    pub fn add_constant(
        &mut self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> &mut Self {
        let attribute = AttributeDefinition::constant(self.owner_id(), name, display_name, value);
        self.insert_attribute(attribute)
    }

    /// Declare a variable attribute with an optional literal default
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        required: bool,
        default: Option<AttributeValue>,
    ) -> &mut Self {
        let attribute = AttributeDefinition::variable(self.owner_id(), name, display_name, required, default, None);
        self.insert_attribute(attribute)
    }

    /// Declare a variable attribute whose values come from an external provider
    pub fn add_provided_variable(
        &mut self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        required: bool,
        factory: Arc<dyn ValueProviderFactory>,
    ) -> &mut Self {
        let attribute =
            AttributeDefinition::variable(self.owner_id(), name, display_name, required, None, Some(factory));
        self.insert_attribute(attribute)
    }

    /// Declare an already-built attribute; ownership is rewritten to this type
    pub fn add_attribute(&mut self, mut attribute: AttributeDefinition) -> &mut Self {
        let owner = self.owner_id();
        attribute.set_project_type(&owner);
        self.insert_attribute(attribute)
    }

    fn insert_attribute(&mut self, attribute: AttributeDefinition) -> &mut Self {
        if let Some(previous) = self.attributes.insert(attribute.name().to_string(), attribute) {
            tracing::debug!(
                type_id = %self.owner_id(),
                attribute = %previous.name(),
                "Attribute redeclared on the same type, keeping the latest"
            );
        }
        self
    }

    fn owner_id(&self) -> String {
        self.id.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    #[must_use]
    pub fn is_mixable(&self) -> bool {
        self.mixable
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Declared parent ids in declaration order, implicit base first
    #[must_use]
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Attribute declared by this type itself, ignoring inheritance
    #[must_use]
    pub fn get_own_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn own_attributes(&self) -> &BTreeMap<String, AttributeDefinition> {
        &self.attributes
    }
}
