//! Attribute definitions - the metadata carried by a project type
//!
//! An attribute is either a constant (fixed value, always required) or a
//! variable (optionally required, with an optional literal default and/or a
//! reference to an external value provider).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::errors::ValueStorageError;

/// Literal attribute value - an ordered list of strings
///
/// # Examples
///
/// ```
/// use ptype_core::AttributeValue;
///
/// let single = AttributeValue::from("java");
/// assert_eq!(single.first(), Some("java"));
///
/// let many = AttributeValue::from(vec!["src/main/java", "src/test/java"]);
/// assert_eq!(many.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeValue(Vec<String>);

impl AttributeValue {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(values: Vec<&str>) -> Self {
        Self(values.into_iter().map(str::to_string).collect())
    }
}

/// Reads and writes attribute values for one concrete project
pub trait ValueProvider {
    fn get_values(&self, attribute_name: &str) -> Result<Vec<String>, ValueStorageError>;

    fn set_values(&mut self, attribute_name: &str, values: Vec<String>) -> Result<(), ValueStorageError>;
}

/// Creates value providers bound to a project location.
///
/// Variables may carry a factory; the registry only stores and exposes it.
/// Invoking it is the job of whatever layer owns project content.
pub trait ValueProviderFactory: Send + Sync {
    fn new_instance(&self, project_root: &Path) -> Box<dyn ValueProvider>;
}

/// Constant or variable
#[derive(Clone)]
pub enum AttributeKind {
    Constant {
        value: AttributeValue,
    },
    Variable {
        required: bool,
        default: Option<AttributeValue>,
        provider: Option<Arc<dyn ValueProviderFactory>>,
    },
}

impl fmt::Debug for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { value } => f.debug_struct("Constant").field("value", value).finish(),
            Self::Variable { required, default, provider } => f
                .debug_struct("Variable")
                .field("required", required)
                .field("default", default)
                .field("provider", &provider.as_ref().map(|_| "<value provider>"))
                .finish(),
        }
    }
}

impl PartialEq for AttributeKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Constant { value: a }, Self::Constant { value: b }) => a == b,
            (
                Self::Variable { required: ra, default: da, provider: pa },
                Self::Variable { required: rb, default: db, provider: pb },
            ) => {
                let same_provider = match (pa, pb) {
                    (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                    (None, None) => true,
                    _ => false,
                };
                ra == rb && da == db && same_provider
            }
            _ => false,
        }
    }
}

/// A single attribute declared by a project type
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    name: String,
    display_name: String,
    project_type: String,
    kind: AttributeKind,
}

impl AttributeDefinition {
    /// Create a constant attribute owned by `project_type`
    ///
    /// # Examples
    ///
    /// ```
    /// use ptype_core::AttributeDefinition;
    ///
    /// let attr = AttributeDefinition::constant("maven", "packaging", "Packaging", "jar");
    /// assert!(attr.is_required());
    /// assert!(!attr.is_variable());
    /// assert_eq!(attr.qualified_id(), "maven:packaging");
    /// ```
    pub fn constant(
        project_type: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            project_type: project_type.into(),
            kind: AttributeKind::Constant { value: value.into() },
        }
    }

    /// Create a variable attribute owned by `project_type`
    pub fn variable(
        project_type: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
        required: bool,
        default: Option<AttributeValue>,
        provider: Option<Arc<dyn ValueProviderFactory>>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            project_type: project_type.into(),
            kind: AttributeKind::Variable { required, default, provider },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Id of the project type that declared this attribute
    #[must_use]
    pub fn project_type(&self) -> &str {
        &self.project_type
    }

    /// `<project type>:<attribute name>`
    #[must_use]
    pub fn qualified_id(&self) -> String {
        format!("{}:{}", self.project_type, self.name)
    }

    #[must_use]
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self.kind, AttributeKind::Variable { .. })
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        match &self.kind {
            AttributeKind::Constant { .. } => true,
            AttributeKind::Variable { required, .. } => *required,
        }
    }

    /// Literal value: the constant's value or the variable's default
    #[must_use]
    pub fn value(&self) -> Option<&AttributeValue> {
        match &self.kind {
            AttributeKind::Constant { value } => Some(value),
            AttributeKind::Variable { default, .. } => default.as_ref(),
        }
    }

    #[must_use]
    pub fn value_provider_factory(&self) -> Option<&Arc<dyn ValueProviderFactory>> {
        match &self.kind {
            AttributeKind::Constant { .. } => None,
            AttributeKind::Variable { provider, .. } => provider.as_ref(),
        }
    }

    #[must_use]
    pub fn is_value_provided(&self) -> bool {
        self.value_provider_factory().is_some()
    }

    pub(crate) fn set_project_type(&mut self, project_type: &str) {
        self.project_type = project_type.to_string();
    }
}
