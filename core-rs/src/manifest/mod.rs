/**
 * manifest module
 * Declarative project type manifests (YAML format)
 *
 * Format:
 * ```yaml
 * apiVersion: projecttypes/v1
 * kind: ProjectTypeSet
 * types:
 *   - id: maven
 *     displayName: Maven
 *     primary: true
 *     parents: [java]
 *     attributes:
 *       - kind: constant
 *         name: build_tool
 *         displayName: Build Tool
 *         value: [maven]
 *       - kind: variable
 *         name: artifact_id
 *         displayName: Artifact Id
 *         required: true
 *         provider: maven-pom
 * ```
 *
 * Manifests are read-only inputs: definitions are never written back.
 */

pub mod catalog;

pub use catalog::ValueProviderCatalog;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::errors::{RegistryError, Result};
use crate::types::{AttributeDefinition, AttributeValue, ProjectTypeDefinition};

pub const MANIFEST_API_VERSION: &str = "projecttypes/v1";
pub const MANIFEST_KIND: &str = "ProjectTypeSet";

/// Project type manifest file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTypeManifest {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub types: Vec<ProjectTypeSpec>,
}

/// One declared project type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTypeSpec {
    /// A missing id is kept so the resolver can report it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub mixable: bool,
    #[serde(default = "default_persisted")]
    pub persisted: bool,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
}

fn default_persisted() -> bool {
    true
}

/// Attribute entry, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttributeSpec {
    Constant {
        name: String,
        #[serde(rename = "displayName", default)]
        display_name: String,
        value: AttributeValue,
    },
    Variable {
        name: String,
        #[serde(rename = "displayName", default)]
        display_name: String,
        #[serde(default)]
        required: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<AttributeValue>,
        /// Name of a value provider registered in the host's catalog
        #[serde(default, skip_serializing_if = "Option::is_none")]
        provider: Option<String>,
    },
}

impl ProjectTypeManifest {
    /// Empty manifest with the current header
    pub fn new() -> Self {
        Self {
            api_version: MANIFEST_API_VERSION.to_string(),
            kind: MANIFEST_KIND.to_string(),
            types: Vec::new(),
        }
    }

    /// Load a manifest from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            RegistryError::Manifest(msg) => RegistryError::Manifest(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse a manifest and check its header
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let manifest: ProjectTypeManifest = serde_yaml::from_str(content)?;

        if manifest.kind != MANIFEST_KIND {
            return Err(RegistryError::Manifest(format!(
                "Unsupported kind: {} (expected {})",
                manifest.kind, MANIFEST_KIND
            )));
        }
        if manifest.api_version != MANIFEST_API_VERSION {
            return Err(RegistryError::Manifest(format!(
                "Unsupported apiVersion: {} (expected {})",
                manifest.api_version, MANIFEST_API_VERSION
            )));
        }

        Ok(manifest)
    }

    /// Build definitions, resolving provider names against `catalog`
    ///
    /// # Errors
    /// `RegistryError::UnknownValueProvider` if a variable names a provider
    /// the catalog does not know
    pub fn into_definitions(self, catalog: &ValueProviderCatalog) -> Result<Vec<ProjectTypeDefinition>> {
        self.types.into_iter().map(|spec| spec.into_definition(catalog)).collect()
    }
}

impl Default for ProjectTypeManifest {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectTypeSpec {
    pub fn into_definition(self, catalog: &ValueProviderCatalog) -> Result<ProjectTypeDefinition> {
        let mut definition = match self.id {
            Some(id) => ProjectTypeDefinition::new(id, self.display_name, self.primary, self.mixable),
            None => ProjectTypeDefinition::without_id(self.display_name, self.primary, self.mixable),
        };
        definition.set_persisted(self.persisted);

        for parent in self.parents {
            definition.add_parent(parent);
        }

        for attribute in self.attributes {
            match attribute {
                AttributeSpec::Constant { name, display_name, value } => {
                    definition.add_constant(name, display_name, value);
                }
                AttributeSpec::Variable { name, display_name, required, value, provider: None } => {
                    definition.add_variable(name, display_name, required, value);
                }
                AttributeSpec::Variable { name, display_name, required, value, provider: Some(provider) } => {
                    let factory = catalog
                        .get(&provider)
                        .ok_or_else(|| RegistryError::UnknownValueProvider(provider.clone()))?;
                    // The provider and a literal default may coexist
                    definition.add_attribute(AttributeDefinition::variable(
                        "",
                        name,
                        display_name,
                        required,
                        value,
                        Some(factory),
                    ));
                }
            }
        }

        Ok(definition)
    }
}

/// Load every `*.yaml` / `*.yml` manifest under `dir`
///
/// Unreadable or invalid files are skipped with a warning so one broken
/// contribution does not hide the others. Files are visited in path order.
pub fn load_manifest_dir(dir: &Path, catalog: &ValueProviderCatalog) -> Result<Vec<ProjectTypeDefinition>> {
    if !dir.is_dir() {
        return Err(RegistryError::Manifest(format!(
            "Manifest directory not found: {}",
            dir.display()
        )));
    }

    let mut definitions = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read manifest directory entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        let is_manifest = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        if !entry.file_type().is_file() || !is_manifest {
            continue;
        }

        match ProjectTypeManifest::load(path).and_then(|m| m.into_definitions(catalog)) {
            Ok(loaded) => {
                tracing::debug!(path = %path.display(), types = loaded.len(), "Loaded project type manifest");
                definitions.extend(loaded);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Skipping project type manifest: {}", e);
            }
        }
    }

    Ok(definitions)
}
