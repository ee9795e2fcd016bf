//! Integration tests for manifest-driven registration
//!
//! Tests loading project types from YAML manifests on disk:
//! - Single manifest files
//! - Directory scans with broken contributions
//! - Value provider resolution through the catalog

use ptype_core::{
    load_manifest_dir, ProjectTypeManifest, ProjectTypeRegistry, RegistryError, TypeOrder, ValueProvider,
    ValueProviderCatalog, ValueProviderFactory, ValueStorageError,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const JAVA_MANIFEST: &str = r#"
apiVersion: projecttypes/v1
kind: ProjectTypeSet
types:
  - id: java
    displayName: Java
    primary: true
    attributes:
      - kind: constant
        name: language
        displayName: Language
        value: [java]
  - id: maven
    displayName: Maven
    primary: true
    parents: [java]
    attributes:
      - kind: variable
        name: artifact_id
        displayName: Artifact Id
        required: true
        provider: maven-pom
"#;

const GIT_MANIFEST: &str = r#"
apiVersion: projecttypes/v1
kind: ProjectTypeSet
types:
  - id: git
    displayName: Git
    mixable: true
    persisted: false
"#;

struct PomProvider;

impl ValueProvider for PomProvider {
    fn get_values(&self, _attribute_name: &str) -> Result<Vec<String>, ValueStorageError> {
        Err(ValueStorageError::new("pom.xml not found"))
    }

    fn set_values(&mut self, _attribute_name: &str, _values: Vec<String>) -> Result<(), ValueStorageError> {
        Ok(())
    }
}

struct PomProviderFactory;

impl ValueProviderFactory for PomProviderFactory {
    fn new_instance(&self, _project_root: &Path) -> Box<dyn ValueProvider> {
        Box::new(PomProvider)
    }
}

fn catalog() -> ValueProviderCatalog {
    let mut catalog = ValueProviderCatalog::new();
    catalog.register("maven-pom", Arc::new(PomProviderFactory));
    catalog
}

#[test]
fn test_load_single_manifest_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("java.yaml");
    fs::write(&path, JAVA_MANIFEST).unwrap();

    let definitions = ProjectTypeManifest::load(&path)
        .unwrap()
        .into_definitions(&catalog())
        .unwrap();
    let registry = ProjectTypeRegistry::new(definitions);

    assert_eq!(registry.len(), 3);

    let maven = registry.get_project_type("maven").unwrap();
    assert!(maven.is_type_of("java"));
    assert_eq!(maven.attributes().len(), 2);
    assert!(maven.get_attribute("artifact_id").unwrap().is_value_provided());
    assert_eq!(
        maven.get_attribute("language").unwrap().value().and_then(|v| v.first()),
        Some("java")
    );
}

#[test]
fn test_load_manifest_directory_skips_broken_files() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("plugins").join("scm");
    fs::create_dir_all(&nested).unwrap();

    fs::write(temp_dir.path().join("java.yaml"), JAVA_MANIFEST).unwrap();
    fs::write(nested.join("git.yml"), GIT_MANIFEST).unwrap();
    fs::write(temp_dir.path().join("broken.yaml"), "types: [unterminated").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not a manifest").unwrap();

    let definitions = load_manifest_dir(temp_dir.path(), &catalog()).unwrap();
    assert_eq!(definitions.len(), 3);

    let registry = ProjectTypeRegistry::new(definitions);
    let git = registry.get_project_type("git").unwrap();
    assert!(git.is_mixable());
    assert!(!git.is_persisted());

    let ids: Vec<&str> = registry
        .project_types_ordered(TypeOrder::ChildToParent)
        .iter()
        .map(|t| t.id())
        .collect();
    assert_eq!(ids, vec!["maven", "git", "java", "blank"]);
}

#[test]
fn test_directory_with_unknown_provider_skips_that_file_only() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("java.yaml"), JAVA_MANIFEST).unwrap();
    fs::write(temp_dir.path().join("git.yaml"), GIT_MANIFEST).unwrap();

    // No maven-pom provider registered
    let definitions = load_manifest_dir(temp_dir.path(), &ValueProviderCatalog::new()).unwrap();
    let registry = ProjectTypeRegistry::new(definitions);

    assert!(registry.contains("git"));
    assert!(!registry.contains("java"));
    assert!(!registry.contains("maven"));
}

#[test]
fn test_missing_directory_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist");

    assert!(matches!(
        load_manifest_dir(&missing, &catalog()),
        Err(RegistryError::Manifest(_))
    ));
}

#[test]
fn test_missing_manifest_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = ProjectTypeManifest::load(&temp_dir.path().join("absent.yaml"));

    assert!(matches!(result, Err(RegistryError::Io(_))));
}

#[test]
fn test_manifest_error_names_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wrong.yaml");
    fs::write(&path, "apiVersion: projecttypes/v1\nkind: Workspace\n").unwrap();

    match ProjectTypeManifest::load(&path) {
        Err(RegistryError::Manifest(msg)) => assert!(msg.contains("wrong.yaml")),
        other => panic!("Expected Manifest error, got {:?}", other),
    }
}

#[test]
fn test_manifest_types_with_bad_ids_are_reported() {
    let yaml = r#"
apiVersion: projecttypes/v1
kind: ProjectTypeSet
types:
  - displayName: No Id
  - id: "spaced id"
  - id: fine
"#;
    let definitions = ProjectTypeManifest::from_yaml_str(yaml)
        .unwrap()
        .into_definitions(&catalog())
        .unwrap();
    let registry = ProjectTypeRegistry::new(definitions);

    assert!(registry.contains("fine"));
    assert_eq!(registry.len(), 2);
    let labels: Vec<&str> = registry.exclusions().iter().map(|e| e.label()).collect();
    assert_eq!(labels, vec!["<none>", "spaced id"]);
}
