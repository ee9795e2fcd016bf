//! Named value-provider factories that manifests may reference

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::types::ValueProviderFactory;

/// Host-supplied lookup from provider name to factory
#[derive(Clone, Default)]
pub struct ValueProviderCatalog {
    factories: HashMap<String, Arc<dyn ValueProviderFactory>>,
}

impl ValueProviderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, factory: Arc<dyn ValueProviderFactory>) -> &mut Self {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_some() {
            tracing::debug!(provider = %name, "Value provider replaced in catalog");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ValueProviderFactory>> {
        self.factories.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered provider names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ValueProviderCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueProviderCatalog")
            .field("providers", &self.names())
            .finish()
    }
}
