use std::sync::Arc;

use indexmap::IndexMap;

use crate::provider::ObjectStoreProvider;

/// Object-store providers keyed by the name clients select them with
///
/// New backends are added by registering an implementation; dispatch never
/// changes.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: IndexMap<String, Arc<dyn ObjectStoreProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under its own name, returning any provider it replaced
    pub fn register(&mut self, provider: Arc<dyn ObjectStoreProvider>) -> Option<Arc<dyn ObjectStoreProvider>> {
        let name = provider.name().to_owned();
        let replaced = self.providers.insert(name.clone(), provider);

        if replaced.is_some() {
            tracing::warn!("storage provider '{name}' registered twice, keeping the latest");
        }

        replaced
    }

    /// Builder-style [`Self::register`]
    #[must_use]
    pub fn with(mut self, provider: Arc<dyn ObjectStoreProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ObjectStoreProvider>> {
        self.providers.get(name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
