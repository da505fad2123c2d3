//! Thread-safe registry handle.
//!
//! # Thread Safety
//!
//! The records and the memoized URL list live behind a single `RwLock`, so a
//! registration can never interleave with a cache rebuild. Reading the URL list
//! takes the write lock because it may rebuild the cache. Poisoned locks are
//! recovered with `into_inner`.

use crate::module::{AppContext, Module};
use crate::{AppRegistry, RegistryConfig, Result, SsoApp, SsoToken};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, lock-guarded [`AppRegistry`].
///
/// Clones share the same registry.
///
/// # Example
///
/// ```
/// use sso_registry::{RegistryConfig, SharedAppRegistry, SsoApp};
///
/// let registry = SharedAppRegistry::initialized(RegistryConfig::default());
/// let handle = registry.clone();
///
/// std::thread::spawn(move || {
///     handle.register(SsoApp::new("shop", "http://shop.example.com")).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(registry.formatted_urls().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedAppRegistry {
    inner: Arc<RwLock<AppRegistry>>,
}

impl SharedAppRegistry {
    /// Wrap an existing registry.
    pub fn new(registry: AppRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Create an initialized registry with `config`.
    pub fn initialized(config: RegistryConfig) -> Self {
        Self::new(AppRegistry::initialized(config))
    }

    fn read(&self) -> RwLockReadGuard<'_, AppRegistry> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AppRegistry> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Hand the registry its host context.
    pub fn set_app(&self, app: AppContext) {
        self.write().set_app(app);
    }

    /// Initialize the registry.
    pub fn init(&self) {
        self.write().init();
    }

    /// See [`AppRegistry::register`].
    pub fn register(&self, app: SsoApp) -> Result<SsoToken> {
        self.write().register(app)
    }

    /// Get a copy of a registered application.
    pub fn get(&self, name: &str) -> Option<SsoApp> {
        self.read().get(name).cloned()
    }

    /// Get a copy of a registered application, returning an error if missing.
    pub fn get_required(&self, name: &str) -> Result<SsoApp> {
        self.read().get_required(name).cloned()
    }

    /// Snapshot of the broadcast URL list. See [`AppRegistry::formatted_urls`].
    pub fn formatted_urls(&self) -> Vec<String> {
        self.write().formatted_urls().to_vec()
    }

    /// Number of registered applications.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if no application is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Whether `init` has been called.
    pub fn is_initialized(&self) -> bool {
        self.read().is_initialized()
    }
}

impl From<AppRegistry> for SharedAppRegistry {
    fn from(registry: AppRegistry) -> Self {
        Self::new(registry)
    }
}
