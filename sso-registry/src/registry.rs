//! Application registry.
//!
//! [`AppRegistry`] maps application names to their records and memoizes the
//! list of broadcast URLs derived from them. The memoized list is tracked with
//! an explicit stale/fresh state, so an empty registry is never mistaken for a
//! missing cache.
//!
//! The registry is single-threaded. Hosts that share it between threads should
//! use [`SharedAppRegistry`](crate::SharedAppRegistry), which guards the records
//! and the cache under one lock.

use crate::callback::append_token;
use crate::hash::{derive_token, Md5TokenHasher, TokenHasher};
use crate::module::{AppContext, Module};
use crate::{RegistryConfig, Result, SsoApp, SsoError, SsoToken};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Memoized broadcast URL list.
#[derive(Clone, Debug, Default)]
enum UrlCache {
    /// Must be rebuilt before it is read.
    #[default]
    Stale,
    /// One entry per registered application.
    Fresh(Vec<String>),
}

/// State allocated by `init`.
#[derive(Clone, Debug, Default)]
struct RegistryState {
    by_name: HashMap<String, SsoApp>,
    urls: UrlCache,
}

/// Registry of SSO applications.
///
/// # Example
///
/// ```
/// use sso_registry::{AppRegistry, Module, SsoApp, SsoError};
///
/// let mut registry = AppRegistry::new();
/// registry.init();
///
/// registry.register(SsoApp::new("shop", "http://shop.example.com/api")).unwrap();
/// let err = registry
///     .register(SsoApp::new("shop", "http://other.example.com"))
///     .unwrap_err();
/// assert!(matches!(err, SsoError::AlreadyRegistered(_)));
/// ```
pub struct AppRegistry {
    config: RegistryConfig,
    hasher: Arc<dyn TokenHasher>,
    app: Option<AppContext>,
    state: Option<RegistryState>,
}

impl AppRegistry {
    /// Create an uninitialized registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an uninitialized registry with `config`.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            hasher: Arc::new(Md5TokenHasher),
            app: None,
            state: None,
        }
    }

    /// Replace the token hasher.
    ///
    /// Tokens already issued are kept as they are.
    pub fn with_hasher(mut self, hasher: Arc<dyn TokenHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Create a registry and initialize it in one step.
    pub fn initialized(config: RegistryConfig) -> Self {
        let mut registry = Self::with_config(config);
        registry.init();
        registry
    }

    /// Register an application and return its token.
    ///
    /// Checks run in order and the first failure wins: the registry must be
    /// initialized, the name must be non-empty, the callback URL must carry an
    /// accepted scheme prefix, and the name must not be taken. On failure
    /// nothing changes.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, app), fields(name = %app.name)))]
    pub fn register(&mut self, mut app: SsoApp) -> Result<SsoToken> {
        let state = self.state.as_mut().ok_or(SsoError::Uninitialized)?;

        if app.name.is_empty() {
            return Err(SsoError::InvalidArgument(SsoError::EMPTY_NAME));
        }
        if !self.config.accepts_url(&app.api_url) {
            #[cfg(feature = "tracing")]
            tracing::debug!(api_url = %app.api_url, "rejected callback url");
            return Err(SsoError::InvalidArgument(SsoError::BAD_API_URL));
        }
        if state.by_name.contains_key(&app.name) {
            return Err(SsoError::AlreadyRegistered(app.name));
        }

        let token = derive_token(self.hasher.as_ref(), &app.name, &app.api_url);
        app.token = Some(token.clone());
        state.urls = UrlCache::Stale;
        state.by_name.insert(app.name.clone(), app);

        #[cfg(feature = "tracing")]
        tracing::debug!(registered = state.by_name.len(), "app registered");

        Ok(token)
    }

    /// Get a registered application.
    ///
    /// Returns `None` for unknown names and before `init`.
    pub fn get(&self, name: &str) -> Option<&SsoApp> {
        self.state.as_ref()?.by_name.get(name)
    }

    /// Get a registered application, returning an error if it is missing.
    pub fn get_required(&self, name: &str) -> Result<&SsoApp> {
        let state = self.state.as_ref().ok_or(SsoError::Uninitialized)?;
        state
            .by_name
            .get(name)
            .ok_or_else(|| SsoError::NotFound(name.to_string()))
    }

    /// Callback URLs of every registered application, each carrying its token.
    ///
    /// The list is rebuilt only after a registration; otherwise the memoized
    /// list is returned. Order is unspecified and may differ between rebuilds.
    /// An empty or uninitialized registry yields an empty slice and caches
    /// nothing.
    pub fn formatted_urls(&mut self) -> &[String] {
        let Some(state) = self.state.as_mut() else {
            return &[];
        };
        if state.by_name.is_empty() {
            return &[];
        }

        if let UrlCache::Stale = state.urls {
            let param = self.config.token_param.as_str();
            let urls = state
                .by_name
                .values()
                .filter_map(|app| {
                    let token = app.token.as_ref()?;
                    Some(append_token(&app.api_url, param, token))
                })
                .collect::<Vec<_>>();

            #[cfg(feature = "tracing")]
            tracing::debug!(count = urls.len(), "rebuilt broadcast urls");

            state.urls = UrlCache::Fresh(urls);
        }

        match &state.urls {
            UrlCache::Fresh(urls) => urls.as_slice(),
            UrlCache::Stale => &[],
        }
    }

    /// Whether the broadcast URL list is memoized and current.
    pub fn is_cache_fresh(&self) -> bool {
        matches!(
            self.state.as_ref().map(|s| &s.urls),
            Some(UrlCache::Fresh(_))
        )
    }

    /// Whether `init` has been called.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Number of registered applications.
    pub fn len(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.by_name.len())
    }

    /// Returns true if no application is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of all registered applications, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.state
            .as_ref()
            .map(|s| s.by_name.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The configuration in use.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The host context handed over by `set_app`, if any.
    pub fn app_context(&self) -> Option<&AppContext> {
        self.app.as_ref()
    }
}

impl Module for AppRegistry {
    fn set_app(&mut self, app: AppContext) {
        self.app = Some(app);
    }

    /// Allocate the empty registry. Calling it again keeps existing records.
    fn init(&mut self) {
        if self.state.is_none() {
            self.state = Some(RegistryState::default());
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("registry initialized twice; keeping existing records");
        }
    }
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppRegistry")
            .field("config", &self.config)
            .field("app", &self.app)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hasher that echoes its input, so tokens are easy to read in assertions.
    struct EchoHasher;

    impl TokenHasher for EchoHasher {
        fn hash(&self, input: &[u8]) -> String {
            String::from_utf8_lossy(input).into_owned()
        }
    }

    fn registry() -> AppRegistry {
        AppRegistry::initialized(RegistryConfig::default())
    }

    #[test]
    fn test_uninitialized_registry() {
        let mut registry = AppRegistry::new();
        assert!(!registry.is_initialized());

        let err = registry
            .register(SsoApp::new("shop", "http://shop.example.com"))
            .unwrap_err();
        assert_eq!(err, SsoError::Uninitialized);
        assert!(registry.get("shop").is_none());
        assert_eq!(registry.get_required("shop").unwrap_err(), SsoError::Uninitialized);
        assert!(registry.formatted_urls().is_empty());
        assert!(!registry.is_cache_fresh());
    }

    #[test]
    fn test_validation_order() {
        let mut registry = registry();

        // empty name wins over a bad url
        let err = registry.register(SsoApp::new("", "")).unwrap_err();
        assert_eq!(err, SsoError::InvalidArgument(SsoError::EMPTY_NAME));

        let err = registry.register(SsoApp::new("shop", "")).unwrap_err();
        assert_eq!(err, SsoError::InvalidArgument(SsoError::BAD_API_URL));

        let err = registry
            .register(SsoApp::new("shop", "ftp://shop"))
            .unwrap_err();
        assert_eq!(err, SsoError::InvalidArgument(SsoError::BAD_API_URL));

        registry.register(SsoApp::new("shop", "http://shop")).unwrap();

        // bad url wins over a duplicate name
        let err = registry.register(SsoApp::new("shop", "ftp://shop")).unwrap_err();
        assert_eq!(err, SsoError::InvalidArgument(SsoError::BAD_API_URL));
    }

    #[test]
    fn test_register_overwrites_caller_token() {
        let mut registry = registry().with_hasher(Arc::new(EchoHasher));
        let mut app = SsoApp::new("shop", "http://shop");
        app.token = Some(SsoToken::new("forged"));

        let token = registry.register(app).unwrap();
        assert_eq!(token.as_str(), "shop#http://shop");
        assert_eq!(registry.get("shop").unwrap().token, Some(token));
    }

    #[test]
    fn test_cache_transitions() {
        let mut registry = registry().with_hasher(Arc::new(EchoHasher));
        assert!(!registry.is_cache_fresh());

        // empty registry is not cached
        assert!(registry.formatted_urls().is_empty());
        assert!(!registry.is_cache_fresh());

        registry.register(SsoApp::new("a", "http://a")).unwrap();
        assert!(!registry.is_cache_fresh());
        assert_eq!(registry.formatted_urls(), &["http://a?sso_token=a#http://a"]);
        assert!(registry.is_cache_fresh());

        // failed registrations keep the cache
        registry.register(SsoApp::new("a", "http://a2")).unwrap_err();
        registry.register(SsoApp::new("", "http://b")).unwrap_err();
        assert!(registry.is_cache_fresh());

        registry.register(SsoApp::new("b", "http://b?x=1")).unwrap();
        assert!(!registry.is_cache_fresh());

        let mut urls = registry.formatted_urls().to_vec();
        urls.sort();
        assert_eq!(
            urls,
            vec![
                "http://a?sso_token=a#http://a".to_string(),
                "http://b?x=1&sso_token=b#http://b?x=1".to_string(),
            ]
        );
        assert!(registry.is_cache_fresh());
    }

    #[test]
    fn test_custom_token_param() {
        let config = RegistryConfig::default().with_token_param("ticket");
        let mut registry = AppRegistry::initialized(config).with_hasher(Arc::new(EchoHasher));
        registry.register(SsoApp::new("a", "http://a")).unwrap();
        assert_eq!(registry.formatted_urls(), &["http://a?ticket=a#http://a"]);
    }

    #[test]
    fn test_reinit_keeps_records() {
        let mut registry = registry();
        registry.register(SsoApp::new("a", "http://a")).unwrap();
        registry.init();
        assert!(registry.contains("a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_set_app_is_stored() {
        let mut registry = AppRegistry::new();
        assert!(registry.app_context().is_none());
        registry.set_app(AppContext::new("auth-center"));
        registry.init();
        assert_eq!(registry.app_context().unwrap().as_str(), "auth-center");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_required_not_found() {
        let registry = registry();
        assert_eq!(
            registry.get_required("missing").unwrap_err(),
            SsoError::NotFound("missing".into())
        );
    }
}
