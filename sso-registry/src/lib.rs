//! SSO application registry.
//!
//! Third-party applications taking part in a single-sign-on federation register
//! a name and a callback URL. The registry derives a stable token for each one
//! and hands the central authentication service the list of callback URLs,
//! tokens appended, to notify on login and logout.
//!
//! The registry holds no global state: the host constructs an [`AppRegistry`],
//! calls [`Module::init`] once, and passes it to whoever needs it.
//!
//! # Example
//!
//! ```
//! use sso_registry::{AppRegistry, Module, SsoApp};
//!
//! let mut registry = AppRegistry::new();
//! registry.init();
//!
//! let token = registry
//!     .register(SsoApp::new("shop", "http://shop.example.com/api"))
//!     .unwrap();
//!
//! let expected = format!("http://shop.example.com/api?sso_token={}", token);
//! assert_eq!(registry.formatted_urls(), &[expected]);
//! ```

use serde::{Deserialize, Serialize};

pub mod callback;
pub mod config;
pub mod errors;
pub mod hash;
pub mod module;
pub mod prelude;
pub mod registry;
pub mod shared;

pub use config::RegistryConfig;
pub use errors::{SsoError, SsoErrorCode};
pub use hash::{derive_token, Md5TokenHasher, TokenHasher};
pub use module::{AppContext, Module};
pub use registry::AppRegistry;
pub use shared::SharedAppRegistry;

/// Common result alias for registry operations.
pub type Result<T> = std::result::Result<T, SsoError>;

/// Token issued to a registered application.
///
/// # Example
///
/// ```
/// use sso_registry::SsoToken;
///
/// let token = SsoToken::new("0cc175b9c0f1b6a831c399e269772661");
/// assert_eq!(token.as_str().len(), 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SsoToken(pub String);

impl SsoToken {
    /// Create a token from a string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SsoToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for SsoToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SsoToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An application taking part in the federation.
///
/// `token` is `None` until the registry accepts the application; a caller
/// supplied value is overwritten on registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoApp {
    /// Unique application name.
    pub name: String,
    /// Callback endpoint notified of authentication events.
    pub api_url: String,
    /// Token assigned at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<SsoToken>,
}

impl SsoApp {
    /// Create an unregistered application record.
    pub fn new(name: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_url: api_url.into(),
            token: None,
        }
    }

    /// Whether the registry has assigned a token.
    pub fn is_registered(&self) -> bool {
        self.token.is_some()
    }
}
