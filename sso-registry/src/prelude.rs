//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use sso_registry::prelude::*;
//! ```

pub use crate::{
    AppContext, AppRegistry, Md5TokenHasher, Module, RegistryConfig, Result, SharedAppRegistry,
    SsoApp, SsoError, SsoErrorCode, SsoToken, TokenHasher,
};
