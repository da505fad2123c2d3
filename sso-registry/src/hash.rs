//! Token derivation.

use crate::SsoToken;

/// Deterministic digest used to derive application tokens.
///
/// Tokens only identify applications; implementations need to be stable, not
/// collision resistant.
pub trait TokenHasher: Send + Sync {
    /// Hash `input` into a printable string.
    fn hash(&self, input: &[u8]) -> String;
}

/// MD5 rendered as 32 lowercase hex characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md5TokenHasher;

impl TokenHasher for Md5TokenHasher {
    fn hash(&self, input: &[u8]) -> String {
        format!("{:x}", md5::compute(input))
    }
}

/// Derive the token for an application: `hash(name + "#" + api_url)`.
pub fn derive_token(hasher: &dyn TokenHasher, name: &str, api_url: &str) -> SsoToken {
    let input = format!("{}#{}", name, api_url);
    SsoToken(hasher.hash(input.as_bytes()))
}
