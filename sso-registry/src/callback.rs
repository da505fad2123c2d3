//! Broadcast URL formatting.

use crate::SsoToken;

/// Append `<param>=<token>` to `api_url`.
///
/// The separator is `?` unless the URL already contains one, in which case the
/// parameter is added with `&`. No other parsing or escaping is done.
pub fn append_token(api_url: &str, param: &str, token: &SsoToken) -> String {
    let separator = if api_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", api_url, separator, param, token)
}
