//! Credential resolution: maps an optional auth token to the namespace a caller may use.

mod access;
mod http;
mod static_tokens;

pub use access::{AccessResolver, Resolution};
pub use bb_types::{AuthError, AuthResolver, DEFAULT_NAMESPACE};
pub use http::HttpAuthResolver;
pub use static_tokens::StaticAuthResolver;
