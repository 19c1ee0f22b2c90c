//! Token -> namespace resolution. Never fails: unresolved tokens become their own namespace.

use bb_types::{AuthResolver, DEFAULT_NAMESPACE};
use std::sync::Arc;

/// Outcome of mapping a call's credential to a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No credential; the default namespace.
    Default(String),
    /// Credential resolved to a stable subject identifier.
    Subject(String),
    /// Credential could not be resolved; the raw token identifies the namespace.
    Fallback(String),
}

impl Resolution {
    /// Keyspace tag. Tags contain no `:`, so keys of different kinds never compare equal.
    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::Default(_) => "default",
            Resolution::Subject(_) => "subject",
            Resolution::Fallback(_) => "token",
        }
    }

    /// The untagged identifier (default name, subject id, or raw token).
    pub fn identifier(&self) -> &str {
        match self {
            Resolution::Default(id) | Resolution::Subject(id) | Resolution::Fallback(id) => id,
        }
    }

    /// Store key, `<kind>:<identifier>`. A raw token spelled like a subject id or like the
    /// default name still lands in its own namespace.
    pub fn namespace(&self) -> String {
        format!("{}:{}", self.kind(), self.identifier())
    }
}

/// Maps optional credentials to namespaces through an optional AuthResolver.
#[derive(Clone)]
pub struct AccessResolver {
    auth: Option<Arc<dyn AuthResolver + Send + Sync>>,
    default_namespace: String,
}

impl AccessResolver {
    pub fn new(auth: Option<Arc<dyn AuthResolver + Send + Sync>>) -> Self {
        Self {
            auth,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Resolver without an auth collaborator: every token falls back to itself.
    pub fn unauthenticated() -> Self {
        Self::new(None)
    }

    pub fn with_default_namespace(mut self, ns: impl Into<String>) -> Self {
        self.default_namespace = ns.into();
        self
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// An absent or empty token maps to the default namespace.
    pub async fn resolve_namespace(&self, token: Option<&str>) -> Resolution {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Resolution::Default(self.default_namespace.clone()),
        };
        let Some(ref auth) = self.auth else {
            return Resolution::Fallback(token.to_string());
        };
        match auth.resolve(token).await {
            Ok(subject) => {
                tracing::debug!(subject = %subject, "token resolved");
                Resolution::Subject(subject)
            }
            Err(e) => {
                tracing::debug!(error = %e, "token not resolved, using raw token as namespace");
                Resolution::Fallback(token.to_string())
            }
        }
    }
}

impl Default for AccessResolver {
    fn default() -> Self {
        Self::unauthenticated()
    }
}

impl std::fmt::Debug for AccessResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessResolver")
            .field("authenticated", &self.auth.is_some())
            .field("default_namespace", &self.default_namespace)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticAuthResolver;

    fn resolver() -> AccessResolver {
        let auth = StaticAuthResolver::new().with_token("tok-alice", "alice");
        AccessResolver::new(Some(Arc::new(auth)))
    }

    #[tokio::test]
    async fn no_token_is_default() {
        let r = resolver();
        assert_eq!(
            r.resolve_namespace(None).await,
            Resolution::Default("default".to_string())
        );
        assert_eq!(
            r.resolve_namespace(Some("")).await.namespace(),
            "default:default"
        );
    }

    #[tokio::test]
    async fn known_token_resolves_to_subject() {
        let r = resolver();
        let res = r.resolve_namespace(Some("tok-alice")).await;
        assert_eq!(res, Resolution::Subject("alice".to_string()));
        assert_eq!(res.namespace(), "subject:alice");
    }

    #[tokio::test]
    async fn unknown_tokens_fall_back_to_distinct_namespaces() {
        let r = resolver();
        let a = r.resolve_namespace(Some("stranger-1")).await;
        let b = r.resolve_namespace(Some("stranger-2")).await;
        assert_eq!(a, Resolution::Fallback("stranger-1".to_string()));
        assert_ne!(a.namespace(), b.namespace());
        assert_ne!(a.namespace(), r.resolve_namespace(None).await.namespace());
    }

    #[tokio::test]
    async fn raw_tokens_cannot_reach_default_or_subject_namespaces() {
        let r = resolver();
        let default_ns = r.resolve_namespace(None).await.namespace();
        let alice_ns = r.resolve_namespace(Some("tok-alice")).await.namespace();

        let spoof_default = r.resolve_namespace(Some("default")).await;
        assert_eq!(spoof_default, Resolution::Fallback("default".to_string()));
        assert_ne!(spoof_default.namespace(), default_ns);

        let spoof_subject = r.resolve_namespace(Some("alice")).await;
        assert_eq!(spoof_subject, Resolution::Fallback("alice".to_string()));
        assert_ne!(spoof_subject.namespace(), alice_ns);

        // A default name shaped like another key stays in the default keyspace.
        let odd = AccessResolver::unauthenticated().with_default_namespace("token:x");
        assert_ne!(
            odd.resolve_namespace(None).await.namespace(),
            odd.resolve_namespace(Some("x")).await.namespace()
        );
    }

    #[tokio::test]
    async fn without_auth_every_token_falls_back() {
        let r = AccessResolver::unauthenticated().with_default_namespace("shared");
        assert_eq!(r.resolve_namespace(None).await.namespace(), "default:shared");
        assert_eq!(
            r.resolve_namespace(Some("tok")).await,
            Resolution::Fallback("tok".to_string())
        );
    }
}
