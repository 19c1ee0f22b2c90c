//! Fixed token table.

use bb_types::{AuthError, AuthResolver};
use std::collections::HashMap;

/// AuthResolver backed by a fixed token -> subject table.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthResolver {
    subjects: HashMap<String, String>,
}

impl StaticAuthResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        self.subjects.insert(token.into(), subject.into());
        self
    }
}

#[async_trait::async_trait]
impl AuthResolver for StaticAuthResolver {
    async fn resolve(&self, token: &str) -> Result<String, AuthError> {
        self.subjects.get(token).cloned().ok_or(AuthError::Unknown)
    }
}
