//! Bearer credentials.
//!
//! Token acquisition and refresh live outside this crate; a `TokenProvider`
//! only hands over whatever token is current when a request is built.

use std::fmt;

pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> String;
}

/// A fixed token, e.g. an integration key.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

// Keep tokens out of logs.
impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> String {
        self.0.clone()
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn access_token(&self) -> String {
        self()
    }
}

pub(crate) fn bearer(provider: &dyn TokenProvider) -> String {
    format!("Bearer {}", provider.access_token())
}
