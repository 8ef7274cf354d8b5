//! Authentication context handed to the HTTP services.

/// An optional bearer token. Absence is valid and means an anonymous request.
#[derive(Clone, Default)]
pub struct AuthContext {
    access_token: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
        }
    }

    /// Builds a context from an optional token, treating blank strings as absent.
    pub fn from_token(token: Option<String>) -> Self {
        Self {
            access_token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// The value for an `Authorization` header, if any.
    pub fn authorization_header(&self) -> Option<String> {
        self.access_token.as_ref().map(|t| format!("Bearer {t}"))
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self.access_token {
            Some(_) => "[REDACTED]",
            None => "None",
        };
        f.debug_struct("AuthContext")
            .field("access_token", &token)
            .finish()
    }
}
