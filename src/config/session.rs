//! Session discovery.
//!
//! The authentication provider hands the console an opaque token. Its mere
//! presence is what gates every screen other than login; the token is never
//! inspected.

/// Environment variable carrying the provider's session token
pub const SESSION_ENV: &str = "CONSOLE_SESSION_TOKEN";

/// A signed-in super-admin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Builds a session from a raw token. Blank tokens mean "signed out".
    #[must_use]
    pub fn from_token(token: Option<String>) -> Option<Self> {
        let token = token?.trim().to_string();
        if token.is_empty() {
            return None;
        }
        Some(Self { token })
    }

    /// The opaque provider token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Reads the current session from [`SESSION_ENV`], if any.
#[must_use]
pub fn current_session() -> Option<Session> {
    Session::from_token(std::env::var(SESSION_ENV).ok())
}
