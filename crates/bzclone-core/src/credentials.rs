//! Tracker login credentials, read from the environment.

use crate::error::CloneError;
use std::fmt;

pub const EMAIL_VAR: &str = "BUGZILLA_EMAIL";
pub const PASSWORD_VAR: &str = "BUGZILLA_PASSWORD";

#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Reads `BUGZILLA_EMAIL` and `BUGZILLA_PASSWORD`.
    pub fn from_env() -> Result<Self, CloneError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like `from_env` but with an injectable variable lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CloneError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(CloneError::MissingCredential(name))
        };
        let email = read(EMAIL_VAR)?;
        let password = read(PASSWORD_VAR)?;
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
