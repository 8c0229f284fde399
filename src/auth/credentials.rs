use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Administrator login used for HTTP Basic authentication against `/vmrest`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: &str, password: &str) -> Self {
        Self {
            login: login.to_string(),
            password: password.to_string(),
        }
    }

    /// True when either half of the pair is blank.
    pub fn is_blank(&self) -> bool {
        self.login.trim().is_empty() || self.password.is_empty()
    }

    /// Value for the `Authorization` header, e.g. `Basic YWRtaW46c2VjcmV0`.
    pub fn authorization_header(&self) -> String {
        let raw = format!("{}:{}", self.login, self.password);
        format!("Basic {}", STANDARD.encode(raw.as_bytes()))
    }
}

// Passwords never reach log output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}
