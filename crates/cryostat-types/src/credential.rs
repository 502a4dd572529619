//! Target credentials.

use std::fmt;

use serde::Serialize;

/// Authentication material the service stores and uses to connect to
/// matching targets.
///
/// Credentials are write-only from the client's side, so this type only
/// serializes.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Match expression selecting the targets this credential applies to.
    pub match_expression: String,
    /// JMX username.
    pub username: String,
    /// JMX password.
    pub password: String,
}

impl Credential {
    /// Create a credential for targets matching `match_expression`.
    #[must_use]
    pub fn new(
        match_expression: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            match_expression: match_expression.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// A credential for the single target with the given connect URL.
    ///
    /// Quotes and backslashes in the URL are escaped in the expression.
    #[must_use]
    pub fn for_target(
        connect_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let mut quoted = String::with_capacity(connect_url.len() + 2);
        quoted.push('"');
        for c in connect_url.chars() {
            if c == '"' || c == '\\' {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');

        Self::new(format!("target.connectUrl == {quoted}"), username, password)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("match_expression", &self.match_expression)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
