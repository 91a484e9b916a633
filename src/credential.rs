use crate::error::{InsightError, Result};

/// Bearer token for the remote API.
///
/// Held for the client's lifetime and never mutated. `Debug` is redacted so the
/// token cannot leak through logs or panic messages.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting empty values and obvious placeholders.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if is_placeholder(&token) {
            return Err(InsightError::Config {
                message: "API credential is empty or a placeholder".to_string(),
            });
        }
        Ok(Self(token.trim().to_string()))
    }

    pub(crate) fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

pub(crate) fn is_placeholder(s: &str) -> bool {
    let t = s.trim();
    t.is_empty()
        || t.contains("${")
        || t.eq_ignore_ascii_case("your-api-key-here")
        || t.eq_ignore_ascii_case("changeme")
}
