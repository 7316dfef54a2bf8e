//! OAuth client credentials and per-invocation overrides.

use serde::{Deserialize, Serialize};

/// OAuth client credentials used to obtain access tokens.
///
/// Every field is optional: credentials may be completed per invocation.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// Secrets must never reach logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &mask(&self.client_secret))
            .field("refresh_token", &mask(&self.refresh_token))
            .finish()
    }
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Overlay `other`: its present, non-empty values win
    pub fn merged_with(&self, other: &Credentials) -> Credentials {
        fn pick(base: &Option<String>, over: &Option<String>) -> Option<String> {
            over.as_ref()
                .filter(|v| !v.trim().is_empty())
                .or(base.as_ref())
                .cloned()
        }
        Credentials {
            client_id: pick(&self.client_id, &other.client_id),
            client_secret: pick(&self.client_secret, &other.client_secret),
            refresh_token: pick(&self.refresh_token, &other.refresh_token),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.client_id.is_none() && self.client_secret.is_none() && self.refresh_token.is_none()
    }

    /// Names of the values still missing for a token exchange
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.client_id.as_deref().is_none_or(str::is_empty) {
            missing.push("CLIENT_ID");
        }
        if self.client_secret.as_deref().is_none_or(str::is_empty) {
            missing.push("CLIENT_SECRET");
        }
        if self.refresh_token.as_deref().is_none_or(str::is_empty) {
            missing.push("REFRESH_TOKEN");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}
