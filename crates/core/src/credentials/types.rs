use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::CredentialError;

/// Tokens this close to expiry are treated as expired.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Installed-app OAuth client as downloaded from the developer console.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecretsFile {
    #[serde(default)]
    pub installed: Option<AppSecret>,
    #[serde(default)]
    pub web: Option<AppSecret>,
}

impl ClientSecretsFile {
    pub fn parse(contents: &str) -> Result<AppSecret, CredentialError> {
        let file: ClientSecretsFile = serde_json::from_str(contents)
            .map_err(|e| CredentialError::InvalidSecrets(e.to_string()))?;
        file.installed.or(file.web).ok_or_else(|| {
            CredentialError::InvalidSecrets(
                "expected an \"installed\" or \"web\" client section".to_string(),
            )
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// Cached token file contents.
///
/// Accepts the `token` key written by other OAuth helpers as an alias for
/// `access_token`. Unknown keys are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StoredToken {
    /// Tokens without an expiry are assumed valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_SKEW_SECS) <= now,
            None => false,
        }
    }
}

/// Token endpoint response for a refresh_token grant.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}
