use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "Client secrets file not found at {0}. Download the OAuth client (installed app) \
         secret from the Google Cloud Console and save it at that path."
    )]
    SecretsNotFound(String),

    #[error("Invalid client secrets file: {0}")]
    InvalidSecrets(String),

    #[error("No cached token at {0}; complete the consent flow to create it")]
    TokenNotFound(String),

    #[error("Access token expired and no refresh token is available")]
    TokenExpired,

    #[error("Token refresh failed: {0}")]
    Refresh(String),

    #[error("Failed to parse token file: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Yields bearer tokens for the video platform API.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// Return a currently valid access token, refreshing it if needed.
    async fn access_token(&self) -> Result<String, CredentialError>;

    /// Name of this token source
    fn source_name(&self) -> &'static str;
}
