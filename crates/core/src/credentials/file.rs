//! Token source backed by the client secrets and cached token files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::types::{AppSecret, ClientSecretsFile, RefreshResponse, StoredToken};
use super::{AccessTokenSource, CredentialError};
use crate::config::CredentialsConfig;

/// Reads the cached token and refreshes it against the client's token endpoint
/// once it expires. The interactive consent flow that creates the first token
/// is not performed here.
pub struct FileCredentialProvider {
    secret: AppSecret,
    token_path: PathBuf,
    token: Mutex<Option<StoredToken>>,
    client: Client,
}

impl FileCredentialProvider {
    /// Fails when the client secrets file is missing or unreadable.
    pub fn new(config: &CredentialsConfig) -> Result<Self, CredentialError> {
        let secrets_path = &config.client_secrets_path;
        if !secrets_path.exists() {
            return Err(CredentialError::SecretsNotFound(
                secrets_path.display().to_string(),
            ));
        }

        let secret = ClientSecretsFile::parse(&std::fs::read_to_string(secrets_path)?)?;
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            secret,
            token_path: config.token_path.clone(),
            token: Mutex::new(None),
            client,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, CredentialError> {
        debug!("Refreshing access token via {}", self.secret.token_uri);

        let response = self
            .client
            .post(&self.secret.token_uri)
            .form(&[
                ("client_id", self.secret.client_id.as_str()),
                ("client_secret", self.secret.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialError::Refresh(format!("{} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| CredentialError::Refresh(format!("Failed to parse token response: {}", e)))
    }
}

#[async_trait]
impl AccessTokenSource for FileCredentialProvider {
    async fn access_token(&self) -> Result<String, CredentialError> {
        let mut guard = self.token.lock().await;

        // Read lazily: the token file may be created after startup.
        if guard.is_none() {
            *guard = read_token(&self.token_path).await?;
            if guard.is_some() {
                info!("Loaded cached token from {:?}", self.token_path);
            }
        }

        let token = guard
            .as_mut()
            .ok_or_else(|| CredentialError::TokenNotFound(self.token_path.display().to_string()))?;

        if !token.is_expired_at(Utc::now()) {
            return Ok(token.access_token.clone());
        }

        let refresh_token = token
            .refresh_token
            .clone()
            .ok_or(CredentialError::TokenExpired)?;
        let refreshed = self.refresh(&refresh_token).await?;

        apply_refresh(token, refreshed);
        write_token(&self.token_path, token).await?;
        info!("Access token refreshed");

        Ok(token.access_token.clone())
    }

    fn source_name(&self) -> &'static str {
        "token_file"
    }
}

fn apply_refresh(token: &mut StoredToken, refreshed: RefreshResponse) {
    token.access_token = refreshed.access_token;
    token.expiry = refreshed
        .expires_in
        .map(|secs| Utc::now() + chrono::Duration::seconds(secs));
    if let Some(refresh_token) = refreshed.refresh_token {
        token.refresh_token = Some(refresh_token);
    }
}

async fn read_token(path: &Path) -> Result<Option<StoredToken>, CredentialError> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let token = serde_json::from_str(&contents).map_err(|e| CredentialError::Parse(e.to_string()))?;
    Ok(Some(token))
}

async fn write_token(path: &Path, token: &StoredToken) -> Result<(), CredentialError> {
    let json =
        serde_json::to_string_pretty(token).map_err(|e| CredentialError::Parse(e.to_string()))?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
