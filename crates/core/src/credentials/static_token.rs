use async_trait::async_trait;

use super::{AccessTokenSource, CredentialError};

/// Token source that always hands out the same token.
/// Used when a token is supplied through configuration, and in tests.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenSource for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, CredentialError> {
        Ok(self.token.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_returned() {
        let provider = StaticTokenProvider::new("ya29.fixed");
        assert_eq!(provider.access_token().await.unwrap(), "ya29.fixed");
        assert_eq!(provider.source_name(), "static");
    }
}
