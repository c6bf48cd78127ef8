//! Access token sources for the video platform API.
//!
//! The consent flow that produces the first token lives outside this crate;
//! these providers only read, refresh and persist what it leaves behind.

mod file;
mod static_token;
mod traits;
mod types;

pub use file::*;
pub use static_token::*;
pub use traits::*;
pub use types::*;

use crate::config::CredentialsConfig;

/// Factory function to create a token source from config.
///
/// A token given directly in the config wins; otherwise the client secrets
/// file must exist.
pub fn create_token_source(
    config: &CredentialsConfig,
) -> Result<Box<dyn AccessTokenSource>, CredentialError> {
    match config.access_token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => Ok(Box::new(StaticTokenProvider::new(token))),
        None => Ok(Box::new(FileCredentialProvider::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_create_token_source_static() {
        let config = CredentialsConfig {
            access_token: Some("ya29.configured".to_string()),
            ..Default::default()
        };
        let source = create_token_source(&config).unwrap();
        assert_eq!(source.source_name(), "static");
    }

    #[test]
    fn test_create_token_source_missing_secrets() {
        let config = CredentialsConfig {
            client_secrets_path: PathBuf::from("/nonexistent/credentials.json"),
            token_path: PathBuf::from("/nonexistent/token.json"),
            access_token: None,
        };
        let result = create_token_source(&config);
        assert!(matches!(result, Err(CredentialError::SecretsNotFound(_))));
    }

    #[test]
    fn test_create_token_source_empty_token_uses_file() {
        let config = CredentialsConfig {
            client_secrets_path: PathBuf::from("/nonexistent/credentials.json"),
            token_path: PathBuf::from("/nonexistent/token.json"),
            access_token: Some(String::new()),
        };
        assert!(matches!(
            create_token_source(&config),
            Err(CredentialError::SecretsNotFound(_))
        ));
    }
}
