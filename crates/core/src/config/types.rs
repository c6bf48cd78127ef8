use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// First port tried when binding; higher ports are scanned if it is taken.
    #[serde(default = "default_port")]
    pub port: u16,
    /// How many consecutive ports are tried, starting at `port`.
    #[serde(default = "default_port_scan_range")]
    pub port_scan_range: u16,
    /// Open the default browser once the server is listening.
    #[serde(default = "default_true")]
    pub open_browser: bool,
    #[serde(default = "default_browser_delay_ms")]
    pub browser_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            port_scan_range: default_port_scan_range(),
            open_browser: true,
            browser_delay_ms: default_browser_delay_ms(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    5000
}

fn default_port_scan_range() -> u16 {
    100
}

fn default_true() -> bool {
    true
}

fn default_browser_delay_ms() -> u64 {
    1500
}

/// Where the installed-app secret and the cached token live.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    #[serde(default = "default_client_secrets_path")]
    pub client_secrets_path: PathBuf,
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
    /// Fixed bearer token; bypasses the token file when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            client_secrets_path: default_client_secrets_path(),
            token_path: default_token_path(),
            access_token: None,
        }
    }
}

fn default_client_secrets_path() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_token_path() -> PathBuf {
    PathBuf::from("token.json")
}

/// Thumbnail cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_thumbnail_dir")]
    pub thumbnail_dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            thumbnail_dir: default_thumbnail_dir(),
        }
    }
}

fn default_thumbnail_dir() -> PathBuf {
    PathBuf::from("cache/thumbnails")
}

/// Catalog backup configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_backup_path")]
    pub backup_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backup_path: default_backup_path(),
        }
    }
}

fn default_backup_path() -> PathBuf {
    PathBuf::from("videos_backup.json")
}

/// Video platform API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YouTubeConfig {
    /// Data API base URL (default: https://www.googleapis.com/youtube/v3).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Items requested per playlist page; the API caps this at 50.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Upper bound on videos collected by one synchronization.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Category sent with every snippet update.
    #[serde(default = "default_category_id")]
    pub category_id: String,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
            max_results: default_max_results(),
            category_id: default_category_id(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_page_size() -> u32 {
    50
}

fn default_max_results() -> u32 {
    200
}

fn default_category_id() -> String {
    "22".to_string()
}

/// Sanitized config for API responses (token redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub credentials: SanitizedCredentialsConfig,
    pub cache: CacheConfig,
    pub storage: StorageConfig,
    pub youtube: YouTubeConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCredentialsConfig {
    pub client_secrets_path: PathBuf,
    pub token_path: PathBuf,
    pub access_token_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            credentials: SanitizedCredentialsConfig {
                client_secrets_path: config.credentials.client_secrets_path.clone(),
                token_path: config.credentials.token_path.clone(),
                access_token_configured: config
                    .credentials
                    .access_token
                    .as_deref()
                    .is_some_and(|t| !t.is_empty()),
            },
            cache: config.cache.clone(),
            storage: config.storage.clone(),
            youtube: config.youtube.clone(),
        }
    }
}
