use super::{types::Config, ConfigError};

/// Largest page the playlist endpoint accepts.
const MAX_PAGE_SIZE: u32 = 50;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.server.port_scan_range == 0 {
        return Err(ConfigError::ValidationError(
            "server.port_scan_range must be at least 1".to_string(),
        ));
    }

    if config.youtube.page_size == 0 || config.youtube.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::ValidationError(format!(
            "youtube.page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    if config.youtube.max_results == 0 {
        return Err(ConfigError::ValidationError(
            "youtube.max_results cannot be 0".to_string(),
        ));
    }

    if config.youtube.category_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "youtube.category_id cannot be empty".to_string(),
        ));
    }

    Ok(())
}
