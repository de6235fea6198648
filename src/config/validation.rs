use crate::config::types::{Config, DownloadConfig, OutputConfig, ThumbnailConfig};
use crate::ConfigError;

/// Upper bound for simultaneous downloads
const MAX_CONCURRENT_LIMIT: u32 = 256;

/// Upper bound for thumbnail width in pixels
const MAX_THUMBNAIL_WIDTH: u32 = 4096;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_download_config(&config.download)?;
    validate_thumbnail_config(&config.thumbnail)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates download configuration
fn validate_download_config(config: &DownloadConfig) -> Result<(), ConfigError> {
    validate_max_concurrent(config.max_concurrent)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a download concurrency limit
///
/// Shared with the command line override so both paths enforce the same range.
pub fn validate_max_concurrent(value: u32) -> Result<(), ConfigError> {
    if value < 1 || value > MAX_CONCURRENT_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-concurrent must be between 1 and {}, got {}",
            MAX_CONCURRENT_LIMIT, value
        )));
    }
    Ok(())
}

/// Validates a thumbnail width
pub fn validate_thumbnail_width(value: u32) -> Result<(), ConfigError> {
    if value < 1 || value > MAX_THUMBNAIL_WIDTH {
        return Err(ConfigError::Validation(format!(
            "thumbnail width must be between 1 and {}, got {}",
            MAX_THUMBNAIL_WIDTH, value
        )));
    }
    Ok(())
}

fn validate_thumbnail_config(config: &ThumbnailConfig) -> Result<(), ConfigError> {
    validate_thumbnail_width(config.width)
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    let name = config.gallery_file.as_str();

    if name.is_empty() {
        return Err(ConfigError::Validation(
            "gallery-file cannot be empty".to_string(),
        ));
    }

    // The gallery must land inside the output folder
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "gallery-file must be a plain file name, got '{}'",
            name
        )));
    }

    Ok(())
}
