use crate::config::types::{Config, CrawlerConfig, RenderConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_render_config(&config.render)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler budgets
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth = 0 is legal: only the base URL is crawled

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.crawl_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "crawl_timeout_ms must be greater than zero".to_string(),
        ));
    }

    if config.page_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "page_timeout_ms must be greater than zero".to_string(),
        ));
    }

    if config.max_body_chars == 0 {
        return Err(ConfigError::Validation(
            "max_body_chars must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

/// Validates rendering proxy configuration
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid render endpoint: {}", e)))?;

    if config.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "render timeout_ms must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}
