use anyhow::Result;

use crate::config::ValidationResult;
use crate::Config;

/// Loaded configuration plus the warnings found while validating it
pub struct App {
    config: Config,
    validation: ValidationResult,
}

impl App {
    /// Create a new application instance from the on-disk configuration
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;
        Ok(Self { config, validation })
    }

    /// Create an application instance from an already-built configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let validation = config.check()?;
        Ok(Self { config, validation })
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Warnings collected while validating the configuration
    pub fn config_warnings(&self) -> &[crate::config::ConfigValidationError] {
        &self.validation.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_valid_config() {
        let app = App::with_config(Config::default()).unwrap();
        assert_eq!(app.config().weather.default_place, "London");
        assert!(app.config_warnings().is_empty());
    }

    #[test]
    fn test_with_invalid_config() {
        let mut config = Config::default();
        config.weather.icon_base_url = "nope".to_string();
        assert!(App::with_config(config).is_err());
    }

    #[test]
    fn test_warnings_are_kept() {
        let mut config = Config::default();
        config.weather.error_dismiss_secs = 0;
        let app = App::with_config(config).unwrap();
        assert_eq!(app.config_warnings().len(), 1);
    }
}
