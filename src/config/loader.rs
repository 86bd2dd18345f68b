use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::types::Config;
use crate::error::ConfigError;

/// Environment variable pointing at an explicit pricing book
pub const CONFIG_PATH_ENV: &str = "ISPQUOTE_CONFIG";
/// Environment overrides for the shared conversion rates
pub const FX_RATE_ENV: &str = "ISPQUOTE_FX_RATE";
pub const MARGIN_ENV: &str = "ISPQUOTE_MARGIN";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `path` when given, otherwise from the default location
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Config::load(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();

        tracing::debug!(path = %path.display(), "Loaded pricing book");
        Ok(config)
    }

    pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

impl Config {
    /// Load the pricing book from its default location, falling back to the
    /// built-in book when no file exists
    pub fn load() -> Result<Config, ConfigError> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            tracing::debug!(
                path = %config_path.display(),
                "No pricing book found, using built-in defaults"
            );
            let mut config = Config::default();
            config.apply_env_overrides();
            return Ok(config);
        }

        ConfigLoader::load_from_path(&config_path)
    }

    /// Save to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        ConfigLoader::save_to_path(self, Self::get_config_path())
    }

    /// Pricing book path: `$ISPQUOTE_CONFIG`, else
    /// `<config dir>/ispquote/pricing.toml`
    pub fn get_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(dir) = dirs::config_dir() {
            dir.join("ispquote").join("pricing.toml")
        } else {
            PathBuf::from(".ispquote/pricing.toml")
        }
    }

    /// Write the built-in pricing book unless one already exists
    pub fn init(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::get_config_path);

        if !config_path.exists() {
            ConfigLoader::save_to_path(&Config::default(), &config_path)?;
            println!("Created pricing book at {}", config_path.display());
        } else {
            println!("Pricing book already exists at {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Validate without keeping the result
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate().map(|_| ())
    }

    /// Print the pricing book as TOML
    pub fn print(&self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }

    /// Apply `ISPQUOTE_FX_RATE` / `ISPQUOTE_MARGIN` when set.
    ///
    /// Unparsable values are ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Some(fx_rate) = decimal_from_env(FX_RATE_ENV) {
            self.conversion.fx_rate = fx_rate;
        }
        if let Some(margin) = decimal_from_env(MARGIN_ENV) {
            self.conversion.margin_multiplier = margin;
        }
    }
}

fn decimal_from_env(name: &str) -> Option<Decimal> {
    let raw = std::env::var(name).ok()?;
    match Decimal::from_str(raw.trim()) {
        Ok(value) => {
            tracing::debug!(variable = name, %value, "Environment override applied");
            Some(value)
        }
        Err(e) => {
            tracing::warn!(variable = name, value = %raw, error = %e, "Ignoring invalid override");
            None
        }
    }
}
