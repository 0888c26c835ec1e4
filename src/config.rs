use crate::datasources::TableSource;
use crate::error::{AdvisorError, Result};
use crate::logic::aggregator::{LONG_LOOKBACK_YEARS, SHORT_LOOKBACK_YEARS};
use crate::logic::AdvisorSettings;
use crate::models::{CropCatalog, MaintenanceWindow};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    /// Replacement crop catalog; the bundled one is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub windows: WindowConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DataConfig {
    pub rainfall: Option<TableSource>,
    pub temperature: Option<TableSource>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_overview_years")]
    pub overview_years: usize,
    #[serde(default = "default_recommendation_years")]
    pub recommendation_years: usize,
}

fn default_overview_years() -> usize {
    LONG_LOOKBACK_YEARS
}

fn default_recommendation_years() -> usize {
    SHORT_LOOKBACK_YEARS
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            overview_years: LONG_LOOKBACK_YEARS,
            recommendation_years: SHORT_LOOKBACK_YEARS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimelineConfig {
    #[serde(default = "MaintenanceWindow::defaults")]
    pub maintenance: Vec<MaintenanceWindow>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            maintenance: MaintenanceWindow::defaults(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AdvisorError::Config(format!(
                "Config file not found at {:?}. Run `croprota init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AdvisorError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse config text, substituting `${VAR}` references first.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AdvisorError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.windows.overview_years == 0 || self.windows.recommendation_years == 0 {
            return Err(AdvisorError::Config(
                "lookback windows must cover at least one year".into(),
            ));
        }
        if self.windows.recommendation_years > self.windows.overview_years {
            tracing::warn!(
                "recommendation window ({} years) is longer than the overview window ({} years)",
                self.windows.recommendation_years,
                self.windows.overview_years
            );
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("croprota").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/croprota/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AdvisorError::Config("Cannot determine config directory".into()))?
            .join("croprota");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up croprota.");
        println!();

        println!("Climate tables (file path or http(s) URL)");
        let rainfall: String = Input::new()
            .with_prompt("  Rainfall table")
            .default("data/rainfall.csv".into())
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        let temperature: String = Input::new()
            .with_prompt("  Temperature table")
            .default("data/temperature.csv".into())
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Lookback windows (years)");
        let overview_years: usize = Input::new()
            .with_prompt("  Climate overview")
            .default(LONG_LOOKBACK_YEARS)
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        let recommendation_years: usize = Input::new()
            .with_prompt("  Recommendations")
            .default(SHORT_LOOKBACK_YEARS)
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Crop catalog (leave blank for the bundled catalog)");
        let catalog: String = Input::new()
            .with_prompt("  Catalog YAML")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            data: DataConfig {
                rainfall: Some(TableSource::parse(&rainfall)),
                temperature: Some(TableSource::parse(&temperature)),
            },
            catalog: if catalog.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(catalog.trim()))
            },
            windows: WindowConfig {
                overview_years,
                recommendation_years,
            },
            timeline: TimelineConfig::default(),
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AdvisorError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# croprota configuration\n# Generated by `croprota init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn advisor_settings(&self) -> AdvisorSettings {
        AdvisorSettings {
            overview_years: self.windows.overview_years,
            recommendation_years: self.windows.recommendation_years,
            maintenance: self.timeline.maintenance.clone(),
        }
    }

    pub fn load_catalog(&self) -> Result<CropCatalog> {
        match &self.catalog {
            Some(path) => CropCatalog::load(path),
            None => CropCatalog::builtin(),
        }
    }

    pub fn rainfall_source(&self) -> Result<&TableSource> {
        self.data
            .rainfall
            .as_ref()
            .ok_or_else(|| AdvisorError::Config("no rainfall table configured".into()))
    }

    pub fn temperature_source(&self) -> Result<&TableSource> {
        self.data
            .temperature
            .as_ref()
            .ok_or_else(|| AdvisorError::Config("no temperature table configured".into()))
    }
}
