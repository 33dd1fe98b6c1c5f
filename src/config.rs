use crate::error::{GddError, Result};
use crate::models::{CalculationMethod, GrowthProfile, MowingThresholds, PgrThresholds};
use dialoguer::{Input, Password, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_TEMPERATURE: f64 = 14.0;
pub const DEFAULT_SEASONAL_TARGET: f64 = 250.0;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Storage key; lets several lawns share one database
    #[serde(default = "default_instance")]
    pub instance: String,
    #[serde(default)]
    pub calculation: CalculationConfig,
    pub homeassistant: HomeAssistantConfig,
    #[serde(default)]
    pub turf: TurfConfig,
    #[serde(default = "default_update_interval")]
    pub update_interval_minutes: u64,
}

fn default_instance() -> String {
    "default".into()
}

fn default_update_interval() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalculationConfig {
    #[serde(default = "default_base_temperature")]
    pub base_temperature: f64,
    #[serde(default)]
    pub method: CalculationMethod,
}

fn default_base_temperature() -> f64 {
    DEFAULT_BASE_TEMPERATURE
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            base_temperature: DEFAULT_BASE_TEMPERATURE,
            method: CalculationMethod::default(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct HomeAssistantConfig {
    pub url: String,
    pub token: String,
    pub weather_entity: String,
    #[serde(default = "default_turf_type_entity")]
    pub turf_type_entity: String,
    #[serde(default = "default_maintenance_level_entity")]
    pub maintenance_level_entity: String,
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_turf_type_entity() -> String {
    "input_select.gdd_turf_type".into()
}

fn default_maintenance_level_entity() -> String {
    "input_select.gdd_maintenance_level".into()
}

fn default_timeout_secs() -> u64 {
    10
}

impl std::fmt::Debug for HomeAssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeAssistantConfig")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .field("weather_entity", &self.weather_entity)
            .field("turf_type_entity", &self.turf_type_entity)
            .field("maintenance_level_entity", &self.maintenance_level_entity)
            .field("temperature_unit", &self.temperature_unit)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Growth model tuning. Every field falls back to the built-in table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TurfConfig {
    pub cool_season: GrowthProfile,
    pub warm_season: GrowthProfile,
    /// Growth (mm) that triggers mowing, per maintenance level
    pub mowing_thresholds: MowingThresholds,
    /// Weekly GDD tiers for growth regulator advice
    pub pgr_thresholds: PgrThresholds,
    pub seasonal_target: f64,
}

impl Default for TurfConfig {
    fn default() -> Self {
        Self {
            cool_season: GrowthProfile::cool_season(),
            warm_season: GrowthProfile::warm_season(),
            mowing_thresholds: MowingThresholds::default(),
            pgr_thresholds: PgrThresholds::default(),
            seasonal_target: DEFAULT_SEASONAL_TARGET,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(GddError::Config(format!(
                "Config file not found at {:?}. Run `turfgdd init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| GddError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse a config document after `${VAR}` substitution.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GddError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.calculation.base_temperature.is_finite() {
            return Err(GddError::Config(
                "calculation.base_temperature must be a number".into(),
            ));
        }
        if self.update_interval_minutes == 0 {
            return Err(GddError::Config(
                "update_interval_minutes must be at least 1".into(),
            ));
        }
        if self.turf.seasonal_target <= 0.0 {
            return Err(GddError::Config("turf.seasonal_target must be positive".into()));
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

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/turfgdd/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GddError::Config("Cannot determine config directory".into()))?
            .join("turfgdd");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive(config_override: Option<&PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up turfgdd!");
        println!();

        println!("Home Assistant");
        let url: String = Input::new()
            .with_prompt("  URL")
            .default("http://localhost:8123".into())
            .interact_text()
            .map_err(input_error)?;

        let token: String = Password::new()
            .with_prompt("  Long-lived access token")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;

        let weather_entity: String = Input::new()
            .with_prompt("  Weather entity")
            .default("weather.home".into())
            .interact_text()
            .map_err(input_error)?;

        let units = ["celsius", "fahrenheit"];
        let unit_idx = Select::new()
            .with_prompt("  Temperature unit reported by Home Assistant")
            .items(&units[..])
            .default(0)
            .interact()
            .map_err(input_error)?;
        let temperature_unit = if unit_idx == 1 {
            TemperatureUnit::Fahrenheit
        } else {
            TemperatureUnit::Celsius
        };

        println!();

        println!("Calculation");
        let base_temperature: f64 = Input::new()
            .with_prompt("  Base temperature (°C)")
            .default(DEFAULT_BASE_TEMPERATURE)
            .interact_text()
            .map_err(input_error)?;

        let methods = [
            CalculationMethod::SimpleAverage,
            CalculationMethod::ModifiedAverage,
            CalculationMethod::SingleSine,
        ];
        let labels: Vec<&str> = methods.iter().map(|m| m.as_str()).collect();
        let method_idx = Select::new()
            .with_prompt("  Method")
            .items(&labels[..])
            .default(0)
            .interact()
            .map_err(input_error)?;

        println!();

        let config = Config {
            instance: default_instance(),
            calculation: CalculationConfig {
                base_temperature,
                method: methods[method_idx],
            },
            homeassistant: HomeAssistantConfig {
                url,
                token,
                weather_entity,
                turf_type_entity: default_turf_type_entity(),
                maintenance_level_entity: default_maintenance_level_entity(),
                temperature_unit,
                timeout_secs: default_timeout_secs(),
            },
            turf: TurfConfig::default(),
            update_interval_minutes: default_update_interval(),
        };

        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::default_config_path()?,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| GddError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# turfgdd configuration\n# Generated by `turfgdd init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| GddError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("TURFGDD_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| GddError::Config("Cannot determine data directory".into()))?
            .join("turfgdd");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("turfgdd.db"))
    }
}

fn input_error(e: dialoguer::Error) -> GddError {
    GddError::Config(format!("Input error: {}", e))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instance: default_instance(),
            calculation: CalculationConfig::default(),
            homeassistant: HomeAssistantConfig {
                url: "http://localhost:8123".into(),
                token: "".into(),
                weather_entity: "weather.home".into(),
                turf_type_entity: default_turf_type_entity(),
                maintenance_level_entity: default_maintenance_level_entity(),
                temperature_unit: TemperatureUnit::Celsius,
                timeout_secs: default_timeout_secs(),
            },
            turf: TurfConfig::default(),
            update_interval_minutes: default_update_interval(),
        }
    }
}
