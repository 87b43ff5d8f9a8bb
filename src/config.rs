use crate::error::{HealthAdviceError, Result};
use dialoguer::{Confirm, Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const OPENWEATHERMAP_KEY_PLACEHOLDER: &str = "YOUR_OPENWEATHERMAP_API_KEY";
pub const SUPABASE_KEY_PLACEHOLDER: &str = "YOUR_SUPABASE_KEY";
const DEFAULT_OPENWEATHERMAP_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_openweathermap_url")]
    pub base_url: String,
}

fn default_openweathermap_url() -> String {
    DEFAULT_OPENWEATHERMAP_URL.to_string()
}

impl Default for OpenWeatherMapConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openweathermap_url(),
        }
    }
}

impl OpenWeatherMapConfig {
    /// The API key, or `None` when it is missing or still a placeholder.
    pub fn configured_key(&self) -> Option<&str> {
        configured_value(self.api_key.as_deref(), OPENWEATHERMAP_KEY_PLACEHOLDER)
    }

    pub fn require_key(&self) -> Result<&str> {
        self.configured_key().ok_or_else(|| {
            HealthAdviceError::Config(
                "OpenWeatherMap API key is not configured. Please set it in the .env file."
                    .into(),
            )
        })
    }

    pub fn is_configured(&self) -> bool {
        self.configured_key().is_some()
    }
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Clone, Default, Deserialize, Serialize)]
pub struct SupabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

impl SupabaseConfig {
    /// Base URL and anon key, or a configuration error naming what is missing.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let url = configured_value(self.url.as_deref(), "")
            .ok_or_else(|| HealthAdviceError::Config("Supabase URL is not configured".into()))?;
        let key = configured_value(self.key.as_deref(), SUPABASE_KEY_PLACEHOLDER)
            .ok_or_else(|| HealthAdviceError::Config("Supabase key is not configured".into()))?;
        Ok((url.trim_end_matches('/'), key))
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_timeout() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct AccessibilityConfig {
    #[serde(default)]
    pub high_contrast: bool,
    #[serde(default)]
    pub large_font: bool,
}

/// Treats empty values, the shipped placeholder and unresolved `${VAR}` references as unset.
fn configured_value<'a>(value: Option<&'a str>, placeholder: &str) -> Option<&'a str> {
    let value = value?.trim();
    if value.is_empty() || (!placeholder.is_empty() && value == placeholder) {
        return None;
    }
    if value.starts_with("${") && value.ends_with('}') {
        return None;
    }
    Some(value)
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(HealthAdviceError::Config(format!(
                        "Config file not found at {:?}. Run `healthadvice init` to set up.",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::info!("No config file found - reading settings from environment");
                    return Ok(Self::from_env());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| HealthAdviceError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str)?;

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| HealthAdviceError::Config(format!("Failed to parse config: {}", e)))?;

        tracing::debug!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Build a configuration purely from environment variables.
    pub fn from_env() -> Self {
        let env = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            openweathermap: OpenWeatherMapConfig {
                api_key: env("OPENWEATHERMAP_API_KEY"),
                base_url: env("OPENWEATHERMAP_BASE_URL").unwrap_or_else(default_openweathermap_url),
            },
            supabase: SupabaseConfig {
                url: env("SUPABASE_URL"),
                key: env("SUPABASE_KEY"),
            },
            http: HttpConfig::default(),
            accessibility: AccessibilityConfig::default(),
        }
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        let xdg_config = dirs::config_dir()?.join("healthadvice").join("config.yaml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Default path for writing new config files (~/.config/healthadvice/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HealthAdviceError::Config("Cannot determine config directory".into()))?
            .join("healthadvice");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up Health Advice!");
        println!();

        // --- OpenWeatherMap ---
        println!("OpenWeatherMap (leave API key blank to use ${{OPENWEATHERMAP_API_KEY}})");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HealthAdviceError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Supabase ---
        println!("Supabase (leave blank to use ${{SUPABASE_URL}} / ${{SUPABASE_KEY}})");
        let supabase_url: String = Input::new()
            .with_prompt("  Project URL")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HealthAdviceError::Config(format!("Input error: {}", e)))?;

        let supabase_key: String = Password::new()
            .with_prompt("  Anon key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| HealthAdviceError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Accessibility ---
        println!("Accessibility");
        let high_contrast = Confirm::new()
            .with_prompt("  High contrast mode?")
            .default(false)
            .interact()
            .map_err(|e| HealthAdviceError::Config(format!("Input error: {}", e)))?;

        let large_font = Confirm::new()
            .with_prompt("  Large text?")
            .default(false)
            .interact()
            .map_err(|e| HealthAdviceError::Config(format!("Input error: {}", e)))?;

        println!();

        let or_placeholder = |value: String, var: &str| {
            if value.trim().is_empty() {
                format!("${{{}}}", var)
            } else {
                value
            }
        };

        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                api_key: Some(or_placeholder(owm_api_key, "OPENWEATHERMAP_API_KEY")),
                base_url: default_openweathermap_url(),
            },
            supabase: SupabaseConfig {
                url: Some(or_placeholder(supabase_url, "SUPABASE_URL")),
                key: Some(or_placeholder(supabase_key, "SUPABASE_KEY")),
            },
            http: HttpConfig::default(),
            accessibility: AccessibilityConfig {
                high_contrast,
                large_font,
            },
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config).map_err(|e| {
            HealthAdviceError::Config(format!("Failed to serialize config: {}", e))
        })?;

        // Write with a header comment
        let content = format!(
            "# Health Advice Configuration\n# Generated by `healthadvice init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        // Re-read so placeholders resolve against the current environment
        let config = Self::load(Some(config_path.clone()))?;
        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| {
                HealthAdviceError::Config(format!("Invalid substitution pattern: {}", e))
            })?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}
