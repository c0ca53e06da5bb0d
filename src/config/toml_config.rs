use crate::utils::error::{HbnbError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

const ENVIRONMENTS: [&str; 3] = ["development", "testing", "production"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSection,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub seed: Option<SeedConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSection {
    pub name: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub path: String,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "compact".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSection {
                name: "hbnb".to_string(),
                environment: default_environment(),
            },
            logging: LoggingConfig::default(),
            seed: None,
        }
    }
}

static ENV_VAR_RE: OnceLock<Regex> = OnceLock::new();

fn env_var_regex() -> &'static Regex {
    ENV_VAR_RE.get_or_init(|| {
        Regex::new(r"\$\{([^}]+)\}")
            .unwrap_or_else(|e| panic!("env var regex failed to compile: {}", e))
    })
}

fn check_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(HbnbError::ConfigError {
            message: format!(
                "{} must be one of {}, got '{}'",
                field_name,
                allowed.join(", "),
                value
            ),
        });
    }
    Ok(())
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| HbnbError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HBNB_ENV})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_regex()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("app.name", &self.app.name)?;
        check_one_of("app.environment", &self.app.environment, &ENVIRONMENTS)?;
        check_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;
        check_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;

        if let Some(seed) = &self.seed {
            validate_non_empty_string("seed.path", &seed.path)?;
        }
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }

    pub fn seed_path(&self) -> Option<&str> {
        self.seed.as_ref().map(|s| s.path.as_str())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
