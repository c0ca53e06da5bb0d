pub mod seed;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub use seed::{SeedFixture, SeedReport};
pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "hbnb")]
#[command(about = "Load booking data into the in-memory store and print it")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML application config")]
    pub config: Option<String>,

    #[arg(long, help = "Path to a TOML seed fixture (overrides [seed] in config)")]
    pub seed: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Print full place details instead of summaries")]
    pub detail: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the file config (or defaults) and applies command-line overrides.
    pub fn resolve(&self) -> crate::Result<AppConfig> {
        let mut app_config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if self.verbose {
            app_config.logging.level = "debug".to_string();
        }
        if self.json_logs {
            app_config.logging.format = "json".to_string();
        }
        if let Some(path) = &self.seed {
            app_config.seed = Some(toml_config::SeedConfig { path: path.clone() });
        }
        Ok(app_config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig::parse_from(["hbnb", "--verbose", "--json-logs", "--seed", "seed.toml"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.json_logs());
        assert_eq!(config.seed_path(), Some("seed.toml"));
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliConfig::parse_from(["hbnb", "--config", "/nonexistent/hbnb.toml"]);
        assert!(cli.resolve().is_err());
    }
}
