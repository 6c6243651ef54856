use crate::config::types::{Config, CrawlerConfig};
use crate::config::validation::validate;
use crate::crawler::FrontierPolicy;
use crate::state::RetryScope;
use crate::url::prepare_seed;
use crate::ConfigError;
use std::path::Path;

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct CrawlerOverrides {
    pub retries: Option<u32>,
    pub backoff_unit_ms: Option<u64>,
    pub frontier: Option<FrontierPolicy>,
    pub retry_scope: Option<RetryScope>,
}

impl CrawlerOverrides {
    /// Writes every value that was given onto the crawler section
    pub fn apply(&self, crawler: &mut CrawlerConfig) {
        if let Some(retries) = self.retries {
            crawler.retries = retries;
        }
        if let Some(unit) = self.backoff_unit_ms {
            crawler.backoff_unit_ms = unit;
        }
        if let Some(frontier) = self.frontier {
            crawler.frontier = frontier;
        }
        if let Some(scope) = self.retry_scope {
            crawler.retry_scope = scope;
        }
    }
}

/// Loads the policy sections of a configuration file
///
/// The returned config has an empty start URL and a zero hop budget; use
/// [`build_config`] to produce a crawlable configuration.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully parsed configuration
/// * `Err(ConfigError)` - Failed to read or parse the file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Assembles and validates the configuration for one crawl
///
/// Precedence is: command-line overrides, then the config file, then
/// built-in defaults.
///
/// # Arguments
///
/// * `start_url` - Start URL as given on the command line
/// * `hops` - Hop budget
/// * `path` - Optional TOML configuration file
/// * `overrides` - Command-line policy overrides
///
/// # Example
///
/// ```
/// use hop_crawler::config::{build_config, CrawlerOverrides};
///
/// let config = build_config("http://a.test", 2, None, &CrawlerOverrides::default()).unwrap();
/// assert_eq!(config.start_url, "http://a.test/");
/// assert_eq!(config.crawler.retries, 3);
/// ```
pub fn build_config(
    start_url: &str,
    hops: u32,
    path: Option<&Path>,
    overrides: &CrawlerOverrides,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::new(String::new(), 0),
    };

    config.start_url = prepare_seed(start_url)?;
    config.hops = hops;
    overrides.apply(&mut config.crawler);

    validate(&config)?;

    Ok(config)
}
