use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_client::ClientSettings;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use url::Url;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "catalog.ron";

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "CATALOG_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid page url {0:?}: {1}")]
    PageUrl(String, url::ParseError),
    #[error("invalid log level {0:?}")]
    LogLevel(String),
}

/// On-disk shape of `catalog.ron`. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_base_url: String,
    search_path: String,
    categories_path: String,
    connect_timeout_ms: u64,
    request_timeout_ms: u64,
    page_url: String,
    log_destination: LogDestination,
    log_level: String,
    log_file: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            api_base_url: client.base_url,
            search_path: client.search_path,
            categories_path: client.categories_path,
            connect_timeout_ms: duration_ms(client.connect_timeout),
            request_timeout_ms: duration_ms(client.request_timeout),
            page_url: "http://localhost:3000/search".to_string(),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            log_file: PathBuf::from("./catalog.log"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientSettings,
    /// Public address of the search page; shareable links are built from it.
    pub page_url: Url,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Configuration used when no file is present.
    pub fn builtin() -> Result<Self, ConfigError> {
        ConfigFile::default().try_into()
    }
}

impl TryFrom<ConfigFile> for AppConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let page_url = Url::parse(&file.page_url)
            .map_err(|err| ConfigError::PageUrl(file.page_url.clone(), err))?;
        let log_level = file
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(file.log_level.clone()))?;
        let defaults = ClientSettings::default();

        Ok(Self {
            client: ClientSettings {
                base_url: file.api_base_url,
                search_path: file.search_path,
                categories_path: file.categories_path,
                connect_timeout: Duration::from_millis(file.connect_timeout_ms),
                request_timeout: Duration::from_millis(file.request_timeout_ms),
                user_agent: defaults.user_agent,
            },
            page_url,
            log_destination: file.log_destination,
            log_level,
            log_file: file.log_file,
        })
    }
}

/// Path of the config file: `$CATALOG_CONFIG` or `./catalog.ron`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::builtin();
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let file: ConfigFile = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    file.try_into()
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
