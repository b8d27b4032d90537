//! Settings file and environment loader.

use std::path::{Path, PathBuf};

use splitdeck_domain::{ClientSettings, CommitPolicy, DomainError};
use thiserror::Error;
use tokio::fs;

/// Overrides `base_url`.
pub const ENV_BASE_URL: &str = "SPLITDECK_BASE_URL";
/// Overrides `page_size`.
pub const ENV_PAGE_SIZE: &str = "SPLITDECK_PAGE_SIZE";
/// Overrides `commit_policy`.
pub const ENV_COMMIT_POLICY: &str = "SPLITDECK_COMMIT_POLICY";

const CONFIG_DIR: &str = "splitdeck";
const CONFIG_FILE: &str = "config.yaml";

/// Errors raised while assembling [`ClientSettings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested settings file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// The settings file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid YAML for [`ClientSettings`].
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {var}: {message}")]
    Env {
        /// Variable name.
        var: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Loads [`ClientSettings`] from the settings file and the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    explicit: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader.
    ///
    /// With `explicit` set, that file must exist. Otherwise the default
    /// location is used when a file is present there.
    #[must_use]
    pub const fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// `<config_dir>/splitdeck/config.yaml`, if the platform has a config
    /// directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads settings using the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed, or
    /// an environment override is malformed.
    pub async fn load(&self) -> Result<ClientSettings, ConfigError> {
        self.load_with(|name| std::env::var(name).ok()).await
    }

    /// Loads settings, resolving environment variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load`].
    pub async fn load_with<F>(&self, lookup: F) -> Result<ClientSettings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_file = match &self.explicit {
            Some(path) => Some(read_settings(path).await?),
            None => match Self::default_path() {
                Some(path) if fs::try_exists(&path).await.unwrap_or(false) => {
                    Some(read_settings(&path).await?)
                }
                _ => None,
            },
        };

        apply_env(from_file.unwrap_or_default(), lookup)
    }
}

async fn read_settings(path: &Path) -> Result<ClientSettings, ConfigError> {
    let contents = fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if contents.trim().is_empty() {
        return Ok(ClientSettings::default());
    }

    let settings = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "loaded settings file");
    Ok(settings)
}

/// Applies `SPLITDECK_*` overrides on top of `settings`.
///
/// Blank values are ignored.
///
/// # Errors
///
/// Returns `ConfigError::Env` for a page size that is not a number or an
/// unknown commit policy.
pub fn apply_env<F>(mut settings: ClientSettings, lookup: F) -> Result<ClientSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = var(ENV_BASE_URL) {
        settings.base_url = base_url.trim().to_string();
    }
    if let Some(page_size) = var(ENV_PAGE_SIZE) {
        settings.page_size = page_size.trim().parse().map_err(|e| ConfigError::Env {
            var: ENV_PAGE_SIZE,
            message: format!("{e}: {page_size}"),
        })?;
    }
    if let Some(policy) = var(ENV_COMMIT_POLICY) {
        settings.commit_policy =
            policy
                .parse::<CommitPolicy>()
                .map_err(|e: DomainError| ConfigError::Env {
                    var: ENV_COMMIT_POLICY,
                    message: e.to_string(),
                })?;
    }
    Ok(settings)
}
