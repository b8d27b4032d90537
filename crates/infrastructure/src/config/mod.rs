//! Layered configuration loading.
//!
//! Precedence, lowest to highest: built-in defaults, the YAML settings
//! file, `SPLITDECK_*` environment variables. Command-line flags are
//! applied on top by the binary.

mod loader;

pub use loader::{
    ConfigError, ConfigLoader, ENV_BASE_URL, ENV_COMMIT_POLICY, ENV_PAGE_SIZE, apply_env,
};
