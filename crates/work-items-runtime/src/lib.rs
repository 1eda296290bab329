//! Runtime utilities
//!
//! Configuration loading and logging setup for the `work-items` binary.

mod config;
pub mod logging;

use std::path::Path;

pub use config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Prefix of every environment variable read into the config
const ENV_PREFIX: &str = "WORK_ITEMS_";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(gitlab_common_env())
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment.
///
/// Values set in the environment take precedence over the file, and `WORK_ITEMS_`
/// variables take precedence over the `GITLAB_` aliases.
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(gitlab_common_env())
        .join(Yaml::file_exact(yaml_path.as_ref()))
        .extract()
}

/// Figment provider mapping the conventional GitLab environment variables onto config keys
fn gitlab_common_env() -> Env {
    Env::prefixed("GITLAB_")
        .only(&["token", "graphql_url"])
        .map(|key| match key.to_string().to_lowercase().as_str() {
            "token" => "token".into(),
            "graphql_url" => "endpoint".into(),

            // Filtered out by `only` above
            other => other.to_string().into(),
        })
}
