use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Loads `Settings` from `configuration/base.yaml` in the working directory
/// (`test.yaml` when compiled for tests), with `APP_` environment overrides
/// such as `APP_OUTAGE_API__HOST`.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    config_from(&base_path)
}

pub fn config_from<Settings: DeserializeOwned>(base_path: &Path) -> anyhow::Result<Settings> {
    let configuration_directory = base_path.join("configuration");
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join(file)))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to build configuration from {file}"))?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}
