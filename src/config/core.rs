use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};

use super::CrackConfig;
use crate::error::Result;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Values given on the command line; they beat every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workers: Option<usize>,
    pub block_size: Option<usize>,
}

impl CrackConfig {
    /// Load the merged configuration.
    ///
    /// With `custom_config` only that file is read on top of the defaults;
    /// otherwise the user file and `./zipcrack.toml` are tried.
    pub fn load(custom_config: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        tracing::trace!(?custom_config, "loading configuration");
        let config: CrackConfig = Self::figment(custom_config, overrides)?.extract()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    fn figment(custom_config: Option<&Path>, overrides: &ConfigOverrides) -> Result<Figment> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(path) = custom_config {
            if !path.is_file() {
                return Err(figment::Error::from(format!(
                    "config file {} not found",
                    path.display()
                ))
                .into());
            }
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        } else {
            figment = figment
                .merge(Toml::file(Self::user_config_path()))
                .merge(Toml::file("zipcrack.toml"));
        }

        // Environment variables: ZIPCRACK_SEARCH__WORKERS=4
        figment = figment.merge(Env::prefixed("ZIPCRACK_").split("__"));

        if let Some(workers) = overrides.workers {
            figment = figment.merge(Serialized::default("search.workers", workers));
        }
        if let Some(block_size) = overrides.block_size {
            figment = figment.merge(Serialized::default("dictionary.block_size", block_size));
        }

        Ok(figment)
    }

    fn user_config_path() -> PathBuf {
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".config/zipcrack/config.toml"),
            None => PathBuf::from("~/.config/zipcrack/config.toml"),
        }
    }
}
