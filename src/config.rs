use std::path::Path;

use serde::Deserialize;

use crate::{fields::Fields, prelude::*};

/// Which interval fields a record type has.
///
/// ```toml
/// fields = ["active_during"]
/// ```
#[derive(Clone, Debug, Default, Deserialize, bon::Builder)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Field names, empty means the single default field.
    #[serde(default)]
    #[builder(default, into)]
    pub fields: Vec<String>,
}

impl Config {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("failed to parse the interval field configuration")
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let config = Self::from_toml(&text)?;
        debug!(n_fields = config.fields.len(), "loaded");
        Ok(config)
    }
}

impl From<Config> for Fields {
    fn from(config: Config) -> Self {
        Self::new(config.fields)
    }
}
