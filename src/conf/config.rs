use std::path::Path;

use config::Config as CConfig;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    conf::ReportConfig,
    core::PalistError::{self, ConfigParsingError},
};

const ENV_PREFIX: &str = "PALIST";

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, PalistError> {
        let config = CConfig::builder()
            .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        config.validate()
    }

    /// Load from an optional TOML file, then apply `PALIST_*` environment
    /// overrides (`PALIST_REPORT__HDU=3`).
    pub fn load(path: Option<&Path>) -> Result<Config, PalistError> {
        let mut builder = CConfig::builder();
        if let Some(path) = path {
            debug!("loading config from {}", path.display());
            builder = builder.add_source(
                config::File::from(path).format(config::FileFormat::Toml),
            );
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        config.validate()
    }

    fn validate(self) -> Result<Config, PalistError> {
        if self.report.hdu == 0 {
            return Err(ConfigParsingError(
                "report.hdu is 1-based, got 0".to_string(),
            ));
        }
        Ok(self)
    }
}
