//! Configuration loading: defaults, then TOML file, then environment.

use anyhow::Result;
use figment::{
    providers::{Data, Env, Format, Serialized, Toml},
    Figment,
};

use crate::config::PipelineConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the pipeline configuration by layering `config/Quadgate.toml`
    /// and `QUADGATE_`-prefixed environment variables over the built-in
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be parsed or a
    /// value fails to deserialize.
    pub fn load() -> Result<PipelineConfig> {
        Self::load_from(Toml::file("config/Quadgate.toml"))
    }

    /// Loads configuration from a specific TOML file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a value fails to
    /// deserialize.
    pub fn load_file(path: &str) -> Result<PipelineConfig> {
        Self::load_from(Toml::file(path))
    }

    fn load_from(file: Data<Toml>) -> Result<PipelineConfig> {
        let config: PipelineConfig = Figment::from(Serialized::defaults(PipelineConfig::default()))
            .merge(file)
            .merge(Env::prefixed("QUADGATE_"))
            .extract()?;

        Ok(config)
    }
}
