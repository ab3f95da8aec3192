use crate::config::{ApiConfig, FeedConfig, LoggingConfig, OracleConfig, RpcConfig};
use crate::error::{Error, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rpc: RpcConfig,
    pub oracle: OracleConfig,
    pub feed: FeedConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Layers `config/default`, `config/{env}` and `ORACLE_WATCH__*` variables.
    pub fn load(env: &str) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        Self::finish(with_environment(builder))
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml));

        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: AppConfig = builder
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?
            .try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed.poll_interval_secs == 0 {
            return Err(Error::ConfigError("feed.poll_interval_secs must be positive".to_string()));
        }
        if self.feed.cache_ttl_secs == 0 {
            return Err(Error::ConfigError("feed.cache_ttl_secs must be positive".to_string()));
        }
        if self.rpc.timeout_secs == 0 {
            return Err(Error::ConfigError("rpc.timeout_secs must be positive".to_string()));
        }
        // uint256 has 78 decimal digits
        if self.oracle.decimals > 77 {
            return Err(Error::ConfigError(format!("oracle.decimals too large: {}", self.oracle.decimals)));
        }
        self.oracle
            .address()
            .map_err(|e| Error::ConfigError(format!("oracle.address: {}", e)))?;
        Ok(())
    }
}

fn with_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("ORACLE_WATCH")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("feed.symbols")
            .try_parsing(true),
    )
}
