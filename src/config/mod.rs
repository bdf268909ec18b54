//! Layered configuration loading.
//!
//! Sources, lowest precedence first: an optional config file, then
//! `TOPICBUS_`-prefixed environment variables using `__` between nested keys
//! (for example `TOPICBUS_BROKER__TOKEN_FORMAT=uuid`).

mod settings;

use crate::config::settings::PartialSettings;
use crate::utils::error::Error;
use config::{Config, Environment, File};

pub use settings::{BrokerSettings, LoggingSettings, Settings, TokenFormat};

/// File name (without extension) looked up relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Loads the configuration from the default file and environment variables.
pub fn load_config() -> Result<Settings, Error> {
    load_config_from(DEFAULT_CONFIG_FILE)
}

/// Loads the configuration from `file` (optional) and environment variables,
/// merging whatever is present over `Settings::default()`.
pub fn load_config_from(file: &str) -> Result<Settings, Error> {
    let builder = Config::builder()
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix("TOPICBUS")
                .prefix_separator("_")
                .separator("__"),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    let default = Settings::default();

    Ok(Settings {
        broker: BrokerSettings {
            token_format: partial
                .broker
                .as_ref()
                .and_then(|b| b.token_format)
                .unwrap_or(default.broker.token_format),
        },
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    })
}
