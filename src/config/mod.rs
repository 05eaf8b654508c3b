mod settings;

use crate::broker::UnsubscribeNotify;
use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{LoggingSettings, RegistrySettings, ServerSettings, Settings};

/// Prefix of the environment variables read by `load_config`, e.g.
/// `ARENASUB_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "ARENASUB";

/// Loads the configuration from `config/default` and environment variables.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Loads the configuration from the given file stem (any format the `config`
/// crate recognizes, optional) and environment variables, then merges the
/// result with default values.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    let unsubscribe_notify = match partial
        .registry
        .as_ref()
        .and_then(|r| r.unsubscribe_notify.as_deref())
    {
        Some(policy) => policy
            .parse::<UnsubscribeNotify>()
            .map_err(ConfigError::Message)?,
        None => default.registry.unsubscribe_notify,
    };

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        registry: RegistrySettings { unsubscribe_notify },
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    })
}

#[cfg(test)]
mod tests;
