use serde::Deserialize;

use crate::broker::UnsubscribeNotify;

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub registry: RegistrySettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Configuration settings for the event registry.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    pub unsubscribe_notify: UnsubscribeNotify,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub registry: Option<PartialRegistrySettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// The policy is kept as text here and parsed during the merge.
#[derive(Debug, Deserialize)]
pub struct PartialRegistrySettings {
    pub unsubscribe_notify: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            registry: RegistrySettings {
                unsubscribe_notify: UnsubscribeNotify::Always,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}
