//! Server settings loaded via OrthoConfig.
//!
//! Layering: command-line flags override `CELLERET_*` environment variables,
//! which override the defaults below.

use std::ffi::OsString;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use ortho_config::{OrthoConfig, OrthoResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

/// Deployment environment the server reports at startup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid setting values detected after loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("host must be an IP address, got {value}")]
    InvalidHost { value: String },
}

/// Configuration values controlling how the BFF binds and reports itself.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CELLERET")]
pub struct ServerSettings {
    /// Deployment environment: development, production or test.
    pub environment: Option<Environment>,
    /// Interface address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
}

impl ServerSettings {
    /// Load settings from `args`, then `CELLERET_*` variables, then defaults.
    ///
    /// An unknown environment name fails here rather than after startup.
    pub fn load_from_args<I, T>(args: I) -> OrthoResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args)
    }

    /// Return the configured environment, defaulting to development.
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Return the configured socket address, falling back to `0.0.0.0:3001`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip = IpAddr::from_str(host).map_err(|_| SettingsError::InvalidHost {
            value: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 3] = ["CELLERET_ENVIRONMENT", "CELLERET_HOST", "CELLERET_PORT"];

    fn argv(args: &[&str]) -> Vec<OsString> {
        std::iter::once(OsString::from("celleret"))
            .chain(args.iter().map(OsString::from))
            .collect()
    }

    fn load(args: &[&str]) -> ServerSettings {
        ServerSettings::load_from_args(argv(args)).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|var| (var, None::<String>)));

        let settings = load(&[]);
        assert_eq!(settings.environment(), Environment::Development);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 3001)))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CELLERET_ENVIRONMENT", Some("production".to_owned())),
            ("CELLERET_HOST", Some("127.0.0.1".to_owned())),
            ("CELLERET_PORT", Some("8080".to_owned())),
        ]);

        let settings = load(&[]);
        assert_eq!(settings.environment(), Environment::Production);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 8080)))
        );
    }

    #[rstest]
    fn cli_flags_override_environment() {
        let _guard = lock_env([
            ("CELLERET_ENVIRONMENT", Some("production".to_owned())),
            ("CELLERET_HOST", None::<String>),
            ("CELLERET_PORT", Some("8080".to_owned())),
        ]);

        let settings = load(&["--port", "9090", "--environment", "test"]);
        assert_eq!(settings.port, Some(9090));
        assert_eq!(settings.environment(), Environment::Test);
    }

    #[rstest]
    fn unknown_environment_fails_to_load() {
        let _guard = lock_env([
            ("CELLERET_ENVIRONMENT", Some("staging".to_owned())),
            ("CELLERET_HOST", None::<String>),
            ("CELLERET_PORT", None::<String>),
        ]);

        assert!(ServerSettings::load_from_args(argv(&[])).is_err());
    }

    #[rstest]
    fn hostname_is_rejected_as_bind_host() {
        let settings = ServerSettings {
            environment: None,
            host: Some("localhost".to_owned()),
            port: None,
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost { .. })
        ));
    }
}
