//! Process-wide configuration
//!
//! `ServerConfig` describes the RCON endpoint and is read once from the
//! environment at startup. `AppConfig` describes where the gateway binds.
//! Both are immutable after construction and passed explicitly to the
//! components that need them.

use crate::error::{RconMcpError, Result};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the RCON server host
pub const ENV_HOST: &str = "HOST";
/// Environment variable holding the RCON server port
pub const ENV_SERVER_PORT: &str = "SERVER_PORT";
/// Environment variable holding the RCON password
pub const ENV_RCON_PASSWORD: &str = "RCON_PASSWORD";

/// RCON endpoint of the game server
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl ServerConfig {
    /// Create a validated config
    pub fn new(host: impl Into<String>, port: u16, password: impl Into<String>) -> Result<Self> {
        let host = host.into();
        let password = password.into();

        if host.trim().is_empty() {
            return Err(RconMcpError::Configuration("host must not be empty".into()));
        }
        if port == 0 {
            return Err(RconMcpError::Configuration(
                "port must be in 1-65535".into(),
            ));
        }
        if password.is_empty() {
            return Err(RconMcpError::Configuration(
                "password must not be empty".into(),
            ));
        }

        Ok(Self {
            host,
            port,
            password,
        })
    }

    /// Load from `HOST`, `SERVER_PORT` and `RCON_PASSWORD`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    ///
    /// Every missing variable is reported in a single error so that a
    /// misconfigured deployment can be fixed in one pass.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = read(ENV_HOST);
        let port = read(ENV_SERVER_PORT);
        let password = read(ENV_RCON_PASSWORD);

        let missing: Vec<&str> = [
            (ENV_HOST, host.is_none()),
            (ENV_SERVER_PORT, port.is_none()),
            (ENV_RCON_PASSWORD, password.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

        let (Some(host), Some(port), Some(password)) = (host, port, password) else {
            return Err(RconMcpError::Configuration(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        };

        let port = port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| {
                RconMcpError::Configuration(format!("Invalid {} value: {}", ENV_SERVER_PORT, port))
            })?;

        Self::new(host.trim(), port, password)
    }

    /// `host:port` form for connecting
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Gateway bind settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            debug: false,
        }
    }
}

impl AppConfig {
    /// `host:port` form for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Timing bounds for one RCON exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RconOptions {
    /// Bound on opening the TCP connection
    pub connect_timeout: Duration,
    /// Bound on authentication, command and complete response together
    pub response_timeout: Duration,
    /// Response bodies at least this long may be split across packets
    pub fragment_threshold: usize,
}

impl Default for RconOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(10),
            fragment_threshold: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_valid() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "10.0.0.5"),
            ("SERVER_PORT", "27015"),
            ("RCON_PASSWORD", "hunter2"),
        ]))
        .unwrap();

        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 27015);
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.address(), "10.0.0.5:27015");
    }

    #[test]
    fn test_missing_variables_are_all_reported() {
        let err = ServerConfig::from_lookup(lookup(&[("HOST", "localhost")])).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        let msg = err.to_string();
        assert!(msg.contains("SERVER_PORT"));
        assert!(msg.contains("RCON_PASSWORD"));
        assert!(!msg.contains("HOST,"));
    }

    #[test]
    fn test_empty_password_is_missing() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("HOST", "localhost"),
            ("SERVER_PORT", "27015"),
            ("RCON_PASSWORD", ""),
        ]))
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("RCON_PASSWORD"));
    }

    #[test]
    fn test_non_numeric_port_rejected() {
        for bad in ["abc", "0", "65536", "-1", "27015x"] {
            let err = ServerConfig::from_lookup(lookup(&[
                ("HOST", "localhost"),
                ("SERVER_PORT", bad),
                ("RCON_PASSWORD", "pw"),
            ]))
            .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "port {bad}");
            assert!(err.to_string().contains("Invalid SERVER_PORT"));
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ServerConfig::new("localhost", 27015, "hunter2").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(!config.debug);
    }
}
