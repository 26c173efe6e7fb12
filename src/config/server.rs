//! HTTP listener settings

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for `request_timeout_secs`.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where the proxy listens and how it logs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to bind; hostnames are not resolved
    pub host: String,
    pub port: u16,
    /// Selects the log format (JSON in production)
    pub environment: Environment,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Upper bound for a whole publish request, including publisher creation
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// The listener address. IPv4 and IPv6 literals are accepted.
    pub fn bind_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .trim_matches(|c| c == '[' || c == ']')
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bind_addr()?;
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,pubsub_proxy=debug".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_timeout(secs: u64) -> ServerConfig {
        ServerConfig {
            request_timeout_secs: secs,
            ..ServerConfig::default()
        }
    }

    fn with_host(host: &str) -> ServerConfig {
        ServerConfig {
            host: host.to_string(),
            port: 9000,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn default_listener_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn request_timeout_bounds_are_inclusive() {
        assert!(with_timeout(1).validate().is_ok());
        assert!(with_timeout(MAX_REQUEST_TIMEOUT_SECS).validate().is_ok());
        assert_eq!(with_timeout(0).validate(), Err(ValidationError::InvalidTimeout));
        assert_eq!(
            with_timeout(MAX_REQUEST_TIMEOUT_SECS + 1).validate(),
            Err(ValidationError::InvalidTimeout)
        );
        assert_eq!(with_timeout(45).request_timeout(), Duration::from_secs(45));
    }

    #[test]
    fn ipv6_hosts_bind() {
        assert_eq!(with_host("::1").bind_addr().unwrap().to_string(), "[::1]:9000");
        assert_eq!(with_host("[::]").bind_addr().unwrap().to_string(), "[::]:9000");
    }

    #[test]
    fn hostnames_are_rejected() {
        for host in ["localhost", "proxy.internal", "", "10.0.0.256"] {
            assert_eq!(
                with_host(host).validate(),
                Err(ValidationError::InvalidBindAddress(host.to_string())),
                "host {host:?}"
            );
        }
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn only_production_logs_json() {
        for (environment, production) in [
            (Environment::Development, false),
            (Environment::Staging, false),
            (Environment::Production, true),
        ] {
            let config = ServerConfig {
                environment,
                ..ServerConfig::default()
            };
            assert_eq!(config.is_production(), production);
        }
    }
}
