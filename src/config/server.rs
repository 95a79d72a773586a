use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use config::{ConfigError, Environment, Map};
use serde::{Deserialize, Serialize};

/// Listener address, read from `SERVER_HOST` and `SERVER_PORT`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        super::deserialize_env(Self::environment())
    }

    pub fn from_env_source(vars: Map<String, String>) -> Result<Self, ConfigError> {
        super::deserialize_env(Self::environment().source(Some(vars)))
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    fn environment() -> Environment {
        Environment::with_prefix("server").prefix_separator("_")
    }
}
