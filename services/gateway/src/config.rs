//! Gateway server configuration

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Where the gateway server listens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl GatewayConfig {
    /// Create a new GatewayConfig from environment variables
    ///
    /// # Environment Variables
    /// - `GATEWAY_HOST`: Interface to bind (default: "0.0.0.0")
    /// - `GATEWAY_PORT`: Port to bind (default: 3000)
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .add_source(Environment::with_prefix("GATEWAY").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
