//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {value}")]
    InvalidPort { value: String },
}

/// Pinning gateway settings used by the IPFS proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` leaves the proxy route answering 500.
    pub gateway: Option<GatewayConfig>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PINATA_GATEWAY_URL` + `PINATA_GATEWAY_KEY`: both required to enable
    ///   the IPFS proxy
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when `PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT").map(|v| v.trim().to_owned()).filter(|v| !v.is_empty()) {
            None => DEFAULT_PORT,
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidPort { value })?,
        };

        let url = non_empty(lookup("PINATA_GATEWAY_URL"));
        let key = non_empty(lookup("PINATA_GATEWAY_KEY"));
        let gateway = match (url, key) {
            (Some(url), Some(key)) => Some(GatewayConfig { url: url.trim_end_matches('/').to_owned(), key }),
            (None, None) => None,
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!("PINATA_GATEWAY_URL and PINATA_GATEWAY_KEY must both be set; IPFS proxy disabled");
                None
            }
        };

        Ok(Self { port, gateway })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
