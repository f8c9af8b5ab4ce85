//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! only carries the optional IPFS gateway client; the papers API and the
//! auth provider are called directly from the browser.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::config::ServerConfig;
use crate::services::ipfs::IpfsGateway;

/// Clone is required by Axum; the gateway wraps a pooled `reqwest::Client`.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub ipfs: Option<IpfsGateway>,
}

impl AppState {
    #[must_use]
    pub fn new(ipfs: Option<IpfsGateway>) -> Self {
        Self { ipfs }
    }

    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let ipfs = config
            .gateway
            .clone()
            .map(|gateway| IpfsGateway::new(reqwest::Client::new(), gateway));
        Self::new(ipfs)
    }
}
