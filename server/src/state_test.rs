use super::*;
use crate::config::GatewayConfig;

#[test]
fn from_config_without_gateway_has_no_ipfs_client() {
    let state = AppState::from_config(&ServerConfig { port: 3000, gateway: None });
    assert!(state.ipfs.is_none());
}

#[test]
fn from_config_builds_gateway_client() {
    let config = ServerConfig {
        port: 3000,
        gateway: Some(GatewayConfig { url: "https://gw.example/".to_owned(), key: "k".to_owned() }),
    };
    let state = AppState::from_config(&config);
    let gateway = state.ipfs.expect("gateway configured");
    assert_eq!(gateway.content_url("cid"), "https://gw.example/ipfs/cid");
}
