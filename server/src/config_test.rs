use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_without_env() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.gateway, None);
}

#[test]
fn parses_port_and_gateway() {
    let cfg = config_from(&[
        ("PORT", "8080"),
        ("PINATA_GATEWAY_URL", "https://gateway.example/"),
        ("PINATA_GATEWAY_KEY", "secret"),
    ])
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(
        cfg.gateway,
        Some(GatewayConfig { url: "https://gateway.example".to_owned(), key: "secret".to_owned() })
    );
}

#[test]
fn partial_gateway_settings_disable_proxy() {
    let cfg = config_from(&[("PINATA_GATEWAY_URL", "https://gateway.example")]).unwrap();
    assert_eq!(cfg.gateway, None);
    let cfg = config_from(&[("PINATA_GATEWAY_KEY", "secret"), ("PINATA_GATEWAY_URL", "  ")]).unwrap();
    assert_eq!(cfg.gateway, None);
}

#[test]
fn invalid_port_errors() {
    let err = config_from(&[("PORT", "eighty")]).unwrap_err();
    assert_eq!(err.to_string(), "invalid PORT: eighty");
}

