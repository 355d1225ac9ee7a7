use std::fs;

use mail_cannon_core::{ConfigError, SKU_COUNT, load_config, parse_config};
use serde_json::json;

fn config_json(sku_count: usize) -> serde_json::Value {
    json!({
        "theseus_base_url": "https://theseus.example.com/",
        "api_key": "sk_live_123",
        "tags": ["spring-drop"],
        "skus": (1..=sku_count).map(|i| format!("SKU-{i}")).collect::<Vec<_>>(),
    })
}

#[test]
fn loads_valid_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, config_json(SKU_COUNT).to_string()).unwrap();

    let cfg = load_config(&path).expect("valid config");
    assert_eq!(cfg.base_url, "https://theseus.example.com/");
    assert_eq!(cfg.api_key, "sk_live_123");
    assert_eq!(cfg.tags, vec!["spring-drop".to_string()]);
    assert_eq!(cfg.skus[0], "SKU-1");
    assert_eq!(cfg.sku_names().len(), 12);
}

#[test]
fn eleven_skus_is_rejected() {
    let err = parse_config(&config_json(11).to_string()).unwrap_err();
    assert_eq!(
        err,
        ConfigError::SkuCount {
            expected: 12,
            found: 11
        }
    );
}

#[test]
fn lists_every_missing_key() {
    let err = parse_config(r#"{"api_key": "k", "extra": 1}"#).unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingKeys(vec![
            "theseus_base_url".into(),
            "tags".into(),
            "skus".into()
        ])
    );
    assert_eq!(
        err.to_string(),
        "config missing keys: theseus_base_url, tags, skus"
    );
}

#[test]
fn placeholder_key_is_rejected() {
    let mut v = config_json(12);
    v["api_key"] = json!("YOUR_API_KEY_HERE");
    assert_eq!(
        parse_config(&v.to_string()).unwrap_err(),
        ConfigError::PlaceholderApiKey
    );
}

#[test]
fn wrong_shapes_are_malformed() {
    let mut v = config_json(12);
    v["tags"] = json!("not-a-list");
    assert!(matches!(
        parse_config(&v.to_string()),
        Err(ConfigError::Malformed(_))
    ));
    assert!(matches!(parse_config("[1, 2]"), Err(ConfigError::Malformed(_))));
    assert!(matches!(parse_config("{"), Err(ConfigError::Malformed(_))));
}

#[test]
fn bad_base_url_is_rejected() {
    let mut v = config_json(12);
    v["theseus_base_url"] = json!("not a url");
    assert!(matches!(
        parse_config(&v.to_string()),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}
