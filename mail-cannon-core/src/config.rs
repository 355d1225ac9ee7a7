use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use mail_cannon_types::{Config, ConfigError, PLACEHOLDER_API_KEY, SKU_COUNT, SkuList};
use serde::Deserialize;
use serde_json::Value;

/// Keys every config file must define, in reporting order.
pub const REQUIRED_KEYS: [&str; 4] = ["theseus_base_url", "api_key", "tags", "skus"];

#[derive(Deserialize)]
struct ConfigFile {
    theseus_base_url: String,
    api_key: String,
    tags: Vec<String>,
    skus: Vec<String>,
}

/// Read and validate the config file at `path`.
///
/// # Errors
/// Returns a [`ConfigError`] when the file is missing, unreadable, or fails
/// any of the checks in [`parse_config`].
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.display().to_string(),
        },
        _ => ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        },
    })?;
    parse_config(&text)
}

/// Validate config JSON text.
///
/// Checks run in order: all required keys present, value types, SKU count,
/// placeholder API key, base URL.
///
/// # Errors
/// Returns the first failing check as a [`ConfigError`].
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))?;
    let Some(obj) = value.as_object() else {
        return Err(ConfigError::Malformed("expected a JSON object".into()));
    };

    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|k| !obj.contains_key(**k))
        .map(|k| (*k).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingKeys(missing));
    }

    let file: ConfigFile =
        serde_json::from_value(value).map_err(|e| ConfigError::Malformed(e.to_string()))?;

    let found = file.skus.len();
    let skus: SkuList = file.skus.try_into().map_err(|_| ConfigError::SkuCount {
        expected: SKU_COUNT,
        found,
    })?;

    if file.api_key == PLACEHOLDER_API_KEY {
        return Err(ConfigError::PlaceholderApiKey);
    }

    check_base_url(&file.theseus_base_url)?;

    Ok(Config {
        base_url: file.theseus_base_url,
        api_key: file.api_key,
        tags: file.tags,
        skus,
    })
}

fn check_base_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_requires_http_scheme() {
        assert!(check_base_url("https://theseus.example.com").is_ok());
        assert!(check_base_url("http://localhost:8080/").is_ok());
        assert!(matches!(
            check_base_url("ftp://theseus.example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            check_base_url("theseus.example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
