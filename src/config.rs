use crate::errors::ConfigError;
use reqwest::header::HeaderValue;
use std::{env, time::Duration};

pub const DEFAULT_NOTION_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub notion: NotionConfig,
    pub properties: PropertyNames,
}

#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub notion_version: String,
    pub timeout: Duration,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_NOTION_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Database columns the record parser reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNames {
    pub status: String,
    pub due: String,
    pub complete: String,
    pub done_status: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            status: "Status".to_string(),
            due: "Due".to_string(),
            complete: "Complete".to_string(),
            done_status: "Done".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber { name: "PORT", value })?,
            None => 8080,
        };

        let defaults = NotionConfig::default();
        let timeout = match var("NOTION_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(value.parse::<u64>().map_err(|_| {
                ConfigError::InvalidNumber {
                    name: "NOTION_TIMEOUT_SECS",
                    value,
                }
            })?),
            None => defaults.timeout,
        };

        let notion = NotionConfig {
            api_key: var("NOTION_API_KEY"),
            base_url: var("NOTION_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            notion_version: var("NOTION_VERSION").unwrap_or(defaults.notion_version),
            timeout,
        };
        if HeaderValue::from_str(&notion.notion_version).is_err() {
            return Err(ConfigError::InvalidHeader {
                name: "NOTION_VERSION",
                value: notion.notion_version,
            });
        }

        let names = PropertyNames::default();
        let properties = PropertyNames {
            status: var("NOTION_STATUS_PROPERTY").unwrap_or(names.status),
            due: var("NOTION_DUE_PROPERTY").unwrap_or(names.due),
            complete: var("NOTION_COMPLETE_PROPERTY").unwrap_or(names.complete),
            done_status: var("NOTION_DONE_STATUS").unwrap_or(names.done_status),
        };

        Ok(Self {
            port,
            notion,
            properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.notion.api_key.is_none());
        assert_eq!(config.notion.base_url, DEFAULT_NOTION_URL);
        assert_eq!(config.properties, PropertyNames::default());
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("NOTION_API_KEY", "secret"),
            ("NOTION_API_URL", "http://127.0.0.1:9000/v1/"),
            ("NOTION_TIMEOUT_SECS", "5"),
            ("NOTION_DONE_STATUS", "Complete"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.notion.api_key.as_deref(), Some("secret"));
        assert_eq!(config.notion.base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(config.notion.timeout, Duration::from_secs(5));
        assert_eq!(config.properties.done_status, "Complete");
        assert_eq!(config.properties.due, "Due");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_lookup(lookup(&[("NOTION_API_KEY", "  ")])).unwrap();
        assert!(config.notion.api_key.is_none());
    }

    #[test]
    fn unusable_version_is_an_error() {
        let err = Config::from_lookup(lookup(&[("NOTION_VERSION", "2022-06-28\u{7f}")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeader { name: "NOTION_VERSION", .. }));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
