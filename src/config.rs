use serde::Deserialize;
use std::{env, path::PathBuf};

use crate::client::ApiConfig;

/// Default Sapling rephrase endpoint, overridable via `QUILL_API_URL` or
/// the config file for deployments that proxy the call.
pub const DEFAULT_ENDPOINT: &str = "https://api.sapling.ai/api/v1/rephrase";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "SAPLING_API_KEY";

const API_URL_ENV: &str = "QUILL_API_URL";

#[derive(Debug, Default, Deserialize)]
pub struct QuillConfig {
    pub api: Option<ApiSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiSection {
    pub key: Option<String>,
    pub endpoint: Option<String>,
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut i = 0;

    while i < value.len() {
        if value[i..].starts_with("${") {
            let start = i + 2;
            if let Some(end_rel) = value[start..].find('}') {
                let end = start + end_rel;
                let var = &value[start..end];
                if !var.is_empty() {
                    let replacement = env::var(var).unwrap_or_default();
                    out.push_str(&replacement);
                }
                i = end + 1;
                continue;
            }
        }

        let ch = value[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

impl QuillConfig {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return None;
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                None
            }
        }
    }

    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve the request configuration.
    ///
    /// The environment wins over the config file for both fields; the key
    /// is required, the endpoint falls back to [`DEFAULT_ENDPOINT`].
    pub fn resolve_api(&self) -> Option<ApiConfig> {
        let file_key = self
            .api
            .as_ref()
            .and_then(|api| api.key.as_deref())
            .map(expand_env_vars)
            .filter(|key| !key.trim().is_empty());

        let key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or(file_key)?;

        let file_endpoint = self
            .api
            .as_ref()
            .and_then(|api| api.endpoint.as_deref())
            .map(expand_env_vars)
            .filter(|url| !url.trim().is_empty());

        let endpoint = env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or(file_endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Some(ApiConfig::new(key, endpoint))
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quill").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_env_vars_leaves_plain_text_alone() {
        assert_eq!(expand_env_vars("no vars here"), "no vars here");
        assert_eq!(expand_env_vars("${"), "${");
        assert_eq!(expand_env_vars("${}"), "");
    }

    #[test]
    fn config_parses_api_section() {
        let config: QuillConfig = toml::from_str(
            r#"
            [api]
            key = "abc"
            endpoint = "http://localhost:9999/rephrase"
            "#,
        )
        .unwrap();

        let api = config.api.expect("api section");
        assert_eq!(api.key.as_deref(), Some("abc"));
        assert_eq!(
            api.endpoint.as_deref(),
            Some("http://localhost:9999/rephrase")
        );
    }
}
