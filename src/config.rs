use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DiscussError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];
const ENDPOINT_VAR: &str = "GH_DISCUSS_ENDPOINT";

#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// A missing file yields the empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| DiscussError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| DiscussError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "gh-discuss")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(DiscussError::NoConfigDir)
    }

    /// Get token with env vars taking precedence over config file
    pub fn token(&self) -> Result<String> {
        self.token_with(|key| std::env::var(key).ok())
    }

    fn token_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<String> {
        TOKEN_VARS
            .iter()
            .find_map(|key| env(key).filter(|v| !v.is_empty()))
            .or_else(|| self.token.clone())
            .ok_or(DiscussError::MissingToken)
    }

    /// GraphQL endpoint, validated as an http(s) URL.
    pub fn endpoint(&self) -> Result<Url> {
        self.endpoint_with(|key| std::env::var(key).ok())
    }

    fn endpoint_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<Url> {
        let raw = env(ENDPOINT_VAR)
            .filter(|v| !v.is_empty())
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        parse_endpoint(&raw)
    }

    /// Get owner, preferring explicit argument over default
    pub fn resolve_owner(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .filter(|o| !o.is_empty())
            .map(String::from)
            .or_else(|| self.default_owner.clone())
            .ok_or(DiscussError::NoOwner)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self).map_err(DiscussError::ConfigEncode)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| DiscussError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DiscussError::InvalidUrl(format!(
            "{raw}: unsupported scheme {other}"
        ))),
    }
}
