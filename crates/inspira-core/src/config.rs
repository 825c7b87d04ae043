//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `INSPIRA_*` env
//! vars (`__` separates nested keys, e.g. `INSPIRA_RECOMMEND__MAX_LIMIT`).
//! Typed settings fall back to their defaults for any missing key.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct Config {
    figment: Figment,
    base: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    /// Load `config.toml` and the per-environment overlay from `base`.
    /// Missing files are skipped.
    pub fn load_from(base: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("INSPIRA_").split("__"));

        let config = Self { figment, base: base.to_path_buf() };
        config.settings()?.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))
    }

    /// `data.catalog_path`, expanded and resolved against the config base.
    pub fn catalog_path(&self) -> anyhow::Result<PathBuf> {
        Ok(resolve_with_base(&self.base, self.settings()?.data.catalog_path))
    }
}

/// Which stop-word list the text analyzer removes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    #[default]
    English,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineSettings {
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub stop_words: StopWords,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { ngram_min: 1, ngram_max: 2, stop_words: StopWords::English }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecommendSettings {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self { default_limit: 10, max_limit: 50 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DataSettings {
    pub catalog_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { catalog_path: "test_data/catalog.json".to_string() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineSettings,
    pub recommend: RecommendSettings,
    pub data: DataSettings,
}

impl Settings {
    pub fn validate(&self) -> crate::error::Result<()> {
        let engine = &self.engine;
        if engine.ngram_min == 0 || engine.ngram_min > engine.ngram_max {
            return Err(Error::InvalidConfig(format!(
                "engine n-gram range must satisfy 1 <= min <= max, got {}..={}",
                engine.ngram_min, engine.ngram_max
            )));
        }
        let recommend = &self.recommend;
        if recommend.default_limit == 0 || recommend.default_limit > recommend.max_limit {
            return Err(Error::InvalidConfig(format!(
                "recommend limits must satisfy 1 <= default_limit <= max_limit, got {} and {}",
                recommend.default_limit, recommend.max_limit
            )));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
