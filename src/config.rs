//! TOML configuration.
//!
//! Every section is optional. A missing file is not an error at this layer;
//! the CLI falls back to [`Config::minimal`] when no `--config` is given.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [matcher]
//! threshold = 0.4
//! question_weight = 1.0
//! category_weight = 1.0
//!
//! [knowledge]
//! path = "data/knowledge_base.toml"
//! ```

use anyhow::{Context, Result};
use intern_faq_core::matcher::{MatchOptions, DEFAULT_FALLBACK, DEFAULT_THRESHOLD};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatcherConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_weight")]
    pub question_weight: f64,
    #[serde(default = "default_weight")]
    pub category_weight: f64,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            question_weight: default_weight(),
            category_weight: default_weight(),
            fallback: default_fallback(),
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
fn default_weight() -> f64 {
    1.0
}
fn default_fallback() -> String {
    DEFAULT_FALLBACK.to_string()
}

impl MatcherConfig {
    pub fn options(&self) -> MatchOptions {
        MatchOptions {
            threshold: self.threshold,
            question_weight: self.question_weight,
            category_weight: self.category_weight,
            fallback: self.fallback.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct KnowledgeConfig {
    /// Knowledge base file. The built-in knowledge base is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// All-defaults configuration.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config = parse_config(&content)?;

    // Relative knowledge paths resolve against the config file's directory.
    if let Some(kb) = &config.knowledge.path {
        if kb.is_relative() {
            if let Some(dir) = path.parent() {
                config.knowledge.path = Some(dir.join(kb));
            }
        }
    }

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    let m = &config.matcher;
    if !(0.0..=1.0).contains(&m.threshold) {
        anyhow::bail!("matcher.threshold must be in [0.0, 1.0]");
    }
    for (name, weight) in [
        ("question_weight", m.question_weight),
        ("category_weight", m.category_weight),
    ] {
        if !weight.is_finite() || weight <= 0.0 {
            anyhow::bail!("matcher.{} must be a positive number", name);
        }
    }
    if m.fallback.trim().is_empty() {
        anyhow::bail!("matcher.fallback must not be empty");
    }

    Ok(())
}
