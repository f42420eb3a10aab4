//! Knowledge base loading.
//!
//! The knowledge base ships with the binary (`data/knowledge_base.toml`,
//! embedded at build time) and can be replaced at deploy time through
//! `[knowledge].path`. Either way it is read once, during startup, and turned
//! into an immutable [`FaqIndex`] that the caller shares by `Arc`.

use anyhow::{bail, Context, Result};
use intern_faq_core::matcher::FaqIndex;
use intern_faq_core::models::FaqEntry;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;

const BUILTIN_KNOWLEDGE_BASE: &str = include_str!("../data/knowledge_base.toml");

/// On-disk shape of a knowledge base file.
#[derive(Debug, Deserialize)]
pub struct KnowledgeFile {
    /// Revision of the knowledge base content, informational only.
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub entries: Vec<FaqEntry>,
}

pub fn parse_knowledge_base(content: &str) -> Result<KnowledgeFile> {
    let file: KnowledgeFile =
        toml::from_str(content).with_context(|| "Failed to parse knowledge base")?;

    for (i, entry) in file.entries.iter().enumerate() {
        for (field, value) in [
            ("question", &entry.question),
            ("category", &entry.category),
            ("answer", &entry.answer),
        ] {
            if value.trim().is_empty() {
                bail!("knowledge base entry {} has an empty {}", i + 1, field);
            }
        }
    }

    Ok(file)
}

/// The knowledge base compiled into the binary.
pub fn builtin_entries() -> Result<Vec<FaqEntry>> {
    Ok(parse_knowledge_base(BUILTIN_KNOWLEDGE_BASE)?.entries)
}

pub fn load_knowledge_file(path: &Path) -> Result<KnowledgeFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read knowledge base: {}", path.display()))?;
    parse_knowledge_base(&content).with_context(|| format!("Invalid knowledge base: {}", path.display()))
}

/// Load the configured knowledge base entries, in file order.
pub fn load_entries(config: &Config) -> Result<Vec<FaqEntry>> {
    let (file, origin) = match &config.knowledge.path {
        Some(path) => (load_knowledge_file(path)?, path.display().to_string()),
        None => (
            parse_knowledge_base(BUILTIN_KNOWLEDGE_BASE)?,
            "built-in".to_string(),
        ),
    };

    info!(
        origin = %origin,
        version = ?file.version,
        entries = file.entries.len(),
        "Loaded knowledge base"
    );
    Ok(file.entries)
}

/// Load the knowledge base and build the matcher index. Call once at startup.
pub fn build_index(config: &Config) -> Result<FaqIndex> {
    let entries = load_entries(config)?;
    let options = config.matcher.options();
    debug!(
        threshold = options.threshold,
        question_weight = options.question_weight,
        category_weight = options.category_weight,
        "Building FAQ index"
    );
    Ok(FaqIndex::build(entries, options))
}
