//! Blog configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Posts directory, relative to the base directory
    pub posts_dir: String,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            markdown: MarkdownConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file is a valid, all-default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub smart_punctuation: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert!(config.markdown.highlight.enable);
        assert!(!config.markdown.highlight.line_number);
        assert!(!config.markdown.smart_punctuation);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
posts_dir: content/blog
markdown:
  smart_punctuation: true
  highlight:
    enable: false
title: My Blog
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.posts_dir, "content/blog");
        assert!(config.markdown.smart_punctuation);
        assert!(!config.markdown.highlight.enable);
        assert_eq!(config.markdown.highlight.theme, "base16-ocean.dark");
        assert_eq!(
            config.extra.get("title").and_then(|v| v.as_str()),
            Some("My Blog")
        );
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "").unwrap();

        let config = BlogConfig::load(&path).unwrap();
        assert_eq!(config.posts_dir, "posts");
    }

    #[test]
    fn test_load_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "posts_dir: [unclosed").unwrap();

        let err = BlogConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
