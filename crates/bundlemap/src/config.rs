/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Bundle manifest loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Artifact name used when neither a name nor an output file is given
const DEFAULT_ARTIFACT_NAME: &str = "bundle.js";

/// Everything needed to produce one bundle.
///
/// Read from an optional TOML manifest; command-line flags override it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BundleConfig {
    /// Output path, or `-` for stdout
    pub output: Option<String>,
    /// Artifact name declared in the source map
    pub name: Option<String>,
    /// Input files in bundle order, relative to `base_dir`
    pub files: Vec<String>,
    /// Text written before the first file
    pub header: Option<String>,
    /// Text written after the last file
    pub footer: Option<String>,
    pub source_map: bool,
    pub sources_content: bool,
    /// Directory the manifest was loaded from
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for BundleConfig {
    fn default() -> Self {
        BundleConfig {
            output: None,
            name: None,
            files: Vec::new(),
            header: None,
            footer: None,
            source_map: true,
            sources_content: false,
            base_dir: PathBuf::new(),
        }
    }
}

impl BundleConfig {
    /// Load a manifest; its files are resolved against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Where an input file is read from.
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.base_dir.join(file)
    }

    /// The name recorded as the map's `file`.
    ///
    /// An explicit name wins; otherwise the output's file name, unless the
    /// output is stdout.
    pub fn artifact_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.output
            .as_deref()
            .filter(|output| *output != "-")
            .and_then(|output| Path::new(output).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = BundleConfig::from_toml("").unwrap();
        assert_eq!(config, BundleConfig::default());
        assert!(config.source_map);
        assert!(!config.sources_content);
        assert_eq!(config.artifact_name(), "bundle.js");
    }

    #[test]
    fn test_full_manifest() {
        let config = BundleConfig::from_toml(
            r#"
output = "dist/app.js"
files = ["src/a.js", "src/b.js"]
header = "/* app */"
source-map = false
sources-content = true
"#,
        )
        .unwrap();

        assert_eq!(config.output.as_deref(), Some("dist/app.js"));
        assert_eq!(config.files, vec!["src/a.js", "src/b.js"]);
        assert_eq!(config.header.as_deref(), Some("/* app */"));
        assert!(!config.source_map);
        assert!(config.sources_content);
        assert_eq!(config.artifact_name(), "app.js");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(BundleConfig::from_toml("outptu = \"x.js\"").is_err());
    }

    #[test]
    fn test_artifact_name_precedence() {
        let mut config = BundleConfig {
            output: Some("-".to_string()),
            ..Default::default()
        };
        assert_eq!(config.artifact_name(), "bundle.js");

        config.output = Some("out/main.js".to_string());
        assert_eq!(config.artifact_name(), "main.js");

        config.name = Some("custom.js".to_string());
        assert_eq!(config.artifact_name(), "custom.js");
    }

    #[test]
    fn test_load_resolves_against_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("bundle.toml");
        std::fs::write(&manifest, "files = [\"a.js\"]\n").unwrap();

        let config = BundleConfig::load(&manifest).unwrap();
        assert_eq!(config.resolve("a.js"), dir.path().join("a.js"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = BundleConfig::load(Path::new("/nonexistent/bundle.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
