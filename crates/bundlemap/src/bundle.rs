/*
 * bundle.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Drive the writer over the configured files.

use std::io::Write;

use anyhow::{Context, Result, bail};
use bundlemap_writer::BundleWriter;
use tracing::debug;

use crate::config::BundleConfig;

/// Read every configured file and render the bundle text.
pub fn build(config: &BundleConfig) -> Result<String> {
    if config.files.is_empty() {
        bail!("No input files given");
    }

    let mut writer = BundleWriter::new(config.artifact_name(), config.source_map)
        .with_sources_content(config.sources_content);

    if let Some(header) = &config.header {
        writer.write_content(header);
    }

    for file in &config.files {
        let path = config.resolve(file);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!(file = %file, bytes = content.len(), "Adding file");
        writer.write_file_content(file, &content);
    }

    if let Some(footer) = &config.footer {
        writer.write_content(footer);
    }

    Ok(writer.render()?)
}

/// Write the bundle to `output`, or to stdout for `None` and `-`.
pub fn write_output(output: Option<&str>, text: &str) -> Result<()> {
    match output {
        None | Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write bundle to stdout")?;
            stdout.flush()?;
        }
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {}", path))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlemap_writer::SOURCE_MAPPING_URL_PREFIX;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn config_in(dir: &Path, files: &[(&str, &str)]) -> BundleConfig {
        for (name, content) in files {
            std::fs::write(dir.join(name), content).unwrap();
        }
        BundleConfig {
            files: files.iter().map(|(name, _)| name.to_string()).collect(),
            base_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_without_source_map() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), &[("a.js", "var a;\n"), ("b.js", "var b;")]);
        config.source_map = false;
        config.header = Some("/* bundle */".to_string());
        config.footer = Some("/* end */".to_string());

        let output = build(&config).unwrap();
        assert_eq!(output, "/* bundle */\nvar a;\n\nvar b;\n/* end */\n");
    }

    #[test]
    fn test_build_with_source_map() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), &[("a.js", "var a;"), ("b.js", "var b;")]);

        let output = build(&config).unwrap();
        let (text, comment) = output.rsplit_once('\n').unwrap();
        assert_eq!(text, "var a;\nvar b;");
        assert!(comment.starts_with(SOURCE_MAPPING_URL_PREFIX));
    }

    #[test]
    fn test_build_requires_files() {
        let err = build(&BundleConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "No input files given");
    }

    #[test]
    fn test_build_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = BundleConfig {
            files: vec!["missing.js".to_string()],
            base_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let err = build(&config).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.js");
        write_output(path.to_str(), "content").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }
}
