/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! bundlemap CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bundle;
mod config;

use config::BundleConfig;

#[derive(Parser, Debug)]
#[command(name = "bundlemap")]
#[command(version)]
#[command(about = "Concatenate files into one bundle with an inline source map", long_about = None)]
struct Cli {
    /// Files to concatenate, in order (replaces the config's file list)
    files: Vec<String>,

    /// Write output to FILE (use '--output -' for stdout)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Artifact name recorded in the source map (defaults to the output file name)
    #[arg(long)]
    name: Option<String>,

    /// Do not append a source map
    #[arg(long)]
    no_source_map: bool,

    /// Embed each file's text in the source map
    #[arg(long)]
    sources_content: bool,

    /// Text written before the first file
    #[arg(long)]
    header: Option<String>,

    /// Text written after the last file
    #[arg(long)]
    footer: Option<String>,

    /// Bundle manifest (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Merge flags over the manifest, if one was given.
    fn into_config(self) -> Result<BundleConfig> {
        let mut config = match &self.config {
            Some(path) => BundleConfig::load(path)?,
            None => BundleConfig::default(),
        };

        if !self.files.is_empty() {
            config.files = self.files;
            config.base_dir = PathBuf::new();
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if self.name.is_some() {
            config.name = self.name;
        }
        if self.header.is_some() {
            config.header = self.header;
        }
        if self.footer.is_some() {
            config.footer = self.footer;
        }
        if self.no_source_map {
            config.source_map = false;
        }
        if self.sources_content {
            config.sources_content = true;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout may carry the bundle
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bundlemap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.into_config()?;

    let output = bundle::build(&config)?;
    bundle::write_output(config.output.as_deref(), &output)?;

    info!(
        files = config.files.len(),
        name = %config.artifact_name(),
        source_map = config.source_map,
        "Bundle written"
    );
    Ok(())
}
