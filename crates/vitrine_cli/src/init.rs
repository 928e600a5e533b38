//! Sample project scaffolding

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;
use vitrine_page::PageConfig;

/// Sample portfolio page
pub const SAMPLE_PAGE: &str = include_str!("../../../demos/portfolio.toml");
/// Scripted visit of the sample page
pub const SAMPLE_SESSION: &str = include_str!("../../../demos/session.toml");

pub const PAGE_FILE: &str = "page.toml";
pub const SESSION_FILE: &str = "session.toml";
pub const CONFIG_FILE: &str = "vitrine.toml";

/// Write a sample page, session and settings file into `path`.
///
/// Existing files are only replaced when `force` is set; nothing is written
/// if any of them is in the way.
pub fn create_project(path: &Path, force: bool) -> Result<()> {
    if !force {
        let existing: Vec<_> = [PAGE_FILE, SESSION_FILE, CONFIG_FILE]
            .into_iter()
            .filter(|file| path.join(file).exists())
            .collect();
        if !existing.is_empty() {
            bail!(
                "{} already contains {} (use --force to overwrite)",
                path.display(),
                existing.join(", ")
            );
        }
    }

    fs::create_dir_all(path)?;
    fs::write(path.join(PAGE_FILE), SAMPLE_PAGE)?;
    fs::write(path.join(SESSION_FILE), SAMPLE_SESSION)?;
    fs::write(path.join(CONFIG_FILE), PageConfig::default().to_toml()?)?;

    tracing::info!(path = %path.display(), "created sample project");
    Ok(())
}
