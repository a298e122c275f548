//! `andor init`: project scaffolding.

use std::fs;
use std::path::Path;

use andor_grammar::rules;
use anyhow::{bail, Context, Result};

use crate::manifest::{AndorManifest, MANIFEST_NAME};

/// File name of the grammar written by `andor init`.
pub const GRAMMAR_FILE: &str = "grammar.toml";

/// Create a new project in `dir` (created if missing).
pub fn run(dir: &Path) -> Result<()> {
    create_project(dir)?;
    println!("Created andor project in {}", dir.display());
    println!("  {}", dir.join(MANIFEST_NAME).display());
    println!("  {}", dir.join(GRAMMAR_FILE).display());
    Ok(())
}

pub(crate) fn create_project(dir: &Path) -> Result<()> {
    let manifest_path = dir.join(MANIFEST_NAME);
    if manifest_path.exists() {
        bail!("{} already exists", manifest_path.display());
    }
    let grammar_path = dir.join(GRAMMAR_FILE);
    if grammar_path.exists() {
        bail!("{} already exists", grammar_path.display());
    }

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let sample = rules::sample();
    let start = sample.start.as_deref().unwrap_or("Sentence");
    fs::write(&manifest_path, AndorManifest::template(GRAMMAR_FILE, start))
        .with_context(|| format!("writing {MANIFEST_NAME}"))?;

    let grammar_text = sample.to_toml_string().context("rendering sample grammar")?;
    fs::write(&grammar_path, grammar_text).with_context(|| format!("writing {GRAMMAR_FILE}"))?;

    Ok(())
}
