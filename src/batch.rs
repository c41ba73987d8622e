//! Batch driver: clean the target, register classes, write pages and index.

use crate::anchor::{self, Collision};
use crate::model::Document;
use crate::parser;
use crate::registry::ClassRegistry;
use crate::render;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const INDEX_FILE: &str = "README.md";

/// Run the whole conversion for every file matching `pattern`.
///
/// Phase 1 registers every class before phase 2 renders anything, so class
/// references resolve across files regardless of processing order.
pub fn run(pattern: &str, target_dir: &Path) -> Result<()> {
    let sources = expand_glob(pattern)?;

    fs::create_dir_all(target_dir)
        .with_context(|| format!("failed to create output directory: {}", target_dir.display()))?;
    clean_target(target_dir)?;

    let mut classes = ClassRegistry::new();
    for source in &sources {
        if classes.register_source(source).is_none() {
            warn!("skipping {}: file name is not valid UTF-8", source.display());
        }
    }
    debug!("registered {} classes", classes.len());

    for source in &sources {
        let Some(file_name) = classes.get_source(source) else {
            continue;
        };
        let out_path = target_dir.join(file_name);
        let output = convert_file(source, &classes)?;
        fs::write(&out_path, output)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        info!("wrote {}", out_path.display());
    }

    let index_path = target_dir.join(INDEX_FILE);
    fs::write(&index_path, render::render_index(&classes))
        .with_context(|| format!("failed to write {}", index_path.display()))?;
    info!("wrote {} ({} classes)", index_path.display(), classes.len());

    Ok(())
}

/// Parse and render a single source file.
fn convert_file(source: &Path, classes: &ClassRegistry) -> Result<String> {
    let content = fs::read_to_string(source)
        .with_context(|| format!("failed to read {}", source.display()))?;
    let doc = parser::parse_document(&content)
        .with_context(|| format!("failed to parse {}", source.display()))?;
    report_anchor_collisions(&doc, source);
    Ok(render::render_class(&doc, classes))
}

/// Expand the source glob into a sorted list of files.
fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob::glob(pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to read a match of {}", pattern))?;
    files.retain(|p| p.is_file());
    if files.is_empty() {
        warn!("no files matched: {}", pattern);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Delete every generated `.md` file left in the target directory.
fn clean_target(target_dir: &Path) -> Result<()> {
    let escaped = glob::Pattern::escape(&target_dir.to_string_lossy());
    let pattern = format!("{}/*.md", escaped);
    let stale = glob::glob(&pattern).with_context(|| format!("invalid glob pattern: {}", pattern))?;
    for path in stale {
        let path = path.with_context(|| format!("failed to list {}", pattern))?;
        fs::remove_file(&path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
        debug!("removed {}", path.display());
    }
    Ok(())
}

/// Warn about headings in one page that would share an anchor.
fn report_anchor_collisions(doc: &Document, source: &Path) {
    for collision in anchor_collisions(doc) {
        warn!(
            "{}: anchor #{} is shared by {}",
            source.display(),
            collision.anchor,
            collision.displays.join(", ")
        );
    }
}

/// Anchors shared by member, method, constant and enum headings of one page.
fn anchor_collisions(doc: &Document) -> Vec<Collision> {
    let enum_headings: Vec<(String, String)> = doc
        .constant_groups()
        .iter()
        .filter(|g| g.is_enum())
        .map(|g| {
            let display = format!("enum {}", g.name);
            let anchor = anchor::name_to_anchor(&display);
            (display, anchor)
        })
        .collect();
    let constant_anchors: Vec<(&str, String)> = doc
        .constants
        .values()
        .map(|c| (c.name.as_str(), anchor::name_to_anchor(&c.name)))
        .collect();

    let entries = doc
        .members
        .values()
        .map(|m| (m.signature.as_str(), m.anchor.as_str()))
        .chain(doc.methods.values().map(|m| (m.signature.as_str(), m.anchor.as_str())))
        .chain(constant_anchors.iter().map(|(d, a)| (*d, a.as_str())))
        .chain(enum_headings.iter().map(|(d, a)| (d.as_str(), a.as_str())));

    anchor::find_collisions(entries)
}
