//! Canonical name list loading and generation.
//!
//! The list is the authority on what every creature should be called: one
//! identifier per line, compared case-insensitively everywhere else in the
//! tool. It can be generated from a folder of sprite files whose stems are
//! the desired names.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::io;

/// Load the canonical name list: one identifier per line, trimmed and
/// lowercased, input order preserved.
///
/// Blank lines are skipped: an empty name can never correspond to a
/// resource identifier. Duplicates are kept; the matcher treats them as
/// idempotent.
pub fn load(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::names_list_not_found(path.display().to_string()));
    }

    let content = io::read_file(path, &format!("read name list {}", path.display()))?;

    Ok(content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Build the canonical name list from a folder of sprite files.
///
/// Every `.png` stem in the folder becomes one line of the list. Stems are
/// sorted before writing so the generated list is stable across platforms.
/// Returns the names written.
pub fn generate(sprite_dir: &Path, output: &Path) -> Result<Vec<String>> {
    let mut stems = sprite_stems(sprite_dir)?;
    stems.sort();

    let mut content = stems.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    io::write_file_atomic(output, &content, "write name list")?;

    Ok(stems)
}

fn sprite_stems(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("list sprites in {}", dir.display())),
        )
    })?;

    let mut stems = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some("read directory entry".to_string()))
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.push(stem.to_string());
        }
    }

    Ok(stems)
}
