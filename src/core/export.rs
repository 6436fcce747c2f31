//! Export matched resource documents under their canonical names.
//!
//! Copies each document whose declared identifier appears in the canonical
//! list to `out/<name>.json` (one copy per name, first match wins) and
//! reports the names with no source document.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::index;
use crate::log_status;

#[derive(Debug, Clone, Serialize)]
pub struct ExportedFile {
    pub name: String,
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub copied: Vec<ExportedFile>,
    pub missing: Vec<String>,
}

/// Copy every document claiming a canonical name into `out_dir`, named after
/// the canonical name. Any form of a document may claim the name, and a
/// document is copied at most once. The output directory is created if
/// needed.
pub fn export(names: &[String], resource_dir: &Path, out_dir: &Path) -> Result<ExportReport> {
    fs::create_dir_all(out_dir).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("create {}", out_dir.display())),
        )
    })?;

    let wanted: BTreeSet<String> = names.iter().cloned().collect();
    let mut found: BTreeSet<String> = BTreeSet::new();
    let mut copied = Vec::new();

    for path in index::json_files(resource_dir)? {
        let doc = index::parse_document(&path)?;
        for icon in index::form_icons(&doc)? {
            let name = icon.to_lowercase();
            if !wanted.contains(&name) || found.contains(&name) {
                continue;
            }

            let dest = out_dir.join(format!("{}.json", name));
            fs::copy(&path, &dest).map_err(|e| {
                Error::internal_io(
                    e.to_string(),
                    Some(format!("copy {} -> {}", path.display(), dest.display())),
                )
            })?;
            log_status!("export", "Copied {} -> {}", path.display(), dest.display());

            found.insert(name.clone());
            copied.push(ExportedFile {
                name,
                from: path.clone(),
                to: dest,
            });
            break;
        }
    }

    let missing = wanted.difference(&found).cloned().collect();
    Ok(ExportReport { copied, missing })
}
