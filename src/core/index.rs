//! Resource index construction.
//!
//! Scans a folder of per-creature JSON documents and maps each document's
//! self-declared identifier (the `icon` resource of its first form) to the
//! file claiming it. Identifiers are lowercased at ingestion; the on-disk
//! file name does not have to match the identifier for a document to be
//! indexed.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use serde_json_path::JsonPath;

use crate::error::{Error, Result};

/// Nested path of a document's self-declared identifier.
pub const ICON_PATH: &str = "$.forms[0].resources.icon";

/// Nested path of the identifiers declared by every form.
const ALL_FORMS_ICON_PATH: &str = "$.forms[*].resources.icon";

/// What to do when two documents claim the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with a diagnostic naming both files.
    Reject,
    /// Keep the first-scanned file, ignore later claimants.
    KeepFirst,
}

/// Mapping from normalized identifier to the file currently claiming it.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    entries: HashMap<String, PathBuf>,
}

impl ResourceIndex {
    /// Build the index from every `.json` document in `dir`.
    ///
    /// Files are scanned in name order so duplicate resolution is
    /// deterministic. Read-only: no document is modified.
    pub fn build(dir: &Path, policy: DuplicatePolicy) -> Result<Self> {
        let icon_query = parse_query(ICON_PATH)?;
        let mut entries: HashMap<String, PathBuf> = HashMap::new();

        for path in json_files(dir)? {
            let doc = parse_document(&path)?;
            let icon = icon_query
                .query(&doc)
                .exactly_one()
                .ok()
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    Error::resource_missing_field(path.display().to_string(), ICON_PATH)
                })?;
            let key = icon.to_lowercase();

            if let Some(first) = entries.get(&key) {
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(Error::resource_duplicate_icon(
                            key,
                            first.display().to_string(),
                            path.display().to_string(),
                        ));
                    }
                    DuplicatePolicy::KeepFirst => continue,
                }
            }

            entries.insert(key, path);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Find the first document in `dir` any of whose forms declares `icon`.
///
/// Unlike the index, which only reads a document's first form, this checks
/// every form. Comparison is case-insensitive.
pub fn find_by_icon(dir: &Path, icon: &str) -> Result<Option<PathBuf>> {
    let wanted = icon.to_lowercase();

    for path in json_files(dir)? {
        let doc = parse_document(&path)?;
        let found = form_icons(&doc)?
            .iter()
            .any(|declared| declared.to_lowercase() == wanted);
        if found {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

/// Every identifier declared across a document's forms, in form order.
/// Documents without the expected shape yield an empty list.
pub fn form_icons(doc: &Value) -> Result<Vec<String>> {
    let query = parse_query(ALL_FORMS_ICON_PATH)?;
    Ok(query
        .query(doc)
        .all()
        .into_iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}

/// Every `.json` file directly inside `dir`, sorted by name.
pub(crate) fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("list resources in {}", dir.display())),
        )
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some("read directory entry".to_string()))
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

pub(crate) fn parse_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| Error::resource_invalid_json(path.display().to_string(), e.to_string()))
}

fn parse_query(path: &str) -> Result<JsonPath> {
    JsonPath::parse(path)
        .map_err(|e| Error::internal_unexpected(format!("bad JSON path '{}': {}", path, e)))
}
