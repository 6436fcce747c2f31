//! Rename engine — reconcile on-disk resource identifiers with canonical names.
//!
//! Given correspondences (canonical name, file currently claiming it), this
//! engine:
//! 1. Derives rename pairs (file stem → canonical name)
//! 2. Expands each pair into its literal and capitalized substitution variants
//! 3. Walks the project tree generating content edits for text files
//! 4. Applies edits to disk, then renames the resource files themselves

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::log_status;
use crate::matcher::Correspondence;
use crate::utils::io;

/// File extensions eligible for the text substitution pass.
const TEXT_EXTENSIONS: &[&str] = &["json", "csv", "yml"];

/// Directories to skip at any depth (dependency/VCS directories).
const ALWAYS_SKIP_DIRS: &[&str] = &["node_modules", ".git", ".svn", ".hg"];

// ============================================================================
// Types
// ============================================================================

/// One identifier rename: the stem of the file currently claiming a name,
/// and the canonical name it should carry.
#[derive(Debug, Clone, Serialize)]
pub struct RenamePair {
    pub from: String,
    pub to: String,
}

/// A substitution term derived from a rename pair.
#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// An edit to apply to a file's content.
#[derive(Debug, Clone, Serialize)]
pub struct FileEdit {
    /// File path relative to the project root.
    pub file: String,
    /// Number of replacements in this file.
    pub replacements: usize,
    /// New content after all replacements.
    #[serde(skip)]
    pub new_content: String,
}

/// A resource file rename.
#[derive(Debug, Clone, Serialize)]
pub struct FileRename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// The full plan of a rename run.
#[derive(Debug, Clone, Serialize)]
pub struct RenamePlan {
    pub pairs: Vec<RenamePair>,
    pub variants: Vec<Variant>,
    pub edits: Vec<FileEdit>,
    pub file_renames: Vec<FileRename>,
    pub total_replacements: usize,
    /// Whether changes were written to disk.
    pub applied: bool,
}

// ============================================================================
// Pair derivation and variant expansion
// ============================================================================

/// Derive rename pairs from correspondences: the matched file's stem becomes
/// the term to replace, the canonical name the replacement.
///
/// Pairs whose stem already equals the canonical name are dropped; that is
/// what makes a second run over an already-renamed project a no-op.
pub fn derive_pairs(correspondences: &[Correspondence]) -> Vec<RenamePair> {
    let mut pairs = Vec::new();
    for c in correspondences {
        let Some(stem) = c.path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem == c.name {
            continue;
        }
        pairs.push(RenamePair {
            from: stem.to_string(),
            to: c.name.clone(),
        });
    }
    pairs
}

/// Expand pairs into substitution variants: the literal form and the
/// first-letter-capitalized form. Nothing else: an ALL-CAPS occurrence is
/// deliberately left alone.
///
/// Variants are sorted longest-`from`-first so a short stem can never
/// corrupt a longer one that contains it as a substring.
pub fn expand_variants(pairs: &[RenamePair]) -> Vec<Variant> {
    let mut variants = Vec::new();
    for pair in pairs {
        variants.push(Variant {
            from: pair.from.clone(),
            to: pair.to.clone(),
            label: "literal".to_string(),
        });

        // Stems with no capitalizable first character (e.g. "025") collapse
        // to the literal form and get no second variant.
        let cap_from = capitalize(&pair.from);
        if cap_from != pair.from {
            variants.push(Variant {
                from: cap_from,
                to: capitalize(&pair.to),
                label: "capitalized".to_string(),
            });
        }
    }

    variants.sort_by(|a, b| b.from.len().cmp(&a.from.len()));
    variants
}

/// Uppercase the first character, leave the remainder untouched.
/// This mirrors the identifier convention in the resource data; it is not
/// title-casing.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}

// ============================================================================
// File walking
// ============================================================================

fn walk_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_recursive(root, &mut files);
    files.sort();
    files
}

fn walk_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if ALWAYS_SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            walk_recursive(&path, files);
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if TEXT_EXTENSIONS.contains(&ext) {
                files.push(path);
            }
        }
    }
}

/// Find all occurrences of `term` in `text` using exact substring matching.
fn find_literal_matches(text: &str, term: &str) -> Vec<usize> {
    let mut matches = Vec::new();
    let term_len = term.len();

    if term_len == 0 || term_len > text.len() {
        return matches;
    }

    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        matches.push(start + pos);
        start += pos + 1;
    }

    matches
}

// ============================================================================
// Plan generation
// ============================================================================

/// Generate the full rename plan: content edits for every text file under
/// `root`, and file renames inside `resource_dir`.
///
/// An unreadable file matching the extension allowlist is a fatal diagnostic
/// naming the file, not a skip.
pub fn plan_renames(
    correspondences: &[Correspondence],
    root: &Path,
    resource_dir: &Path,
) -> Result<RenamePlan> {
    let pairs = derive_pairs(correspondences);
    let variants = expand_variants(&pairs);

    let mut edits = Vec::new();
    let mut total_replacements = 0;

    if !variants.is_empty() {
        for file_path in walk_files(root) {
            let content = std::fs::read_to_string(&file_path).map_err(|e| {
                Error::internal_io(
                    e.to_string(),
                    Some(format!("read {}", file_path.display())),
                )
            })?;

            // Collect all matches with their positions and replacements,
            // skipping ranges already claimed by a longer variant.
            let mut all_matches: Vec<(usize, usize, String)> = Vec::new();

            for variant in &variants {
                for pos in find_literal_matches(&content, &variant.from) {
                    let end = pos + variant.from.len();
                    if all_matches.iter().any(|&(s, e, _)| pos < e && end > s) {
                        continue;
                    }
                    all_matches.push((pos, end, variant.to.clone()));
                }
            }

            if all_matches.is_empty() {
                continue;
            }

            let count = all_matches.len();

            // Sort by position descending so we can replace from end to
            // start without invalidating earlier offsets
            all_matches.sort_by(|a, b| b.0.cmp(&a.0));

            let mut new_content = content;
            for (start, end, replacement) in &all_matches {
                new_content.replace_range(*start..*end, replacement);
            }

            let relative = file_path
                .strip_prefix(root)
                .unwrap_or(&file_path)
                .to_string_lossy()
                .to_string();

            total_replacements += count;
            edits.push(FileEdit {
                file: relative,
                replacements: count,
                new_content,
            });
        }
    }

    // Resource file renames: old stem → canonical name. A pair whose source
    // file does not exist is silently skipped.
    let mut file_renames = Vec::new();
    for pair in &pairs {
        let from = resource_dir.join(format!("{}.json", pair.from));
        if !from.exists() {
            continue;
        }
        file_renames.push(FileRename {
            from,
            to: resource_dir.join(format!("{}.json", pair.to)),
        });
    }

    Ok(RenamePlan {
        pairs,
        variants,
        edits,
        file_renames,
        total_replacements,
        applied: false,
    })
}

// ============================================================================
// Apply
// ============================================================================

/// Apply a plan to disk: all content edits first, then the file renames, so
/// renaming never interferes with the text pass. Not transactional: a
/// failure mid-apply leaves prior writes in place.
pub fn apply_plan(plan: &mut RenamePlan, root: &Path) -> Result<()> {
    for edit in &plan.edits {
        let path = root.join(&edit.file);
        io::write_file(&path, &edit.new_content, &format!("write {}", edit.file))?;
    }

    for rename in &plan.file_renames {
        // Re-checked at apply time: a source that vanished since planning is
        // skipped, same as one that never existed.
        if !rename.from.exists() {
            continue;
        }
        std::fs::rename(&rename.from, &rename.to).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!(
                    "rename {} -> {}",
                    rename.from.display(),
                    rename.to.display()
                )),
            )
        })?;
        log_status!(
            "rename",
            "Renamed {} -> {}",
            rename.from.display(),
            rename.to.display()
        );
    }

    plan.applied = true;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn correspondence(name: &str, path: &Path) -> Correspondence {
        Correspondence {
            name: name.to_string(),
            path: path.to_path_buf(),
        }
    }

    #[test]
    fn capitalize_works() {
        assert_eq!(capitalize("bulbasaur"), "Bulbasaur");
        assert_eq!(capitalize("025"), "025");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
    }

    #[test]
    fn derive_pairs_uses_stems_and_drops_already_canonical() {
        let pairs = derive_pairs(&[
            correspondence("pikachu", Path::new("creatures/025.json")),
            correspondence("bulbasaur", Path::new("creatures/bulbasaur.json")),
        ]);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].from, "025");
        assert_eq!(pairs[0].to, "pikachu");
    }

    #[test]
    fn expand_variants_literal_and_capitalized_only() {
        let pairs = vec![RenamePair {
            from: "bulbasaur".to_string(),
            to: "ivysaur".to_string(),
        }];
        let variants = expand_variants(&pairs);

        let froms: Vec<&str> = variants.iter().map(|v| v.from.as_str()).collect();
        assert_eq!(froms, vec!["bulbasaur", "Bulbasaur"]);
        let tos: Vec<&str> = variants.iter().map(|v| v.to.as_str()).collect();
        assert_eq!(tos, vec!["ivysaur", "Ivysaur"]);
    }

    #[test]
    fn expand_variants_skips_uncapitalizable_stems() {
        let pairs = vec![RenamePair {
            from: "025".to_string(),
            to: "pikachu".to_string(),
        }];
        let variants = expand_variants(&pairs);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].from, "025");
    }

    #[test]
    fn expand_variants_sorts_longest_first() {
        let pairs = vec![
            RenamePair {
                from: "mew".to_string(),
                to: "ditto".to_string(),
            },
            RenamePair {
                from: "mewtwo".to_string(),
                to: "deoxys".to_string(),
            },
        ];
        let variants = expand_variants(&pairs);
        assert_eq!(variants[0].from, "mewtwo");
        assert!(variants.iter().position(|v| v.from == "mewtwo").unwrap()
            < variants.iter().position(|v| v.from == "mew").unwrap());
    }

    #[test]
    fn find_literal_matches_exact() {
        assert_eq!(find_literal_matches("bulbasaur_front", "bulbasaur"), vec![0]);
        assert_eq!(
            find_literal_matches("a bulbasaur and a bulbasaur", "bulbasaur"),
            vec![2, 18]
        );
        assert!(find_literal_matches("ivysaur", "bulbasaur").is_empty());
        assert!(find_literal_matches("", "bulbasaur").is_empty());
    }

    #[test]
    fn substitution_replaces_exact_and_capitalized_but_not_upper() {
        let dir = tempdir().unwrap();
        let creatures = dir.path().join("creatures");
        fs::create_dir_all(&creatures).unwrap();

        fs::write(
            dir.path().join("sprites.csv"),
            "Bulbasaur_front.png,bulbasaur_back.png,BULBASAUR\n",
        )
        .unwrap();

        let plan = plan_renames(
            &[correspondence(
                "ivysaur",
                &creatures.join("bulbasaur.json"),
            )],
            dir.path(),
            &creatures,
        )
        .unwrap();

        assert_eq!(plan.edits.len(), 1);
        assert_eq!(
            plan.edits[0].new_content,
            "Ivysaur_front.png,ivysaur_back.png,BULBASAUR\n"
        );
    }

    #[test]
    fn all_occurrences_are_replaced() {
        let dir = tempdir().unwrap();
        let creatures = dir.path().join("creatures");
        fs::create_dir_all(&creatures).unwrap();

        fs::write(dir.path().join("refs.yml"), "a: 025\nb: 025\nc: 025\n").unwrap();

        let plan = plan_renames(
            &[correspondence("pikachu", &creatures.join("025.json"))],
            dir.path(),
            &creatures,
        )
        .unwrap();

        assert_eq!(plan.edits[0].replacements, 3);
        assert_eq!(
            plan.edits[0].new_content,
            "a: pikachu\nb: pikachu\nc: pikachu\n"
        );
    }

    #[test]
    fn longer_stem_wins_over_its_substring() {
        let dir = tempdir().unwrap();
        let creatures = dir.path().join("creatures");
        fs::create_dir_all(&creatures).unwrap();

        // "25" is a substring of "025"; longest-first ordering must keep the
        // short pair from corrupting the long one.
        fs::write(dir.path().join("refs.csv"), "025,25\n").unwrap();

        let plan = plan_renames(
            &[
                correspondence("raichu", &creatures.join("25.json")),
                correspondence("pikachu", &creatures.join("025.json")),
            ],
            dir.path(),
            &creatures,
        )
        .unwrap();

        assert_eq!(plan.edits[0].new_content, "pikachu,raichu\n");
    }

    #[test]
    fn only_allowlisted_extensions_are_scanned() {
        let dir = tempdir().unwrap();
        let creatures = dir.path().join("creatures");
        fs::create_dir_all(&creatures).unwrap();

        fs::write(dir.path().join("notes.md"), "bulbasaur\n").unwrap();
        fs::write(dir.path().join("data.csv"), "bulbasaur\n").unwrap();

        let plan = plan_renames(
            &[correspondence("ivysaur", &creatures.join("bulbasaur.json"))],
            dir.path(),
            &creatures,
        )
        .unwrap();

        assert_eq!(plan.edits.len(), 1);
        assert!(plan.edits[0].file.ends_with("data.csv"));
    }

    #[test]
    fn vcs_directories_are_skipped() {
        let dir = tempdir().unwrap();
        let creatures = dir.path().join("creatures");
        fs::create_dir_all(&creatures).unwrap();
        let git = dir.path().join(".git");
        fs::create_dir_all(&git).unwrap();
        fs::write(git.join("config.json"), "bulbasaur\n").unwrap();

        let plan = plan_renames(
            &[correspondence("ivysaur", &creatures.join("bulbasaur.json"))],
            dir.path(),
            &creatures,
        )
        .unwrap();

        assert!(plan.edits.is_empty());
    }

    #[test]
    fn apply_renames_resource_file_with_content_intact() {
        let dir = tempdir().unwrap();
        let creatures = dir.path().join("creatures");
        fs::create_dir_all(&creatures).unwrap();
        let doc = r#"{"forms":[{"resources":{"icon":"Pikachu"}}]}"#;
        fs::write(creatures.join("025.json"), doc).unwrap();

        let mut plan = plan_renames(
            &[correspondence("pikachu", &creatures.join("025.json"))],
            dir.path(),
            &creatures,
        )
        .unwrap();
        apply_plan(&mut plan, dir.path()).unwrap();

        assert!(plan.applied);
        assert!(!creatures.join("025.json").exists());
        let renamed = fs::read_to_string(creatures.join("pikachu.json")).unwrap();
        assert_eq!(renamed, doc);
    }

    #[test]
    fn missing_rename_source_is_silently_skipped() {
        let dir = tempdir().unwrap();
        let creatures = dir.path().join("creatures");
        fs::create_dir_all(&creatures).unwrap();

        // Correspondence points at a file that no longer exists on disk.
        let mut plan = plan_renames(
            &[correspondence("pikachu", &creatures.join("025.json"))],
            dir.path(),
            &creatures,
        )
        .unwrap();

        assert!(plan.file_renames.is_empty());
        apply_plan(&mut plan, dir.path()).unwrap();
        assert!(plan.applied);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let dir = tempdir().unwrap();
        let creatures = dir.path().join("creatures");
        fs::create_dir_all(&creatures).unwrap();
        fs::write(
            creatures.join("025.json"),
            r#"{"forms":[{"resources":{"icon":"Pikachu"}}]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("team.csv"), "lead,025\n").unwrap();

        let mut plan = plan_renames(
            &[correspondence("pikachu", &creatures.join("025.json"))],
            dir.path(),
            &creatures,
        )
        .unwrap();
        apply_plan(&mut plan, dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("team.csv")).unwrap(),
            "lead,pikachu\n"
        );

        // After the rename the file's stem equals the canonical name, so the
        // derived pair set is empty and nothing is planned.
        let again = plan_renames(
            &[correspondence("pikachu", &creatures.join("pikachu.json"))],
            dir.path(),
            &creatures,
        )
        .unwrap();
        assert!(again.pairs.is_empty());
        assert!(again.edits.is_empty());
        assert!(again.file_renames.is_empty());
    }

    #[test]
    fn plan_does_not_touch_disk() {
        let dir = tempdir().unwrap();
        let creatures = dir.path().join("creatures");
        fs::create_dir_all(&creatures).unwrap();
        fs::write(creatures.join("025.json"), "{}").unwrap();
        fs::write(dir.path().join("team.csv"), "lead,025\n").unwrap();

        let plan = plan_renames(
            &[correspondence("pikachu", &creatures.join("025.json"))],
            dir.path(),
            &creatures,
        )
        .unwrap();

        assert!(!plan.applied);
        assert!(!plan.edits.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("team.csv")).unwrap(),
            "lead,025\n"
        );
        assert!(creatures.join("025.json").exists());
    }
}
