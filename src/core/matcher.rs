//! Correspondence matching between the canonical list and the resource index.

use std::path::PathBuf;

use serde::Serialize;

use crate::index::ResourceIndex;

/// A confirmed link between a canonical name and the file claiming it.
#[derive(Debug, Clone, Serialize)]
pub struct Correspondence {
    pub name: String,
    pub path: PathBuf,
}

/// Outcome of a matching pass: correspondences in canonical-list order and
/// the residual names that matched nothing.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub correspondences: Vec<Correspondence>,
    pub residual: Vec<String>,
}

impl MatchReport {
    pub fn matched_count(&self) -> usize {
        self.correspondences.len()
    }

    pub fn unmatched_count(&self) -> usize {
        self.residual.len()
    }
}

/// Match canonical names against the index.
///
/// Each name present in the index appends one correspondence and removes one
/// occurrence of itself from the residual list; absent names stay residual.
/// Order follows the canonical list, not the index. Both sides were
/// lowercased at ingestion, so membership is case-insensitive by
/// construction.
pub fn match_names(names: &[String], index: &ResourceIndex) -> MatchReport {
    let mut correspondences = Vec::new();
    let mut residual: Vec<String> = names.to_vec();

    for name in names {
        let Some(path) = index.get(name) else {
            continue;
        };
        correspondences.push(Correspondence {
            name: name.clone(),
            path: path.to_path_buf(),
        });
        if let Some(pos) = residual.iter().position(|n| n == name) {
            residual.remove(pos);
        }
    }

    MatchReport {
        correspondences,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DuplicatePolicy;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn index_of(dir: &Path, creatures: &[(&str, &str)]) -> ResourceIndex {
        for (file, icon) in creatures {
            let doc = serde_json::json!({ "forms": [{ "resources": { "icon": icon } }] });
            fs::write(dir.join(file), serde_json::to_string(&doc).unwrap()).unwrap();
        }
        ResourceIndex::build(dir, DuplicatePolicy::Reject).unwrap()
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matched_names_leave_the_residual_set() {
        let dir = tempdir().unwrap();
        let index = index_of(dir.path(), &[("025.json", "Pikachu")]);

        let report = match_names(&names(&["pikachu", "bulbasaur"]), &index);

        assert_eq!(report.matched_count(), 1);
        assert_eq!(report.correspondences[0].name, "pikachu");
        assert!(report.correspondences[0].path.ends_with("025.json"));
        assert_eq!(report.residual, vec!["bulbasaur"]);
    }

    #[test]
    fn order_follows_the_canonical_list() {
        let dir = tempdir().unwrap();
        let index = index_of(
            dir.path(),
            &[("001.json", "Bulbasaur"), ("025.json", "Pikachu")],
        );

        let report = match_names(&names(&["pikachu", "bulbasaur"]), &index);
        let matched: Vec<&str> = report
            .correspondences
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(matched, vec!["pikachu", "bulbasaur"]);
    }

    #[test]
    fn counts_always_add_up_to_input_length() {
        let dir = tempdir().unwrap();
        let index = index_of(dir.path(), &[("025.json", "Pikachu")]);

        for list in [
            names(&["pikachu"]),
            names(&["bulbasaur"]),
            names(&["pikachu", "bulbasaur", "mew"]),
            names(&[]),
        ] {
            let report = match_names(&list, &index);
            assert_eq!(
                report.matched_count() + report.unmatched_count(),
                list.len()
            );
        }
    }

    #[test]
    fn duplicate_canonical_names_each_match_once() {
        let dir = tempdir().unwrap();
        let index = index_of(dir.path(), &[("025.json", "Pikachu")]);

        let report = match_names(&names(&["pikachu", "pikachu"]), &index);
        assert_eq!(report.matched_count(), 2);
        assert!(report.residual.is_empty());
        assert_eq!(report.matched_count() + report.unmatched_count(), 2);

        let report = match_names(&names(&["mew", "mew"]), &index);
        assert_eq!(report.matched_count(), 0);
        assert_eq!(report.residual, vec!["mew", "mew"]);
    }
}
