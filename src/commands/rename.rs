use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use dexkit::index::{DuplicatePolicy, ResourceIndex};
use dexkit::{matcher, names, rename};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct RenameArgs {
    /// Canonical name list (one identifier per line)
    #[arg(long, default_value = "creature_list.txt")]
    list: PathBuf,
    /// Folder of per-creature JSON documents
    #[arg(long, default_value = "creatures")]
    dir: PathBuf,
    /// Project root for the text substitution pass
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// On duplicate identifiers, keep the first file instead of failing
    #[arg(long)]
    keep_first: bool,
    /// Apply changes to disk (default is dry-run)
    #[arg(long)]
    write: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RenameOutput {
    #[serde(rename = "rename")]
    Rename {
        dry_run: bool,
        matched: usize,
        unmatched: usize,
        pairs: Vec<PairSummary>,
        edits: Vec<EditSummary>,
        file_renames: Vec<RenameSummary>,
        total_replacements: usize,
        residual: Vec<String>,
        applied: bool,
    },
}

#[derive(Serialize)]
pub struct PairSummary {
    pub from: String,
    pub to: String,
}

#[derive(Serialize)]
pub struct EditSummary {
    pub file: String,
    pub replacements: usize,
}

#[derive(Serialize)]
pub struct RenameSummary {
    pub from: String,
    pub to: String,
}

pub fn run(args: RenameArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RenameOutput> {
    let canonical = names::load(&args.list)?;

    let policy = if args.keep_first {
        DuplicatePolicy::KeepFirst
    } else {
        DuplicatePolicy::Reject
    };
    let index = ResourceIndex::build(&args.dir, policy)?;

    let report = matcher::match_names(&canonical, &index);

    let mut plan = rename::plan_renames(&report.correspondences, &args.root, &args.dir)?;

    if args.write {
        rename::apply_plan(&mut plan, &args.root)?;
    }

    Ok((
        RenameOutput::Rename {
            dry_run: !args.write,
            matched: report.matched_count(),
            unmatched: report.unmatched_count(),
            pairs: plan
                .pairs
                .iter()
                .map(|p| PairSummary {
                    from: p.from.clone(),
                    to: p.to.clone(),
                })
                .collect(),
            edits: plan
                .edits
                .iter()
                .map(|e| EditSummary {
                    file: e.file.clone(),
                    replacements: e.replacements,
                })
                .collect(),
            file_renames: plan
                .file_renames
                .iter()
                .map(|r| RenameSummary {
                    from: r.from.display().to_string(),
                    to: r.to.display().to_string(),
                })
                .collect(),
            total_replacements: plan.total_replacements,
            residual: report.residual,
            applied: plan.applied,
        },
        0,
    ))
}
