use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use dexkit::index::{DuplicatePolicy, ResourceIndex};
use dexkit::{matcher, names};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct MatchArgs {
    /// Canonical name list (one identifier per line)
    #[arg(long, default_value = "creature_list.txt")]
    list: PathBuf,
    /// Folder of per-creature JSON documents
    #[arg(long, default_value = "creatures")]
    dir: PathBuf,
    /// On duplicate identifiers, keep the first file instead of failing
    #[arg(long)]
    keep_first: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum MatchOutput {
    #[serde(rename = "match")]
    Match {
        total: usize,
        matched: usize,
        unmatched: usize,
        correspondences: Vec<CorrespondenceSummary>,
        residual: Vec<String>,
    },
}

#[derive(Serialize)]
pub struct CorrespondenceSummary {
    pub name: String,
    pub file: String,
}

pub fn run(args: MatchArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<MatchOutput> {
    let canonical = names::load(&args.list)?;

    let policy = if args.keep_first {
        DuplicatePolicy::KeepFirst
    } else {
        DuplicatePolicy::Reject
    };
    let index = ResourceIndex::build(&args.dir, policy)?;

    let report = matcher::match_names(&canonical, &index);

    Ok((
        MatchOutput::Match {
            total: canonical.len(),
            matched: report.matched_count(),
            unmatched: report.unmatched_count(),
            correspondences: report
                .correspondences
                .iter()
                .map(|c| CorrespondenceSummary {
                    name: c.name.clone(),
                    file: c.path.display().to_string(),
                })
                .collect(),
            residual: report.residual,
        },
        0,
    ))
}
