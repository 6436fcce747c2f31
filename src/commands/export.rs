use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use dexkit::{export, names};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct ExportArgs {
    /// Canonical name list (one identifier per line)
    #[arg(long, default_value = "creature_list.txt")]
    list: PathBuf,
    /// Folder of per-creature JSON documents
    #[arg(long, default_value = "creatures")]
    dir: PathBuf,
    /// Output folder for the exported documents
    #[arg(long, default_value = "export")]
    out: PathBuf,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ExportOutput {
    #[serde(rename = "export")]
    Export {
        copied: Vec<CopySummary>,
        missing: Vec<String>,
        total_copied: usize,
    },
}

#[derive(Serialize)]
pub struct CopySummary {
    pub name: String,
    pub from: String,
    pub to: String,
}

pub fn run(args: ExportArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ExportOutput> {
    let canonical = names::load(&args.list)?;

    let report = export::export(&canonical, &args.dir, &args.out)?;

    Ok((
        ExportOutput::Export {
            total_copied: report.copied.len(),
            copied: report
                .copied
                .iter()
                .map(|c| CopySummary {
                    name: c.name.clone(),
                    from: c.from.display().to_string(),
                    to: c.to.display().to_string(),
                })
                .collect(),
            missing: report.missing,
        },
        0,
    ))
}
