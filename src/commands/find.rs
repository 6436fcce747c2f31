use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use dexkit::index;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct FindArgs {
    /// Icon name to search for (any form, case-insensitive)
    icon: String,
    /// Folder of per-creature JSON documents
    #[arg(long, default_value = "creatures")]
    dir: PathBuf,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum FindOutput {
    #[serde(rename = "find")]
    Find {
        icon: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        file: Option<String>,
        found: bool,
    },
}

pub fn run(args: FindArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<FindOutput> {
    if args.icon.trim().is_empty() {
        return Err(dexkit::Error::validation_invalid_argument(
            "icon",
            "Icon name cannot be empty",
        ));
    }

    let file = index::find_by_icon(&args.dir, &args.icon)?;
    let found = file.is_some();
    let exit_code = if found { 0 } else { 1 };

    Ok((
        FindOutput::Find {
            icon: args.icon,
            file: file.map(|p| p.display().to_string()),
            found,
        },
        exit_code,
    ))
}
