use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;

use dexkit::names;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct NamesArgs {
    #[command(subcommand)]
    command: NamesCommand,
}

#[derive(Subcommand)]
enum NamesCommand {
    /// Generate the canonical name list from a folder of sprite files
    Generate {
        /// Folder of .png sprites whose stems are the desired names
        #[arg(long)]
        sprites: PathBuf,
        /// List file to write
        #[arg(long, default_value = "creature_list.txt")]
        output: PathBuf,
    },
    /// Show the canonical name list as the tool parses it
    Show {
        /// List file to read
        #[arg(long, default_value = "creature_list.txt")]
        list: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum NamesOutput {
    #[serde(rename = "names.generate")]
    Generate {
        output: String,
        count: usize,
        names: Vec<String>,
    },
    #[serde(rename = "names.show")]
    Show {
        list: String,
        count: usize,
        names: Vec<String>,
    },
}

pub fn run(args: NamesArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<NamesOutput> {
    match args.command {
        NamesCommand::Generate { sprites, output } => run_generate(&sprites, &output),
        NamesCommand::Show { list } => run_show(&list),
    }
}

fn run_generate(sprites: &PathBuf, output: &PathBuf) -> CmdResult<NamesOutput> {
    if !sprites.is_dir() {
        return Err(dexkit::Error::validation_invalid_argument(
            "sprites",
            format!("'{}' is not a directory", sprites.display()),
        ));
    }

    let generated = names::generate(sprites, output)?;

    Ok((
        NamesOutput::Generate {
            output: output.display().to_string(),
            count: generated.len(),
            names: generated,
        },
        0,
    ))
}

fn run_show(list: &PathBuf) -> CmdResult<NamesOutput> {
    let loaded = names::load(list)?;

    Ok((
        NamesOutput::Show {
            list: list.display().to_string(),
            count: loaded.len(),
            names: loaded,
        },
        0,
    ))
}
