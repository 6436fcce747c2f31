use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "dexkit")]
#[command(version = VERSION)]
#[command(about = "CLI for batch maintenance of creature resource data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the canonical creature name list
    Names(commands::names::NamesArgs),
    /// Match canonical names against the resource folder
    Match(commands::matching::MatchArgs),
    /// Rename resource identifiers across the whole project
    Rename(commands::rename::RenameArgs),
    /// Find the resource document declaring an icon
    Find(commands::find::FindArgs),
    /// Copy matched documents under their canonical names
    Export(commands::export::ExportArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if let Err(err) = output::print_json_result(json_result) {
        eprintln!("{}", err);
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
