pub type CmdResult<T> = dexkit::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod export;
pub mod find;
pub mod matching;
pub mod names;
pub mod rename;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (dexkit::Result<serde_json::Value>, i32) {
    crate::tty::status("dexkit is working...");

    match command {
        crate::Commands::Names(args) => dispatch!(args, global, names),
        crate::Commands::Match(args) => dispatch!(args, global, matching),
        crate::Commands::Rename(args) => dispatch!(args, global, rename),
        crate::Commands::Find(args) => dispatch!(args, global, find),
        crate::Commands::Export(args) => dispatch!(args, global, export),
    }
}
