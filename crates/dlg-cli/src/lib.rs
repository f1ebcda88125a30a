use std::ffi::OsString;

use clap::Parser;
use dlg_core::DialogueError;

mod check;
mod cli_args;
mod error_map;
mod line_mode;
mod source_loader;
mod tui;

pub(crate) use cli_args::{CheckArgs, Cli, Mode, PlayArgs, TuiArgs};
pub(crate) use error_map::map_io;
pub(crate) use source_loader::collect_script_paths;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return error.exit_code(),
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    }
}

fn run(cli: Cli) -> Result<i32, DialogueError> {
    match cli.command {
        Mode::Play(args) => line_mode::run_play(args),
        Mode::Tui(args) => tui::run_tui(args),
        Mode::Check(args) => check::run_check(args),
    }
}

#[cfg(test)]
mod tests;
