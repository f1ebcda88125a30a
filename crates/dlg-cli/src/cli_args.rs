use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dialogue-player")]
#[command(about = "Branching-dialogue RPG player CLI")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Play in plain line mode.
    Play(PlayArgs),
    /// Play in the full-screen terminal UI.
    Tui(TuiArgs),
    /// Load scripts and report unresolvable choice targets.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub(crate) struct PlayArgs {
    #[arg(long = "scripts-dir")]
    pub(crate) scripts_dir: String,
    /// File name of the primary script inside the scripts directory.
    /// Defaults to main.dlg when present, else the first file in path order.
    #[arg(long = "primary")]
    pub(crate) primary: Option<String>,
    #[arg(long = "player-name", default_value = "Adventurer")]
    pub(crate) player_name: String,
    #[arg(long = "save-file", default_value = "savegame.json")]
    pub(crate) save_file: String,
}

#[derive(Debug, Args)]
pub(crate) struct TuiArgs {
    #[arg(long = "scripts-dir")]
    pub(crate) scripts_dir: String,
    #[arg(long = "primary")]
    pub(crate) primary: Option<String>,
    #[arg(long = "player-name", default_value = "Adventurer")]
    pub(crate) player_name: String,
    #[arg(long = "save-file", default_value = "savegame.json")]
    pub(crate) save_file: String,
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    #[arg(long = "scripts-dir")]
    pub(crate) scripts_dir: String,
    #[arg(long = "primary")]
    pub(crate) primary: Option<String>,
}
