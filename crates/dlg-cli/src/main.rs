use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let code = dlg_cli::run_cli_from_args(env::args_os());
    ExitCode::from(code.clamp(0, u8::MAX as i32) as u8)
}
