//! Command-line interface: argument parsing and command dispatch.

mod args;
mod commands;
mod exit_status;

use anyhow::Result;

pub use args::{Arguments, Command, CommonArgs, RunArgs, WatchArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Run(args)) => commands::run::run(args),
        Some(Command::Watch(args)) => commands::watch::watch(args),
        Some(Command::Init) => commands::init::init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
