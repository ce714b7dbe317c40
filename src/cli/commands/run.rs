use anyhow::Result;
use colored::Colorize;

use super::super::{args::RunArgs, exit_status::ExitStatus};
use super::helper::{build_hooks, runtime};
use crate::sync::SyncOutcome;

pub fn run(args: RunArgs) -> Result<ExitStatus> {
    let hooks = build_hooks(&args.common, args.dry_run)?;
    let outcome = runtime()?.block_on(hooks.on_build_start());

    if let SyncOutcome::DryRun(changes) = outcome {
        for path in &changes {
            println!("  {} {}", "~".yellow(), path);
        }
        println!(
            "Run without {} to translate into {}.",
            "--dry-run".cyan(),
            hooks.synchronizer().config().target_locales().join(", ")
        );
    }

    Ok(ExitStatus::Success)
}
