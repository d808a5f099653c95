//! Compose and run helmfile in one step
//!
//! `helmweave deploy` accepts everything `compose` does, then runs
//! `helmfile -f <out> apply` (or `diff` with `--diff`) against the composed
//! file. The run is confirmed interactively unless `--yes` is given; a
//! non-interactive invocation without `--yes` writes the file, prints the
//! command to run manually, and exits successfully. A helmfile failure is
//! reported with the same manual command and is never retried; the composed
//! file stays on disk in every case.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::io::IsTerminal;

use crate::cli::common::prompt_confirmation;
use crate::cli::compose::ComposeCommand;
use crate::runner::HelmfileCommand;

/// Command to compose a helmfile and apply or diff it against the cluster
#[derive(Args, Debug)]
pub struct DeployCommand {
    #[command(flatten)]
    pub compose: ComposeCommand,

    /// Run `helmfile diff` instead of `helmfile apply`
    #[arg(long)]
    pub diff: bool,

    /// Run helmfile without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl DeployCommand {
    /// Execute the deploy command
    pub async fn execute(self) -> Result<()> {
        let Some(out_path) = self.compose.compose().await? else {
            return Ok(());
        };

        let command = if self.diff {
            HelmfileCommand::diff(&out_path)
        } else {
            HelmfileCommand::apply(&out_path)
        };
        let action = command.action();
        let render = command.render();

        if !self.yes {
            if !std::io::stdin().is_terminal() {
                println!("Skipping helmfile {action}: standard input is not a terminal.");
                println!("You can run manually: {render}");
                return Ok(());
            }
            if !prompt_confirmation(&format!("Run `{render}` now?")).await? {
                println!("You can run manually: {render}");
                return Ok(());
            }
        }

        command.execute_streaming().await?;
        println!("{} helmfile {action} completed.", "✓".green());
        Ok(())
    }
}
