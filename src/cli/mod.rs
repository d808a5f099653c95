//! Command-line interface for helmweave.
//!
//! This module contains all CLI command implementations. Each command lives in
//! its own submodule with its own argument structure and execution logic, so
//! commands can be tested independently and share the catalog options through
//! [`common::SourceArgs`].
//!
//! # Available Commands
//!
//! - `list` - Browse catalog modules and their helmfile versions
//! - `compose` - Select, download, and merge helmfiles into one document
//! - `deploy` - Compose, then run `helmfile apply` (or `diff`) on the result
//!
//! # Basic Workflow
//!
//! ```bash
//! # 1. See what the catalog offers
//! helmweave list
//! helmweave list egov-core
//!
//! # 2. Compose a helmfile for an environment
//! helmweave compose --env-file envs/uat.yaml --secrets-file secrets/uat.yaml
//!
//! # 3. Or compose and deploy in one step
//! helmweave deploy --env-file envs/uat.yaml --secrets-file secrets/uat.yaml --diff
//! ```
//!
//! # Global Options
//!
//! All subcommands accept `--verbose`/`--quiet` for log verbosity and
//! `--no-progress` to disable spinners for scripts and CI. The catalog options
//! (`--repo`, `--branch`, `--github-token`) are repeated on each command that
//! talks to GitHub rather than being global, so `--help` shows them exactly
//! where they apply.
//!
//! # Testing Support
//!
//! [`Cli::execute_with_config`] accepts an externally built [`CliConfig`],
//! so tests can inject verbosity and progress settings without touching
//! process-wide flags.

pub mod common;
mod compose;
mod deploy;
mod list;
pub mod select;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::constants::NO_PROGRESS_ENV;

/// Runtime configuration derived from the global CLI flags.
///
/// Built once by [`Cli::build_config`] and applied exactly once at the start
/// of execution. Keeping it a separate value (instead of reading the flags
/// directly throughout) lets tests inject a configuration without parsing a
/// command line.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default tracing filter directive, e.g. `"info"` or `"debug"`.
    ///
    /// `None` means quiet mode: no subscriber is installed and nothing is
    /// logged. An explicit `RUST_LOG` always takes precedence over this value.
    pub log_level: Option<String>,

    /// Whether to disable progress spinners.
    ///
    /// When `true`, sets `HELMWEAVE_NO_PROGRESS` so every spinner created by
    /// [`crate::utils::progress`] is hidden.
    pub no_progress: bool,
}

impl CliConfig {
    /// Create a configuration with default values: info-level logging and
    /// spinners enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this configuration to the process.
    ///
    /// Installs the tracing subscriber (unless quiet) and sets the
    /// no-progress environment variable. Should be called exactly once at the
    /// start of CLI execution; a repeated call is harmless because the
    /// subscriber installation is a no-op once one exists.
    pub fn apply(&self) {
        if self.no_progress {
            // SAFETY: runs at startup, before any catalog or merge work
            // spawns tasks that could read the environment concurrently.
            unsafe { std::env::set_var(NO_PROGRESS_ENV, "1") };
        }

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level.clone())
        } else {
            // Quiet mode: no subscriber, nothing is logged.
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    }
}

/// Main CLI structure for helmweave.
///
/// The root command and its global options. Uses the `clap` derive API to
/// generate parsing, help text, and validation; `--verbose` and `--quiet`
/// are mutually exclusive and available to every subcommand.
#[derive(Parser)]
#[command(
    name = "helmweave",
    about = "Compose deployable helmfiles from per-module catalog sources",
    version,
    author,
    long_about = "helmweave merges versioned helmfile documents from a GitHub catalog \
into a single deployable helmfile, preserving Go-template expressions verbatim and \
pointing them at your environment and secrets files. It can then run helmfile against \
the result."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug-level logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors and warnings
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable progress spinners for scripts and CI
    #[arg(long, global = true)]
    no_progress: bool,
}

/// Available subcommands for the helmweave CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// List catalog modules, or the helmfile versions of one module.
    ///
    /// See [`list::ListCommand`] for detailed options and behavior.
    List(list::ListCommand),

    /// Compose a merged helmfile from catalog selections.
    ///
    /// See [`compose::ComposeCommand`] for detailed options and behavior.
    Compose(compose::ComposeCommand),

    /// Compose, then run helmfile apply (or diff with --diff) on the result.
    ///
    /// See [`deploy::DeployCommand`] for detailed options and behavior.
    Deploy(deploy::DeployCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed arguments.
    ///
    /// This is the main entry point: it converts the global flags to a
    /// [`CliConfig`] and delegates to
    /// [`execute_with_config`](Self::execute_with_config).
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed global flags.
    ///
    /// Verbose maps to debug-level logging, quiet to no logging at all, and
    /// the default to info level. The parser already rejects
    /// `--verbose --quiet`, so no further validation happens here.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress,
        }
    }

    /// Execute the CLI with a specific configuration.
    ///
    /// Applies `config` to the process, then dispatches to the selected
    /// subcommand. Tests call this directly to inject their own
    /// configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.apply();

        match self.command {
            Commands::List(cmd) => cmd.execute().await,
            Commands::Compose(cmd) => cmd.execute().await,
            Commands::Deploy(cmd) => cmd.execute().await,
        }
    }
}
