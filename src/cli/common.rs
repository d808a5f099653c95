//! Common utilities shared by CLI commands

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::constants::DEFAULT_CATALOG_REPO;
use crate::core::HelmweaveError;
use crate::source::GithubSource;

/// Catalog coordinates shared by every command that reads from GitHub.
///
/// Flattened into each command's argument struct so `list`, `compose`, and
/// `deploy` present identical `--repo`/`--branch`/`--github-token` options.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// GitHub repository hosting the helmfile catalog, as owner/name
    #[arg(long, value_name = "OWNER/NAME", default_value = DEFAULT_CATALOG_REPO)]
    pub repo: String,

    /// Branch, tag, or commit to read the catalog from (repository default when omitted)
    #[arg(long, value_name = "REF")]
    pub branch: Option<String>,

    /// GitHub token for private repositories and higher rate limits
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

impl SourceArgs {
    /// Build the catalog client these coordinates describe.
    pub fn build(&self) -> Result<GithubSource, HelmweaveError> {
        GithubSource::new(self.repo.clone(), self.branch.clone(), self.github_token.clone())
    }
}

/// Fail with [`HelmweaveError::NonInteractive`] unless stdin is a terminal.
///
/// Called before any interactive prompt so that a piped or CI invocation gets
/// a clear error naming what it should have passed on the command line,
/// instead of blocking forever on a read that cannot be answered.
pub fn ensure_interactive(operation: &str) -> Result<(), HelmweaveError> {
    if io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(HelmweaveError::NonInteractive {
            operation: operation.to_string(),
        })
    }
}

/// Find the catalog name closest to `target`, for "did you mean" hints.
///
/// Uses Levenshtein distance with a 50% similarity threshold, so a typo gets
/// a suggestion but a wholly different name gets none.
pub fn closest_match<'a>(target: &str, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| (strsim::levenshtein(target, candidate), candidate.as_str()))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| distance * 2 <= target.len())
        .map(|(_, name)| name)
}

/// Ask a y/N question on the terminal and read the answer from async stdin.
///
/// Returns `true` only for an explicit `y` or `yes` (case-insensitive); an
/// empty line or anything else declines.
pub async fn prompt_confirmation(prompt: &str) -> Result<bool> {
    print!("{} {} ", prompt, "[y/N]:".green());
    io::stdout().flush()?;

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut response = String::new();
    reader.read_line(&mut response).await?;

    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
