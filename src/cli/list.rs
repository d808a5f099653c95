//! Browse the helmfile catalog
//!
//! `helmweave list` prints the modules available in the catalog repository;
//! `helmweave list MODULE` prints the helmfile versions inside one module.
//! This is the read-only surface of the catalog interface that `compose`
//! selects from.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::common::{SourceArgs, closest_match};
use crate::core::{ErrorContext, HelmweaveError, IntoAnyhowWithContext};
use crate::source::GithubSource;
use crate::utils::progress::ProgressBar;

/// Command to list catalog modules or the helmfile versions of one module
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Module whose helmfile versions to list (omit to list all modules)
    pub module: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl ListCommand {
    /// Execute the list command
    pub async fn execute(self) -> Result<()> {
        let source = self.source.build()?;
        match &self.module {
            Some(module) => list_versions(&source, module).await,
            None => list_modules(&source).await,
        }
    }
}

async fn list_modules(source: &GithubSource) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Fetching module list from {}...", source.repo()));
    let modules = source.list_modules().await;
    spinner.finish_and_clear();
    let modules = modules?;

    if modules.is_empty() {
        println!("No modules found.");
        return Ok(());
    }

    println!("{}", format!("Modules in {}:", source.repo()).bold());
    for module in &modules {
        println!("  {module}");
    }
    Ok(())
}

async fn list_versions(source: &GithubSource, module: &str) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Fetching helmfiles for module '{module}'..."));
    let helmfiles = source.list_helmfiles(module).await;
    spinner.finish_and_clear();

    let helmfiles = match helmfiles {
        Ok(helmfiles) => helmfiles,
        Err(err @ HelmweaveError::ModuleNotFound { .. }) => {
            return Err(with_module_hint(source, module, err).await);
        }
        Err(err) => return Err(err.into()),
    };

    if helmfiles.is_empty() {
        println!("No helmfiles found for module '{module}'.");
        return Ok(());
    }

    println!("{}", format!("Helmfile versions for module '{module}':").bold());
    for helmfile in &helmfiles {
        println!("  {}", helmfile.name);
    }
    Ok(())
}

/// Attach a "did you mean" suggestion to a module-not-found error.
///
/// Fetches the module list to find the closest name; if that lookup fails
/// too, the original error is returned unchanged.
pub(crate) async fn with_module_hint(
    source: &GithubSource,
    module: &str,
    err: HelmweaveError,
) -> anyhow::Error {
    if let Ok(modules) = source.list_modules().await {
        if let Some(suggestion) = closest_match(module, &modules) {
            return err.into_anyhow_with_context(ErrorContext::suggestion(format!(
                "Did you mean '{suggestion}'? Run 'helmweave list' to see all modules"
            )));
        }
    }
    err.into()
}
