//! Compose a deployable helmfile from catalog modules
//!
//! `helmweave compose` is the heart of the tool: it selects one helmfile
//! version per module (interactively or via `--modules`/`--versions`),
//! downloads the selections, folds them through [`crate::merge`], and writes
//! the merged document to disk. Deployment is a separate step; see
//! `helmweave deploy`.
//!
//! # Selection
//!
//! Without `--modules` the command lists the catalog and prompts, so stdin
//! must be a terminal. With `--modules` the whole run is scriptable:
//! `--versions` pairs with `--modules` by position, and a version missing
//! from its module's listing is a warning and a skip, never a failure. A
//! module that does not exist at all is fatal, with a closest-name hint.
//!
//! # Custom helmfile
//!
//! `--custom-helmfile` merges a local document after the catalog selections,
//! so its entries lose against theirs under first-occurrence-wins. When
//! nothing from the catalog is selected the custom document is passed through
//! byte-for-byte, untouched by the pipeline. In a non-interactive run with no
//! preselection the catalog is not contacted at all in that case.
//!
//! # Examples
//!
//! ```bash
//! # Interactive selection against the default catalog
//! helmweave compose --env-file envs/uat.yaml --secrets-file secrets/uat.yaml
//!
//! # Scripted: exact modules and versions, fixed output path
//! helmweave compose \
//!     --env-file envs/uat.yaml --secrets-file secrets/uat.yaml \
//!     --modules egov-core egov-dss --versions v1.7.yaml v2.0.yaml \
//!     --out uat-helmfile.yaml
//! ```

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;
use futures::future::join_all;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::common::{SourceArgs, closest_match, ensure_interactive};
use crate::cli::list::with_module_hint;
use crate::cli::select::prompt_choose;
use crate::constants::{HELMFILE_EXTENSION, OUTPUT_FILE_PREFIX, OUTPUT_TIMESTAMP_FORMAT};
use crate::core::HelmweaveError;
use crate::merge::merge_helmfiles;
use crate::source::GithubSource;
use crate::utils::progress::ProgressBar;

/// Command to compose a merged helmfile from catalog selections
#[derive(Args, Debug)]
pub struct ComposeCommand {
    /// Path substituted for the ENV_FILE placeholder in every source helmfile
    #[arg(long, value_name = "PATH")]
    pub env_file: String,

    /// Path substituted for the SECRET_FILE placeholder in every source helmfile
    #[arg(long, value_name = "PATH")]
    pub secrets_file: String,

    /// Modules to compose, skipping the interactive module menu
    #[arg(long, value_name = "MODULE", num_args = 1..)]
    pub modules: Vec<String>,

    /// Helmfile versions paired with --modules by position
    #[arg(long, value_name = "FILE", num_args = 1..)]
    pub versions: Vec<String>,

    /// Local helmfile merged after the catalog selections
    #[arg(long, value_name = "PATH")]
    pub custom_helmfile: Option<PathBuf>,

    /// Output path (default: dynamic-helmfile-<timestamp>.yaml in the current directory)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl ComposeCommand {
    /// Execute the compose command
    pub async fn execute(self) -> Result<()> {
        self.compose().await.map(|_| ())
    }

    /// Run the composition pipeline.
    ///
    /// Returns the output path when a helmfile was written, or `None` on a
    /// clean informational exit (empty catalog or empty selection). `deploy`
    /// calls this directly and runs helmfile against the returned path.
    pub(crate) async fn compose(&self) -> Result<Option<PathBuf>> {
        let custom = self.read_custom_helmfile()?;

        let texts = if self.skip_catalog(custom.is_some()) {
            debug!("no preselection and stdin is not a terminal, skipping catalog selection");
            Vec::new()
        } else {
            let source = self.source.build()?;
            match self.select_helmfiles(&source).await? {
                None if custom.is_none() => return Ok(None),
                None => Vec::new(),
                Some(selection) if selection.is_empty() => Vec::new(),
                Some(selection) => fetch_selected(&source, &selection).await?,
            }
        };

        if texts.is_empty() {
            if custom.is_none() {
                println!("No helmfiles selected.");
                return Ok(None);
            }
            println!(
                "{} No catalog helmfiles selected. Using only the custom helmfile.",
                "⚠".yellow()
            );
        }

        let merged = merge_helmfiles(&texts, &self.env_file, &self.secrets_file, custom.as_deref())?;

        let out_path = self.output_path();
        std::fs::write(&out_path, &merged)
            .with_context(|| format!("Failed to write merged helmfile to {}", out_path.display()))?;
        println!();
        println!("{} Dynamic helmfile created: {}", "✓".green(), out_path.display());
        Ok(Some(out_path))
    }

    /// Whether to bypass the catalog entirely.
    ///
    /// True only when there is nothing to select with (`--modules` absent),
    /// something to fall back on (a custom helmfile), and no terminal to ask
    /// on. An interactive run still offers the module menu alongside a custom
    /// helmfile.
    fn skip_catalog(&self, has_custom: bool) -> bool {
        self.modules.is_empty() && has_custom && !std::io::stdin().is_terminal()
    }

    /// Resolve the selection to (module, filename) pairs.
    ///
    /// Returns `None` when the catalog has no modules at all; the inner vec
    /// may still be empty when every preselected module was skipped.
    async fn select_helmfiles(
        &self,
        source: &GithubSource,
    ) -> Result<Option<Vec<(String, String)>>> {
        let selected_modules: Vec<String> = if self.modules.is_empty() {
            ensure_interactive("module selection")?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Fetching module list from {}...", source.repo()));
            let modules = source.list_modules().await;
            spinner.finish_and_clear();
            let modules = modules?;

            if modules.is_empty() {
                println!("No modules found.");
                return Ok(None);
            }

            let indices = prompt_choose("Select modules:", &modules, false).await?;
            indices.into_iter().map(|i| modules[i - 1].clone()).collect()
        } else {
            println!(
                "{} Using preselected modules: {}",
                "✓".green(),
                self.modules.join(", ")
            );
            self.modules.clone()
        };

        let mut selection = Vec::new();
        for (position, module) in selected_modules.iter().enumerate() {
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
                println!("No helmfiles found for module '{module}', skipping.");
                continue;
            }
            let names: Vec<String> = helmfiles.iter().map(|h| h.name.clone()).collect();

            if let Some(version) = self.versions.get(position) {
                if names.iter().any(|name| name == version) {
                    println!("{} Using version '{version}' for module '{module}'", "✓".green());
                    selection.push((module.clone(), version.clone()));
                } else {
                    let hint = closest_match(version, &names)
                        .map(|name| format!(" Did you mean '{name}'?"))
                        .unwrap_or_default();
                    println!(
                        "{} Version '{version}' not found for module '{module}', skipping.{hint}",
                        "⚠".yellow()
                    );
                }
            } else {
                ensure_interactive(&format!("version selection for module '{module}'"))?;
                let indices = prompt_choose(
                    &format!("Select helmfile version for module '{module}':"),
                    &names,
                    true,
                )
                .await?;
                if let Some(&index) = indices.first() {
                    selection.push((module.clone(), names[index - 1].clone()));
                }
            }
        }
        Ok(Some(selection))
    }

    /// Read the custom helmfile if one was given.
    fn read_custom_helmfile(&self) -> Result<Option<String>> {
        let Some(path) = &self.custom_helmfile else {
            return Ok(None);
        };
        if !path.exists() {
            return Err(HelmweaveError::CustomHelmfileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read custom helmfile {}", path.display()))?;
        println!("{} Loaded custom helmfile: {}", "✓".green(), path.display());
        Ok(Some(content))
    }

    /// The explicit `--out` path, or the timestamped default in the current
    /// directory.
    fn output_path(&self) -> PathBuf {
        self.out.clone().unwrap_or_else(|| {
            let timestamp = Local::now().format(OUTPUT_TIMESTAMP_FORMAT);
            PathBuf::from(format!("{OUTPUT_FILE_PREFIX}{timestamp}{HELMFILE_EXTENSION}"))
        })
    }
}

/// Download every selected helmfile concurrently, preserving selection order.
async fn fetch_selected(
    source: &GithubSource,
    selection: &[(String, String)],
) -> Result<Vec<String>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Downloading {} helmfile(s)...", selection.len()));
    let fetches = selection
        .iter()
        .map(|(module, name)| source.fetch_helmfile(module, name));
    let results = join_all(fetches).await;
    spinner.finish_and_clear();

    let texts = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(texts)
}
