//! Invocation of the external `helmfile` binary.
//!
//! Deployment is delegated to the `helmfile` executable rather than
//! reimplemented: the composed document is written to disk first, then run
//! with `helmfile -f <path> <action>`. Output streams straight to the user's
//! terminal, there is no timeout (applies can legitimately run for minutes),
//! and a failure is never retried. The caller gets a typed error carrying the
//! action and path so it can show the exact command to re-run manually.

use crate::core::HelmweaveError;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Deployment action to run against a composed helmfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelmfileAction {
    /// Show what an apply would change without changing it
    Diff,
    /// Apply the composed releases to the cluster
    Apply,
}

impl HelmfileAction {
    /// The helmfile subcommand name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diff => "diff",
            Self::Apply => "apply",
        }
    }
}

impl fmt::Display for HelmfileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for one `helmfile -f <path> <action>` invocation.
///
/// # Examples
///
/// ```rust,no_run
/// use helmweave::runner::HelmfileCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// HelmfileCommand::diff("dynamic-helmfile-20250114T093045.yaml")
///     .execute_streaming()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct HelmfileCommand {
    action: HelmfileAction,
    helmfile_path: PathBuf,
}

impl HelmfileCommand {
    /// Build an `apply` invocation for the given composed helmfile.
    pub fn apply(helmfile_path: impl Into<PathBuf>) -> Self {
        Self {
            action: HelmfileAction::Apply,
            helmfile_path: helmfile_path.into(),
        }
    }

    /// Build a `diff` invocation for the given composed helmfile.
    pub fn diff(helmfile_path: impl Into<PathBuf>) -> Self {
        Self {
            action: HelmfileAction::Diff,
            helmfile_path: helmfile_path.into(),
        }
    }

    /// The action this command will run.
    #[must_use]
    pub const fn action(&self) -> HelmfileAction {
        self.action
    }

    /// The command line as the user would type it, for prompts and reports.
    #[must_use]
    pub fn render(&self) -> String {
        format!("helmfile {}", self.args().join(" "))
    }

    /// Run the command with stdio inherited, streaming output to the terminal.
    ///
    /// Locates the binary at execution time so that composing never requires
    /// helmfile to be installed. A non-zero exit maps to
    /// [`HelmweaveError::HelmfileExecutionFailed`]; the composed file stays on
    /// disk either way.
    pub async fn execute_streaming(self) -> Result<(), HelmweaveError> {
        let binary = locate_helmfile()?;
        let args = self.args();
        debug!(
            target: "helmfile",
            "Executing command: {} {}",
            binary.display(),
            args.join(" ")
        );

        let status = Command::new(&binary)
            .args(&args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        if !status.success() {
            debug!(target: "helmfile", "Command failed with exit code: {:?}", status.code());
            return Err(HelmweaveError::HelmfileExecutionFailed {
                action: self.action.to_string(),
                path: self.helmfile_path.display().to_string(),
            });
        }

        debug!(target: "helmfile", "Command completed successfully");
        Ok(())
    }

    fn args(&self) -> Vec<String> {
        vec![
            "-f".to_string(),
            self.helmfile_path.display().to_string(),
            self.action.as_str().to_string(),
        ]
    }
}

/// Locate the `helmfile` executable in `PATH`.
pub fn locate_helmfile() -> Result<PathBuf, HelmweaveError> {
    which::which("helmfile").map_err(|_| HelmweaveError::HelmfileBinaryNotFound)
}
