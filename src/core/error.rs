//! Error handling for helmweave
//!
//! This module provides the error types and user-friendly error reporting for the
//! helmfile composer. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`HelmweaveError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! Errors are organized by pipeline step, matching how the CLI reports them:
//! - **Catalog retrieval**: [`HelmweaveError::ModuleListFailed`],
//!   [`HelmweaveError::HelmfileListFailed`], [`HelmweaveError::HelmfileFetchFailed`]
//! - **Selection**: [`HelmweaveError::ModuleNotFound`], [`HelmweaveError::NonInteractive`]
//! - **Merging**: [`HelmweaveError::HelmfileParseError`], [`HelmweaveError::YamlError`]
//! - **Deployment**: [`HelmweaveError::HelmfileBinaryNotFound`],
//!   [`HelmweaveError::HelmfileExecutionFailed`]
//!
//! Retrieval, parse, and serialization failures are fatal for the run; selection
//! mistakes are recovered interactively before an error is ever constructed; a
//! deployment failure is reported with the manual re-run command and never retried.
//!
//! # Error Conversion and Context
//!
//! Common errors are automatically converted:
//! - [`std::io::Error`] → [`HelmweaveError::IoError`]
//! - [`serde_yaml::Error`] → [`HelmweaveError::YamlError`]
//!
//! Use [`user_friendly_error`] to convert any error into a user-friendly format with
//! contextual suggestions.
//!
//! # Examples
//!
//! ## Basic Error Handling
//!
//! ```rust,no_run
//! use helmweave::core::{HelmweaveError, user_friendly_error};
//!
//! fn locate_helmfile() -> Result<(), HelmweaveError> {
//!     Err(HelmweaveError::HelmfileBinaryNotFound)
//! }
//!
//! match locate_helmfile() {
//!     Ok(_) => println!("Found!"),
//!     Err(e) => {
//!         let ctx = user_friendly_error(anyhow::Error::from(e));
//!         ctx.display(); // Shows colored error with suggestions
//!     }
//! }
//! ```
//!
//! ## Creating Error Context Manually
//!
//! ```rust,no_run
//! use helmweave::core::{HelmweaveError, ErrorContext};
//!
//! let error = HelmweaveError::ModuleNotFound { name: "egov-core".to_string() };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Run 'helmweave list' to see available modules")
//!     .with_details("Module names must match catalog directory names exactly");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for helmweave operations
///
/// Each variant represents a specific failure mode of the compose/deploy
/// pipeline and carries enough context to label the step that failed. Display
/// strings stay short; the underlying cause lands in the `details` of the
/// [`ErrorContext`] produced by [`user_friendly_error`].
#[derive(Error, Debug)]
pub enum HelmweaveError {
    /// Listing the module directories in the catalog failed
    ///
    /// This error occurs when the GitHub contents API request for the catalog
    /// root does not succeed. Common causes are an incorrect repository name,
    /// a missing token for a private repository, or network problems.
    #[error("Failed to list modules in catalog '{repo}'")]
    ModuleListFailed {
        /// The `owner/name` repository that was queried
        repo: String,
        /// The underlying cause reported by the HTTP layer or the API
        reason: String,
    },

    /// Listing the helmfile versions inside a module directory failed
    #[error("Failed to list helmfiles for module '{module}'")]
    HelmfileListFailed {
        /// The module whose directory could not be listed
        module: String,
        /// The underlying cause reported by the HTTP layer or the API
        reason: String,
    },

    /// Downloading a helmfile document failed
    #[error("Failed to download helmfile '{file}' from module '{module}'")]
    HelmfileFetchFailed {
        /// The module the file belongs to
        module: String,
        /// The helmfile filename that could not be downloaded
        file: String,
        /// The underlying cause reported by the HTTP layer or the API
        reason: String,
    },

    /// A preselected module does not exist in the catalog
    #[error("Module '{name}' not found in the catalog")]
    ModuleNotFound {
        /// Name of the module that could not be found
        name: String,
    },

    /// A source helmfile is not valid YAML
    ///
    /// Raised while folding downloaded documents into the merged helmfile.
    /// The document has already had its template expressions guarded at this
    /// point, so a parse failure means the underlying YAML itself is broken.
    #[error("Failed to parse a source helmfile as YAML")]
    HelmfileParseError {
        /// The parser's description of what is wrong
        reason: String,
    },

    /// The path given with `--custom-helmfile` does not exist
    #[error("Custom helmfile not found: {path}")]
    CustomHelmfileNotFound {
        /// The path that was supplied
        path: String,
    },

    /// helmfile executable not found in PATH
    ///
    /// Composition does not need the binary; only `deploy` does. The composed
    /// output file is still written before this error is raised, so it can be
    /// applied manually once helmfile is installed.
    #[error("helmfile is not installed or not found in PATH")]
    HelmfileBinaryNotFound,

    /// The helmfile process exited with a non-zero status
    #[error("helmfile {action} failed for {path}")]
    HelmfileExecutionFailed {
        /// The subcommand that was run ("apply" or "diff")
        action: String,
        /// Path to the composed helmfile that was passed with `-f`
        path: String,
    },

    /// An interactive prompt was required but stdin is not a terminal
    #[error("Cannot prompt for {operation}: standard input is not a terminal")]
    NonInteractive {
        /// What the prompt would have asked for
        operation: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Network error
    #[error("Network error: {operation}")]
    NetworkError {
        /// The network operation that failed
        operation: String,
        /// Reason for the network failure
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for HelmweaveError {
    fn clone(&self) -> Self {
        match self {
            Self::ModuleListFailed {
                repo,
                reason,
            } => Self::ModuleListFailed {
                repo: repo.clone(),
                reason: reason.clone(),
            },
            Self::HelmfileListFailed {
                module,
                reason,
            } => Self::HelmfileListFailed {
                module: module.clone(),
                reason: reason.clone(),
            },
            Self::HelmfileFetchFailed {
                module,
                file,
                reason,
            } => Self::HelmfileFetchFailed {
                module: module.clone(),
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ModuleNotFound {
                name,
            } => Self::ModuleNotFound {
                name: name.clone(),
            },
            Self::HelmfileParseError {
                reason,
            } => Self::HelmfileParseError {
                reason: reason.clone(),
            },
            Self::CustomHelmfileNotFound {
                path,
            } => Self::CustomHelmfileNotFound {
                path: path.clone(),
            },
            Self::HelmfileBinaryNotFound => Self::HelmfileBinaryNotFound,
            Self::HelmfileExecutionFailed {
                action,
                path,
            } => Self::HelmfileExecutionFailed {
                action: action.clone(),
                path: path.clone(),
            },
            Self::NonInteractive {
                operation,
            } => Self::NonInteractive {
                operation: operation.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::NetworkError {
                operation,
                reason,
            } => Self::NetworkError {
                operation: operation.clone(),
                reason: reason.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::YamlError(e) => Self::Other {
                message: format!("YAML error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`HelmweaveError`] and adds optional suggestions for
/// resolution and additional details. This is the primary way helmweave
/// presents errors to CLI users.
///
/// # Display Format
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use helmweave::core::{HelmweaveError, ErrorContext};
///
/// let context = ErrorContext::new(HelmweaveError::HelmfileBinaryNotFound)
///     .with_suggestion("Install helmfile from https://github.com/helmfile/helmfile")
///     .with_details("Deployment shells out to the helmfile binary");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: HelmweaveError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`HelmweaveError`]
    ///
    /// This creates a basic error context with no additional suggestions or
    /// details. Use [`with_suggestion`] and [`with_details`] to add
    /// user-friendly information.
    ///
    /// [`with_suggestion`]: ErrorContext::with_suggestion
    /// [`with_details`]: ErrorContext::with_details
    #[must_use]
    pub const fn new(error: HelmweaveError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions should be actionable steps that users can take to resolve
    /// the error. They are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details provide context about why the error occurred or what it means.
    /// They are displayed in yellow, less prominent than the main error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// Prints the error (red, bold), details (yellow), and suggestion (green)
    /// to stderr. This is the primary way helmweave presents errors in the CLI.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Extension trait for converting [`HelmweaveError`] to [`anyhow::Error`] with context
///
/// This preserves suggestion and details through an `anyhow` chain so that the
/// top-level reporter can recover them instead of flattening everything into a
/// single message.
///
/// # Examples
///
/// ```rust,no_run
/// use helmweave::core::{HelmweaveError, ErrorContext, IntoAnyhowWithContext};
///
/// let error = HelmweaveError::ModuleNotFound { name: "egov".to_string() };
/// let context = ErrorContext::new(HelmweaveError::Other { message: String::new() })
///     .with_suggestion("Did you mean 'egov-core'?");
///
/// let anyhow_error = error.into_anyhow_with_context(context);
/// ```
pub trait IntoAnyhowWithContext {
    /// Convert the error to an [`anyhow::Error`] with the provided context
    fn into_anyhow_with_context(self, context: ErrorContext) -> anyhow::Error;
}

impl IntoAnyhowWithContext for HelmweaveError {
    fn into_anyhow_with_context(self, context: ErrorContext) -> anyhow::Error {
        anyhow::Error::new(ErrorContext {
            error: self,
            suggestion: context.suggestion,
            details: context.details,
        })
    }
}

impl ErrorContext {
    /// Create an [`ErrorContext`] with only a suggestion (no specific error)
    ///
    /// Useful for generic errors where a suggestion is known but no
    /// [`HelmweaveError`] variant fits.
    pub fn suggestion(suggestion: impl Into<String>) -> Self {
        Self {
            error: HelmweaveError::Other {
                message: String::new(),
            },
            suggestion: Some(suggestion.into()),
            details: None,
        }
    }
}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// This function is the main entry point for converting arbitrary errors into
/// user-friendly error messages for CLI display. It recognizes common error
/// types and provides appropriate context and suggestions.
///
/// # Error Recognition
///
/// The function recognizes and provides specific handling for:
/// - [`ErrorContext`] instances attached at a call site (passed through intact)
/// - [`HelmweaveError`] variants with tailored suggestions
/// - [`std::io::Error`] with filesystem-specific guidance
/// - [`serde_yaml::Error`] with YAML syntax help
/// - [`reqwest::Error`] with connectivity guidance
/// - Generic errors with their full cause chain
///
/// # Examples
///
/// ```rust,no_run
/// use helmweave::core::user_friendly_error;
///
/// let error = anyhow::anyhow!("Something went wrong");
/// let context = user_friendly_error(error);
///
/// context.display();
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // A context attached where the error happened beats anything inferred here
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    if let Some(hw_error) = error.downcast_ref::<HelmweaveError>() {
        return create_error_context(hw_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        // The outer anyhow context names the file being touched; keep it visible
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(HelmweaveError::IoError(std::io::Error::new(
                    io_error.kind(),
                    io_error.to_string(),
                )))
                .with_suggestion(
                    "Check file ownership, or write the output somewhere you can write to with --out",
                )
                .with_details(error.to_string());
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(HelmweaveError::IoError(std::io::Error::new(
                    io_error.kind(),
                    io_error.to_string(),
                )))
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(error.to_string());
            }
            _ => {}
        }
    }

    if let Some(yaml_error) = error.downcast_ref::<serde_yaml::Error>() {
        return ErrorContext::new(HelmweaveError::HelmfileParseError {
            reason: yaml_error.to_string(),
        })
        .with_suggestion(
            "Check the source helmfile is valid YAML. Indentation and unquoted special characters are the usual culprits",
        )
        .with_details(yaml_error.to_string());
    }

    if let Some(req_error) = error.downcast_ref::<reqwest::Error>() {
        let hint = if req_error.is_timeout() {
            "The request timed out. Check your network connection and try again"
        } else if req_error.is_connect() {
            "Could not connect to the catalog host. Check your network connection and any proxy settings"
        } else {
            "Check your network connection, the repository name, and whether a --github-token is required"
        };
        return ErrorContext::new(HelmweaveError::NetworkError {
            operation: "catalog request".to_string(),
            reason: req_error.to_string(),
        })
        .with_suggestion(hint)
        .with_details(req_error.to_string());
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    let chain: Vec<String> = error
        .chain()
        .skip(1) // Skip the root cause which is already in to_string()
        .map(std::string::ToString::to_string)
        .collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(HelmweaveError::Other {
        message,
    })
}

/// Create appropriate [`ErrorContext`] with suggestions for specific errors
///
/// Maps each [`HelmweaveError`] variant to an [`ErrorContext`] with tailored
/// suggestions and details. Used by [`user_friendly_error`] to keep error
/// messages consistent across commands.
fn create_error_context(error: HelmweaveError) -> ErrorContext {
    match &error {
        HelmweaveError::ModuleListFailed { repo, reason } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Verify the repository '{repo}' exists and is reachable. For private repositories pass --github-token or set GITHUB_TOKEN"
                ))
                .with_details(reason.clone())
        }

        HelmweaveError::HelmfileListFailed { module, reason } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Verify the module '{module}' exists in the catalog on the selected branch. Run 'helmweave list' to see available modules"
                ))
                .with_details(reason.clone())
        }

        HelmweaveError::HelmfileFetchFailed { reason, .. } => {
            ErrorContext::new(error.clone())
                .with_suggestion(
                    "Check your network connection and that the file still exists on the selected branch, then try again",
                )
                .with_details(reason.clone())
        }

        HelmweaveError::ModuleNotFound { .. } => {
            ErrorContext::new(error.clone())
                .with_suggestion("Run 'helmweave list' to see available modules")
                .with_details("Module names must match catalog directory names exactly")
        }

        HelmweaveError::HelmfileParseError { reason } => {
            ErrorContext::new(error.clone())
                .with_suggestion(
                    "Check the source helmfile is valid YAML. Template expressions are masked before parsing, so the YAML structure itself is at fault",
                )
                .with_details(reason.clone())
        }

        HelmweaveError::CustomHelmfileNotFound { path } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Check the path passed to --custom-helmfile: {path}"
                ))
                .with_details("The custom helmfile is read from the local filesystem before merging")
        }

        HelmweaveError::HelmfileBinaryNotFound => ErrorContext::new(HelmweaveError::HelmfileBinaryNotFound)
            .with_suggestion("Install helmfile from https://github.com/helmfile/helmfile/releases and ensure it is in your PATH")
            .with_details("Composition succeeded; only the deployment step needs the helmfile binary"),

        HelmweaveError::HelmfileExecutionFailed { action, path } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Inspect the helmfile output above, fix the cause, then re-run manually: helmfile -f {path} {action}"
                ))
                .with_details("The composed helmfile was kept on disk; nothing is retried automatically")
        }

        HelmweaveError::NonInteractive { .. } => {
            ErrorContext::new(error.clone())
                .with_suggestion(
                    "Preselect helmfiles with --modules (and optionally --versions), or run from an interactive terminal",
                )
                .with_details("Interactive selection reads from stdin, which is not a terminal here")
        }

        HelmweaveError::NetworkError { reason, .. } => {
            ErrorContext::new(error.clone())
                .with_suggestion("Check your internet connection and any proxy settings")
                .with_details(reason.clone())
        }

        _ => ErrorContext::new(error.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = HelmweaveError::HelmfileBinaryNotFound;
        assert_eq!(error.to_string(), "helmfile is not installed or not found in PATH");

        let error = HelmweaveError::ModuleNotFound {
            name: "egov".to_string(),
        };
        assert_eq!(error.to_string(), "Module 'egov' not found in the catalog");

        let error = HelmweaveError::HelmfileFetchFailed {
            module: "core".to_string(),
            file: "v1.yaml".to_string(),
            reason: "404".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to download helmfile 'v1.yaml' from module 'core'");

        let error = HelmweaveError::HelmfileExecutionFailed {
            action: "apply".to_string(),
            path: "/tmp/out.yaml".to_string(),
        };
        assert_eq!(error.to_string(), "helmfile apply failed for /tmp/out.yaml");
    }

    #[test]
    fn test_error_context() {
        let ctx = ErrorContext::new(HelmweaveError::HelmfileBinaryNotFound)
            .with_suggestion("Install helmfile")
            .with_details("Deployment shells out to helmfile");

        assert_eq!(ctx.suggestion, Some("Install helmfile".to_string()));
        assert_eq!(ctx.details, Some("Deployment shells out to helmfile".to_string()));
    }

    #[test]
    fn test_error_context_display() {
        let ctx =
            ErrorContext::new(HelmweaveError::HelmfileBinaryNotFound).with_suggestion("Install helmfile");

        let display = format!("{ctx}");
        assert!(display.contains("helmfile is not installed or not found in PATH"));
        assert!(display.contains("Install helmfile"));
    }

    #[test]
    fn test_user_friendly_error_permission_denied() {
        use std::io::{Error, ErrorKind};

        let io_error = Error::new(ErrorKind::PermissionDenied, "access denied");
        let anyhow_error = anyhow::Error::from(io_error);

        let ctx = user_friendly_error(anyhow_error);
        assert!(ctx.suggestion.is_some());
        assert!(ctx.details.is_some());
    }

    #[test]
    fn test_user_friendly_error_preserves_attached_context() {
        let err = HelmweaveError::ModuleNotFound {
            name: "egov".to_string(),
        };
        let anyhow_error = err.into_anyhow_with_context(
            ErrorContext::suggestion("Did you mean 'egov-core'?"),
        );

        let ctx = user_friendly_error(anyhow_error);
        match ctx.error {
            HelmweaveError::ModuleNotFound {
                ref name,
            } => assert_eq!(name, "egov"),
            _ => panic!("Expected ModuleNotFound"),
        }
        assert_eq!(ctx.suggestion.as_deref(), Some("Did you mean 'egov-core'?"));
    }

    #[test]
    fn test_user_friendly_error_yaml() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("a: [unclosed").unwrap_err();
        let anyhow_error = anyhow::Error::from(yaml_error);

        let ctx = user_friendly_error(anyhow_error);
        match ctx.error {
            HelmweaveError::HelmfileParseError {
                ..
            } => {}
            _ => panic!("Expected HelmfileParseError"),
        }
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_generic_includes_chain() {
        use anyhow::Context;

        let result: anyhow::Result<()> =
            Err(anyhow::anyhow!("root cause")).context("while composing");
        let ctx = user_friendly_error(result.unwrap_err());

        match ctx.error {
            HelmweaveError::Other {
                ref message,
            } => {
                assert!(message.contains("while composing"));
                assert!(message.contains("Caused by:"));
                assert!(message.contains("root cause"));
            }
            _ => panic!("Expected Other"),
        }
    }

    #[test]
    fn test_from_io_error() {
        use std::io::Error;

        let io_error = Error::other("test error");
        let hw_error = HelmweaveError::from(io_error);

        match hw_error {
            HelmweaveError::IoError(_) => {}
            _ => panic!("Expected IoError"),
        }
    }

    #[test]
    fn test_from_yaml_error() {
        let result: Result<serde_yaml::Value, _> = serde_yaml::from_str("a: [unclosed");

        if let Err(e) = result {
            let hw_error = HelmweaveError::from(e);
            match hw_error {
                HelmweaveError::YamlError(_) => {}
                _ => panic!("Expected YamlError"),
            }
        }
    }

    #[test]
    fn test_clone_converts_unclonable_variants() {
        let error = HelmweaveError::IoError(std::io::Error::other("disk gone"));
        match error.clone() {
            HelmweaveError::Other {
                message,
            } => assert!(message.contains("disk gone")),
            _ => panic!("Expected Other after clone"),
        }
    }

    #[test]
    fn test_create_error_context_binary_not_found() {
        let ctx = create_error_context(HelmweaveError::HelmfileBinaryNotFound);
        assert!(ctx.suggestion.is_some());
        assert!(ctx.suggestion.unwrap().contains("Install helmfile"));
        assert!(ctx.details.is_some());
    }

    #[test]
    fn test_create_error_context_module_list_failed() {
        let ctx = create_error_context(HelmweaveError::ModuleListFailed {
            repo: "egovernments/helm-charts".to_string(),
            reason: "HTTP 403".to_string(),
        });
        assert!(ctx.suggestion.is_some());
        assert!(ctx.suggestion.unwrap().contains("egovernments/helm-charts"));
        assert_eq!(ctx.details.as_deref(), Some("HTTP 403"));
    }

    #[test]
    fn test_create_error_context_execution_failed() {
        let ctx = create_error_context(HelmweaveError::HelmfileExecutionFailed {
            action: "diff".to_string(),
            path: "out.yaml".to_string(),
        });
        assert!(ctx.suggestion.is_some());
        assert!(ctx.suggestion.unwrap().contains("helmfile -f out.yaml diff"));
        assert!(ctx.details.is_some());
    }

    #[test]
    fn test_create_error_context_non_interactive() {
        let ctx = create_error_context(HelmweaveError::NonInteractive {
            operation: "module selection".to_string(),
        });
        assert!(ctx.suggestion.is_some());
        assert!(ctx.suggestion.unwrap().contains("--modules"));
    }
}
