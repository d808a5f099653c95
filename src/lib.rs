//! helmweave - Compose deployable helmfiles from per-module catalog sources
//!
//! helmweave folds versioned helmfile documents, one per deployable module of
//! a platform, into a single helmfile ready for `helmfile apply`. The catalog
//! lives in a GitHub repository (one directory per module, one YAML file per
//! version); the output is written locally and optionally deployed in the
//! same run.
//!
//! # Architecture Overview
//!
//! Composition is a pipeline over every selected document:
//!
//! 1. **Guard**: every `{{ ... }}` Go-template expression is masked with
//!    sentinel markers so the YAML parser never sees template syntax.
//! 2. **Substitute**: the two environment placeholders (`{{ env "ENV_FILE" }}`
//!    and `{{ env "SECRET_FILE" }}`), which the guard deliberately leaves
//!    unmasked, are replaced with the paths given on the command line.
//! 3. **Fold**: the document's `repositories`, `templates`, `values`,
//!    `secrets`, and `releases` sections are merged into an accumulator with
//!    per-category deduplication where the first occurrence always wins.
//! 4. **Serialize**: categories are emitted in a fixed order, empty ones are
//!    dropped, and the sentinel markers are restored as the very last step,
//!    so preserved template expressions reach the output byte-for-byte.
//!
//! The key property is that helmweave composes helmfiles without ever
//! interpreting them: template expressions addressed to helmfile's own
//! renderer pass through untouched.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (`list`, `compose`, `deploy`)
//! - [`constants`] - Catalog coordinates, HTTP settings, naming defaults
//! - [`core`] - Error types and user-facing error contexts
//! - [`merge`] - The guard/substitute/fold/serialize pipeline
//! - [`runner`] - Invocation of the external `helmfile` binary
//! - [`source`] - GitHub contents-API catalog client
//! - [`utils`] - Progress spinners
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Browse the catalog
//! helmweave list
//! helmweave list egov-core
//!
//! # Interactive composition
//! helmweave compose --env-file envs/uat.yaml --secrets-file secrets/uat.yaml
//!
//! # Scripted composition, then deployment with a diff first
//! helmweave compose \
//!     --env-file envs/uat.yaml --secrets-file secrets/uat.yaml \
//!     --modules egov-core egov-dss --versions v1.7.yaml v2.0.yaml \
//!     --out uat-helmfile.yaml
//! helmweave deploy --env-file envs/uat.yaml --secrets-file secrets/uat.yaml --diff
//! ```
//!
//! # Library Usage
//!
//! The merge engine is usable without the CLI:
//!
//! ```rust
//! use helmweave::merge::merge_helmfiles;
//!
//! let doc = r#"
//! repositories:
//!   - name: egov
//!     url: https://egov.org/charts
//! releases:
//!   - name: gateway
//!     values: [{{ env "ENV_FILE" }}]
//! "#;
//!
//! let merged = merge_helmfiles(
//!     &[doc.to_string()],
//!     "envs/dev.yaml",
//!     "secrets/dev.yaml",
//!     None,
//! )?;
//! assert!(merged.contains("envs/dev.yaml"));
//! # Ok::<(), helmweave::core::HelmweaveError>(())
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod merge;
pub mod runner;
pub mod source;
pub mod utils;
