//! Core types and functionality for helmweave
//!
//! This module forms the foundation of helmweave's type system. Today that
//! means error handling; the composition pipeline itself lives in [`crate::merge`]
//! and the collaborators it talks to live in [`crate::source`] and [`crate::runner`].
//!
//! # Error Management
//!
//! helmweave uses an error handling system designed for both developer
//! ergonomics and end-user experience:
//! - **Strongly-typed errors** ([`HelmweaveError`]) for precise handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions for CLI users
//! - **Automatic conversion** from common standard library and ecosystem errors
//! - **Contextual suggestions** tailored to the pipeline step that failed
//!
//! # Examples
//!
//! ```rust
//! use helmweave::core::{HelmweaveError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(HelmweaveError::HelmfileBinaryNotFound.into())
//! }
//!
//! fn handle_operation() {
//!     match example_operation() {
//!         Ok(result) => println!("Success: {}", result),
//!         Err(e) => {
//!             let friendly = user_friendly_error(e);
//!             friendly.display(); // Shows colored error with suggestions
//!         }
//!     }
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, HelmweaveError, IntoAnyhowWithContext, user_friendly_error};
