//! Shared utilities
//!
//! Currently just [`progress`], the spinner layer used while listing the
//! catalog and downloading helmfiles.

pub mod progress;

pub use progress::ProgressBar;
