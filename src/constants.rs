//! Global constants used throughout the helmweave codebase.
//!
//! Catalog coordinates, HTTP settings, and naming defaults live here so that
//! the values are discoverable in one place instead of being scattered as
//! magic strings across the source and CLI modules.

use std::time::Duration;

/// Default GitHub repository hosting the helmfile catalog, as `owner/name`.
///
/// Overridable per invocation with `--repo`.
pub const DEFAULT_CATALOG_REPO: &str = "egovernments/helm-charts";

/// Directory inside the catalog repository that holds one subdirectory per
/// deployable module, each containing versioned helmfile documents.
pub const CATALOG_ROOT: &str = "helmfiles";

/// Base URL for the GitHub REST contents API.
pub const GITHUB_API_ROOT: &str = "https://api.github.com";

/// `User-Agent` sent with every GitHub API request.
///
/// GitHub rejects requests without one, so the client sets it unconditionally.
pub const USER_AGENT: &str = concat!("helmweave/", env!("CARGO_PKG_VERSION"));

/// Timeout applied to each catalog HTTP request (30 seconds).
///
/// Listing and fetching are small JSON/YAML payloads; anything slower than
/// this indicates a network problem worth surfacing instead of hanging.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// File extension a catalog entry must carry to count as a helmfile version.
pub const HELMFILE_EXTENSION: &str = ".yaml";

/// Prefix of the default output filename; a timestamp and extension complete it.
pub const OUTPUT_FILE_PREFIX: &str = "dynamic-helmfile-";

/// `chrono` format string for the timestamp embedded in default output names,
/// e.g. `dynamic-helmfile-20250114T093045.yaml`.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Environment variable that disables progress spinners when set.
pub const NO_PROGRESS_ENV: &str = "HELMWEAVE_NO_PROGRESS";
