//! Catalog access over the GitHub contents API.
//!
//! The helmfile catalog is a directory tree inside a GitHub repository: one
//! subdirectory per deployable module under the catalog root, each holding
//! versioned helmfile documents. [`GithubSource`] wraps the three operations
//! the CLI needs against that tree:
//!
//! - [`GithubSource::list_modules`] - the module directories
//! - [`GithubSource::list_helmfiles`] - the helmfile versions inside a module
//! - [`GithubSource::fetch_helmfile`] - the raw text of one helmfile
//!
//! Fetching is a two-step exchange: the contents API returns a JSON entry
//! whose `download_url` points at the raw file, pinned to the requested
//! branch. Every request carries the crate's `User-Agent` (GitHub rejects
//! requests without one) and, when configured, a `token` authorization header
//! and a `ref` query parameter. Failures are fatal for the run and are mapped
//! to errors labelled with the step that failed; nothing is retried.

use crate::constants::{CATALOG_ROOT, GITHUB_API_ROOT, HELMFILE_EXTENSION, HTTP_TIMEOUT, USER_AGENT};
use crate::core::HelmweaveError;
use serde::Deserialize;
use tracing::debug;

/// One entry of a GitHub contents listing, reduced to the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    /// File or directory name
    pub name: String,
    /// Entry kind as reported by the API: `file`, `dir`, `symlink`, or `submodule`
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Raw download URL; present for files, null for directories
    pub download_url: Option<String>,
}

/// A helmfile version available inside a catalog module.
#[derive(Debug, Clone)]
pub struct RemoteHelmfile {
    /// The helmfile filename, e.g. `v1.7.yaml`
    pub name: String,
    /// Raw download URL reported by the directory listing
    pub download_url: Option<String>,
}

/// Client for one catalog repository.
///
/// Holds a configured [`reqwest::Client`] plus the repository coordinates, so
/// every operation in a run shares the same connection pool, timeout, and
/// credentials.
pub struct GithubSource {
    client: reqwest::Client,
    repo: String,
    branch: Option<String>,
    token: Option<String>,
}

impl GithubSource {
    /// Create a client for `repo` (as `owner/name`).
    ///
    /// `branch` pins listings and downloads to a ref other than the
    /// repository default; `token` authenticates against private
    /// repositories and raises rate limits.
    pub fn new(
        repo: impl Into<String>,
        branch: Option<String>,
        token: Option<String>,
    ) -> Result<Self, HelmweaveError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| HelmweaveError::NetworkError {
                operation: "building HTTP client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            repo: repo.into(),
            branch,
            token,
        })
    }

    /// The repository this source reads from, as `owner/name`.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// List the module directories in the catalog, in API order.
    pub async fn list_modules(&self) -> Result<Vec<String>, HelmweaveError> {
        let url = self.contents_url("");
        debug!("Listing catalog modules from {}", url);

        let fail = |reason: String| HelmweaveError::ModuleListFailed {
            repo: self.repo.clone(),
            reason,
        };

        let response = self.api_get(&url).await.map_err(|e| fail(e.to_string()))?;
        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }

        let entries: Vec<ContentEntry> = response.json().await.map_err(|e| fail(e.to_string()))?;
        Ok(entries.into_iter().filter(|e| e.entry_type == "dir").map(|e| e.name).collect())
    }

    /// List the helmfile versions inside `module`, in API order.
    ///
    /// Only regular files with the helmfile extension count; anything else in
    /// the directory (readmes, nested directories) is ignored. A 404 from the
    /// API means the module directory does not exist and maps to
    /// [`HelmweaveError::ModuleNotFound`].
    pub async fn list_helmfiles(
        &self,
        module: &str,
    ) -> Result<Vec<RemoteHelmfile>, HelmweaveError> {
        let url = self.contents_url(module);
        debug!("Listing helmfiles for module '{}' from {}", module, url);

        let fail = |reason: String| HelmweaveError::HelmfileListFailed {
            module: module.to_string(),
            reason,
        };

        let response = self.api_get(&url).await.map_err(|e| fail(e.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(HelmweaveError::ModuleNotFound {
                name: module.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }

        let entries: Vec<ContentEntry> = response.json().await.map_err(|e| fail(e.to_string()))?;
        Ok(helmfile_entries(entries))
    }

    /// Fetch the raw text of one helmfile.
    ///
    /// Resolves the file's content entry first, then follows its
    /// `download_url`. Both requests are pinned to the configured branch.
    pub async fn fetch_helmfile(&self, module: &str, name: &str) -> Result<String, HelmweaveError> {
        let url = self.contents_url(&format!("{module}/{name}"));
        debug!("Downloading helmfile '{}' from module '{}'", name, module);

        let fail = |reason: String| HelmweaveError::HelmfileFetchFailed {
            module: module.to_string(),
            file: name.to_string(),
            reason,
        };

        let response = self.api_get(&url).await.map_err(|e| fail(e.to_string()))?;
        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }
        let entry: ContentEntry = response.json().await.map_err(|e| fail(e.to_string()))?;
        let Some(download_url) = entry.download_url else {
            return Err(fail("content entry has no download URL".to_string()));
        };

        let mut request = self.client.get(&download_url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }
        let raw = request.send().await.map_err(|e| fail(e.to_string()))?;
        if !raw.status().is_success() {
            return Err(fail(format!("HTTP {} from download URL", raw.status())));
        }
        raw.text().await.map_err(|e| fail(e.to_string()))
    }

    /// Contents API URL for a path under the catalog root.
    fn contents_url(&self, subpath: &str) -> String {
        if subpath.is_empty() {
            format!("{GITHUB_API_ROOT}/repos/{}/contents/{CATALOG_ROOT}", self.repo)
        } else {
            format!("{GITHUB_API_ROOT}/repos/{}/contents/{CATALOG_ROOT}/{subpath}", self.repo)
        }
    }

    /// Request builder for an API URL with the standard headers and the `ref` pin.
    fn api_request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url).header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }
        if let Some(branch) = &self.branch {
            request = request.query(&[("ref", branch.as_str())]);
        }
        request
    }

    async fn api_get(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.api_request(url).send().await
    }
}

/// Keep the regular `.yaml` files of a directory listing, as [`RemoteHelmfile`]s.
fn helmfile_entries(entries: Vec<ContentEntry>) -> Vec<RemoteHelmfile> {
    entries
        .into_iter()
        .filter(|e| e.entry_type == "file" && e.name.ends_with(HELMFILE_EXTENSION))
        .map(|e| RemoteHelmfile {
            name: e.name,
            download_url: e.download_url,
        })
        .collect()
}
