//! Helmfile composition engine.
//!
//! This module folds any number of source helmfile documents into a single
//! deployable helmfile. Each source document passes through the same pipeline:
//! template expressions are masked ([`guard`]), the two env-file placeholders
//! are substituted with caller paths, the result is parsed as YAML, and its
//! recognized top-level categories are folded into the accumulator. Finalizing
//! serializes the accumulated categories in a fixed order and restores the
//! masked template expressions.
//!
//! # Categories
//!
//! Five top-level keys are recognized; everything else in a source document is
//! discarded. Within each category the first occurrence of an entry wins and
//! later duplicates are dropped entirely:
//!
//! | Category       | Duplicate key                                  |
//! |----------------|------------------------------------------------|
//! | `repositories` | the entry's `name` field                       |
//! | `templates`    | the mapping key                                |
//! | `values`       | the entry's canonical string form              |
//! | `secrets`      | the entry's canonical string form              |
//! | `releases`     | a fingerprint of the complete release structure |
//!
//! Two releases that share a `name` but differ anywhere in their structure are
//! both kept; only byte-equivalent releases (after key-order canonicalization)
//! collapse. The merged document lists categories in the order `repositories`,
//! `templates`, `values`, `secrets`, `releases`, omitting empty ones.
//!
//! # Entry point
//!
//! [`merge_helmfiles`] drives the whole engine and implements the custom-only
//! bypass: when no catalog documents are given but a custom helmfile is, the
//! custom text is returned verbatim without entering the pipeline at all.

pub mod guard;

use crate::core::HelmweaveError;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

/// Accumulator that folds source helmfiles into one merged document.
///
/// Create one with [`HelmfileMerger::new`], feed it documents in order with
/// [`fold`], and produce the merged text with [`finalize`]. `finalize` takes
/// the merger by value, so a finished merger cannot accidentally keep
/// collecting.
///
/// [`fold`]: HelmfileMerger::fold
/// [`finalize`]: HelmfileMerger::finalize
///
/// # Examples
///
/// ```rust
/// use helmweave::merge::HelmfileMerger;
///
/// let mut merger = HelmfileMerger::new("envs/dev.yaml", "secrets/dev.yaml");
/// merger.fold("repositories:\n  - name: egov\n    url: https://example.org/charts\n")?;
/// let merged = merger.finalize()?;
/// assert!(merged.contains("name: egov"));
/// # Ok::<(), helmweave::core::HelmweaveError>(())
/// ```
pub struct HelmfileMerger {
    env_file: String,
    secrets_file: String,
    repositories: Vec<Value>,
    seen_repositories: HashSet<String>,
    templates: Mapping,
    seen_templates: HashSet<String>,
    values: Vec<Value>,
    seen_values: HashSet<String>,
    secrets: Vec<Value>,
    seen_secrets: HashSet<String>,
    releases: Vec<Value>,
    seen_releases: HashSet<String>,
}

impl HelmfileMerger {
    /// Create an empty merger that substitutes the given paths for the
    /// `ENV_FILE` and `SECRET_FILE` placeholders of every folded document.
    #[must_use]
    pub fn new(env_file: impl Into<String>, secrets_file: impl Into<String>) -> Self {
        Self {
            env_file: env_file.into(),
            secrets_file: secrets_file.into(),
            repositories: Vec::new(),
            seen_repositories: HashSet::new(),
            templates: Mapping::new(),
            seen_templates: HashSet::new(),
            values: Vec::new(),
            seen_values: HashSet::new(),
            secrets: Vec::new(),
            seen_secrets: HashSet::new(),
            releases: Vec::new(),
            seen_releases: HashSet::new(),
        }
    }

    /// Fold one source helmfile into the accumulator.
    ///
    /// The raw text is masked, has its env-file placeholders substituted, and
    /// is then parsed as YAML. A null document (empty file) contributes
    /// nothing; a document whose root is not a mapping is a parse error. A
    /// category field with an unexpected shape is logged and treated as empty
    /// without failing the document's other categories.
    pub fn fold(&mut self, raw: &str) -> Result<(), HelmweaveError> {
        let masked = guard::mask(raw);
        let substituted = guard::substitute_env_paths(&masked, &self.env_file, &self.secrets_file);
        let doc: Value = serde_yaml::from_str(&substituted).map_err(|e| {
            HelmweaveError::HelmfileParseError {
                reason: e.to_string(),
            }
        })?;

        if doc.is_null() {
            return Ok(());
        }
        let Some(map) = doc.as_mapping() else {
            return Err(HelmweaveError::HelmfileParseError {
                reason: format!("document root must be a mapping, got {}", value_kind(&doc)),
            });
        };

        for (key, value) in map {
            match key.as_str() {
                Some("repositories") => self.fold_repositories(value)?,
                Some("templates") => self.fold_templates(value)?,
                Some("values") => {
                    fold_scalar_list(value, &mut self.seen_values, &mut self.values, "values")?;
                }
                Some("secrets") => {
                    fold_scalar_list(value, &mut self.seen_secrets, &mut self.secrets, "secrets")?;
                }
                Some("releases") => self.fold_releases(value)?,
                _ => {
                    tracing::debug!("discarding unrecognized top-level key {:?}", key);
                }
            }
        }
        Ok(())
    }

    fn fold_repositories(&mut self, value: &Value) -> Result<(), HelmweaveError> {
        let Some(entries) = value.as_sequence() else {
            tracing::debug!("repositories is {}, treating as empty", value_kind(value));
            return Ok(());
        };
        for entry in entries {
            if entry.as_mapping().is_none() {
                tracing::debug!("skipping non-mapping repository entry");
                continue;
            }
            let key = match entry.get("name") {
                None | Some(Value::Null) => {
                    tracing::debug!("skipping repository entry without a name");
                    continue;
                }
                Some(Value::String(s)) if s.is_empty() => {
                    tracing::debug!("skipping repository entry with an empty name");
                    continue;
                }
                Some(name) => dedup_key(name)?,
            };
            if self.seen_repositories.insert(key) {
                self.repositories.push(entry.clone());
            }
        }
        Ok(())
    }

    fn fold_templates(&mut self, value: &Value) -> Result<(), HelmweaveError> {
        let Some(entries) = value.as_mapping() else {
            tracing::debug!("templates is {}, treating as empty", value_kind(value));
            return Ok(());
        };
        for (key, template) in entries {
            if self.seen_templates.insert(dedup_key(key)?) {
                self.templates.insert(key.clone(), template.clone());
            }
        }
        Ok(())
    }

    fn fold_releases(&mut self, value: &Value) -> Result<(), HelmweaveError> {
        let Some(entries) = value.as_sequence() else {
            tracing::debug!("releases is {}, treating as empty", value_kind(value));
            return Ok(());
        };
        for entry in entries {
            if entry.as_mapping().is_none() {
                tracing::debug!("skipping non-mapping release entry");
                continue;
            }
            if self.seen_releases.insert(fingerprint(entry)?) {
                self.releases.push(entry.clone());
            }
        }
        Ok(())
    }

    /// Serialize the accumulated categories into the merged helmfile text.
    ///
    /// Categories appear in the fixed order `repositories`, `templates`,
    /// `values`, `secrets`, `releases`; empty categories are omitted. Masked
    /// template expressions are restored as the final step, after
    /// serialization, so the emitted text carries them byte-for-byte.
    pub fn finalize(self) -> Result<String, HelmweaveError> {
        let mut merged = Mapping::new();
        if !self.repositories.is_empty() {
            merged.insert(Value::from("repositories"), Value::Sequence(self.repositories));
        }
        if !self.templates.is_empty() {
            merged.insert(Value::from("templates"), Value::Mapping(self.templates));
        }
        if !self.values.is_empty() {
            merged.insert(Value::from("values"), Value::Sequence(self.values));
        }
        if !self.secrets.is_empty() {
            merged.insert(Value::from("secrets"), Value::Sequence(self.secrets));
        }
        if !self.releases.is_empty() {
            merged.insert(Value::from("releases"), Value::Sequence(self.releases));
        }

        let rendered = serde_yaml::to_string(&Value::Mapping(merged))?;
        Ok(guard::unmask(&rendered))
    }
}

/// Merge ordered source helmfiles into one deployable document.
///
/// Documents are folded in slice order; `custom`, when given, is folded last
/// so catalog entries win duplicate conflicts against it. When `texts` is
/// empty and `custom` is present, the custom text is returned verbatim and
/// the merge pipeline is bypassed entirely (no masking, substitution, or
/// parsing happens to it).
///
/// # Examples
///
/// ```rust
/// use helmweave::merge::merge_helmfiles;
///
/// let doc = r#"releases:
///   - name: web
///     chart: egov/web
///     values:
///       - {{ env "ENV_FILE" }}
/// "#
/// .to_string();
///
/// let merged = merge_helmfiles(&[doc], "envs/dev.yaml", "secrets/dev.yaml", None)?;
/// assert!(merged.contains("envs/dev.yaml"));
/// # Ok::<(), helmweave::core::HelmweaveError>(())
/// ```
pub fn merge_helmfiles(
    texts: &[String],
    env_file: &str,
    secrets_file: &str,
    custom: Option<&str>,
) -> Result<String, HelmweaveError> {
    if texts.is_empty() {
        if let Some(custom) = custom {
            tracing::debug!("no catalog helmfiles selected, using custom helmfile verbatim");
            return Ok(custom.to_string());
        }
    }

    let mut merger = HelmfileMerger::new(env_file, secrets_file);
    for raw in texts {
        merger.fold(raw)?;
    }
    if let Some(custom) = custom {
        merger.fold(custom)?;
    }
    merger.finalize()
}

/// Fold a `values` or `secrets` sequence, deduplicating by canonical string form.
fn fold_scalar_list(
    value: &Value,
    seen: &mut HashSet<String>,
    out: &mut Vec<Value>,
    category: &str,
) -> Result<(), HelmweaveError> {
    let Some(entries) = value.as_sequence() else {
        tracing::debug!("{} is {}, treating as empty", category, value_kind(value));
        return Ok(());
    };
    for entry in entries {
        if seen.insert(dedup_key(entry)?) {
            out.push(entry.clone());
        }
    }
    Ok(())
}

/// Canonical string form of a value, used as a duplicate-detection key.
///
/// Scalars map to their display string; structured values map to their
/// key-order-canonicalized YAML serialization, so two mappings with the same
/// content in a different key order count as duplicates.
fn dedup_key(value: &Value) -> Result<String, HelmweaveError> {
    Ok(match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => fingerprint(other)?,
    })
}

/// Serialized fingerprint of a value with mapping keys sorted recursively.
fn fingerprint(value: &Value) -> Result<String, HelmweaveError> {
    Ok(serde_yaml::to_string(&canonicalized(value))?)
}

fn canonicalized(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut entries: Vec<(Value, Value)> =
                map.iter().map(|(k, v)| (k.clone(), canonicalized(v))).collect();
            entries.sort_by_key(|(k, _)| key_ordinal(k));
            Value::Mapping(entries.into_iter().collect())
        }
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(canonicalized).collect()),
        other => other.clone(),
    }
}

fn key_ordinal(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => format!("{other:?}"),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
