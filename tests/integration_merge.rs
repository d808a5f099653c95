//! End-to-end tests for the composition pipeline.
//!
//! These drive [`merge_helmfiles`] with realistic multi-category helmfile
//! documents, the way `compose` does after downloading a selection. Narrow
//! per-category behavior is covered by the unit tests inside `src/merge`;
//! this file checks the contracts a composed helmfile is trusted for:
//! template preservation, placeholder substitution, first-occurrence-wins
//! deduplication, fixed category order, and the custom-only bypass.

use helmweave::core::HelmweaveError;
use helmweave::merge::{HelmfileMerger, merge_helmfiles};

/// A catalog-style module helmfile: repository, defaults template, env-file
/// placeholders, and releases full of template expressions.
const CORE_MODULE: &str = r#"
repositories:
  - name: egov
    url: https://egovernments.github.io/helm-charts
templates:
  default:
    chart: egov/{{`{{ .Release.Name }}`}}
    namespace: egov
values:
  - {{ env "ENV_FILE" }}
secrets:
  - {{ env "SECRET_FILE" }}
releases:
  - name: gateway
    chart: egov/gateway
    values:
      - replicas: {{ .Values.gateway.replicas | default 1 }}
  - name: accounts
    chart: egov/accounts
"#;

/// A second module that overlaps with the first on every category.
const DSS_MODULE: &str = r#"
repositories:
  - name: egov
    url: https://mirror.example.org/helm-charts
templates:
  default:
    chart: mirror/{{`{{ .Release.Name }}`}}
    namespace: dss
values:
  - {{ env "ENV_FILE" }}
  - global:
      region: south
releases:
  - name: gateway
    chart: egov/gateway
    values:
      - replicas: {{ .Values.gateway.replicas | default 1 }}
  - name: dss-dashboard
    chart: egov/dss-dashboard
"#;

#[test]
fn test_compose_two_modules() {
    let merged = merge_helmfiles(
        &[CORE_MODULE.to_string(), DSS_MODULE.to_string()],
        "envs/uat.yaml",
        "secrets/uat.yaml",
        None,
    )
    .unwrap();

    // First occurrence of the shared repository name wins
    assert!(merged.contains("https://egovernments.github.io/helm-charts"));
    assert!(!merged.contains("mirror.example.org"));

    // First template body wins for the shared key
    assert!(merged.contains("namespace: egov"));
    assert!(!merged.contains("namespace: dss"));

    // The shared env-file value deduplicates; the extra value entry survives
    assert_eq!(merged.matches("envs/uat.yaml").count(), 1);
    assert!(merged.contains("region: south"));

    // Identical releases collapse; distinct ones all survive
    assert_eq!(merged.matches("name: gateway").count(), 1);
    assert!(merged.contains("name: accounts"));
    assert!(merged.contains("name: dss-dashboard"));
}

#[test]
fn test_category_order_and_pruning() {
    let merged = merge_helmfiles(
        &[CORE_MODULE.to_string()],
        "envs/uat.yaml",
        "secrets/uat.yaml",
        None,
    )
    .unwrap();

    let repositories = merged.find("repositories:").unwrap();
    let templates = merged.find("templates:").unwrap();
    let values = merged.find("values:").unwrap();
    let secrets = merged.find("secrets:").unwrap();
    let releases = merged.find("releases:").unwrap();
    assert!(repositories < templates);
    assert!(templates < values);
    assert!(values < secrets);
    assert!(secrets < releases);

    // A composition with no secrets anywhere emits no secrets key at all
    let no_secrets = merge_helmfiles(
        &[DSS_MODULE.to_string()],
        "envs/uat.yaml",
        "secrets/uat.yaml",
        None,
    )
    .unwrap();
    assert!(!no_secrets.contains("secrets:"));
}

#[test]
fn test_template_expressions_reach_output_unchanged() {
    let merged = merge_helmfiles(
        &[CORE_MODULE.to_string()],
        "envs/uat.yaml",
        "secrets/uat.yaml",
        None,
    )
    .unwrap();

    assert!(merged.contains("{{`{{ .Release.Name }}`}}"));
    assert!(merged.contains("{{ .Values.gateway.replicas | default 1 }}"));
    // No sentinel leaks past finalize
    assert!(!merged.contains("__HELM_TPL_OPEN__"));
    assert!(!merged.contains("__HELM_TPL_CLOSE__"));
}

#[test]
fn test_non_placeholder_expressions_are_never_substituted() {
    let doc = r#"
values:
  - {{ env "ENV_FILE" }}
releases:
  - name: svc
    chart: x/svc
    values:
      - conf: {{ required .Values.foo }}
      - fallback: {{ env "ENV_FILE" | default "x" }}
"#;
    let merged =
        merge_helmfiles(&[doc.to_string()], "/tmp/env.yaml", "/tmp/sec.yaml", None).unwrap();

    assert!(merged.contains("/tmp/env.yaml"));
    assert!(merged.contains("{{ required .Values.foo }}"));
    assert!(merged.contains(r#"{{ env "ENV_FILE" | default "x" }}"#));
}

#[test]
fn test_folding_a_document_twice_is_idempotent() {
    let once = merge_helmfiles(
        &[CORE_MODULE.to_string()],
        "envs/uat.yaml",
        "secrets/uat.yaml",
        None,
    )
    .unwrap();
    let twice = merge_helmfiles(
        &[CORE_MODULE.to_string(), CORE_MODULE.to_string()],
        "envs/uat.yaml",
        "secrets/uat.yaml",
        None,
    )
    .unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_input_order_decides_duplicate_survivors() {
    let forward = merge_helmfiles(
        &[CORE_MODULE.to_string(), DSS_MODULE.to_string()],
        "e.yaml",
        "s.yaml",
        None,
    )
    .unwrap();
    let reverse = merge_helmfiles(
        &[DSS_MODULE.to_string(), CORE_MODULE.to_string()],
        "e.yaml",
        "s.yaml",
        None,
    )
    .unwrap();

    assert!(forward.contains("egovernments.github.io"));
    assert!(!forward.contains("mirror.example.org"));
    assert!(reverse.contains("mirror.example.org"));
    assert!(!reverse.contains("egovernments.github.io"));
}

#[test]
fn test_custom_only_composition_is_verbatim() {
    // Not even valid YAML: the bypass must hand the text through untouched
    let custom = "releases:\n  - name: local\n    chart: ./charts/local\n  broken indent {{ half\n";
    let merged = merge_helmfiles(&[], "e.yaml", "s.yaml", Some(custom)).unwrap();
    assert_eq!(merged, custom);
}

#[test]
fn test_custom_document_has_lowest_priority() {
    let custom = r#"
repositories:
  - name: egov
    url: https://custom.example.org/charts
releases:
  - name: local-tool
    chart: ./charts/local-tool
"#;
    let merged = merge_helmfiles(
        &[CORE_MODULE.to_string()],
        "e.yaml",
        "s.yaml",
        Some(custom),
    )
    .unwrap();

    // The catalog's repository entry was folded first and wins
    assert!(merged.contains("egovernments.github.io"));
    assert!(!merged.contains("custom.example.org"));
    // The custom release is new and survives
    assert!(merged.contains("name: local-tool"));
}

#[test]
fn test_parse_failure_aborts_whole_merge() {
    let broken = "releases: [unterminated\n";
    let err = merge_helmfiles(
        &[CORE_MODULE.to_string(), broken.to_string()],
        "e.yaml",
        "s.yaml",
        None,
    )
    .unwrap_err();
    assert!(matches!(err, HelmweaveError::HelmfileParseError { .. }));
}

#[test]
fn test_merger_accumulates_across_folds() {
    let mut merger = HelmfileMerger::new("envs/uat.yaml", "secrets/uat.yaml");
    merger.fold(CORE_MODULE).unwrap();
    merger.fold(DSS_MODULE).unwrap();
    let merged = merger.finalize().unwrap();

    assert!(merged.contains("name: accounts"));
    assert!(merged.contains("name: dss-dashboard"));
    assert_eq!(merged.matches("name: gateway").count(), 1);
}
