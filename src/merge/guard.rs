//! Masking and substitution of Go-template expressions.
//!
//! Source helmfiles are full of `{{ ... }}` expressions that are meaningful to
//! helmfile itself, not to us. Running them through a YAML parser as-is would
//! mangle or reject them, so before parsing every expression is rewritten to a
//! pair of sentinel markers that YAML treats as plain scalar text, and after
//! the merged document is serialized the markers are rewritten back. The text
//! between the delimiters is carried through untouched, which makes the
//! mask/unmask pair an exact round trip.
//!
//! The only expressions excluded from masking are the two environment-file
//! placeholders, `{{ env "ENV_FILE" }}` and `{{ env "SECRET_FILE" }}` (matched
//! case-insensitively and whitespace-tolerantly). Those are replaced with
//! caller-supplied paths by [`substitute_env_paths`] while the document is
//! still masked, so the replacement can never touch a guarded expression.
//!
//! # Scanning rule
//!
//! Expressions are found with a single left-to-right scan: each `{{` opens an
//! expression that ends at the next `}}`. Expressions may span lines but do
//! not nest; a literal `}}` inside an expression terminates the span early.
//! Helmfile templates in practice do not nest braces, so this limitation is
//! accepted and documented rather than handled. Text containing the marker
//! strings themselves would be corrupted by [`unmask`]; the markers are chosen
//! to be implausible in real helmfiles and no collision detection is done.

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

/// Marker substituted for `{{` in guarded expressions.
pub const TEMPLATE_OPEN_MARK: &str = "__HELM_TPL_OPEN__";

/// Marker substituted for `}}` in guarded expressions.
pub const TEMPLATE_CLOSE_MARK: &str = "__HELM_TPL_CLOSE__";

/// Matches a complete env-file placeholder expression, delimiters included.
fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)^\{\{\s*env\s*"(ENV_FILE|SECRET_FILE)"\s*\}\}$"#).expect("valid regex")
    })
}

fn env_file_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)\{\{\s*env\s*"ENV_FILE"\s*\}\}"#).expect("valid regex"))
}

fn secret_file_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)\{\{\s*env\s*"SECRET_FILE"\s*\}\}"#).expect("valid regex"))
}

/// Returns true if `expression` (delimiters included) is one of the two
/// env-file placeholders.
fn is_env_placeholder(expression: &str) -> bool {
    env_placeholder().is_match(expression.trim())
}

/// Replace every non-placeholder `{{ ... }}` expression with sentinel markers.
///
/// The expression body between the delimiters is preserved byte-for-byte, so
/// [`unmask`] restores the original text exactly. Env-file placeholders are
/// left untouched for [`substitute_env_paths`] to consume. An unterminated
/// `{{` and any stray `}}` are ordinary text and pass through unchanged.
///
/// # Examples
///
/// ```rust
/// use helmweave::merge::guard::{mask, unmask};
///
/// let text = "url: {{ .Values.host }}/api";
/// let masked = mask(text);
/// assert!(!masked.contains("{{"));
/// assert_eq!(unmask(&masked), text);
/// ```
#[must_use]
pub fn mask(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let Some(open) = rest.find("{{") else {
            out.push_str(rest);
            break;
        };
        let Some(close_offset) = rest[open + 2..].find("}}") else {
            // No terminator; the tail is ordinary text
            out.push_str(rest);
            break;
        };
        let close = open + 2 + close_offset;
        let expression = &rest[open..close + 2];

        out.push_str(&rest[..open]);
        if is_env_placeholder(expression) {
            out.push_str(expression);
        } else {
            out.push_str(TEMPLATE_OPEN_MARK);
            out.push_str(&rest[open + 2..close]);
            out.push_str(TEMPLATE_CLOSE_MARK);
        }
        rest = &rest[close + 2..];
    }

    out
}

/// Restore the `{{`/`}}` delimiters that [`mask`] replaced with markers.
#[must_use]
pub fn unmask(text: &str) -> String {
    text.replace(TEMPLATE_OPEN_MARK, "{{").replace(TEMPLATE_CLOSE_MARK, "}}")
}

/// Replace the two env-file placeholders with caller-supplied paths.
///
/// Matching is case-insensitive and whitespace-tolerant; the replacement is
/// inserted literally, so paths containing `$` are safe. A text with no
/// placeholder occurrences is returned unchanged. Call this on masked text:
/// guarded expressions can no longer match, which keeps substitution away
/// from anything that merely resembles a placeholder inside a larger
/// expression.
#[must_use]
pub fn substitute_env_paths(text: &str, env_file: &str, secrets_file: &str) -> String {
    let text = env_file_placeholder().replace_all(text, NoExpand(env_file));
    secret_file_placeholder().replace_all(&text, NoExpand(secrets_file)).into_owned()
}
