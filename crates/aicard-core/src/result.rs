//! # Validation Results — Collected Issues with Paths and Severities
//!
//! Defines `Issue` and `ValidationResult`, the aggregation vehicle for every
//! structural and invariant check in the engine.
//!
//! ## Design
//!
//! Validation never short-circuits: a caller receives the complete list of
//! problems from one call. Each issue carries a JSON-Pointer path into the
//! offending document, a severity (`Error` fails the document, `Warning`
//! tolerates a deprecated-but-accepted shape), and a kind separating schema
//! violations from cross-field invariant violations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How severe an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A violation — the document is invalid.
    Error,
    /// A tolerated legacy or deprecated shape — the document remains valid.
    Warning,
}

/// Which stage of checking produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Missing or mistyped field, or an extension payload violation.
    Schema,
    /// A cross-field consistency rule violation.
    Invariant,
}

/// A single validation issue with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// JSON-Pointer path to the offending field (empty string for the root).
    pub path: String,
    /// Human-readable description of the problem.
    pub message: String,
    /// Whether this fails the document or merely flags it.
    pub severity: Severity,
    /// Schema violation vs invariant violation.
    pub kind: IssueKind,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        if self.path.is_empty() {
            write!(f, "  [{tag}] (root): {}", self.message)
        } else {
            write!(f, "  [{tag}] {}: {}", self.path, self.message)
        }
    }
}

/// The aggregate outcome of validating one document.
///
/// `valid()` is derived: a result with only warnings is still valid.
/// Issue order is deterministic — callers append in a fixed traversal
/// order, so two runs over the same document produce identical lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    issues: Vec<Issue>,
}

impl ValidationResult {
    /// An empty (valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no error-severity issue was collected.
    pub fn valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// All collected issues, in collection order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes self and returns the inner list.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Error).count()
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Warning).count()
    }

    /// Append a raw issue.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Record a schema violation at `path`.
    pub fn schema_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
            kind: IssueKind::Schema,
        });
    }

    /// Record a tolerated legacy/deprecated shape at `path`.
    pub fn schema_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
            kind: IssueKind::Schema,
        });
    }

    /// Record a cross-field invariant violation at `path`.
    pub fn invariant_violation(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
            kind: IssueKind::Invariant,
        });
    }

    /// Record a non-fatal invariant deviation (e.g., catalog staleness).
    pub fn invariant_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
            kind: IssueKind::Invariant,
        });
    }

    /// Merge another result's issues onto the end of this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.issues.extend(other.issues);
    }

    /// Merge another result's issues, re-tagging each path under `prefix`.
    ///
    /// Used to lift extension-validator issues into document scope:
    /// a payload issue at `/tools/0/description` merged with prefix
    /// `/services/2/protocolSpecific` lands at
    /// `/services/2/protocolSpecific/tools/0/description`.
    pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationResult) {
        for mut issue in other.issues {
            issue.path = if issue.path.is_empty() {
                prefix.to_string()
            } else {
                format!("{prefix}{}", issue.path)
            };
            self.issues.push(issue);
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_valid() {
        let r = ValidationResult::new();
        assert!(r.valid());
        assert!(r.issues().is_empty());
    }

    #[test]
    fn test_error_invalidates() {
        let mut r = ValidationResult::new();
        r.schema_error("/name", "\"name\" is a required property");
        assert!(!r.valid());
        assert_eq!(r.error_count(), 1);
    }

    #[test]
    fn test_warning_only_still_valid() {
        let mut r = ValidationResult::new();
        r.schema_warning("/services/0/endpoint", "legacy singular endpoint");
        assert!(r.valid());
        assert_eq!(r.warning_count(), 1);
        assert_eq!(r.error_count(), 0);
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut a = ValidationResult::new();
        a.schema_error("/id", "missing");
        let mut b = ValidationResult::new();
        b.invariant_violation("/trust/identity/id", "mismatch");
        a.merge(b);
        assert_eq!(a.issues()[0].path, "/id");
        assert_eq!(a.issues()[1].path, "/trust/identity/id");
    }

    #[test]
    fn test_merge_prefixed_retags_paths() {
        let mut payload = ValidationResult::new();
        payload.schema_error("/tools/0/description", "\"description\" is a required property");
        let mut doc = ValidationResult::new();
        doc.merge_prefixed("/services/2/protocolSpecific", payload);
        assert_eq!(
            doc.issues()[0].path,
            "/services/2/protocolSpecific/tools/0/description"
        );
    }

    #[test]
    fn test_merge_prefixed_empty_path_becomes_prefix() {
        let mut payload = ValidationResult::new();
        payload.schema_error("", "payload must be an object");
        let mut doc = ValidationResult::new();
        doc.merge_prefixed("/services/0/protocolSpecific", payload);
        assert_eq!(doc.issues()[0].path, "/services/0/protocolSpecific");
    }

    #[test]
    fn test_issue_display_format() {
        let mut r = ValidationResult::new();
        r.schema_error("/createdAt", "expected a string");
        let display = r.to_string();
        assert!(display.contains("[error]"));
        assert!(display.contains("/createdAt"));
    }

    #[test]
    fn test_issue_display_root() {
        let mut r = ValidationResult::new();
        r.schema_error("", "document must be a JSON object");
        assert!(r.to_string().contains("(root)"));
    }

    #[test]
    fn test_kind_distinguishes_channels() {
        let mut r = ValidationResult::new();
        r.schema_error("/x", "schema");
        r.invariant_violation("/y", "invariant");
        assert_eq!(r.issues()[0].kind, IssueKind::Schema);
        assert_eq!(r.issues()[1].kind, IssueKind::Invariant);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut r = ValidationResult::new();
        r.schema_warning("/specVersion", "unsupported-version");
        let json = serde_json::to_string(&r).unwrap();
        let parsed: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, parsed);
    }
}
