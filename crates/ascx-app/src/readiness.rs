// Rust guideline compliant 2026-10-12

//! Readiness reports: ordered, severity-classified issues and a verdict.

use serde::Serialize;

/// Issue severity. Only errors affect readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Returns the lowercase label used in output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// One finding of a readiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessIssue {
    /// Name of the check that produced the issue.
    pub check: String,
    pub severity: Severity,
    pub message: String,
}

/// Result of a readiness run against a target.
///
/// Issues keep the order in which checks ran. The counts and the ready flag
/// are maintained as issues are appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport<T> {
    /// Identity of what was validated.
    #[serde(flatten)]
    pub target: T,
    pub issues: Vec<ReadinessIssue>,
    pub error_count: usize,
    pub warning_count: usize,
    pub ready: bool,
}

impl<T> ReadinessReport<T> {
    /// Creates an empty report; it is ready until an error is added.
    pub fn new(target: T) -> Self {
        Self {
            target,
            issues: Vec::new(),
            error_count: 0,
            warning_count: 0,
            ready: true,
        }
    }

    /// Appends an issue and updates the counts and verdict.
    pub fn add(&mut self, check: &str, severity: Severity, message: impl Into<String>) {
        match severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.issues.push(ReadinessIssue {
            check: check.to_string(),
            severity,
            message: message.into(),
        });
        self.ready = self.error_count == 0;
    }

    /// Appends a blocking issue.
    pub fn add_error(&mut self, check: &str, message: impl Into<String>) {
        self.add(check, Severity::Error, message);
    }

    /// Appends an informational issue.
    pub fn add_warning(&mut self, check: &str, message: impl Into<String>) {
        self.add(check, Severity::Warning, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Target {
        app_id: String,
    }

    fn report() -> ReadinessReport<Target> {
        ReadinessReport::new(Target {
            app_id: "app-1".to_string(),
        })
    }

    #[test]
    fn test_warnings_do_not_affect_ready() {
        let mut report = report();
        report.add_warning("keywords", "locale en-US: keywords are empty");
        assert!(report.ready);
        assert_eq!(report.warning_count, 1);
        assert_eq!(report.error_count, 0);
    }

    #[test]
    fn test_errors_clear_ready_and_keep_order() {
        let mut report = report();
        report.add_warning("b", "second");
        report.add_error("a", "first");
        assert!(!report.ready);
        let checks: Vec<_> = report.issues.iter().map(|i| i.check.as_str()).collect();
        assert_eq!(checks, vec!["b", "a"]);
    }

    #[test]
    fn test_serializes_flat_target() {
        let mut report = report();
        report.add_error("build", "no build attached to this version");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["appId"], "app-1");
        assert_eq!(json["errorCount"], 1);
        assert_eq!(json["warningCount"], 0);
        assert_eq!(json["ready"], false);
        assert_eq!(json["issues"][0]["severity"], "error");
    }
}
