//! # Compliance Report
//!
//! Shared regulatory-compliance report type used by every assessment engine.
//! A report is three ordered lists built by evaluating each applicable
//! regulatory rule against the derived metrics: hard violations, advisory
//! warnings, and items found compliant.
//!
//! The ordering of entries is the rule evaluation order of the producing
//! engine, which is stable across invocations.
//!
//! ## Example
//!
//! ```rust
//! use safety_core::compliance::ComplianceReport;
//!
//! let mut report = ComplianceReport::new();
//! report.violation("Free fall distance exceeds OSHA limit of 1.8m (6ft)");
//! report.compliant("Impact force within OSHA limits");
//!
//! assert!(!report.is_compliant());
//! assert!(!report.has_warnings());
//! ```

use serde::{Deserialize, Serialize};

/// Outcome of evaluating an engine's regulatory rule set.
///
/// Invariant: `is_compliant()` is true exactly when `violations` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Hard rule failures requiring corrective action
    pub violations: Vec<String>,

    /// Advisory findings that do not fail the assessment
    pub warnings: Vec<String>,

    /// Rules that were checked and passed
    pub compliant: Vec<String>,
}

impl ComplianceReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn violation(&mut self, message: impl Into<String>) {
        self.violations.push(message.into());
    }

    /// Record a warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Record a passed check
    pub fn compliant(&mut self, message: impl Into<String>) {
        self.compliant.push(message.into());
    }

    /// True when no violations were recorded
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    /// True when at least one warning was recorded
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_compliant() {
        let report = ComplianceReport::new();
        assert!(report.is_compliant());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_compliance_tracks_violations_only() {
        let mut report = ComplianceReport::new();
        report.warning("approaching limit");
        assert!(report.is_compliant());
        assert!(report.has_warnings());

        report.violation("over limit");
        assert!(!report.is_compliant());
    }

    #[test]
    fn test_entry_order_preserved() {
        let mut report = ComplianceReport::new();
        report.violation("first");
        report.violation("second");
        assert_eq!(report.violations, vec!["first", "second"]);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut report = ComplianceReport::new();
        report.violation("v");
        report.warning("w");
        report.compliant("c");

        let json = serde_json::to_string(&report).unwrap();
        let roundtrip: ComplianceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, roundtrip);
    }
}
