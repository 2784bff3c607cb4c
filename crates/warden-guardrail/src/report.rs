//! Validation report types

use crate::guardrail::GuardrailId;
use serde::{Deserialize, Serialize};

/// Severity class of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Must be fixed before deployment
    Error,
    /// Should be reviewed
    Warning,
    /// Worth knowing
    Info,
}

/// What aspect of the rule set an issue concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// A required category or rule is absent
    Missing,
    /// A guardrail lacks required fields
    Incomplete,
    /// Duplicate guardrails
    Redundant,
    /// Configuration unlikely to work in practice
    Infeasible,
    /// Rules working against each other
    Conflict,
}

/// One validator finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue class
    pub kind: IssueKind,
    /// Affected aspect
    pub category: IssueCategory,
    /// Offending guardrail, when attributable
    pub guardrail_id: Option<GuardrailId>,
    /// Human-readable finding
    pub message: String,
}

impl ValidationIssue {
    /// Build an issue without a guardrail attribution.
    #[must_use]
    pub fn new(kind: IssueKind, category: IssueCategory, message: impl Into<String>) -> Self {
        ValidationIssue {
            kind,
            category,
            guardrail_id: None,
            message: message.into(),
        }
    }

    /// Attach the offending guardrail.
    #[must_use]
    pub fn for_guardrail(mut self, id: GuardrailId) -> Self {
        self.guardrail_id = Some(id);
        self
    }
}

/// Coverage percentage (0..=100) per validated dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Baseline critical rules
    pub critical: u8,
    /// Security rules
    pub security: u8,
    /// Performance rules
    pub performance: u8,
    /// Cost rules
    pub cost: u8,
    /// Data-governance rules
    pub governance: u8,
    /// Fairness/ethics rules
    pub ethical: u8,
}

impl CoverageReport {
    /// Mean coverage across the six dimensions.
    #[must_use]
    pub fn average(&self) -> f64 {
        f64::from(
            u16::from(self.critical)
                + u16::from(self.security)
                + u16::from(self.performance)
                + u16::from(self.cost)
                + u16::from(self.governance)
                + u16::from(self.ethical),
        ) / 6.0
    }
}

/// The validator's verdict on a synthesized rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Weighted score in 0..=100
    pub score: u8,
    /// Whether no errors were found
    pub is_valid: bool,
    /// Every finding
    pub issues: Vec<ValidationIssue>,
    /// Per-dimension coverage
    pub coverage: CoverageReport,
    /// Follow-up actions
    pub recommendations: Vec<String>,
}

impl ValidationReport {
    /// Count of issues of a given kind.
    #[must_use]
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_average() {
        let coverage = CoverageReport {
            critical: 100,
            security: 50,
            performance: 0,
            cost: 100,
            governance: 50,
            ethical: 0,
        };
        assert!((coverage.average() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn issue_counting() {
        let report = ValidationReport {
            score: 80,
            is_valid: false,
            issues: vec![
                ValidationIssue::new(IssueKind::Error, IssueCategory::Missing, "missing rule"),
                ValidationIssue::new(IssueKind::Warning, IssueCategory::Redundant, "duplicate"),
                ValidationIssue::new(IssueKind::Warning, IssueCategory::Infeasible, "tight limit"),
            ],
            coverage: CoverageReport::default(),
            recommendations: Vec::new(),
        };

        assert_eq!(report.count(IssueKind::Error), 1);
        assert_eq!(report.count(IssueKind::Warning), 2);
        assert_eq!(report.count(IssueKind::Info), 0);
    }
}
