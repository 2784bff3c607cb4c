//! Typed assessment intake model
//!
//! The intake forms deliver a deeply optional record. Rather than chasing
//! optional chains through the pipeline, every section is a typed sub-struct
//! with documented defaults, and all optionality is resolved once at
//! construction time via [`Assessment::normalize`].

use crate::error::AssessmentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named assessment sections. Also serve as context-graph node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Model/infrastructure feasibility
    Technical,
    /// Business viability and operational requirements
    Business,
    /// Ethical impact and governance posture
    Ethical,
    /// Named technical/business/model risks
    Risk,
    /// Data readiness and sensitivity
    Data,
    /// Roadmap position and maturity
    Roadmap,
    /// Budget and token economics
    Budget,
    /// Compliance obligations (derived target, has no intake form)
    Compliance,
}

impl Section {
    /// Sections that carry intake data (Compliance is derived).
    pub const INTAKE: [Section; 7] = [
        Section::Technical,
        Section::Business,
        Section::Ethical,
        Section::Risk,
        Section::Data,
        Section::Roadmap,
        Section::Budget,
    ];

    /// Stable string id used in graph nodes and trace output.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Section::Technical => "technical",
            Section::Business => "business",
            Section::Ethical => "ethical",
            Section::Risk => "risk",
            Section::Data => "data",
            Section::Roadmap => "roadmap",
            Section::Budget => "budget",
            Section::Compliance => "compliance",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// How essential the system is to the deploying organization.
///
/// Unset criticality normalizes to `Standard` (not mission-critical).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemCriticality {
    /// Routine internal tooling
    #[default]
    Standard,
    /// Degradation hurts the business but is survivable
    BusinessCritical,
    /// Failure is unacceptable; selects the conservative resolution strategy
    MissionCritical,
}

/// Declared blast radius of a system failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureImpact {
    /// Inconvenience only
    #[default]
    Minor,
    /// Recoverable business impact
    Moderate,
    /// Serious harm to users or the business
    Severe,
    /// Irreversible harm
    Catastrophic,
}

/// Project lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectPhase {
    /// Exploring the problem space
    #[default]
    Discovery,
    /// Validating feasibility
    ProofOfConcept,
    /// Limited real users
    Pilot,
    /// Fully deployed
    Production,
    /// Post-deployment tuning
    Optimization,
}

impl ProjectPhase {
    /// Next phase on the standard evolution path, if any.
    #[must_use]
    pub fn next(&self) -> Option<ProjectPhase> {
        match self {
            ProjectPhase::Discovery => Some(ProjectPhase::ProofOfConcept),
            ProjectPhase::ProofOfConcept => Some(ProjectPhase::Pilot),
            ProjectPhase::Pilot => Some(ProjectPhase::Production),
            ProjectPhase::Production => Some(ProjectPhase::Optimization),
            ProjectPhase::Optimization => None,
        }
    }

    /// Early phases get stricter oversight defaults.
    #[must_use]
    pub fn is_early(&self) -> bool {
        matches!(self, ProjectPhase::Discovery | ProjectPhase::ProofOfConcept)
    }
}

/// Probability/impact rating for a named risk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskRating {
    /// Not present
    None,
    /// Unlikely / negligible
    #[default]
    Low,
    /// Plausible / noticeable
    Medium,
    /// Likely / serious
    High,
    /// Near-certain / severe
    Critical,
}

impl RiskRating {
    /// 1..=5 score used by the risk-priority tables.
    #[must_use]
    pub fn score(&self) -> u8 {
        match self {
            RiskRating::None => 1,
            RiskRating::Low => 2,
            RiskRating::Medium => 3,
            RiskRating::High => 4,
            RiskRating::Critical => 5,
        }
    }
}

/// A named risk with probability and impact ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskItem {
    /// Short risk name
    pub risk: String,
    /// How likely it is to materialize
    #[serde(default)]
    pub probability: RiskRating,
    /// How bad it is if it does
    #[serde(default)]
    pub impact: RiskRating,
}

impl RiskItem {
    /// Combined 1..=5 score: mean of probability and impact scores.
    #[must_use]
    pub fn combined_score(&self) -> f64 {
        f64::from(self.probability.score() + self.impact.score()) / 2.0
    }
}

/// Retrieval-augmented-generation details, when the system uses one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagArchitecture {
    /// Vector store product name
    #[serde(default)]
    pub vector_database: String,
}

/// Technical feasibility section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalProfile {
    /// Model families in use ("Generative AI", "Large Language Model (LLM)", ...)
    pub model_types: Vec<String>,
    /// Hosted model provider, if declared
    pub model_provider: Option<String>,
    /// Concrete model names
    pub specific_models: Vec<String>,
    /// Self-assessed complexity, 0..=10 (unset reads as 5)
    pub technical_complexity: Option<u8>,
    /// External systems this deployment integrates with
    pub integration_points: Vec<String>,
    /// Mean prompt size in tokens
    pub avg_input_tokens: u64,
    /// Mean completion size in tokens
    pub avg_output_tokens: u64,
    /// Expected request volume per day
    pub expected_requests_per_day: u64,
    /// Whether responses stream
    pub streaming_enabled: bool,
    /// Whether non-urgent work is batched
    pub batch_processing: bool,
    /// RAG details when present
    pub rag_architecture: Option<RagArchitecture>,
    /// Agent topology, when the system is agentic
    pub agent_architecture: Option<String>,
}

impl TechnicalProfile {
    /// Complexity with the documented default of 5 and a 0..=10 clamp.
    #[must_use]
    pub fn complexity(&self) -> u8 {
        self.technical_complexity.unwrap_or(5).min(10)
    }
}

/// Business feasibility section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    /// Criticality tier; drives the resolution strategy
    pub system_criticality: SystemCriticality,
    /// Declared failure blast radius
    pub failure_impact: FailureImpact,
    /// e.g. "99.9%", "99.99%"
    pub availability_requirement: Option<String>,
    /// e.g. "1-5s", "5-30s"
    pub response_time_requirement: Option<String>,
    /// e.g. "1,000-10,000"
    pub concurrent_users: Option<String>,
    /// Who the system serves ("General Public", "Employees", ...)
    pub user_categories: Vec<String>,
    /// Involved internal groups ("HR", "Legal", ...)
    pub stakeholder_groups: Vec<String>,
    /// Acceptable hallucination rate in percent, if declared
    pub max_hallucination_rate: Option<f64>,
}

impl BusinessProfile {
    /// Whether the general public can reach this system.
    #[must_use]
    pub fn is_public_facing(&self) -> bool {
        self.user_categories.iter().any(|c| c == "General Public")
    }
}

/// Ethical impact section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EthicalProfile {
    /// "manual-review" / "human-in-loop" / "fully-autonomous"
    pub human_oversight_level: Option<String>,
    /// "Fully Automated" / "Human Approved" / ...
    pub automation_level: Option<String>,
    /// Bias testing maturity ("None", "Planned", "Continuous")
    pub bias_testing: Option<String>,
    /// Explainability maturity
    pub explainability_level: Option<String>,
    /// Declared harm areas ("Social Scoring", "Mass Surveillance", ...)
    pub potential_harm_areas: Vec<String>,
    /// Affected vulnerable groups
    pub vulnerable_populations: Vec<String>,
    /// Whether a data-minimization policy is in place
    pub data_minimization: bool,
}

impl EthicalProfile {
    /// Human oversight is required unless explicitly fully autonomous.
    #[must_use]
    pub fn oversight_required(&self) -> bool {
        self.human_oversight_level.as_deref() != Some("fully-autonomous")
    }
}

/// Risk assessment section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSections {
    /// Named technical risks
    pub technical_risks: Vec<RiskItem>,
    /// Named business risks
    pub business_risks: Vec<RiskItem>,
    /// Model-level risk scores 0..=5, keyed by risk name
    pub model_risks: BTreeMap<String, u8>,
    /// Agentic risk scores 0..=5, keyed by risk name
    pub agent_risks: BTreeMap<String, u8>,
    /// Data-protection jurisdictions ("European Union", ...)
    pub jurisdictions: Vec<String>,
    /// Sector regimes in play ("Healthcare", "HIPAA", "SOX", ...)
    pub sector_specific: Vec<String>,
}

/// Data readiness section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataProfile {
    /// Data categories handled ("Personal Data", "Health/Medical Records", ...)
    pub data_types: Vec<String>,
    /// Order-of-magnitude volume description
    pub data_volume: Option<String>,
    /// Self-assessed quality, 0..=10
    pub data_quality_score: Option<u8>,
    /// Whether data crosses jurisdictional borders
    pub cross_border_transfer: bool,
    /// Retention policy description
    pub data_retention: Option<String>,
}

impl DataProfile {
    /// Categories whose presence escalates protection requirements.
    pub const SENSITIVE_TYPES: [&'static str; 4] = [
        "Health/Medical Records",
        "Financial Records",
        "Biometric Data",
        "Government ID Numbers",
    ];

    /// Whether any highly sensitive category is present.
    #[must_use]
    pub fn has_sensitive_data(&self) -> bool {
        self.data_types
            .iter()
            .any(|t| Self::SENSITIVE_TYPES.contains(&t.as_str()))
    }

    /// Whether personal (but not necessarily sensitive) data is present.
    #[must_use]
    pub fn has_personal_data(&self) -> bool {
        self.data_types.iter().any(|t| t == "Personal Data")
    }
}

/// Roadmap section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapProfile {
    /// Current lifecycle phase
    pub project_stage: ProjectPhase,
    /// Delivery horizon description, e.g. "6-12 months"
    pub timeline: Option<String>,
}

/// Budget and token-economics section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetProfile {
    /// Expected monthly token volume across all calls
    pub monthly_token_volume: u64,
    /// Monthly API spend baseline in currency units
    pub base_api_cost: f64,
    /// Declared budget bracket, e.g. "$100K - $500K"
    pub budget_range: Option<String>,
    /// Total committed investment
    pub total_investment: Option<f64>,
    /// Payback horizon in months
    pub payback_period_months: Option<u32>,
}

/// Organization-wide governance policies supplied alongside the assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationPolicies {
    /// Responsible-AI principles
    pub responsible_ai: Vec<String>,
    /// Uses the organization forbids outright
    pub prohibited_uses: Vec<String>,
    /// Safeguards every deployment must carry
    pub required_safeguards: Vec<String>,
    /// Frameworks the organization certifies against ("ISO 42001", ...)
    pub compliance_frameworks: Vec<String>,
}

/// The immutable intake record one pipeline run consumes.
///
/// Every section is optional in the wire format; a missing section
/// deserializes to its default. The pipeline never fails solely because a
/// field is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assessment {
    /// Stable use-case identifier (required)
    pub use_case_id: String,
    /// Human-readable title
    pub use_case_title: String,
    /// Owning department
    pub department: Option<String>,
    /// Technical feasibility answers
    pub technical: TechnicalProfile,
    /// Business feasibility answers
    pub business: BusinessProfile,
    /// Ethical impact answers
    pub ethical: EthicalProfile,
    /// Risk assessment answers
    pub risk: RiskSections,
    /// Data readiness answers
    pub data: DataProfile,
    /// Roadmap answers
    pub roadmap: RoadmapProfile,
    /// Budget answers
    pub budget: BudgetProfile,
}

impl Assessment {
    /// Deserialize and normalize an intake record from untyped JSON.
    ///
    /// This is the only place shape errors are fatal: a record that cannot
    /// pass the minimal checks aborts the run before context analysis.
    ///
    /// # Errors
    /// - [`AssessmentError::Malformed`] if the value is not an assessment object
    /// - [`AssessmentError::MissingUseCaseId`] if `use_case_id` is absent/empty
    pub fn normalize(value: serde_json::Value) -> Result<Self, AssessmentError> {
        let assessment: Assessment = serde_json::from_value(value)
            .map_err(|e| AssessmentError::Malformed(e.to_string()))?;
        assessment.check_shape()?;
        Ok(assessment)
    }

    /// Minimal shape checks, applied by [`Assessment::normalize`].
    ///
    /// # Errors
    /// Returns [`AssessmentError::MissingUseCaseId`] when the id is empty.
    pub fn check_shape(&self) -> Result<(), AssessmentError> {
        if self.use_case_id.trim().is_empty() {
            return Err(AssessmentError::MissingUseCaseId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn normalize_minimal_record() {
        let assessment = Assessment::normalize(json!({"use_case_id": "uc-1"})).unwrap();

        assert_eq!(assessment.use_case_id, "uc-1");
        assert_eq!(assessment.business.system_criticality, SystemCriticality::Standard);
        assert_eq!(assessment.roadmap.project_stage, ProjectPhase::Discovery);
        assert_eq!(assessment.technical.complexity(), 5);
        assert!(!assessment.data.has_sensitive_data());
    }

    #[test]
    fn normalize_rejects_missing_id() {
        let err = Assessment::normalize(json!({})).unwrap_err();
        assert!(matches!(err, AssessmentError::MissingUseCaseId));
    }

    #[test]
    fn normalize_rejects_non_object() {
        let err = Assessment::normalize(json!("not an assessment")).unwrap_err();
        assert!(matches!(err, AssessmentError::Malformed(_)));
    }

    #[test]
    fn criticality_parses_kebab_case() {
        let assessment = Assessment::normalize(json!({
            "use_case_id": "uc-2",
            "business": {"system_criticality": "mission-critical"}
        }))
        .unwrap();

        assert_eq!(
            assessment.business.system_criticality,
            SystemCriticality::MissionCritical
        );
    }

    #[test]
    fn sensitive_data_detection() {
        let data = DataProfile {
            data_types: vec!["Health/Medical Records".to_string()],
            ..DataProfile::default()
        };
        assert!(data.has_sensitive_data());
        assert!(!data.has_personal_data());
    }

    #[test]
    fn phase_evolution_path() {
        assert_eq!(ProjectPhase::Discovery.next(), Some(ProjectPhase::ProofOfConcept));
        assert_eq!(ProjectPhase::Optimization.next(), None);
        assert!(ProjectPhase::ProofOfConcept.is_early());
        assert!(!ProjectPhase::Pilot.is_early());
    }

    #[test]
    fn complexity_clamped() {
        let technical = TechnicalProfile {
            technical_complexity: Some(14),
            ..TechnicalProfile::default()
        };
        assert_eq!(technical.complexity(), 10);
    }
}
