//! Regulatory mapping
//!
//! Rule-based classification of which regulations apply and, for EU
//! deployments, which EU AI Act risk tier the system lands in. The tier
//! cascade is strict: prohibited > high-risk > limited-risk > minimal-risk,
//! first match wins.

use crate::model::{Assessment, SystemCriticality};
use serde::{Deserialize, Serialize};

/// EU AI Act risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EuRiskClass {
    /// Article 5 prohibited practice
    Prohibited,
    /// Annex III high-risk category
    HighRisk,
    /// Transparency-obligation tier (chatbots, generative systems)
    LimitedRisk,
    /// Everything else
    MinimalRisk,
}

impl std::fmt::Display for EuRiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EuRiskClass::Prohibited => "prohibited",
            EuRiskClass::HighRisk => "high-risk",
            EuRiskClass::LimitedRisk => "limited-risk",
            EuRiskClass::MinimalRisk => "minimal-risk",
        };
        f.write_str(s)
    }
}

/// Obligations attached to one applicable regulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryRequirement {
    /// Regulation name
    pub regulation: String,
    /// Concrete obligations
    pub requirements: Vec<String>,
    /// Compliance deadlines, where known
    pub deadlines: Vec<String>,
}

/// Which regulations apply to this deployment and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryMapping {
    /// Applicable regulation names
    pub applicable: Vec<String>,
    /// EU AI Act tier, present only when the EU is a jurisdiction
    pub eu_classification: Option<EuRiskClass>,
    /// Per-regulation obligations
    pub specific_requirements: Vec<RegulatoryRequirement>,
}

impl RegulatoryMapping {
    /// Whether the deployment is an EU AI Act high-risk system.
    #[must_use]
    pub fn is_eu_high_risk(&self) -> bool {
        self.eu_classification == Some(EuRiskClass::HighRisk)
    }
}

/// Article 5 signals that force the prohibited tier.
const PROHIBITED_HARM_AREAS: [&str; 2] = ["Social Scoring", "Mass Surveillance"];

/// Annex III user categories that force the high-risk tier.
const HIGH_RISK_USER_CATEGORIES: [&str; 2] = ["Law Enforcement", "Healthcare Providers"];

/// Model families that land in the limited-risk transparency tier.
const LIMITED_RISK_MODEL_TYPES: [&str; 2] = ["Generative AI", "Large Language Model (LLM)"];

/// Rule-based regulatory classifier. Pure.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegulatoryClassifier;

impl RegulatoryClassifier {
    /// Create a classifier.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Map the assessment onto applicable regulations.
    #[must_use]
    pub fn map(&self, assessment: &Assessment) -> RegulatoryMapping {
        let mut mapping = RegulatoryMapping::default();

        if has_jurisdiction(assessment, "European Union") {
            let classification = self.classify_eu(assessment);
            mapping.applicable.push("EU AI Act".to_string());
            mapping.eu_classification = Some(classification);
            mapping.specific_requirements.push(RegulatoryRequirement {
                regulation: "EU AI Act".to_string(),
                requirements: eu_requirements(classification),
                deadlines: vec![
                    "2025-08-02 (entry into force)".to_string(),
                    "2026-08-02 (full applicability)".to_string(),
                ],
            });
        }

        if assessment.data.has_personal_data() {
            mapping.applicable.push("GDPR".to_string());
            mapping.specific_requirements.push(RegulatoryRequirement {
                regulation: "GDPR".to_string(),
                requirements: vec![
                    "Privacy by design".to_string(),
                    "Data minimization".to_string(),
                    "Right to explanation".to_string(),
                    "Data protection impact assessments".to_string(),
                ],
                deadlines: Vec::new(),
            });
        }

        for sector in &assessment.risk.sector_specific {
            mapping.applicable.push(format!("{sector} regulations"));
        }

        tracing::debug!(
            applicable = ?mapping.applicable,
            eu = ?mapping.eu_classification,
            "regulatory mapping complete"
        );
        mapping
    }

    /// EU AI Act tier cascade, first match wins.
    #[must_use]
    pub fn classify_eu(&self, assessment: &Assessment) -> EuRiskClass {
        let harm_areas = &assessment.ethical.potential_harm_areas;
        if harm_areas
            .iter()
            .any(|h| PROHIBITED_HARM_AREAS.contains(&h.as_str()))
        {
            return EuRiskClass::Prohibited;
        }

        let high_risk_users = assessment
            .business
            .user_categories
            .iter()
            .any(|c| HIGH_RISK_USER_CATEGORIES.contains(&c.as_str()));
        if high_risk_users
            || assessment.business.system_criticality == SystemCriticality::MissionCritical
        {
            return EuRiskClass::HighRisk;
        }

        let limited_models = assessment
            .technical
            .model_types
            .iter()
            .any(|t| LIMITED_RISK_MODEL_TYPES.contains(&t.as_str()));
        if limited_models {
            return EuRiskClass::LimitedRisk;
        }

        EuRiskClass::MinimalRisk
    }
}

fn has_jurisdiction(assessment: &Assessment, jurisdiction: &str) -> bool {
    assessment.risk.jurisdictions.iter().any(|j| j == jurisdiction)
}

fn eu_requirements(classification: EuRiskClass) -> Vec<String> {
    let requirements: &[&str] = match classification {
        EuRiskClass::Prohibited => &["System must not be deployed"],
        EuRiskClass::HighRisk => &[
            "Risk management system",
            "Data governance",
            "Technical documentation",
            "Record-keeping",
            "Transparency and information",
            "Human oversight",
            "Accuracy and robustness",
            "Conformity assessment",
        ],
        EuRiskClass::LimitedRisk => &[
            "Transparency obligations",
            "Inform users of AI interaction",
            "Emotion recognition disclosure",
            "Deep fake labeling",
        ],
        EuRiskClass::MinimalRisk => &["Voluntary codes of conduct"],
    };
    requirements.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BusinessProfile, EthicalProfile, TechnicalProfile};

    fn eu_assessment() -> Assessment {
        let mut a = Assessment {
            use_case_id: "uc-reg".to_string(),
            ..Assessment::default()
        };
        a.risk.jurisdictions = vec!["European Union".to_string()];
        a
    }

    #[test]
    fn generative_ai_in_eu_is_limited_risk() {
        let mut a = eu_assessment();
        a.technical = TechnicalProfile {
            model_types: vec!["Generative AI".to_string()],
            ..TechnicalProfile::default()
        };

        let mapping = RegulatoryClassifier::new().map(&a);
        assert_eq!(mapping.eu_classification, Some(EuRiskClass::LimitedRisk));
        assert!(mapping.applicable.contains(&"EU AI Act".to_string()));
    }

    #[test]
    fn prohibited_harm_areas_win_over_everything() {
        let mut a = eu_assessment();
        a.ethical = EthicalProfile {
            potential_harm_areas: vec!["Social Scoring".to_string()],
            ..EthicalProfile::default()
        };
        a.business.system_criticality = SystemCriticality::MissionCritical;

        assert_eq!(
            RegulatoryClassifier::new().classify_eu(&a),
            EuRiskClass::Prohibited
        );
    }

    #[test]
    fn mission_critical_is_high_risk() {
        let mut a = eu_assessment();
        a.business = BusinessProfile {
            system_criticality: SystemCriticality::MissionCritical,
            ..BusinessProfile::default()
        };

        let mapping = RegulatoryClassifier::new().map(&a);
        assert!(mapping.is_eu_high_risk());
        let eu = &mapping.specific_requirements[0];
        assert!(eu.requirements.iter().any(|r| r == "Human oversight"));
    }

    #[test]
    fn healthcare_users_are_high_risk() {
        let mut a = eu_assessment();
        a.business.user_categories = vec!["Healthcare Providers".to_string()];

        assert_eq!(
            RegulatoryClassifier::new().classify_eu(&a),
            EuRiskClass::HighRisk
        );
    }

    #[test]
    fn plain_system_is_minimal_risk() {
        let a = eu_assessment();
        assert_eq!(
            RegulatoryClassifier::new().classify_eu(&a),
            EuRiskClass::MinimalRisk
        );
    }

    #[test]
    fn no_eu_jurisdiction_means_no_classification() {
        let mut a = eu_assessment();
        a.risk.jurisdictions = vec!["United States".to_string()];

        let mapping = RegulatoryClassifier::new().map(&a);
        assert_eq!(mapping.eu_classification, None);
        assert!(!mapping.applicable.contains(&"EU AI Act".to_string()));
    }

    #[test]
    fn personal_data_pulls_in_gdpr() {
        let mut a = eu_assessment();
        a.data.data_types = vec!["Personal Data".to_string()];

        let mapping = RegulatoryClassifier::new().map(&a);
        assert!(mapping.applicable.contains(&"GDPR".to_string()));
        assert!(mapping
            .specific_requirements
            .iter()
            .any(|r| r.regulation == "GDPR"));
    }

    #[test]
    fn sector_regimes_appended() {
        let mut a = eu_assessment();
        a.risk.sector_specific = vec!["Healthcare".to_string()];

        let mapping = RegulatoryClassifier::new().map(&a);
        assert!(mapping
            .applicable
            .contains(&"Healthcare regulations".to_string()));
    }
}
