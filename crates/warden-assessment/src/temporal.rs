//! Temporal analysis
//!
//! Where the project sits in its lifecycle and where it is heading. Early
//! phases feed the contextual oversight template during synthesis.

use crate::model::{Assessment, ProjectPhase};
use serde::{Deserialize, Serialize};

/// Maturity trajectory derived from phase and complexity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaturityProgression {
    /// Where the system is today
    pub current: Maturity,
    /// Where the roadmap points
    pub target: Maturity,
}

/// Coarse maturity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    /// Pre-pilot
    #[default]
    Initial,
    /// Piloting with real users
    Developing,
    /// In production
    Mature,
    /// Production at high complexity
    Advanced,
}

/// Lifecycle analysis for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    /// Current lifecycle phase
    pub current_phase: ProjectPhase,
    /// Remaining phases on the standard path
    pub evolution_path: Vec<ProjectPhase>,
    /// Maturity now vs. target
    pub maturity: MaturityProgression,
    /// Declared delivery horizon
    pub time_horizon: String,
}

impl TemporalAnalysis {
    /// Analyze the assessment's roadmap section.
    #[must_use]
    pub fn analyze(assessment: &Assessment) -> Self {
        let current_phase = assessment.roadmap.project_stage;

        let mut evolution_path = Vec::new();
        let mut phase = current_phase;
        while let Some(next) = phase.next() {
            evolution_path.push(next);
            phase = next;
        }

        let current = match current_phase {
            ProjectPhase::Production | ProjectPhase::Optimization => Maturity::Mature,
            ProjectPhase::Pilot => Maturity::Developing,
            _ => Maturity::Initial,
        };
        let target = if assessment.technical.complexity() > 8 {
            Maturity::Advanced
        } else {
            Maturity::Mature
        };

        TemporalAnalysis {
            current_phase,
            evolution_path,
            maturity: MaturityProgression { current, target },
            time_horizon: assessment
                .roadmap
                .timeline
                .clone()
                .unwrap_or_else(|| "6-12 months".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_walks_full_path() {
        let a = Assessment {
            use_case_id: "uc-t".to_string(),
            ..Assessment::default()
        };
        let t = TemporalAnalysis::analyze(&a);

        assert_eq!(t.current_phase, ProjectPhase::Discovery);
        assert_eq!(
            t.evolution_path,
            vec![
                ProjectPhase::ProofOfConcept,
                ProjectPhase::Pilot,
                ProjectPhase::Production,
                ProjectPhase::Optimization
            ]
        );
        assert_eq!(t.maturity.current, Maturity::Initial);
        assert_eq!(t.time_horizon, "6-12 months");
    }

    #[test]
    fn production_is_mature_with_empty_tail() {
        let mut a = Assessment {
            use_case_id: "uc-t".to_string(),
            ..Assessment::default()
        };
        a.roadmap.project_stage = ProjectPhase::Optimization;

        let t = TemporalAnalysis::analyze(&a);
        assert!(t.evolution_path.is_empty());
        assert_eq!(t.maturity.current, Maturity::Mature);
    }

    #[test]
    fn high_complexity_targets_advanced() {
        let mut a = Assessment {
            use_case_id: "uc-t".to_string(),
            ..Assessment::default()
        };
        a.technical.technical_complexity = Some(9);

        let t = TemporalAnalysis::analyze(&a);
        assert_eq!(t.maturity.target, Maturity::Advanced);
    }
}
