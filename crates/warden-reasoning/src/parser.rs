//! Untrusted-JSON recovery parser
//!
//! The reasoning service returns text that *should* be a JSON object with
//! four guardrail categories, but may be wrapped in prose, contain control
//! characters, or be cut off. Recovery is three-tiered:
//!
//! 1. strict parse of the raw text
//! 2. re-parse after stripping control characters and closing unbalanced
//!    braces/brackets
//! 3. extract the first `{...}` block and parse that
//!
//! If every tier fails, the built-in empty-category skeleton is returned
//! with a diagnostic note. Parsing never fails the pipeline.

use crate::stance::Stance;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

/// Which recovery tier produced the parsed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Raw text was valid JSON
    Strict,
    /// Valid after control-character stripping and brace repair
    Repaired,
    /// Valid after extracting the first object block
    Extracted,
    /// Nothing parseable; built-in skeleton used
    Skeleton,
}

/// One guardrail as the reasoning service describes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGuardrail {
    /// Category string; mapped onto [`GuardrailType`]
    #[serde(rename = "type")]
    pub guardrail_type: String,
    /// Severity string; unknown values read as medium
    pub severity: String,
    /// Stable rule name
    pub rule: String,
    /// What the rule enforces
    pub description: String,
    /// Why the service proposed it
    pub rationale: String,
}

/// The four-category response shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveResponse {
    /// Deployment-blocking rules
    pub critical: Vec<RawGuardrail>,
    /// Operational rules
    pub operational: Vec<RawGuardrail>,
    /// Ethics rules
    pub ethical: Vec<RawGuardrail>,
    /// Cost rules
    pub economic: Vec<RawGuardrail>,
    /// Free-text reasoning
    pub reasoning: String,
    /// Self-confidence in [0, 1]
    pub confidence: f64,
}

impl PerspectiveResponse {
    /// The built-in empty-category skeleton used when nothing parses.
    #[must_use]
    pub fn skeleton() -> Self {
        PerspectiveResponse::default()
    }

    /// All categories flattened in category order.
    #[must_use]
    pub fn all_guardrails(&self) -> impl Iterator<Item = &RawGuardrail> {
        self.critical
            .iter()
            .chain(&self.operational)
            .chain(&self.ethical)
            .chain(&self.economic)
    }
}

static OBJECT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    // First '{' through last '}', across lines.
    Regex::new(r"(?s)\{.*\}").expect("object-block regex")
});

/// Parse reasoning-service text, recovering as far as necessary.
#[must_use]
pub fn parse_perspective(text: &str) -> (PerspectiveResponse, ParseOutcome) {
    if let Ok(response) = serde_json::from_str::<PerspectiveResponse>(text) {
        return (response, ParseOutcome::Strict);
    }

    let repaired = repair(text);
    if let Ok(response) = serde_json::from_str::<PerspectiveResponse>(&repaired) {
        tracing::debug!("reasoning response parsed after repair");
        return (response, ParseOutcome::Repaired);
    }

    if let Some(block) = OBJECT_BLOCK.find(&repaired) {
        if let Ok(response) = serde_json::from_str::<PerspectiveResponse>(block.as_str()) {
            tracing::debug!("reasoning response parsed from extracted block");
            return (response, ParseOutcome::Extracted);
        }
    }

    tracing::warn!(
        length = text.len(),
        "reasoning response unparseable, using empty skeleton"
    );
    (PerspectiveResponse::skeleton(), ParseOutcome::Skeleton)
}

/// Strip control characters and close unbalanced braces/brackets.
fn repair(text: &str) -> String {
    let mut repaired: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();

    let open_braces = repaired.matches('{').count();
    let close_braces = repaired.matches('}').count();
    let open_brackets = repaired.matches('[').count();
    let close_brackets = repaired.matches(']').count();

    for _ in close_brackets..open_brackets {
        repaired.push(']');
    }
    for _ in close_braces..open_braces {
        repaired.push('}');
    }
    repaired
}

/// Convert a parsed response into the stance's proposal.
///
/// Raw guardrails missing a rule name are dropped; everything else maps
/// onto the typed model with ids derived from the stance label.
#[must_use]
pub fn to_proposal(stance: Stance, response: &PerspectiveResponse, outcome: ParseOutcome) -> AgentProposal {
    let source = stance.label();

    let guardrails: Vec<Guardrail> = response
        .all_guardrails()
        .filter(|raw| !raw.rule.is_empty())
        .map(|raw| {
            Guardrail::new(
                GuardrailType::from(raw.guardrail_type.as_str()),
                parse_severity(&raw.severity),
                raw.rule.clone(),
                source,
            )
            .with_description(raw.description.clone())
            .with_rationale(raw.rationale.clone())
        })
        .collect();

    let mut insights = Vec::new();
    if !response.reasoning.is_empty() {
        insights.push(response.reasoning.clone());
    }

    let mut concerns = Vec::new();
    if outcome == ParseOutcome::Skeleton {
        concerns.push("reasoning service returned unparseable output".to_string());
    }

    let confidence = if outcome == ParseOutcome::Skeleton {
        0.0
    } else {
        response.confidence.clamp(0.0, 1.0) * 100.0
    };

    AgentProposal::new(source, guardrails, confidence)
        .with_insights(insights)
        .with_concerns(concerns)
}

fn parse_severity(text: &str) -> Severity {
    match text {
        "critical" => Severity::Critical,
        "high" => Severity::High,
        "low" => Severity::Low,
        _ => Severity::Medium,
    }
}
