//! Performance and SLA specialist
//!
//! Latency, availability, and throughput requirements read straight from the
//! business section. Tier boundaries: 5 seconds separates ultra-low-latency
//! from ordinary SLAs, four nines separates high availability from standard.

use crate::specialist::{confidence, Specialist};
use serde_json::json;
use warden_assessment::{EnrichedContext, SystemCriticality};
use warden_guardrail::{AgentProposal, Guardrail, GuardrailType, Severity};

const ULTRA_LOW_LATENCY_SECS: u32 = 5;
const SLA_LATENCY_SECS: u32 = 30;
const HIGH_AVAILABILITY_NINES: usize = 4;

/// Latency/availability/throughput analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceSpecialist;

impl Specialist for PerformanceSpecialist {
    fn name(&self) -> &'static str {
        "performance"
    }

    fn analyze(&self, context: &EnrichedContext) -> AgentProposal {
        let source = self.name();
        let business = &context.assessment.business;
        let technical = &context.assessment.technical;

        let mut guardrails = Vec::new();
        let mut insights = Vec::new();
        let mut concerns = Vec::new();

        if let Some(seconds) = response_seconds(business.response_time_requirement.as_deref()) {
            if seconds <= ULTRA_LOW_LATENCY_SECS {
                guardrails.push(
                    Guardrail::new(
                        GuardrailType::Performance,
                        Severity::Critical,
                        "ULTRA_LOW_LATENCY_ENFORCEMENT",
                        source,
                    )
                    .with_description("Enforce sub-five-second response times")
                    .with_rationale(format!("declared response requirement of {seconds}s"))
                    .with_config("max_latency_ms", json!(u64::from(seconds) * 1_000))
                    .with_monitoring("p99_latency_ms", format!("{}", u64::from(seconds) * 1_000), "1m"),
                );
                concerns.push(format!(
                    "{seconds}s ceilings are hard to hold with large models; caching will be required"
                ));
            } else if seconds <= SLA_LATENCY_SECS {
                guardrails.push(
                    Guardrail::new(GuardrailType::Performance, Severity::High, "RESPONSE_TIME_SLA", source)
                        .with_description("Enforce the declared response-time SLA")
                        .with_rationale(format!("declared response requirement of {seconds}s"))
                        .with_config("max_latency_ms", json!(u64::from(seconds) * 1_000))
                        .with_monitoring("p95_latency_ms", format!("{}", u64::from(seconds) * 1_000), "5m"),
                );
            }

            guardrails.push(
                Guardrail::new(GuardrailType::Performance, Severity::High, "TIMEOUT_CONFIGURATION", source)
                    .with_description("Configure request timeouts below the SLA ceiling")
                    .with_rationale("timeouts must trip before the SLA is breached")
                    .with_config("timeout_ms", json!(u64::from(seconds) * 1_000 * 9 / 10)),
            );
        }

        let nines = business
            .availability_requirement
            .as_deref()
            .map_or(0, |t| t.chars().filter(|&c| c == '9').count());
        if nines >= HIGH_AVAILABILITY_NINES {
            guardrails.push(
                Guardrail::new(
                    GuardrailType::Performance,
                    Severity::Critical,
                    "HIGH_AVAILABILITY_CONFIGURATION",
                    source,
                )
                .with_description("Multi-zone redundancy with automatic failover")
                .with_rationale(format!(
                    "availability requirement {}",
                    business.availability_requirement.as_deref().unwrap_or_default()
                ))
                .with_config("multi_region", json!(true))
                .with_monitoring("availability_percentage", "99.99%", "realtime"),
            );
            guardrails.push(
                Guardrail::new(GuardrailType::Performance, Severity::High, "LOAD_BALANCING", source)
                    .with_description("Distribute load across replicas")
                    .with_rationale("single instances cannot meet four-nines availability")
                    .with_config("strategy", json!("least_connections")),
            );
        }

        if technical.expected_requests_per_day > 100_000 {
            guardrails.push(
                Guardrail::new(GuardrailType::Performance, Severity::High, "THROUGHPUT_OPTIMIZATION", source)
                    .with_description("Sustain declared request throughput")
                    .with_rationale(format!(
                        "{} expected requests per day",
                        technical.expected_requests_per_day
                    ))
                    .with_config("target_rps", json!(technical.expected_requests_per_day / 86_400 + 1)),
            );
            guardrails.push(
                Guardrail::new(GuardrailType::Performance, Severity::Medium, "RATE_LIMITING", source)
                    .with_description("Rate-limit clients to protect shared capacity")
                    .with_rationale("high request volume needs per-client ceilings")
                    .with_config("limit", json!(100))
                    .with_config("window_secs", json!(60)),
            );
        }

        if business.system_criticality == SystemCriticality::MissionCritical {
            guardrails.push(
                Guardrail::new(
                    GuardrailType::Performance,
                    Severity::Critical,
                    "CRITICAL_SYSTEM_MONITORING",
                    source,
                )
                .with_description("Comprehensive health monitoring with paging")
                .with_rationale("mission-critical systems need immediate failure detection")
                .with_monitoring("system_health", "95%", "1m")
                .with_monitoring("error_rate", "1%", "1m"),
            );
        }

        if technical.streaming_enabled {
            guardrails.push(
                Guardrail::new(GuardrailType::Performance, Severity::Medium, "STREAMING_OPTIMIZATION", source)
                    .with_description("Tune time-to-first-token for streamed responses")
                    .with_rationale("streaming responses are latency-sensitive at the first token")
                    .with_config("max_first_token_ms", json!(1_000)),
            );
            insights.push("streaming shifts perceived latency to time-to-first-token".to_string());
        }

        let signals = usize::from(business.response_time_requirement.is_some())
            + usize::from(business.availability_requirement.is_some())
            + usize::from(technical.expected_requests_per_day > 0);

        AgentProposal::new(source, guardrails, confidence(55.0, signals))
            .with_insights(insights)
            .with_concerns(concerns)
    }
}

/// Upper bound in seconds from strings like "1-5s" or "30s".
fn response_seconds(requirement: Option<&str>) -> Option<u32> {
    let text = requirement?;
    if !text.ends_with('s') {
        return None;
    }
    let digits: String = text
        .rsplit('-')
        .next()?
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test_utils::{context_for, minimal_context, mission_critical_assessment};

    #[test]
    fn tight_latency_is_critical() {
        let proposal = PerformanceSpecialist.analyze(&context_for(mission_critical_assessment()));

        let latency = proposal
            .guardrails
            .iter()
            .find(|g| g.rule == "ULTRA_LOW_LATENCY_ENFORCEMENT")
            .expect("latency rule");
        assert_eq!(latency.severity, Severity::Critical);
        assert_eq!(
            latency.implementation.configuration["max_latency_ms"],
            json!(5_000)
        );
    }

    #[test]
    fn four_nines_adds_availability_rules() {
        let proposal = PerformanceSpecialist.analyze(&context_for(mission_critical_assessment()));

        assert!(proposal
            .guardrails
            .iter()
            .any(|g| g.rule == "HIGH_AVAILABILITY_CONFIGURATION" && g.severity == Severity::Critical));
        assert!(proposal.guardrails.iter().any(|g| g.rule == "LOAD_BALANCING"));
        assert!(proposal.guardrails.iter().any(|g| g.rule == "CRITICAL_SYSTEM_MONITORING"));
    }

    #[test]
    fn minimal_assessment_yields_nothing() {
        let proposal = PerformanceSpecialist.analyze(&minimal_context());
        assert!(proposal.guardrails.is_empty());
    }

    #[test]
    fn moderate_latency_gets_sla_not_ultra() {
        let mut a = warden_test_utils::minimal_assessment();
        a.business.response_time_requirement = Some("5-30s".to_string());

        let proposal = PerformanceSpecialist.analyze(&context_for(a));
        assert!(proposal.guardrails.iter().any(|g| g.rule == "RESPONSE_TIME_SLA"));
        assert!(!proposal
            .guardrails
            .iter()
            .any(|g| g.rule == "ULTRA_LOW_LATENCY_ENFORCEMENT"));
        assert!(proposal.guardrails.iter().any(|g| g.rule == "TIMEOUT_CONFIGURATION"));
    }

    #[test]
    fn seconds_parser() {
        assert_eq!(response_seconds(Some("1-5s")), Some(5));
        assert_eq!(response_seconds(Some("30s")), Some(30));
        assert_eq!(response_seconds(Some("2 minutes")), None);
        assert_eq!(response_seconds(None), None);
    }
}
