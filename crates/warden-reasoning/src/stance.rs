//! Reasoning stances
//!
//! The reasoning service is asked for the same context from three fixed
//! perspectives; their disagreement is input to conflict detection.

use serde::{Deserialize, Serialize};

/// A reasoning perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    /// Safety first, restrictive defaults
    Conservative,
    /// Weigh safety against usability
    Balanced,
    /// Bias toward enabling the use case
    InnovationFocused,
}

impl Stance {
    /// The fixed set, in fan-out order.
    pub const ALL: [Stance; 3] = [Stance::Conservative, Stance::Balanced, Stance::InnovationFocused];

    /// Source label recorded on proposals from this stance.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Stance::Conservative => "reasoning:conservative_safety",
            Stance::Balanced => "reasoning:balanced_practical",
            Stance::InnovationFocused => "reasoning:innovation_focused",
        }
    }

    /// Wire name sent to the reasoning service.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Stance::Conservative => "conservative_safety",
            Stance::Balanced => "balanced_practical",
            Stance::InnovationFocused => "innovation_focused",
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}
