//! Health-risk bands of the final index.

use serde::Serialize;
use std::fmt;

/// Risk band classification. Boundary values belong to the lower band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskCategory {
    Good,      // 0-50
    Moderate,  // 51-100
    Poor,      // 101-150
    Unhealthy, // 151-200
    Severe,    // 201-300
    Hazardous, // 301+
}

impl RiskCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Good => "Good",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::Poor => "Poor",
            RiskCategory::Unhealthy => "Unhealthy",
            RiskCategory::Severe => "Severe",
            RiskCategory::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a final index onto its risk band.
pub fn classify(final_index: u32) -> RiskCategory {
    match final_index {
        0..=50 => RiskCategory::Good,
        51..=100 => RiskCategory::Moderate,
        101..=150 => RiskCategory::Poor,
        151..=200 => RiskCategory::Unhealthy,
        201..=300 => RiskCategory::Severe,
        _ => RiskCategory::Hazardous,
    }
}
