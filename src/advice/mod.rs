pub mod kelly;

use crate::errors::AdviceError;
use std::str::FromStr;

/// User risk-aversion level. Closed enumeration: a loosely-typed string
/// from a profile record is parsed once at the boundary so an
/// unrecognized value can never reach the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskAversion {
    Low,
    Medium,
    High,
}

impl RiskAversion {
    /// Multiplier applied to the raw Kelly fraction.
    #[inline]
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Low => 0.5,
            Self::Medium => 1.0,
            Self::High => 1.5,
        }
    }
}

impl std::fmt::Display for RiskAversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FromStr for RiskAversion {
    type Err = AdviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(AdviceError::InvalidInput(format!(
                "risk aversion must be low, medium or high, got {other:?}"
            ))),
        }
    }
}
