use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Promotion window. Serialized as `"A"`, `"B"`, `"ENDED"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "ENDED")]
    Ended,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::A => "A",
            Phase::B => "B",
            Phase::Ended => "ENDED",
        }
    }

    /// Percentage off the original price while this phase is active.
    pub fn discount_rate(self) -> u32 {
        match self {
            Phase::A => 30,
            Phase::B => 10,
            Phase::Ended => 0,
        }
    }

    pub fn is_discounted(self) -> bool {
        self != Phase::Ended
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PlanKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKey {
    Plus,
    Pro,
    Premium,
}

impl PlanKey {
    pub fn all() -> &'static [PlanKey] {
        &[PlanKey::Plus, PlanKey::Pro, PlanKey::Premium]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanKey::Plus => "plus",
            PlanKey::Pro => "pro",
            PlanKey::Premium => "premium",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PlanKey::Plus => "Plus",
            PlanKey::Pro => "Pro",
            PlanKey::Premium => "Premium",
        }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlanKey {
    type Err = crate::error::BizplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plus" => Ok(PlanKey::Plus),
            "pro" => Ok(PlanKey::Pro),
            "premium" => Ok(PlanKey::Premium),
            _ => Err(crate::error::BizplanError::InvalidPlan(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
