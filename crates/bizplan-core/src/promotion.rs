//! Launch promotion pricing.
//!
//! The promotion has two discount windows. Phase A (30% off) runs until
//! `phase_a_end`, phase B (10% off) until `phase_b_end`, after which every
//! plan is sold at its original price. All functions take `now` explicitly;
//! nothing here reads the system clock.

use crate::types::{Phase, PlanKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Boundaries and price table
// ---------------------------------------------------------------------------

/// 2025-01-04T23:59:59+09:00
pub const PHASE_A_END_MS: i64 = 1_736_002_799_000;
/// 2025-01-19T23:59:59+09:00
pub const PHASE_B_END_MS: i64 = 1_737_298_799_000;

/// Static prices for one plan, in KRW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    pub original: u64,
    pub discount30: u64,
    pub discount10: u64,
    pub savings30: u64,
    pub savings10: u64,
}

impl PriceTable {
    pub const fn new(original: u64, discount30: u64, discount10: u64) -> Self {
        Self {
            original,
            discount30,
            discount10,
            savings30: original - discount30,
            savings10: original - discount10,
        }
    }

    pub fn price_for(&self, phase: Phase) -> u64 {
        match phase {
            Phase::A => self.discount30,
            Phase::B => self.discount10,
            Phase::Ended => self.original,
        }
    }
}

const PLUS: PriceTable = PriceTable::new(399_000, 279_300, 359_100);
const PRO: PriceTable = PriceTable::new(799_000, 559_300, 719_100);
const PREMIUM: PriceTable = PriceTable::new(1_499_000, 1_049_300, 1_349_100);

/// The launch promotion every caller uses unless a test builds its own.
pub const LAUNCH: Promotion = Promotion {
    phase_a_end_ms: PHASE_A_END_MS,
    phase_b_end_ms: PHASE_B_END_MS,
    plans: [PLUS, PRO, PREMIUM],
};

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPricing {
    pub plan: PlanKey,
    pub original_price: u64,
    pub current_price: u64,
    pub savings: u64,
    pub discount_rate: u32,
    pub phase: Phase,
    pub is_discounted: bool,
    /// How much more a phase-A buyer saves compared to phase B. Zero outside phase A.
    pub extra_savings_vs_phase_b: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
}

impl Countdown {
    fn from_seconds(total_seconds: i64) -> Self {
        let total_seconds = total_seconds.max(0);
        Self {
            days: total_seconds / 86_400,
            hours: (total_seconds % 86_400) / 3_600,
            minutes: (total_seconds % 3_600) / 60,
            seconds: total_seconds % 60,
            total_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionStatus {
    pub phase: Phase,
    pub discount_rate: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_ends_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countdown: Option<Countdown>,
}

// ---------------------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    phase_a_end_ms: i64,
    phase_b_end_ms: i64,
    plans: [PriceTable; 3],
}

impl Promotion {
    /// Launch prices with different window boundaries.
    pub fn with_boundaries(phase_a_end: DateTime<Utc>, phase_b_end: DateTime<Utc>) -> Self {
        Self {
            phase_a_end_ms: phase_a_end.timestamp_millis(),
            phase_b_end_ms: phase_b_end.timestamp_millis(),
            plans: LAUNCH.plans,
        }
    }

    pub fn phase_a_end(&self) -> DateTime<Utc> {
        from_millis(self.phase_a_end_ms)
    }

    pub fn phase_b_end(&self) -> DateTime<Utc> {
        from_millis(self.phase_b_end_ms)
    }

    pub fn prices(&self, plan: PlanKey) -> &PriceTable {
        match plan {
            PlanKey::Plus => &self.plans[0],
            PlanKey::Pro => &self.plans[1],
            PlanKey::Premium => &self.plans[2],
        }
    }

    pub fn current_phase(&self, now: DateTime<Utc>) -> Phase {
        let now_ms = now.timestamp_millis();
        if now_ms <= self.phase_a_end_ms {
            Phase::A
        } else if now_ms <= self.phase_b_end_ms {
            Phase::B
        } else {
            Phase::Ended
        }
    }

    pub fn current_discount_rate(&self, now: DateTime<Utc>) -> u32 {
        self.current_phase(now).discount_rate()
    }

    pub fn plan_pricing(&self, plan: PlanKey, now: DateTime<Utc>) -> PlanPricing {
        let phase = self.current_phase(now);
        let table = self.prices(plan);
        let current_price = table.price_for(phase);
        let extra_savings_vs_phase_b = if phase == Phase::A {
            table.savings30 - table.savings10
        } else {
            0
        };
        PlanPricing {
            plan,
            original_price: table.original,
            current_price,
            savings: table.original - current_price,
            discount_rate: phase.discount_rate(),
            phase,
            is_discounted: phase.is_discounted(),
            extra_savings_vs_phase_b,
        }
    }

    pub fn all_plan_pricing(&self, now: DateTime<Utc>) -> Vec<PlanPricing> {
        PlanKey::all()
            .iter()
            .map(|&plan| self.plan_pricing(plan, now))
            .collect()
    }

    /// End of the window `now` falls in, or `None` once the promotion ended.
    pub fn phase_ends_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.current_phase(now) {
            Phase::A => Some(self.phase_a_end()),
            Phase::B => Some(self.phase_b_end()),
            Phase::Ended => None,
        }
    }

    pub fn countdown(&self, now: DateTime<Utc>) -> Option<Countdown> {
        self.phase_ends_at(now)
            .map(|end| Countdown::from_seconds((end - now).num_seconds()))
    }

    pub fn status(&self, now: DateTime<Utc>) -> PromotionStatus {
        let phase = self.current_phase(now);
        PromotionStatus {
            phase,
            discount_rate: phase.discount_rate(),
            phase_ends_at: self.phase_ends_at(now),
            countdown: self.countdown(now),
        }
    }
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

// ---------------------------------------------------------------------------
// Launch promotion shortcuts
// ---------------------------------------------------------------------------

pub fn current_phase(now: DateTime<Utc>) -> Phase {
    LAUNCH.current_phase(now)
}

pub fn current_discount_rate(now: DateTime<Utc>) -> u32 {
    LAUNCH.current_discount_rate(now)
}

pub fn plan_pricing(plan: PlanKey, now: DateTime<Utc>) -> PlanPricing {
    LAUNCH.plan_pricing(plan, now)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Thousands-separated amount, e.g. `799000` -> `"799,000"`.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_price_with_symbol(amount: u64) -> String {
    format!("{}원", format_price(amount))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
