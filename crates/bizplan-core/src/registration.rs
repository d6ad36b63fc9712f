//! Promotion pre-registration.
//!
//! A pre-registration locks in the plan price of the phase it was made in.

use crate::error::{BizplanError, FieldError, Result};
use crate::promotion::Promotion;
use crate::storage::{LocalStore, PRE_REGISTRATIONS_KEY};
use crate::types::{Phase, PlanKey};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use uuid::Uuid;

const MAX_NAME_LEN: usize = 50;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid pattern")
    })
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreRegistrationRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub plan: PlanKey,
}

impl PreRegistrationRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "required"));
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("must be at most {MAX_NAME_LEN} characters"),
            ));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new("email", "required"));
        } else if !email_re().is_match(email) {
            errors.push(FieldError::new("email", "invalid email address"));
        }

        if let Some(phone) = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            let digits = phone.chars().filter(|c| *c != '-').collect::<String>();
            if !digits.chars().all(|c| c.is_ascii_digit()) || !(9..=13).contains(&digits.len()) {
                errors.push(FieldError::new("phone", "invalid phone number"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(BizplanError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// PreRegistration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreRegistration {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub plan: PlanKey,
    pub phase: Phase,
    pub discount_rate: u32,
    pub locked_price: u64,
    pub registered_at: DateTime<Utc>,
}

pub fn list(store: &LocalStore) -> Result<Vec<PreRegistration>> {
    store.get_or_default(PRE_REGISTRATIONS_KEY)
}

/// Validate and record a pre-registration at the price in effect at `now`.
/// Emails are unique, compared case-insensitively.
pub fn register(
    store: &LocalStore,
    promotion: &Promotion,
    req: PreRegistrationRequest,
    now: DateTime<Utc>,
) -> Result<PreRegistration> {
    req.validate()?;

    let email = req.email.trim().to_lowercase();
    let mut all = list(store)?;
    if all.iter().any(|r| r.email == email) {
        return Err(BizplanError::AlreadyRegistered(email));
    }

    let pricing = promotion.plan_pricing(req.plan, now);
    let registration = PreRegistration {
        id: Uuid::new_v4(),
        name: req.name.trim().to_string(),
        email,
        phone: req.phone.filter(|p| !p.trim().is_empty()),
        organization: req.organization.filter(|o| !o.trim().is_empty()),
        plan: req.plan,
        phase: pricing.phase,
        discount_rate: pricing.discount_rate,
        locked_price: pricing.current_price,
        registered_at: now,
    };
    all.push(registration.clone());
    store.set(PRE_REGISTRATIONS_KEY, &all)?;
    Ok(registration)
}

// ---------------------------------------------------------------------------
// Admin statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStats {
    pub total: usize,
    pub by_plan: BTreeMap<PlanKey, usize>,
    pub by_phase: BTreeMap<Phase, usize>,
    /// Sum of locked-in prices across all registrations.
    pub committed_revenue: u64,
}

pub fn stats(registrations: &[PreRegistration]) -> RegistrationStats {
    let mut s = RegistrationStats {
        total: registrations.len(),
        ..Default::default()
    };
    for r in registrations {
        *s.by_plan.entry(r.plan).or_default() += 1;
        *s.by_phase.entry(r.phase).or_default() += 1;
        s.committed_revenue += r.locked_price;
    }
    s
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::LAUNCH;
    use tempfile::TempDir;

    fn kst(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn request(email: &str, plan: PlanKey) -> PreRegistrationRequest {
        PreRegistrationRequest {
            name: "Kim Founder".to_string(),
            email: email.to_string(),
            phone: Some("010-1234-5678".to_string()),
            organization: None,
            plan,
        }
    }

    #[test]
    fn valid_request_passes() {
        request("kim@example.com", PlanKey::Pro).validate().unwrap();
    }

    #[test]
    fn invalid_fields_are_all_reported() {
        let req = PreRegistrationRequest {
            name: " ".to_string(),
            email: "not-an-email".to_string(),
            phone: Some("12ab".to_string()),
            organization: None,
            plan: PlanKey::Plus,
        };
        let Err(BizplanError::Validation(errors)) = req.validate() else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "phone"]);
    }

    #[test]
    fn blank_phone_is_optional() {
        let mut req = request("a@b.co", PlanKey::Plus);
        req.phone = Some("  ".to_string());
        req.validate().unwrap();
    }

    #[test]
    fn registration_locks_phase_price() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        let r = register(
            &store,
            &LAUNCH,
            request("Kim@Example.com", PlanKey::Pro),
            kst("2025-01-01T00:00:00+09:00"),
        )
        .unwrap();
        assert_eq!(r.phase, Phase::A);
        assert_eq!(r.locked_price, 559_300);
        assert_eq!(r.email, "kim@example.com");
        assert_eq!(list(&store).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_email_rejected() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        let now = kst("2025-01-10T00:00:00+09:00");
        register(&store, &LAUNCH, request("dup@example.com", PlanKey::Plus), now).unwrap();
        let err = register(&store, &LAUNCH, request("DUP@example.com", PlanKey::Pro), now)
            .unwrap_err();
        assert!(matches!(err, BizplanError::AlreadyRegistered(_)));
    }

    #[test]
    fn stats_aggregate() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        register(
            &store,
            &LAUNCH,
            request("a@example.com", PlanKey::Pro),
            kst("2025-01-01T00:00:00+09:00"),
        )
        .unwrap();
        register(
            &store,
            &LAUNCH,
            request("b@example.com", PlanKey::Pro),
            kst("2025-01-10T00:00:00+09:00"),
        )
        .unwrap();
        register(
            &store,
            &LAUNCH,
            request("c@example.com", PlanKey::Plus),
            kst("2025-02-10T00:00:00+09:00"),
        )
        .unwrap();

        let s = stats(&list(&store).unwrap());
        assert_eq!(s.total, 3);
        assert_eq!(s.by_plan[&PlanKey::Pro], 2);
        assert_eq!(s.by_plan[&PlanKey::Plus], 1);
        assert_eq!(s.by_phase[&Phase::Ended], 1);
        assert_eq!(s.committed_revenue, 559_300 + 719_100 + 399_000);
    }
}
