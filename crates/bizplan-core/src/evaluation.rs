//! Demo evaluation scorer.
//!
//! A stand-in for the server-side AI evaluation: every free-text answer is
//! scored on length, presence of figures and presence of well-known startup
//! acronyms. The constants are placeholder tuning and stay as they are.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ProblemRecognition,
    SolutionFeasibility,
    MarketOpportunity,
    BusinessModel,
    TeamCapability,
    GrowthStrategy,
}

impl Dimension {
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::ProblemRecognition,
            Dimension::SolutionFeasibility,
            Dimension::MarketOpportunity,
            Dimension::BusinessModel,
            Dimension::TeamCapability,
            Dimension::GrowthStrategy,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::ProblemRecognition => "problem_recognition",
            Dimension::SolutionFeasibility => "solution_feasibility",
            Dimension::MarketOpportunity => "market_opportunity",
            Dimension::BusinessModel => "business_model",
            Dimension::TeamCapability => "team_capability",
            Dimension::GrowthStrategy => "growth_strategy",
        }
    }

    /// The two demo questions answered for this dimension.
    pub fn questions(self) -> [&'static str; 2] {
        match self {
            Dimension::ProblemRecognition => ["problem_definition", "customer_pain"],
            Dimension::SolutionFeasibility => ["solution_description", "development_status"],
            Dimension::MarketOpportunity => ["target_market", "market_size"],
            Dimension::BusinessModel => ["revenue_model", "pricing_strategy"],
            Dimension::TeamCapability => ["team_background", "team_roles"],
            Dimension::GrowthStrategy => ["go_to_market", "funding_plan"],
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Answer scoring
// ---------------------------------------------------------------------------

const BASE_SCORE: f64 = 50.0;
const LENGTH_BONUS_CAP: f64 = 30.0;
const DIGIT_BONUS: f64 = 10.0;
const ACRONYM_BONUS: f64 = 10.0;
const MAX_SCORE: f64 = 100.0;

pub const KNOWN_ACRONYMS: &[&str] = &[
    "MVP", "PMF", "B2B", "B2C", "SaaS", "KPI", "ROI", "CAC", "LTV", "TAM", "SAM", "SOM", "ARR",
    "MRR", "API", "AI",
];

static ACRONYM_RE: OnceLock<Regex> = OnceLock::new();

fn acronym_re() -> &'static Regex {
    ACRONYM_RE.get_or_init(|| {
        let alternation = KNOWN_ACRONYMS
            .iter()
            .map(|a| regex::escape(a))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("acronym alternation is a valid pattern")
    })
}

pub fn has_known_acronym(text: &str) -> bool {
    acronym_re().is_match(text)
}

/// Score one free-text answer, 50..=100.
pub fn score_answer(text: &str) -> f64 {
    let length_bonus = (text.chars().count() as f64 / 10.0).min(LENGTH_BONUS_CAP);
    let digit_bonus = if text.chars().any(|c| c.is_ascii_digit()) {
        DIGIT_BONUS
    } else {
        0.0
    };
    let acronym_bonus = if has_known_acronym(text) {
        ACRONYM_BONUS
    } else {
        0.0
    };
    (BASE_SCORE + length_bonus + digit_bonus + acronym_bonus).min(MAX_SCORE)
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Grade::S,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            _ => Grade::D,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub score: u32,
    pub answer_scores: [u32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub total_score: u32,
    pub pass_likelihood: u32,
    pub grade: Grade,
    pub dimensions: Vec<DimensionScore>,
    pub weakest: Dimension,
}

impl EvaluationResult {
    pub fn dimension(&self, d: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|s| s.dimension == d)
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

const PASS_SLOPE: f64 = 1.2;
const PASS_OFFSET: f64 = 30.0;
const WEAK_DIMENSION_FLOOR: f64 = 60.0;
const WEAK_DIMENSION_PENALTY: f64 = 10.0;
const STRONG_DIMENSION_FLOOR: f64 = 70.0;
const ALL_STRONG_BONUS: f64 = 5.0;
const PASS_MIN: f64 = 5.0;
const PASS_MAX: f64 = 95.0;

/// Free-text answers keyed by the demo question ids of [`Dimension::questions`].
/// Missing answers score as empty text.
pub fn evaluate(answers: &HashMap<String, String>) -> EvaluationResult {
    let mut raw = Vec::with_capacity(Dimension::all().len());
    for &dimension in Dimension::all() {
        let [first, second] = dimension
            .questions()
            .map(|q| score_answer(answers.get(q).map(String::as_str).unwrap_or("")));
        raw.push((dimension, first, second, (first + second) / 2.0));
    }

    let total = raw.iter().map(|r| r.3).sum::<f64>() / raw.len() as f64;
    let min = raw.iter().map(|r| r.3).fold(f64::INFINITY, f64::min);
    let all_strong = raw.iter().all(|r| r.3 >= STRONG_DIMENSION_FLOOR);

    let mut likelihood = total * PASS_SLOPE - PASS_OFFSET;
    if min < WEAK_DIMENSION_FLOOR {
        likelihood -= WEAK_DIMENSION_PENALTY;
    }
    if all_strong {
        likelihood += ALL_STRONG_BONUS;
    }
    let likelihood = likelihood.clamp(PASS_MIN, PASS_MAX);

    let weakest = raw
        .iter()
        .min_by(|a, b| a.3.total_cmp(&b.3))
        .map(|r| r.0)
        .unwrap_or(Dimension::ProblemRecognition);

    let total_score = total.round() as u32;
    EvaluationResult {
        total_score,
        pass_likelihood: likelihood.round() as u32,
        grade: Grade::from_score(total_score),
        dimensions: raw
            .into_iter()
            .map(|(dimension, first, second, avg)| DimensionScore {
                dimension,
                score: avg.round() as u32,
                answer_scores: [first.round() as u32, second.round() as u32],
            })
            .collect(),
        weakest,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn all_answers(text: &str) -> HashMap<String, String> {
        Dimension::all()
            .iter()
            .flat_map(|d| d.questions())
            .map(|q| (q.to_string(), text.to_string()))
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_answer_scores_base() {
        assert_eq!(score_answer(""), 50.0);
    }

    #[test]
    fn length_bonus_is_fractional_and_capped() {
        assert_eq!(score_answer(&"a".repeat(25)), 52.5);
        assert_eq!(score_answer(&"a".repeat(1_000)), 80.0);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(score_answer(&"가".repeat(20)), 52.0);
    }

    #[test]
    fn digit_and_acronym_bonuses() {
        assert_close(score_answer("9"), 60.1);
        assert_close(score_answer("MVP"), 60.3);
        assert_close(score_answer("mvp"), 50.3);
        assert!(has_known_acronym("AI기반 서비스"));
    }

    #[test]
    fn answer_score_is_capped_at_100() {
        let text = format!("{} 2024 SaaS", "a".repeat(400));
        assert_eq!(score_answer(&text), 100.0);
    }

    #[test]
    fn blank_submission() {
        let r = evaluate(&HashMap::new());
        assert_eq!(r.total_score, 50);
        assert!(r.dimensions.iter().all(|d| d.score == 50));
        // 50 * 1.2 - 30 = 30, minus the weak-dimension penalty
        assert_eq!(r.pass_likelihood, 20);
        assert_eq!(r.grade, Grade::D);
        assert_eq!(r.dimensions.len(), 6);
    }

    #[test]
    fn strong_submission_gets_bonus_and_cap() {
        let text = format!("{} 2024 SaaS", "a".repeat(400));
        let r = evaluate(&all_answers(&text));
        assert_eq!(r.total_score, 100);
        assert_eq!(r.grade, Grade::S);
        assert_eq!(r.pass_likelihood, 95);
    }

    #[test]
    fn medium_submission() {
        // 200 chars -> 70 per answer, every dimension clears 70
        let r = evaluate(&all_answers(&"a".repeat(200)));
        assert_eq!(r.total_score, 70);
        assert_eq!(r.pass_likelihood, 59);
        assert_eq!(r.grade, Grade::B);
    }

    #[test]
    fn weakest_dimension_is_reported() {
        let mut answers = all_answers(&"a".repeat(200));
        answers.remove("team_background");
        answers.remove("team_roles");
        let r = evaluate(&answers);
        assert_eq!(r.weakest, Dimension::TeamCapability);
        assert_eq!(r.dimension(Dimension::TeamCapability).unwrap().score, 50);
    }

    #[test]
    fn grade_bands() {
        assert_eq!(Grade::from_score(95), Grade::S);
        assert_eq!(Grade::from_score(80), Grade::A);
        assert_eq!(Grade::from_score(79), Grade::B);
        assert_eq!(Grade::from_score(60), Grade::C);
        assert_eq!(Grade::from_score(59), Grade::D);
    }

    proptest! {
        #[test]
        fn scores_stay_in_range(text in "\\PC{0,500}") {
            let s = score_answer(&text);
            prop_assert!((50.0..=100.0).contains(&s));
            let r = evaluate(&all_answers(&text));
            prop_assert!((50..=100).contains(&r.total_score));
            prop_assert!((5..=95).contains(&r.pass_likelihood));
        }
    }
}
