use crate::catalog::{self, StepDefinition, TOTAL_STEPS};
use crate::error::Result;
use crate::storage::{LocalStore, WIZARD_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// AnswerValue
// ---------------------------------------------------------------------------

/// A single form answer as the form layer sends it. No type checking against
/// the question's declared kind happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Whether this value satisfies a required question.
    pub fn is_filled(&self) -> bool {
        match self {
            AnswerValue::Null => false,
            AnswerValue::Bool(_) => true,
            AnswerValue::Number(n) => n.is_finite(),
            AnswerValue::Text(s) => !s.trim().is_empty(),
            AnswerValue::List(items) => !items.is_empty(),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Null => f.write_str("-"),
            AnswerValue::Bool(b) => write!(f, "{b}"),
            AnswerValue::Number(n) => write!(f, "{n}"),
            AnswerValue::Text(s) => f.write_str(s),
            AnswerValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        AnswerValue::List(items)
    }
}

pub type StepAnswers = BTreeMap<String, AnswerValue>;

// ---------------------------------------------------------------------------
// WizardProgress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardProgress {
    #[serde(default = "first_step")]
    pub current_step: u32,
    #[serde(default)]
    pub step_data: BTreeMap<u32, StepAnswers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn first_step() -> u32 {
    1
}

impl Default for WizardProgress {
    fn default() -> Self {
        Self {
            current_step: first_step(),
            step_data: BTreeMap::new(),
            updated_at: None,
        }
    }
}

impl WizardProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_steps(&self) -> u32 {
        TOTAL_STEPS
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Load persisted progress; a store that never saw the wizard yields a fresh one.
    pub fn load(store: &LocalStore) -> Result<Self> {
        store.get_or_default(WIZARD_KEY)
    }

    pub fn save(&self, store: &LocalStore) -> Result<()> {
        store.set(WIZARD_KEY, self)
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn go_to_next_step(&mut self) {
        self.current_step = self.current_step.saturating_add(1).min(TOTAL_STEPS);
        self.touch();
    }

    pub fn go_to_previous_step(&mut self) {
        self.current_step = self.current_step.saturating_sub(1).max(1);
        self.touch();
    }

    /// Stores `step` as-is. Callers resolve it against the catalog; an unknown
    /// step simply has no definition.
    pub fn set_current_step(&mut self, step: u32) {
        self.current_step = step;
        self.touch();
    }

    // -----------------------------------------------------------------------
    // Answers
    // -----------------------------------------------------------------------

    pub fn update_step_data(
        &mut self,
        step: u32,
        question: impl Into<String>,
        value: impl Into<AnswerValue>,
    ) {
        self.step_data
            .entry(step)
            .or_default()
            .insert(question.into(), value.into());
        self.touch();
    }

    /// Remove one answer. Returns the previous value if there was one.
    pub fn clear_answer(&mut self, step: u32, question: &str) -> Option<AnswerValue> {
        let removed = self
            .step_data
            .get_mut(&step)
            .and_then(|answers| answers.remove(question));
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn step_data(&self, step: u32) -> StepAnswers {
        self.step_data.get(&step).cloned().unwrap_or_default()
    }

    pub fn answer(&self, step: u32, question: &str) -> Option<&AnswerValue> {
        self.step_data.get(&step).and_then(|a| a.get(question))
    }

    pub fn reset_wizard(&mut self) {
        self.current_step = first_step();
        self.step_data.clear();
        self.touch();
    }

    // -----------------------------------------------------------------------
    // Completion
    // -----------------------------------------------------------------------

    pub fn is_step_completed(&self, step: u32) -> bool {
        self.is_step_completed_in(catalog::steps(), step)
    }

    /// Completion against an explicit step list. A step id without a
    /// definition is never complete.
    pub fn is_step_completed_in(&self, steps: &[StepDefinition], step: u32) -> bool {
        let Some(def) = steps.iter().find(|s| s.id == step) else {
            return false;
        };
        let answers = self.step_data.get(&step);
        def.required_questions().all(|q| {
            answers
                .and_then(|a| a.get(q.id))
                .is_some_and(AnswerValue::is_filled)
        })
    }

    /// Required questions of `step` that still lack an answer.
    pub fn missing_required(&self, step: u32) -> Vec<&'static str> {
        let Some(def) = catalog::step(step) else {
            return Vec::new();
        };
        def.required_questions()
            .filter(|q| !self.answer(step, q.id).is_some_and(AnswerValue::is_filled))
            .map(|q| q.id)
            .collect()
    }

    pub fn completed_steps(&self) -> Vec<u32> {
        catalog::steps()
            .iter()
            .map(|s| s.id)
            .filter(|&id| self.is_step_completed(id))
            .collect()
    }

    pub fn first_incomplete_step(&self) -> Option<u32> {
        catalog::steps()
            .iter()
            .map(|s| s.id)
            .find(|&id| !self.is_step_completed(id))
    }

    /// Share of completed steps, 0..=100.
    pub fn progress_percent(&self) -> u32 {
        let done = self.completed_steps().len() as u32;
        done * 100 / TOTAL_STEPS
    }

    /// The form may move forward only once the current step is complete.
    pub fn can_proceed(&self) -> bool {
        self.is_step_completed(self.current_step)
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{QuestionDefinition, QuestionKind};
    use proptest::prelude::*;
    use tempfile::TempDir;

    const fn question(id: &'static str, required: bool) -> QuestionDefinition {
        QuestionDefinition {
            id,
            label: id,
            kind: QuestionKind::Text,
            required,
            placeholder: None,
            options: &[],
        }
    }

    static SCENARIO_STEPS: [StepDefinition; 2] = [
        StepDefinition {
            id: 1,
            title: "one",
            description: "",
            questions: &[],
        },
        StepDefinition {
            id: 2,
            title: "two",
            description: "",
            questions: &[question("q1", true), question("q2", false)],
        },
    ];

    fn fill_step(w: &mut WizardProgress, step: u32) {
        for q in catalog::step(step).unwrap().required_questions() {
            let value = match q.kind {
                QuestionKind::Number => AnswerValue::Number(1.0),
                QuestionKind::Checkbox => AnswerValue::Bool(true),
                QuestionKind::MultiSelect => AnswerValue::List(vec!["sns".into()]),
                _ => AnswerValue::Text("answer".into()),
            };
            w.update_step_data(step, q.id, value);
        }
    }

    #[test]
    fn required_and_optional_scenario() {
        let mut w = WizardProgress::new();
        w.update_step_data(2, "q2", "x");
        assert!(!w.is_step_completed_in(&SCENARIO_STEPS, 2));

        w.update_step_data(2, "q1", "y");
        assert!(w.is_step_completed_in(&SCENARIO_STEPS, 2));

        w.update_step_data(2, "q1", "");
        assert!(!w.is_step_completed_in(&SCENARIO_STEPS, 2));
    }

    #[test]
    fn step_without_required_questions_is_complete() {
        let w = WizardProgress::new();
        assert!(w.is_step_completed_in(&SCENARIO_STEPS, 1));
    }

    #[test]
    fn unknown_step_is_never_complete() {
        let w = WizardProgress::new();
        assert!(!w.is_step_completed(0));
        assert!(!w.is_step_completed(42));
    }

    #[test]
    fn blank_values_do_not_count() {
        let mut w = WizardProgress::new();
        w.update_step_data(2, "problem", "   \n\t");
        w.update_step_data(2, "target_customer", AnswerValue::Null);
        assert!(!w.is_step_completed(2));
        assert_eq!(w.missing_required(2), vec!["problem", "target_customer"]);

        w.update_step_data(2, "problem", "Founders waste weeks on grant paperwork");
        w.update_step_data(2, "target_customer", "Pre-seed founders");
        assert!(w.is_step_completed(2));
        assert!(w.missing_required(2).is_empty());
    }

    #[test]
    fn empty_list_does_not_count() {
        assert!(!AnswerValue::List(vec![]).is_filled());
        assert!(AnswerValue::Bool(false).is_filled());
        assert!(AnswerValue::Number(0.0).is_filled());
    }

    #[test]
    fn navigation_is_bounded() {
        let mut w = WizardProgress::new();
        w.go_to_previous_step();
        assert_eq!(w.current_step, 1);
        for _ in 0..10 {
            w.go_to_next_step();
        }
        assert_eq!(w.current_step, TOTAL_STEPS);
    }

    #[test]
    fn set_current_step_is_unchecked() {
        let mut w = WizardProgress::new();
        w.set_current_step(99);
        assert_eq!(w.current_step, 99);
        assert!(catalog::step(w.current_step).is_none());
        w.go_to_next_step();
        assert_eq!(w.current_step, TOTAL_STEPS);
    }

    #[test]
    fn next_step_from_largest_stored_step_clamps() {
        let mut w = WizardProgress::new();
        w.set_current_step(u32::MAX);
        w.go_to_next_step();
        assert_eq!(w.current_step, TOTAL_STEPS);

        w.set_current_step(0);
        w.go_to_previous_step();
        assert_eq!(w.current_step, 1);
    }

    #[test]
    fn step_data_defaults_to_empty() {
        let w = WizardProgress::new();
        assert!(w.step_data(3).is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut w = WizardProgress::new();
        fill_step(&mut w, 1);
        w.go_to_next_step();
        w.reset_wizard();
        assert_eq!(w.current_step, 1);
        for s in catalog::steps() {
            assert!(w.step_data(s.id).is_empty());
        }
    }

    #[test]
    fn clear_answer_reopens_step() {
        let mut w = WizardProgress::new();
        fill_step(&mut w, 1);
        assert!(w.is_step_completed(1));
        assert!(w.clear_answer(1, "company_name").is_some());
        assert!(!w.is_step_completed(1));
        assert!(w.clear_answer(1, "company_name").is_none());
    }

    #[test]
    fn progress_tracking() {
        let mut w = WizardProgress::new();
        assert_eq!(w.progress_percent(), 0);
        assert_eq!(w.first_incomplete_step(), Some(1));
        assert!(!w.can_proceed());

        fill_step(&mut w, 1);
        fill_step(&mut w, 2);
        fill_step(&mut w, 3);
        assert_eq!(w.completed_steps(), vec![1, 2, 3]);
        assert_eq!(w.progress_percent(), 50);
        assert_eq!(w.first_incomplete_step(), Some(4));
        assert!(w.can_proceed());

        for s in 4..=TOTAL_STEPS {
            fill_step(&mut w, s);
        }
        assert_eq!(w.progress_percent(), 100);
        assert_eq!(w.first_incomplete_step(), None);
    }

    #[test]
    fn persistence_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        assert_eq!(WizardProgress::load(&store).unwrap().current_step, 1);

        let mut w = WizardProgress::new();
        w.update_step_data(1, "company_name", "Acme");
        w.update_step_data(6, "funding_required", 50_000_000.0);
        w.update_step_data(4, "marketing_channels", vec!["sns".to_string()]);
        w.update_step_data(5, "has_partners", true);
        w.go_to_next_step();
        w.save(&store).unwrap();

        let loaded = WizardProgress::load(&store).unwrap();
        assert_eq!(loaded, w);
        assert_eq!(
            loaded.answer(6, "funding_required"),
            Some(&AnswerValue::Number(50_000_000.0))
        );
    }

    #[test]
    fn answer_value_json_shapes() {
        let v: AnswerValue = serde_json::from_str("null").unwrap();
        assert_eq!(v, AnswerValue::Null);
        let v: AnswerValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(v, AnswerValue::List(vec!["a".into(), "b".into()]));
        let v: AnswerValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, AnswerValue::Number(3.0));
    }

    fn any_answer() -> impl Strategy<Value = AnswerValue> {
        prop_oneof![
            Just(AnswerValue::Null),
            any::<bool>().prop_map(AnswerValue::Bool),
            (-1_000i32..1_000).prop_map(|n| AnswerValue::Number(n as f64)),
            "[ a-z]{0,8}".prop_map(AnswerValue::Text),
            proptest::collection::vec("[a-z]{1,4}", 0..3).prop_map(AnswerValue::List),
        ]
    }

    #[derive(Debug, Clone)]
    enum Nav {
        Next,
        Prev,
    }

    proptest! {
        #[test]
        fn navigation_stays_in_range(
            start in any::<u32>(),
            moves in proptest::collection::vec(
                prop_oneof![Just(Nav::Next), Just(Nav::Prev)], 1..40),
        ) {
            let mut w = WizardProgress::new();
            w.set_current_step(start);
            for m in moves {
                match m {
                    Nav::Next => w.go_to_next_step(),
                    Nav::Prev => w.go_to_previous_step(),
                }
                prop_assert!((1..=TOTAL_STEPS).contains(&w.current_step));
            }
        }

        #[test]
        fn optional_answers_never_change_completion(
            step in 1u32..=TOTAL_STEPS,
            fill in any::<bool>(),
            value in any_answer(),
        ) {
            let mut w = WizardProgress::new();
            if fill {
                fill_step(&mut w, step);
            }
            let before = w.is_step_completed(step);
            let def = catalog::step(step).unwrap();
            for q in def.questions.iter().filter(|q| !q.required) {
                w.update_step_data(step, q.id, value.clone());
            }
            prop_assert_eq!(w.is_step_completed(step), before);
        }

        #[test]
        fn reset_empties_every_step(step in 0u32..10, value in any_answer()) {
            let mut w = WizardProgress::new();
            w.update_step_data(step, "q", value);
            w.reset_wizard();
            prop_assert!(w.step_data(step).is_empty());
            prop_assert_eq!(w.current_step, 1);
        }
    }
}
