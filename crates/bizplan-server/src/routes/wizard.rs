use axum::extract::{Path, State};
use axum::Json;
use bizplan_core::catalog::{self, StepDefinition};
use bizplan_core::error::BizplanError;
use bizplan_core::wizard::{AnswerValue, StepAnswers, WizardProgress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ok, ApiResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct WizardView {
    pub current_step: u32,
    pub total_steps: u32,
    pub step_data: BTreeMap<u32, StepAnswers>,
    pub completed_steps: Vec<u32>,
    pub progress_percent: u32,
    pub can_proceed: bool,
}

impl From<&WizardProgress> for WizardView {
    fn from(w: &WizardProgress) -> Self {
        Self {
            current_step: w.current_step,
            total_steps: w.total_steps(),
            step_data: w.step_data.clone(),
            completed_steps: w.completed_steps(),
            progress_percent: w.progress_percent(),
            can_proceed: w.can_proceed(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub definition: &'static StepDefinition,
    pub answers: StepAnswers,
    pub completed: bool,
    pub missing_required: Vec<&'static str>,
}

impl StepView {
    fn build(w: &WizardProgress, definition: &'static StepDefinition) -> Self {
        Self {
            definition,
            answers: w.step_data(definition.id),
            completed: w.is_step_completed(definition.id),
            missing_required: w.missing_required(definition.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepSummary {
    pub id: u32,
    pub title: &'static str,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnswerBody {
    pub value: AnswerValue,
}

#[derive(Debug, Deserialize)]
pub struct CurrentStepBody {
    pub step: u32,
}

fn step_definition(step: u32) -> Result<&'static StepDefinition, BizplanError> {
    catalog::step(step).ok_or(BizplanError::StepNotFound(step))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/wizard: full progress.
pub async fn get_wizard(State(app): State<AppState>) -> ApiResult<WizardView> {
    let w = app.wizard.lock().await;
    ok(WizardView::from(&*w))
}

/// GET /api/v1/wizard/steps: every step with its completion flag.
pub async fn list_steps(State(app): State<AppState>) -> ApiResult<Vec<StepSummary>> {
    let w = app.wizard.lock().await;
    ok(catalog::steps()
        .iter()
        .map(|s| StepSummary {
            id: s.id,
            title: s.title,
            completed: w.is_step_completed(s.id),
        })
        .collect())
}

/// GET /api/v1/wizard/steps/{step}: questions and stored answers for one step.
pub async fn get_step(State(app): State<AppState>, Path(step): Path<u32>) -> ApiResult<StepView> {
    let definition = step_definition(step)?;
    let w = app.wizard.lock().await;
    ok(StepView::build(&w, definition))
}

/// PUT /api/v1/wizard/steps/{step}/answers/{question}: store one answer.
pub async fn put_answer(
    State(app): State<AppState>,
    Path((step, question)): Path<(u32, String)>,
    Json(body): Json<AnswerBody>,
) -> ApiResult<StepView> {
    let definition = step_definition(step)?;
    if definition.question(&question).is_none() {
        return Err(BizplanError::QuestionNotFound { step, question }.into());
    }

    let mut w = app.wizard.lock().await;
    w.update_step_data(step, question, body.value);
    app.persister.schedule(w.clone());
    tracing::debug!(step, "wizard answer updated");
    ok(StepView::build(&w, definition))
}

/// POST /api/v1/wizard/next
pub async fn next_step(State(app): State<AppState>) -> ApiResult<WizardView> {
    mutate(&app, WizardProgress::go_to_next_step).await
}

/// POST /api/v1/wizard/previous
pub async fn previous_step(State(app): State<AppState>) -> ApiResult<WizardView> {
    mutate(&app, WizardProgress::go_to_previous_step).await
}

/// POST /api/v1/wizard/reset
pub async fn reset(State(app): State<AppState>) -> ApiResult<WizardView> {
    mutate(&app, WizardProgress::reset_wizard).await
}

/// PUT /api/v1/wizard/current-step: stored as given; unknown steps surface
/// as 404 when fetched.
pub async fn set_current_step(
    State(app): State<AppState>,
    Json(body): Json<CurrentStepBody>,
) -> ApiResult<WizardView> {
    mutate(&app, |w| w.set_current_step(body.step)).await
}

async fn mutate(app: &AppState, f: impl FnOnce(&mut WizardProgress)) -> ApiResult<WizardView> {
    let mut w = app.wizard.lock().await;
    f(&mut w);
    app.persister.schedule(w.clone());
    ok(WizardView::from(&*w))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
