use axum::Json;
use bizplan_core::evaluation::{self, EvaluationResult};
use serde::Deserialize;
use std::collections::HashMap;

use super::{ok, ApiResult};

#[derive(Debug, Deserialize)]
pub struct EvaluationBody {
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

/// POST /api/v1/evaluations: score the demo evaluation answers.
pub async fn create_evaluation(Json(body): Json<EvaluationBody>) -> ApiResult<EvaluationResult> {
    let result = evaluation::evaluate(&body.answers);
    tracing::debug!(
        total = result.total_score,
        pass_likelihood = result.pass_likelihood,
        "evaluation scored"
    );
    ok(result)
}
