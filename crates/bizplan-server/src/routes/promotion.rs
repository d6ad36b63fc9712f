use axum::extract::{Path, Query, State};
use bizplan_core::promotion::{PlanPricing, PromotionStatus, LAUNCH};
use bizplan_core::types::PlanKey;
use serde::Serialize;

use super::{ok, ApiResult, AtQuery};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PromotionView {
    #[serde(flatten)]
    pub status: PromotionStatus,
    pub banner_dismissed: bool,
}

/// GET /api/v1/promotion: current phase, discount rate and countdown.
pub async fn get_promotion(
    State(app): State<AppState>,
    Query(q): Query<AtQuery>,
) -> ApiResult<PromotionView> {
    let now = q.now()?;
    let store = app.store.clone();
    let banner_dismissed =
        super::blocking(move || bizplan_core::banner::is_dismissed(&store, now)).await?;
    ok(PromotionView {
        status: LAUNCH.status(now),
        banner_dismissed,
    })
}

/// GET /api/v1/promotion/plans: pricing for every plan.
pub async fn list_plans(Query(q): Query<AtQuery>) -> ApiResult<Vec<PlanPricing>> {
    let now = q.now()?;
    ok(LAUNCH.all_plan_pricing(now))
}

/// GET /api/v1/promotion/plans/{plan}: pricing for one plan.
pub async fn get_plan(Path(plan): Path<String>, Query(q): Query<AtQuery>) -> ApiResult<PlanPricing> {
    let plan: PlanKey = plan.parse()?;
    let now = q.now()?;
    ok(LAUNCH.plan_pricing(plan, now))
}
