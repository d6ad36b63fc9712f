use axum::extract::{Query, State};
use axum::Json;
use bizplan_core::promotion::LAUNCH;
use bizplan_core::registration::{self, PreRegistration, PreRegistrationRequest, RegistrationStats};

use super::{ok, ApiResult, AtQuery};
use crate::state::AppState;

/// POST /api/v1/pre-registrations: register at the current phase price.
pub async fn create_pre_registration(
    State(app): State<AppState>,
    Query(q): Query<AtQuery>,
    Json(req): Json<PreRegistrationRequest>,
) -> ApiResult<PreRegistration> {
    let now = q.now()?;
    let _guard = app.registrations.lock().await;
    let store = app.store.clone();
    let created =
        super::blocking(move || registration::register(&store, &LAUNCH, req, now)).await?;
    tracing::info!(plan = %created.plan, phase = %created.phase, "pre-registration recorded");
    ok(created)
}

/// GET /api/v1/admin/stats: pre-registration counts and committed revenue.
pub async fn admin_stats(State(app): State<AppState>) -> ApiResult<RegistrationStats> {
    let store = app.store.clone();
    let all = super::blocking(move || registration::list(&store)).await?;
    ok(registration::stats(&all))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizplan_core::types::PlanKey;

    fn req(email: &str) -> Json<PreRegistrationRequest> {
        Json(PreRegistrationRequest {
            name: "Lee".to_string(),
            email: email.to_string(),
            phone: None,
            organization: Some("Acme".to_string()),
            plan: PlanKey::Premium,
        })
    }

    fn at(s: &str) -> Query<AtQuery> {
        Query(AtQuery {
            at: Some(s.to_string()),
        })
    }

    #[tokio::test]
    async fn register_and_count() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf()).unwrap();

        let created = create_pre_registration(
            State(app.clone()),
            at("2025-01-02T00:00:00+09:00"),
            req("lee@example.com"),
        )
        .await
        .unwrap()
        .0
        .data
        .unwrap();
        assert_eq!(created.locked_price, 1_049_300);

        let dup = create_pre_registration(
            State(app.clone()),
            at("2025-01-02T00:00:00+09:00"),
            req("lee@example.com"),
        )
        .await;
        assert!(dup.is_err());

        let stats = admin_stats(State(app)).await.unwrap().0.data.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.committed_revenue, 1_049_300);
    }
}
