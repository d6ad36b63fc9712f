pub mod error;
pub mod persist;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Promotion
        .route("/api/v1/promotion", get(routes::promotion::get_promotion))
        .route("/api/v1/promotion/plans", get(routes::promotion::list_plans))
        .route(
            "/api/v1/promotion/plans/{plan}",
            get(routes::promotion::get_plan),
        )
        // Wizard
        .route("/api/v1/wizard", get(routes::wizard::get_wizard))
        .route("/api/v1/wizard/steps", get(routes::wizard::list_steps))
        .route("/api/v1/wizard/steps/{step}", get(routes::wizard::get_step))
        .route(
            "/api/v1/wizard/steps/{step}/answers/{question}",
            put(routes::wizard::put_answer),
        )
        .route("/api/v1/wizard/next", post(routes::wizard::next_step))
        .route(
            "/api/v1/wizard/previous",
            post(routes::wizard::previous_step),
        )
        .route(
            "/api/v1/wizard/current-step",
            put(routes::wizard::set_current_step),
        )
        .route("/api/v1/wizard/reset", post(routes::wizard::reset))
        // Projects
        .route("/api/v1/projects", post(routes::projects::create_project))
        .route(
            "/api/v1/projects/current",
            get(routes::projects::current_project),
        )
        // Evaluation demo
        .route(
            "/api/v1/evaluations",
            post(routes::evaluations::create_evaluation),
        )
        // Pre-registration + admin
        .route(
            "/api/v1/pre-registrations",
            post(routes::registrations::create_pre_registration),
        )
        .route(
            "/api/v1/admin/stats",
            get(routes::registrations::admin_stats),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the mock backend on `port`.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the mock backend on a pre-bound listener.
///
/// Lets the caller read the actual port before starting (useful when
/// `port = 0` and the OS picks a free port).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app_state = state::AppState::new(root)?;
    let app = build_router(app_state);

    tracing::info!("bizplan backend listening on http://localhost:{actual_port}/api/v1");

    if open_browser {
        let url = format!("http://localhost:{actual_port}/api/v1/promotion");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn router() -> (tempfile::TempDir, Router) {
        let dir = tempfile::TempDir::new().unwrap();
        let state = state::AppState::new(dir.path().to_path_buf()).unwrap();
        (dir, build_router(state))
    }

    #[tokio::test]
    async fn plan_pricing_over_http() {
        let (_dir, app) = router();
        let req = Request::get("/api/v1/promotion/plans/pro?at=2025-01-01T00:00:00%2B09:00")
            .body(Body::empty())
            .unwrap();
        let (status, json) = call(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["phase"], "A");
        assert_eq!(json["data"]["current_price"], 559_300);
        assert_eq!(json["data"]["savings"], 239_700);
    }

    #[tokio::test]
    async fn unknown_plan_over_http() {
        let (_dir, app) = router();
        let req = Request::get("/api/v1/promotion/plans/gold")
            .body(Body::empty())
            .unwrap();
        let (status, json) = call(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn answer_over_http() {
        let (_dir, app) = router();
        let req = Request::put("/api/v1/wizard/steps/1/answers/company_name")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"value":"Acme"}"#))
            .unwrap();
        let (status, json) = call(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["answers"]["company_name"], "Acme");
        assert_eq!(json["data"]["completed"], false);
    }

    #[tokio::test]
    async fn next_after_largest_current_step_clamps() {
        let (_dir, app) = router();
        let req = Request::put("/api/v1/wizard/current-step")
            .header("content-type", "application/json")
            .body(Body::from(format!(r#"{{"step":{}}}"#, u32::MAX)))
            .unwrap();
        let (status, _) = call(app.clone(), req).await;
        assert_eq!(status, StatusCode::OK);

        let req = Request::post("/api/v1/wizard/next")
            .body(Body::empty())
            .unwrap();
        let (status, json) = call(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["current_step"], 6);
    }

    #[tokio::test]
    async fn invalid_registration_over_http() {
        let (_dir, app) = router();
        let req = Request::post("/api/v1/pre-registrations")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"name":"","email":"nope","plan":"plus"}"#,
            ))
            .unwrap();
        let (status, json) = call(app, req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["details"].as_array().unwrap().len(), 2);
    }
}
