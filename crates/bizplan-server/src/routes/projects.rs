use axum::extract::State;
use axum::Json;
use bizplan_core::project::Project;
use chrono::Utc;
use serde::Deserialize;

use super::{ok, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProjectBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/v1/projects: start a new business plan; the wizard starts over.
pub async fn create_project(
    State(app): State<AppState>,
    Json(body): Json<CreateProjectBody>,
) -> ApiResult<Project> {
    // Held across the write so no edit lands between the reset on disk and
    // the reset in memory.
    let mut w = app.wizard.lock().await;

    let store = app.store.clone();
    let project = super::blocking(move || {
        Project::create(&store, &body.name, body.description, Utc::now())
    })
    .await?;

    w.reset_wizard();
    app.persister.schedule(w.clone());
    tracing::info!(project = %project.id, name = %project.name, "project created");
    ok(project)
}

/// GET /api/v1/projects/current
pub async fn current_project(State(app): State<AppState>) -> ApiResult<Project> {
    let store = app.store.clone();
    let project = super::blocking(move || Project::load(&store)).await?;
    ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizplan_core::wizard::AnswerValue;

    #[tokio::test]
    async fn create_then_fetch() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf()).unwrap();

        app.wizard
            .lock()
            .await
            .update_step_data(1, "company_name", AnswerValue::from("Old"));

        let created = create_project(
            State(app.clone()),
            Json(CreateProjectBody {
                name: "Series A plan".to_string(),
                description: None,
            }),
        )
        .await
        .unwrap()
        .0
        .data
        .unwrap();
        assert!(app.wizard.lock().await.step_data(1).is_empty());

        let current = current_project(State(app)).await.unwrap().0.data.unwrap();
        assert_eq!(current.id, created.id);
    }

    #[tokio::test]
    async fn missing_project_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf()).unwrap();
        assert!(current_project(State(app)).await.is_err());
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf()).unwrap();
        let result = create_project(
            State(app),
            Json(CreateProjectBody {
                name: " ".to_string(),
                description: None,
            }),
        )
        .await;
        assert!(result.is_err());
    }
}
