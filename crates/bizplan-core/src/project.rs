use crate::error::{BizplanError, FieldError, Result};
use crate::storage::{LocalStore, PROJECT_KEY};
use crate::wizard::WizardProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MAX_NAME_LEN: usize = 100;

/// The business plan currently being authored. Only one exists at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, description: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            created_at: now,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(FieldError::new("name", "required"));
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("must be at most {MAX_NAME_LEN} characters"),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(BizplanError::Validation(errors))
        }
    }

    /// Create a new project, replacing any previous one, and start the wizard
    /// over from step 1.
    pub fn create(
        store: &LocalStore,
        name: &str,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let project = Project::new(name.trim(), description, now);
        project.validate()?;

        let mut wizard = WizardProgress::load(store)?;
        wizard.reset_wizard();
        wizard.save(store)?;

        store.set(PROJECT_KEY, &project)?;
        Ok(project)
    }

    pub fn load(store: &LocalStore) -> Result<Self> {
        store.get(PROJECT_KEY)?.ok_or(BizplanError::ProjectNotFound)
    }
}
