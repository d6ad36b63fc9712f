use crate::persist::WizardPersister;
use bizplan_core::config::Config;
use bizplan_core::storage::LocalStore;
use bizplan_core::wizard::WizardProgress;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub store: LocalStore,
    pub config: Arc<Config>,
    /// In-memory wizard; the single writer for `wizard-storage`.
    pub wizard: Arc<Mutex<WizardProgress>>,
    pub persister: WizardPersister,
    /// Serializes read-modify-write of the pre-registration list.
    pub registrations: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(root: PathBuf) -> bizplan_core::Result<Self> {
        let config = Config::load_or_default(&root)?;
        let store = LocalStore::new(root.clone());
        let wizard = WizardProgress::load(&store)?;
        let persister = WizardPersister::spawn(
            store.clone(),
            Duration::from_millis(config.storage.persist_debounce_ms),
        );
        Ok(Self {
            root,
            store,
            config: Arc::new(config),
            wizard: Arc::new(Mutex::new(wizard)),
            persister,
            registrations: Arc::new(Mutex::new(())),
        })
    }
}
