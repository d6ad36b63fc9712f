use bizplan_core::storage::LocalStore;
use bizplan_core::wizard::WizardProgress;
use std::time::Duration;
use tokio::sync::mpsc;

/// Coalesces bursts of wizard edits into a single write.
///
/// Every edit hands the latest snapshot to a background task, which waits
/// until no newer snapshot arrives for `debounce` and then saves the last
/// one. Last write wins. Outside a Tokio runtime snapshots are saved inline.
#[derive(Clone)]
pub struct WizardPersister {
    store: LocalStore,
    tx: Option<mpsc::UnboundedSender<WizardProgress>>,
}

impl WizardPersister {
    pub fn spawn(store: LocalStore, debounce: Duration) -> Self {
        if tokio::runtime::Handle::try_current().is_err() {
            return Self { store, tx: None };
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<WizardProgress>();
        let task_store = store.clone();
        tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                loop {
                    match tokio::time::timeout(debounce, rx.recv()).await {
                        Ok(Some(newer)) => latest = newer,
                        // Quiet period elapsed, or every sender is gone.
                        Ok(None) | Err(_) => break,
                    }
                }
                let store = task_store.clone();
                let result = tokio::task::spawn_blocking(move || latest.save(&store)).await;
                match result {
                    Ok(Ok(())) => tracing::debug!("wizard progress persisted"),
                    Ok(Err(e)) => tracing::warn!(error = %e, "failed to persist wizard progress"),
                    Err(e) => tracing::warn!(error = %e, "wizard persist task panicked"),
                }
            }
        });

        Self {
            store,
            tx: Some(tx),
        }
    }

    pub fn schedule(&self, snapshot: WizardProgress) {
        match &self.tx {
            Some(tx) => {
                if let Err(mpsc::error::SendError(snapshot)) = tx.send(snapshot) {
                    self.save_now(&snapshot);
                }
            }
            None => self.save_now(&snapshot),
        }
    }

    fn save_now(&self, snapshot: &WizardProgress) {
        if let Err(e) = snapshot.save(&self.store) {
            tracing::warn!(error = %e, "failed to persist wizard progress");
        }
    }
}
