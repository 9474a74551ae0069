//! Wizard Service - Draft store with durable persistence
//!
//! Edits run synchronously against the [`DraftStore`]; the resulting draft is
//! then written to local storage. Storage failures never block editing.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{LocalStorePort, DRAFT_KEY};
use crate::application::services::draft_store::DraftStore;
use crate::domain::entities::WizardDraft;
use crate::domain::services::migrate;

pub struct WizardService {
    store: RwLock<DraftStore>,
    local_store: Arc<dyn LocalStorePort>,
}

impl WizardService {
    pub fn new(local_store: Arc<dyn LocalStorePort>, default_ruleset: impl Into<String>) -> Self {
        Self {
            store: RwLock::new(DraftStore::new(default_ruleset)),
            local_store,
        }
    }

    /// Restore the saved draft, migrating older versions.
    ///
    /// Missing or unreadable drafts leave a fresh default in place.
    #[instrument(skip(self))]
    pub async fn load(&self) -> WizardDraft {
        let stored = match self.local_store.get(DRAFT_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved draft");
                return self.snapshot().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read saved draft");
                return self.snapshot().await;
            }
        };

        let migrated = serde_json::from_str(&stored)
            .map_err(|e| e.to_string())
            .and_then(|value| migrate(value).map_err(|e| e.to_string()));
        let draft = match migrated {
            Ok(draft) => draft,
            Err(reason) => {
                warn!(%reason, "Discarding unreadable draft");
                let mut store = self.store.write().await;
                store.reset();
                let draft = store.draft().clone();
                drop(store);
                self.persist(&draft).await;
                return draft;
            }
        };

        info!(version = draft.version, name = %draft.name, "Restored saved draft");
        self.store.write().await.replace(draft.clone());
        self.persist(&draft).await;
        draft
    }

    pub async fn snapshot(&self) -> WizardDraft {
        self.store.read().await.draft().clone()
    }

    pub async fn ruleset_confirmed(&self) -> bool {
        self.store.read().await.ruleset_confirmed()
    }

    /// Run one edit against the store and persist the result if it changed
    pub async fn edit<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut DraftStore) -> T + Send,
    {
        let mut store = self.store.write().await;
        let before = store.draft().clone();
        let outcome = f(&mut store);
        let after = store.draft().clone();
        drop(store);

        if after != before {
            self.persist(&after).await;
        }
        outcome
    }

    /// Abandon the draft and forget the saved copy
    #[instrument(skip(self))]
    pub async fn reset(&self) {
        self.store.write().await.reset();
        if let Err(e) = self.local_store.remove(DRAFT_KEY).await {
            warn!(error = %e, "Failed to clear saved draft");
        }
        info!("Draft reset");
    }

    async fn persist(&self, draft: &WizardDraft) {
        let raw = match serde_json::to_string(draft) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize draft");
                return;
            }
        };
        if let Err(e) = self.local_store.set(DRAFT_KEY, &raw).await {
            warn!(error = %e, "Failed to save draft");
        }
    }
}
