//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::outbound::SessionState;
use crate::application::services::{
    CatalogService, RosterService, SessionService, SubmissionService, WizardService,
};
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::create_local_store;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<SessionService>,
    pub catalog: Arc<CatalogService>,
    pub roster: Arc<RosterService>,
    pub wizard: Arc<WizardService>,
    pub submission: Arc<SubmissionService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize local storage
        let local_store = create_local_store(&config).await?;

        // Signed-in user, shared so a rejected token ends the session
        let session_state = Arc::new(SessionState::new());

        // Initialize backend API client
        let api = Arc::new(
            ApiClient::new(
                &config.api_base_url,
                config.http_timeout,
                local_store.clone(),
                session_state.clone(),
            )
            .context("Failed to build HTTP client")?,
        );

        // Initialize application services
        let session = Arc::new(SessionService::new(
            api.clone(),
            local_store.clone(),
            session_state,
        ));
        let catalog = Arc::new(CatalogService::new(api.clone()));
        let roster = Arc::new(RosterService::new(api.clone()));
        let wizard = Arc::new(WizardService::new(
            local_store,
            config.default_ruleset.clone(),
        ));
        let submission = Arc::new(SubmissionService::new(
            api,
            wizard.clone(),
            catalog.clone(),
            roster.clone(),
        ));

        Ok(Self {
            config,
            session,
            catalog,
            roster,
            wizard,
            submission,
        })
    }
}
