//! Session Service - Authentication state for this client
//!
//! Tokens live in local storage so the API client can attach them. The
//! signed-in user lives in a [`SessionState`] shared with the API client,
//! which signs out when the backend rejects the stored token. The
//! composition root calls [`SessionService::initialize`] once at startup.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{
    ApiError, AuthPort, LocalStorePort, SessionState, StorageError, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
};
use crate::domain::entities::{AuthGrant, User};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Failed to store credentials: {0}")]
    Storage(#[from] StorageError),
}

pub struct SessionService {
    auth: Arc<dyn AuthPort>,
    local_store: Arc<dyn LocalStorePort>,
    state: Arc<SessionState>,
}

impl SessionService {
    pub fn new(
        auth: Arc<dyn AuthPort>,
        local_store: Arc<dyn LocalStorePort>,
        state: Arc<SessionState>,
    ) -> Self {
        Self {
            auth,
            local_store,
            state,
        }
    }

    /// Restore the session from a stored token.
    ///
    /// A token the backend no longer accepts is cleared.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Option<User> {
        let token = match self.local_store.get(ACCESS_TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        };
        if token.is_none() {
            debug!("No stored session");
            return None;
        }

        match self.auth.me().await {
            Ok(user) => {
                info!(username = %user.username, "Restored session");
                self.state.sign_in(user.clone());
                Some(user)
            }
            Err(e) => {
                warn!(error = %e, "Stored session rejected, signing out");
                self.clear().await;
                None
            }
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let grant = self.auth.login(email, password).await?;
        self.accept(grant).await
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let grant = self.auth.register(email, username, password).await?;
        self.accept(grant).await
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.clear().await;
        info!("Signed out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_signed_in()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.current_user()
    }

    async fn accept(&self, grant: AuthGrant) -> Result<User, SessionError> {
        let (tokens, user) = grant.into_parts();
        self.local_store.set(ACCESS_TOKEN_KEY, &tokens.access).await?;
        self.local_store.set(REFRESH_TOKEN_KEY, &tokens.refresh).await?;
        info!(username = %user.username, "Signed in");
        self.state.sign_in(user.clone());
        Ok(user)
    }

    async fn clear(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.local_store.remove(key).await {
                warn!(error = %e, key, "Failed to clear stored token");
            }
        }
        self.state.sign_out();
    }
}
