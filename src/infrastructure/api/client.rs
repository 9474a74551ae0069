//! HTTP client for the character backend
//!
//! Attaches the stored bearer token to every request and maps error responses
//! onto [`ApiError`]. A 401 from anything other than the auth endpoints means
//! the stored session is dead: its tokens are cleared and the shared
//! [`SessionState`] is signed out.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ports::outbound::{
    ApiError, FieldErrors, LocalStorePort, SessionState, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY,
};
use crate::domain::entities::Page;

/// Endpoints whose 401 means bad credentials rather than an expired session
const AUTH_PATHS: [&str; 3] = ["/auth/login/", "/auth/register/", "/auth/token/refresh/"];

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// List endpoints answer with a DRF page or, unpaginated, a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Paged(Page<T>),
    Plain(Vec<T>),
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    local_store: Arc<dyn LocalStorePort>,
    session: Arc<SessionState>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        local_store: Arc<dyn LocalStorePort>,
        session: Arc<SessionState>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            local_store,
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.get(self.url(path));
        let response = self.send(request, path).await?;
        Ok(response.json().await?)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        let response = self.send(request, path).await?;
        Ok(response.json().await?)
    }

    /// POST without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.post(self.url(path));
        let response = self.send(request, path).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_resource(&self, path: &str) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(path));
        self.send(request, path).await?;
        Ok(())
    }

    /// Fetch every page of a list endpoint, following `next` links
    pub async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut next = Some(self.url(path));

        while let Some(url) = next.take() {
            let request = self.client.get(&url);
            let response = self.send(request, path).await?;
            match response.json::<Listing<T>>().await? {
                Listing::Paged(page) => {
                    debug!(path, count = page.count, fetched = page.results.len(), "Fetched page");
                    items.extend(page.results);
                    next = page.next;
                }
                Listing::Plain(all) => items.extend(all),
            }
        }
        Ok(items)
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let request = match self.local_store.get(ACCESS_TOKEN_KEY).await {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                warn!(error = %e, "Failed to read access token");
                request
            }
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED && !is_auth_path(path) {
            self.forget_session().await;
        }
        let body = response.text().await?;
        Err(error_for_status(status.as_u16(), &body))
    }

    async fn forget_session(&self) {
        warn!("Session rejected by backend, clearing stored tokens");
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.local_store.remove(key).await {
                warn!(error = %e, key, "Failed to clear stored token");
            }
        }
        if self.session.sign_out() {
            debug!("Signed out after rejected token");
        }
    }
}

fn is_auth_path(path: &str) -> bool {
    AUTH_PATHS.iter().any(|p| path.contains(p))
}

/// Map an error response onto [`ApiError`]
fn error_for_status(status: u16, body: &str) -> ApiError {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let fields = parsed.as_ref().and_then(FieldErrors::from_body);

    match (status, fields) {
        (401, _) => ApiError::Unauthorized,
        (400, Some(fields)) => ApiError::Validation(fields),
        (_, Some(fields)) => ApiError::Status {
            status,
            message: fields.joined(),
        },
        (_, None) => ApiError::Status {
            status,
            message: body.trim().to_string(),
        },
    }
}
