//! Authentication endpoints

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use super::ApiClient;
use crate::application::ports::outbound::{ApiError, AuthPort};
use crate::domain::entities::{AuthGrant, User};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[async_trait]
impl AuthPort for ApiClient {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, ApiError> {
        self.post("/auth/login/", &LoginRequest { email, password }).await
    }

    #[instrument(skip(self, password))]
    async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthGrant, ApiError> {
        let request = RegisterRequest {
            email,
            username,
            password,
        };
        self.post("/auth/register/", &request).await
    }

    #[instrument(skip(self))]
    async fn me(&self) -> Result<User, ApiError> {
        self.get("/auth/me/").await
    }
}
