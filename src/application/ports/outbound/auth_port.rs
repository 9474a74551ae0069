use async_trait::async_trait;

use super::ApiError;
use crate::domain::entities::{AuthGrant, User};

#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, ApiError>;

    async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthGrant, ApiError>;

    /// User owning the stored access token
    async fn me(&self) -> Result<User, ApiError>;
}
