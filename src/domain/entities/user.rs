//! Authenticated user and issued credentials

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

/// Token pair returned by login and registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Login/register response body
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

impl AuthGrant {
    pub fn into_parts(self) -> (AuthTokens, User) {
        (
            AuthTokens {
                access: self.access,
                refresh: self.refresh,
            },
            self.user,
        )
    }
}
