//! Signed-in user shared by the session service and the API adapter
//!
//! The adapter ends the session when the backend stops accepting the stored
//! credentials, so the session service never reports a dead login.

use tokio::sync::watch;

use crate::domain::entities::User;

#[derive(Debug)]
pub struct SessionState {
    user: watch::Sender<Option<User>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: watch::Sender::new(None),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.borrow().is_some()
    }

    pub fn sign_in(&self, user: User) {
        self.user.send_replace(Some(user));
    }

    /// Forget the user; returns whether someone was signed in
    pub fn sign_out(&self) -> bool {
        self.user.send_replace(None).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::UserId;

    #[test]
    fn test_sign_in_and_out() {
        let state = SessionState::new();
        assert!(!state.is_signed_in());

        state.sign_in(User {
            id: UserId::new(),
            email: "moira@example.com".to_string(),
            username: "moira".to_string(),
            avatar: None,
            date_joined: None,
        });
        assert_eq!(state.current_user().map(|u| u.username).as_deref(), Some("moira"));

        assert!(state.sign_out());
        assert!(!state.sign_out());
        assert!(state.current_user().is_none());
    }
}
