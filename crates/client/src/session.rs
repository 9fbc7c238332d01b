//! Bearer session shared by every clone of a client.

use std::sync::Arc;

use chrono::{Duration, Utc};
use hostelia_core::types::Timestamp;
use tokio::sync::RwLock;

use crate::models::UserProfile;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub expires_at: Timestamp,
}

impl Session {
    pub fn new(token: String, user: UserProfile, expires_in_secs: i64) -> Self {
        Self {
            token,
            user,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        }
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub async fn set(&self, session: Session) {
        *self.inner.write().await = Some(session);
    }

    pub async fn get(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn user(&self) -> Option<UserProfile> {
        self.inner.read().await.as_ref().map(|s| s.user.clone())
    }

    /// The current token, dropping the session first if it has expired.
    pub async fn token(&self) -> Option<String> {
        let mut guard = self.inner.write().await;
        if guard.as_ref().is_some_and(|s| s.is_expired(Utc::now())) {
            tracing::debug!("Session expired locally");
            *guard = None;
        }
        guard.as_ref().map(|s| s.token.clone())
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// Clear the session only if it still holds `token`.
    ///
    /// A 401 for a request sent with an older token must not log out a
    /// session established since. Returns whether anything was cleared.
    pub async fn clear_if_token(&self, token: &str) -> bool {
        let mut guard = self.inner.write().await;
        match guard.as_ref() {
            Some(s) if s.token == token => {
                *guard = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostelia_core::roles::Role;

    fn user() -> UserProfile {
        UserProfile {
            id: 5,
            name: "Ravi Kumar".into(),
            email: "ravi@uni.edu".into(),
            role: Role::Student,
            hostel: Some("BH-1".into()),
            room_no: Some("101".into()),
            year: Some(2),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn stale_token_does_not_clear_newer_session() {
        let store = SessionStore::default();
        store.set(Session::new("old".into(), user(), 3600)).await;
        store.set(Session::new("new".into(), user(), 3600)).await;

        assert!(!store.clear_if_token("old").await);
        assert_eq!(store.token().await.as_deref(), Some("new"));

        assert!(store.clear_if_token("new").await);
        assert_eq!(store.token().await, None);
    }

    #[tokio::test]
    async fn expired_session_is_dropped() {
        let store = SessionStore::default();
        store.set(Session::new("t".into(), user(), -1)).await;
        assert_eq!(store.token().await, None);
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = SessionStore::default();
        let other = store.clone();
        store.set(Session::new("t".into(), user(), 60)).await;
        assert_eq!(other.user().await.map(|u| u.id), Some(5));
        other.clear().await;
        assert!(store.get().await.is_none());
    }
}
