//! Mock authentication client for testing
//!
//! Provides a scripted [`AuthApi`] implementation so session logic can be
//! tested without a server.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use super::api::AuthApi;
use super::models::UserProfile;
use crate::config::SessionCredential;
use crate::error::{ApiError, Result};

/// Scripted outcome for a mock call
#[derive(Clone)]
enum Outcome<T> {
    Ok(T),
    Http(u16, String),
    Network,
}

impl<T: Clone> Outcome<T> {
    fn resolve(&self) -> Result<T> {
        match self {
            Outcome::Ok(v) => Ok(v.clone()),
            Outcome::Http(status, message) => Err(ApiError::Http {
                status: *status,
                message: message.clone(),
            }
            .into()),
            Outcome::Network => Err(ApiError::Network("connection reset".to_string()).into()),
        }
    }
}

/// Mock auth client.
///
/// Configure responses via builder methods; clones share call counters.
///
/// # Example
/// ```ignore
/// let mock = MockAuthClient::new().with_logout_error();
/// let manager = SessionManager::new(Arc::new(mock.clone()), store);
/// manager.logout().await;
/// assert_eq!(mock.logout_calls(), 1);
/// ```
#[derive(Clone)]
pub struct MockAuthClient {
    login: Arc<Mutex<Outcome<SessionCredential>>>,
    user: Arc<Mutex<Outcome<UserProfile>>>,
    logout: Arc<Mutex<Outcome<()>>>,
    login_calls: Arc<AtomicUsize>,
    current_user_calls: Arc<AtomicUsize>,
    logout_calls: Arc<AtomicUsize>,
    session_end_calls: Arc<AtomicUsize>,
}

impl Default for MockAuthClient {
    fn default() -> Self {
        Self {
            login: Arc::new(Mutex::new(Outcome::Ok(SessionCredential {
                access_token: "opaque".to_string(),
                token_type: "bearer".to_string(),
            }))),
            user: Arc::new(Mutex::new(Outcome::Ok(UserProfile::default()))),
            logout: Arc::new(Mutex::new(Outcome::Ok(()))),
            login_calls: Arc::new(AtomicUsize::new(0)),
            current_user_calls: Arc::new(AtomicUsize::new(0)),
            logout_calls: Arc::new(AtomicUsize::new(0)),
            session_end_calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login(self, credential: SessionCredential) -> Self {
        self.set(&self.login, Outcome::Ok(credential));
        self
    }

    pub fn with_login_error(self, status: u16, message: &str) -> Self {
        self.set(&self.login, Outcome::Http(status, message.to_string()));
        self
    }

    /// Profile returned by `current_user`, built from JSON
    pub fn with_user(self, user: Value) -> Self {
        let profile = serde_json::from_value(user).expect("valid profile json");
        self.set(&self.user, Outcome::Ok(profile));
        self
    }

    pub fn with_user_error(self, status: u16, message: &str) -> Self {
        self.set(&self.user, Outcome::Http(status, message.to_string()));
        self
    }

    pub fn with_user_network_error(self) -> Self {
        self.set(&self.user, Outcome::Network);
        self
    }

    pub fn with_logout_error(self) -> Self {
        self.set(&self.logout, Outcome::Network);
        self
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn current_user_calls(&self) -> usize {
        self.current_user_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    pub fn session_end_calls(&self) -> usize {
        self.session_end_calls.load(Ordering::SeqCst)
    }

    fn set<T>(&self, slot: &Arc<Mutex<Outcome<T>>>, outcome: Outcome<T>) {
        // Builders run before any await, so the lock is always free
        *slot.try_lock().expect("mock configured while in use") = outcome;
    }
}

#[async_trait]
impl AuthApi for MockAuthClient {
    async fn login(&self, _username: &str, _password: &str) -> Result<SessionCredential> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login.lock().await.resolve()
    }

    async fn current_user(&self) -> Result<UserProfile> {
        self.current_user_calls.fetch_add(1, Ordering::SeqCst);
        self.user.lock().await.resolve()
    }

    async fn logout(&self) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logout.lock().await.resolve()
    }

    fn on_session_end(&self) {
        self.session_end_calls.fetch_add(1, Ordering::SeqCst);
    }
}
