//! Session lifecycle: login, expiry-driven auto-logout, logout
//!
//! A session is Authenticated while a credential sits in the
//! [`CredentialStore`]. Every path out of that state goes through
//! [`Shared::invalidate`], which clears the store and broadcasts
//! [`SessionEvent::Ended`] so the host can drop whatever view state it holds.

pub mod store;
pub mod timer;
pub mod token;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::broadcast;

use crate::client::AuthApi;
use crate::client::models::UserProfile;
use crate::config::SessionCredential;
use crate::error::{ApiError, Result};

pub use store::{ConfigCredentialStore, CredentialStore, MemoryCredentialStore};
pub use timer::AutoLogoutTimer;
pub use token::decode_expiry;

/// The session ends this long before the token actually expires
pub const EXPIRY_SAFETY_MARGIN: Duration = Duration::from_secs(5);

const EVENT_CAPACITY: usize = 16;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Explicit logout
    Logout,
    /// The auto-logout timer fired
    Expired,
    /// The server answered 401
    Rejected,
    /// The session check failed for any other reason
    CheckFailed,
}

/// Observable session transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Ended(EndReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// Result of arming the expiry timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPlan {
    /// Forced logout scheduled after the delay
    Scheduled(Duration),
    /// Token already inside the safety margin; the session was ended
    EndedNow,
    /// No usable `exp` claim; only a server 401 will end the session
    Unmanaged,
}

/// State reachable from the timer task
struct Shared {
    store: Arc<dyn CredentialStore>,
    events: broadcast::Sender<SessionEvent>,
    /// Drops per-session client state such as cached responses
    on_end: Box<dyn Fn() + Send + Sync>,
}

impl Shared {
    fn invalidate(&self, reason: EndReason) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear stored credential: {}", e);
        }
        (self.on_end)();
        info!("Session ended ({:?})", reason);
        // No subscribers is fine
        let _ = self.events.send(SessionEvent::Ended(reason));
    }
}

/// Owns the local session and its auto-logout timer
pub struct SessionManager<A: AuthApi> {
    api: Arc<A>,
    shared: Arc<Shared>,
    timer: AutoLogoutTimer,
}

impl<A: AuthApi + 'static> SessionManager<A> {
    pub fn new(api: Arc<A>, store: Arc<dyn CredentialStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let hook = Arc::clone(&api);
        Self {
            api,
            shared: Arc::new(Shared {
                store,
                events,
                on_end: Box::new(move || hook.on_session_end()),
            }),
            timer: AutoLogoutTimer::new(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    pub fn state(&self) -> SessionState {
        match self.shared.store.load() {
            Ok(Some(_)) => SessionState::Authenticated,
            _ => SessionState::Unauthenticated,
        }
    }

    pub fn credential(&self) -> Result<Option<SessionCredential>> {
        self.shared.store.load()
    }

    /// Whether an auto-logout is currently scheduled
    pub fn has_pending_expiry(&self) -> bool {
        self.timer.is_armed()
    }

    /// Authenticate, persist the credential and arm the expiry timer
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionCredential> {
        if username.trim().is_empty() {
            return Err(ApiError::MissingIdentifier("username").into());
        }
        if password.is_empty() {
            return Err(ApiError::MissingIdentifier("password").into());
        }

        let credential = self.api.login(username.trim(), password).await?;
        self.shared.store.save(&credential)?;
        info!("Logged in as {}", username.trim());
        let _ = self.shared.events.send(SessionEvent::Started);

        self.arm_expiry_timer(&credential.access_token);
        Ok(credential)
    }

    /// Resume a credential persisted by an earlier run
    pub fn restore(&self) -> SessionState {
        match self.shared.store.load() {
            Ok(Some(credential)) => {
                self.arm_expiry_timer(&credential.access_token);
                self.state()
            }
            Ok(None) => SessionState::Unauthenticated,
            Err(e) => {
                warn!("Could not read stored credential: {}", e);
                SessionState::Unauthenticated
            }
        }
    }

    /// Ask the server who we are.
    ///
    /// Success re-arms the expiry timer. Any failure ends the local session
    /// before the error is returned.
    pub async fn check_session(&self) -> Result<UserProfile> {
        let credential = self
            .shared
            .store
            .load()?
            .ok_or(ApiError::MissingToken)?;

        match self.api.current_user().await {
            Ok(user) => {
                self.arm_expiry_timer(&credential.access_token);
                Ok(user)
            }
            Err(e) => {
                let reason = if e.is_unauthorized() {
                    EndReason::Rejected
                } else {
                    EndReason::CheckFailed
                };
                self.end_session(reason);
                Err(e)
            }
        }
    }

    /// Log out on the server if possible; always log out locally
    pub async fn logout(&self) {
        match self.shared.store.load() {
            Ok(Some(_)) => {
                if let Err(e) = self.api.logout().await {
                    warn!("Server logout failed, clearing local session anyway: {}", e);
                }
            }
            Ok(None) => debug!("Logout without a stored credential"),
            Err(e) => warn!("Could not read stored credential: {}", e),
        }
        self.end_session(EndReason::Logout);
    }

    /// Pass a domain call's result through, ending the session on HTTP 401
    pub fn guard<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result
            && e.is_unauthorized()
        {
            self.end_session(EndReason::Rejected);
        }
        result
    }

    /// Cancel the timer and invalidate the local session
    pub fn end_session(&self, reason: EndReason) {
        self.timer.cancel();
        self.shared.invalidate(reason);
    }

    /// Schedule the forced logout for `exp - now - margin`
    pub fn arm_expiry_timer(&self, access_token: &str) -> ExpiryPlan {
        let expires_at = match decode_expiry(access_token) {
            Ok(at) => at,
            Err(_) => {
                warn!("Session token has no readable expiry; auto-logout disabled");
                self.timer.cancel();
                return ExpiryPlan::Unmanaged;
            }
        };

        let margin = chrono::Duration::from_std(EXPIRY_SAFETY_MARGIN)
            .unwrap_or_else(|_| chrono::Duration::seconds(5));
        let remaining = expires_at - Utc::now() - margin;

        match remaining.to_std() {
            Ok(delay) if !delay.is_zero() => {
                debug!("Auto-logout in {}s", delay.as_secs());
                let shared = Arc::clone(&self.shared);
                self.timer
                    .arm(delay, move || shared.invalidate(EndReason::Expired));
                ExpiryPlan::Scheduled(delay)
            }
            _ => {
                self.end_session(EndReason::Expired);
                ExpiryPlan::EndedNow
            }
        }
    }
}
