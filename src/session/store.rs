//! Persistence for the session credential

use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::{Config, SessionCredential};
use crate::error::{Error, Result};

/// Durable home of the bearer credential.
///
/// The client reads it on every authenticated request and the session
/// manager is the only writer.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<SessionCredential>>;

    fn save(&self, credential: &SessionCredential) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Stores the credential in the `session` section of the config file
pub struct ConfigCredentialStore {
    path: PathBuf,
}

impl ConfigCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialStore for ConfigCredentialStore {
    fn load(&self) -> Result<Option<SessionCredential>> {
        Ok(Config::load_from(&self.path)?.session)
    }

    fn save(&self, credential: &SessionCredential) -> Result<()> {
        let mut config = Config::load_from(&self.path)?;
        config.session = Some(credential.clone());
        config.save_to(&self.path)
    }

    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut config = Config::load_from(&self.path)?;
        if config.session.take().is_some() {
            config.save_to(&self.path)?;
        }
        Ok(())
    }
}

/// Process-local store, used when nothing should touch the disk
#[derive(Default)]
pub struct MemoryCredentialStore {
    credential: Mutex<Option<SessionCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: SessionCredential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<SessionCredential>> {
        let guard = self
            .credential
            .lock()
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, credential: &SessionCredential) -> Result<()> {
        let mut guard = self
            .credential
            .lock()
            .map_err(|e| Error::Other(e.to_string()))?;
        *guard = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .credential
            .lock()
            .map_err(|e| Error::Other(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
