use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::Error;
use crate::tokens::AuthToken;

/// Persistence for the access token across process lifetimes.
///
/// `load_token` returns an empty [`AuthToken`] when nothing has been saved yet.
pub trait TokenStore: Send + Sync {
    fn load_token(&self) -> Result<AuthToken, Error>;

    fn save_token(&self, token: &AuthToken) -> Result<(), Error>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<AuthToken>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> Result<AuthToken, Error> {
        let token = self
            .token
            .lock()
            .map_err(|e| Error::Store(e.to_string().into()))?;
        Ok(token.clone())
    }

    fn save_token(&self, token: &AuthToken) -> Result<(), Error> {
        let mut slot = self
            .token
            .lock()
            .map_err(|e| Error::Store(e.to_string().into()))?;
        *slot = token.clone();
        Ok(())
    }
}

/// Stores the token as a JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileTokenStore {
    path: PathBuf,
}

impl JsonFileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for JsonFileTokenStore {
    fn load_token(&self) -> Result<AuthToken, Error> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved token, starting empty");
                Ok(AuthToken::default())
            }
            Err(e) => Err(Error::Store(Box::new(e))),
        }
    }

    fn save_token(&self, token: &AuthToken) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::Store(Box::new(e)))?;
        }
        let json = serde_json::to_vec_pretty(token)?;
        std::fs::write(&self.path, json).map_err(|e| Error::Store(Box::new(e)))?;
        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }
}
