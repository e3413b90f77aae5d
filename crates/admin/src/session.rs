//! Persisted admin session.
//!
//! The backend hands out a single opaque token on login. The console keeps
//! it in memory for the `aToken` header and mirrors it to a small JSON file so
//! it survives restarts:
//!
//! ```json
//! {"aToken": "eyJhbGciOi..."}
//! ```
//!
//! There is no expiry check and no refresh. An empty token means the admin is
//! logged out.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage keys.
pub mod keys {
    /// Key of the token inside the session file.
    pub const TOKEN: &str = "aToken";
}

/// Errors that can occur while persisting the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The session file could not be encoded.
    #[error("session encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Attempted to store an empty token.
    #[error("refusing to store an empty token")]
    EmptyToken,
}

/// Whether the console may call authenticated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthGate {
    Unauthenticated,
    Authenticated,
}

impl AuthGate {
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(rename = "aToken", default)]
    token: String,
}

#[derive(Debug, Clone)]
enum Storage {
    File(PathBuf),
    Memory,
}

/// The admin session: an in-memory token mirrored to durable storage.
pub struct SessionStore {
    storage: Storage,
    token: Option<SecretString>,
}

impl SessionStore {
    /// Load the session persisted at `path`.
    ///
    /// A missing file, an empty token, or an unreadable file all load as
    /// logged out; the latter is logged as a warning.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file exists but cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<PersistedSession>(&raw) {
                Ok(persisted) => non_empty(persisted.token),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed session file");
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), authenticated = token.is_some(), "Session loaded");
        Ok(Self {
            storage: Storage::File(path),
            token,
        })
    }

    /// A session that is never written to disk.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            storage: Storage::Memory,
            token: None,
        }
    }

    /// The current token, if logged in.
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Current authentication gate.
    #[must_use]
    pub const fn gate(&self) -> AuthGate {
        if self.token.is_some() {
            AuthGate::Authenticated
        } else {
            AuthGate::Unauthenticated
        }
    }

    /// Where the session is persisted, if anywhere.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            Storage::File(path) => Some(path),
            Storage::Memory => None,
        }
    }

    /// Store a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyToken` for an empty token, or an I/O error
    /// if the session file cannot be written. On error the in-memory token is
    /// left unchanged.
    pub fn set_token(&mut self, token: SecretString) -> Result<(), SessionError> {
        if token.expose_secret().trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }

        if let Storage::File(path) = &self.storage {
            let persisted = PersistedSession {
                token: token.expose_secret().to_owned(),
            };
            write_private(path, &serde_json::to_vec(&persisted)?)?;
        }

        self.token = Some(token);
        Ok(())
    }

    /// Forget the token in memory and remove it from storage.
    ///
    /// The in-memory token is cleared even when removing the file fails.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the session file exists but cannot be removed.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.token = None;

        if let Storage::File(path) = &self.storage {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(SessionError::Io {
                        path: path.clone(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("storage", &self.storage)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn non_empty(token: String) -> Option<SecretString> {
    if token.trim().is_empty() {
        None
    } else {
        Some(SecretString::from(token))
    }
}

/// Write `bytes` to `path`, creating parent directories. The file is only
/// readable by the owner on Unix.
fn write_private(path: &Path, bytes: &[u8]) -> Result<(), SessionError> {
    let io_err = |source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.sync_all().map_err(io_err)
}
