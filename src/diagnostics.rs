//! Developer auth-token inspector.
//!
//! Reports whether a locally stored auth token exists without ever printing
//! it. The token source is passed in, so the check works the same against a
//! file on disk or an in-memory store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

const PREVIEW_CHARS: usize = 4;

#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("failed to read token from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Somewhere an auth token may be stored.
pub trait TokenStore {
    /// Human readable location, for reports.
    fn location(&self) -> String;

    /// Stored token, `None` when there is none.
    fn load(&self) -> Result<Option<String>, DiagnosticsError>;
}

/// Token kept in a plain file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Option<String>, DiagnosticsError> {
        match fs::read_to_string(&self.path) {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(DiagnosticsError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn load(&self) -> Result<Option<String>, DiagnosticsError> {
        Ok(self.token.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthStatus {
    pub location: String,
    pub present: bool,
    /// Token length in characters
    pub length: Option<usize>,
    /// First few characters followed by a mask
    pub preview: Option<String>,
}

impl AuthStatus {
    pub fn summary(&self) -> String {
        match (&self.preview, self.length) {
            (Some(preview), Some(length)) => format!(
                "Auth token present at {} ({} chars, {})",
                self.location, length, preview
            ),
            _ => format!("No auth token found at {}", self.location),
        }
    }
}

/// Inspect a token store. Whitespace-only tokens count as absent.
pub fn inspect_auth(store: &dyn TokenStore) -> Result<AuthStatus, DiagnosticsError> {
    let location = store.location();
    let token = store
        .load()?
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let status = match token {
        Some(token) => {
            let length = token.chars().count();
            let preview = mask(&token);
            info!(location = %location, length, "Auth token present");
            AuthStatus {
                location,
                present: true,
                length: Some(length),
                preview: Some(preview),
            }
        }
        None => {
            debug!(location = %location, "Auth token absent");
            AuthStatus {
                location,
                present: false,
                length: None,
                preview: None,
            }
        }
    };

    Ok(status)
}

fn mask(token: &str) -> String {
    // Short tokens would be mostly revealed by a prefix.
    if token.chars().count() <= PREVIEW_CHARS * 2 {
        return "…".to_string();
    }
    let shown: String = token.chars().take(PREVIEW_CHARS).collect();
    format!("{shown}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_present_token_without_leaking_it() {
        let secret = "abcd-very-secret-value";
        let status = inspect_auth(&MemoryTokenStore::new(Some(secret))).unwrap();
        assert!(status.present);
        assert_eq!(status.length, Some(secret.len()));
        assert_eq!(status.preview.as_deref(), Some("abcd…"));
        assert!(!status.summary().contains("secret"));
    }

    #[test]
    fn reports_absent_token() {
        let status = inspect_auth(&MemoryTokenStore::default()).unwrap();
        assert!(!status.present);
        assert_eq!(status.summary(), "No auth token found at memory");
    }

    #[test]
    fn blank_token_is_absent() {
        let status = inspect_auth(&MemoryTokenStore::new(Some("  \n"))).unwrap();
        assert!(!status.present);
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("auth_token"));
        let status = inspect_auth(&store).unwrap();
        assert!(!status.present);
    }

    #[test]
    fn reads_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth_token");
        fs::write(&path, "tok123\n").unwrap();
        let status = inspect_auth(&FileTokenStore::new(&path)).unwrap();
        assert!(status.present);
        assert_eq!(status.length, Some(6));
        assert_eq!(status.preview.as_deref(), Some("…"));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        // A directory cannot be read as a token file.
        let dir = tempfile::tempdir().unwrap();
        let err = inspect_auth(&FileTokenStore::new(dir.path())).unwrap_err();
        assert!(matches!(err, DiagnosticsError::Read { .. }));
    }
}
