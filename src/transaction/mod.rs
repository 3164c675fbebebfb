//! The identifier-reset transaction
//!
//! Loads an application's `storage.json`, replaces the profile's identifier
//! fields with freshly generated values, and writes the document back.
//!
//! ## Usage
//!
//! ```ignore
//! let registry = ProfileRegistry::load()?;
//! let result = perform_reset(&registry, "cursor")?;
//! if !result.succeeded {
//!     eprintln!("{}", result.message);
//! }
//! ```
//!
//! The document is read in full before anything is changed, and the new
//! content is written to a temporary file in the same directory which is
//! then renamed over the original. The storage file therefore always holds
//! either the old or the new complete document.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, ResetterError};
use crate::profile::{ProfileRegistry, TargetProfile};

/// The on-disk JSON object; key order is preserved
pub type ConfigDocument = serde_json::Map<String, Value>;

/// Message shown for any failure after the document was loaded
const INTERRUPTED_MESSAGE: &str = "Reset interrupted.";

/// Why a reset did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Storage file missing, unreadable or not a JSON object
    NotFound,
    /// Serializing or persisting the new document failed
    WriteFailed,
}

impl From<&ResetterError> for FailureKind {
    fn from(err: &ResetterError) -> Self {
        match err {
            ResetterError::TargetNotFound { .. } | ResetterError::ConfigDirUnavailable => {
                FailureKind::NotFound
            }
            ResetterError::DocumentWriteFailed { .. }
            | ResetterError::ResetFailed { .. }
            | ResetterError::IoError { .. }
            // Raised before a transaction exists; never reaches a result
            | ResetterError::ProfileNotFound { .. }
            | ResetterError::ProfileRequired
            | ResetterError::ConfirmationRequired
            | ResetterError::ConfigReadFailed { .. }
            | ResetterError::ConfigParseFailed { .. }
            | ResetterError::ConfigInvalid { .. }
            | ResetterError::UnsupportedShell { .. } => FailureKind::WriteFailed,
        }
    }
}

/// Outcome of one reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetResult {
    pub succeeded: bool,
    /// Message for the user
    pub message: String,
    pub failure_kind: Option<FailureKind>,
    /// Storage file the reset targeted
    pub path: PathBuf,
    /// Underlying cause of a failure, for verbose output
    pub detail: Option<String>,
}

impl ResetResult {
    fn success(profile: &TargetProfile, path: PathBuf) -> Self {
        Self {
            succeeded: true,
            message: format!("{} has been reset successfully!", profile.name),
            failure_kind: None,
            path,
            detail: None,
        }
    }

    fn failure(profile: &TargetProfile, path: PathBuf, err: &ResetterError) -> Self {
        let kind = FailureKind::from(err);
        let message = match kind {
            FailureKind::NotFound => format!("{} not found.", profile.name),
            FailureKind::WriteFailed => INTERRUPTED_MESSAGE.to_string(),
        };
        let detail = match err {
            ResetterError::TargetNotFound { reason, .. }
            | ResetterError::DocumentWriteFailed { reason, .. } => reason.clone(),
            other => other.to_string(),
        };

        Self {
            succeeded: false,
            message,
            failure_kind: Some(kind),
            path,
            detail: Some(detail),
        }
    }
}

/// Reset of one profile's storage file
#[derive(Debug)]
pub struct ResetTransaction<'a> {
    profile: &'a TargetProfile,
    path: PathBuf,
}

impl<'a> ResetTransaction<'a> {
    /// Create a transaction for an explicit storage file
    pub fn new(profile: &'a TargetProfile, path: impl Into<PathBuf>) -> Self {
        Self {
            profile,
            path: path.into(),
        }
    }

    /// Create a transaction for the profile's storage file under the config directory
    pub fn for_profile(profile: &'a TargetProfile) -> Result<Self> {
        Ok(Self::new(profile, profile.resolve()?))
    }

    /// Run load, mutate and persist; failures are reported in the result
    pub fn execute(&self) -> ResetResult {
        match self.try_execute() {
            Ok(()) => {
                debug!(profile = %self.profile.id, path = %self.path.display(), "reset complete");
                ResetResult::success(self.profile, self.path.clone())
            }
            Err(err) => {
                warn!(
                    profile = %self.profile.id,
                    path = %self.path.display(),
                    error = %err,
                    "reset failed"
                );
                ResetResult::failure(self.profile, self.path.clone(), &err)
            }
        }
    }

    fn try_execute(&self) -> Result<()> {
        let mut document = load_document(&self.path, &self.profile.name)?;
        self.apply(&mut document);
        persist_document(&self.path, &document)
    }

    /// Overwrite or insert every rule's key with a new value
    fn apply(&self, document: &mut ConfigDocument) {
        for rule in &self.profile.field_rules {
            debug!(key = %rule.key, strategy = ?rule.strategy, "regenerating field");
            document.insert(rule.key.clone(), Value::String(rule.strategy.generate()));
        }
    }
}

/// Reset the profile with the given id or display name
///
/// Only an unknown profile is an `Err`; everything that goes wrong with the
/// storage file is reported through the returned [`ResetResult`].
pub fn perform_reset(registry: &ProfileRegistry, profile_id: &str) -> Result<ResetResult> {
    Ok(reset_profile(registry.require(profile_id)?))
}

/// Reset an already chosen profile's storage file under the config directory
pub fn reset_profile(profile: &TargetProfile) -> ResetResult {
    match ResetTransaction::for_profile(profile) {
        Ok(transaction) => transaction.execute(),
        Err(err) => ResetResult::failure(profile, profile.config_path.clone(), &err),
    }
}

/// Read and parse a storage file; anything but a readable JSON object is `TargetNotFound`
pub fn load_document(path: &Path, name: &str) -> Result<ConfigDocument> {
    let not_found = |reason: String| ResetterError::TargetNotFound {
        name: name.to_string(),
        path: path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| not_found(e.to_string()))?;
    debug!(path = %path.display(), bytes = content.len(), "loaded storage file");

    match serde_json::from_str::<Value>(&content).map_err(|e| not_found(e.to_string()))? {
        Value::Object(document) => Ok(document),
        _ => Err(not_found("expected a JSON object".to_string())),
    }
}

/// Serialize with four-space indentation
fn to_pretty_json(document: &ConfigDocument) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    Ok(buf)
}

/// Atomically replace `path` with the serialized document
///
/// A read-only target is refused. The original file's permissions carry over
/// to the new one. A symlinked target is followed: the file it points to is
/// replaced and the link is kept.
pub fn persist_document(path: &Path, document: &ConfigDocument) -> Result<()> {
    let write_failed = |reason: String| ResetterError::DocumentWriteFailed {
        path: path.display().to_string(),
        reason,
    };

    let content = to_pretty_json(document).map_err(|e| write_failed(e.to_string()))?;

    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = resolved.as_path();

    let permissions = match fs::metadata(path) {
        Ok(meta) if meta.permissions().readonly() => {
            return Err(write_failed("file is read-only".to_string()));
        }
        Ok(meta) => Some(meta.permissions()),
        Err(_) => None,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".resetter-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| write_failed(format!("cannot create temporary file: {e}")))?;

    tmp.write_all(&content)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| write_failed(e.to_string()))?;

    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| write_failed(e.to_string()))?;
    }

    tmp.persist(path).map_err(|e| write_failed(e.error.to_string()))?;
    debug!(path = %path.display(), bytes = content.len(), "storage file replaced");

    sync_dir(dir);

    Ok(())
}

/// Make a rename inside `dir` durable
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    let synced = fs::File::open(dir).and_then(|handle| handle.sync_all());
    if let Err(e) = synced {
        debug!(dir = %dir.display(), error = %e, "directory sync failed");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
