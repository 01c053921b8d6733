//! Sources of current (device) ACL state.
//!
//! The reconciler asks a [`FactsProvider`] for the complete current state
//! exactly once per invocation and works on the returned owned copy, so
//! provider-side caches are never mutated by normalization.

use serde::Deserialize;
use sonic_acl_types::{AclEntity, AclsConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{AclError, AclResult};

/// Provides the complete current ACL state.
pub trait FactsProvider {
    /// Returns a short description of the source for logging.
    fn source_name(&self) -> String;

    /// Gathers every ACL currently configured.
    fn acls(&self) -> AclResult<Vec<AclEntity>>;
}

/// In-memory facts, e.g. gathered earlier or built by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticFacts {
    acls: Vec<AclEntity>,
}

impl StaticFacts {
    pub fn new(acls: Vec<AclEntity>) -> Self {
        Self { acls }
    }
}

impl FactsProvider for StaticFacts {
    fn source_name(&self) -> String {
        "static facts".to_string()
    }

    fn acls(&self) -> AclResult<Vec<AclEntity>> {
        Ok(self.acls.clone())
    }
}

/// Facts read from a JSON or YAML document on disk.
#[derive(Debug, Clone)]
pub struct FileFacts {
    path: PathBuf,
}

impl FileFacts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FactsProvider for FileFacts {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn acls(&self) -> AclResult<Vec<AclEntity>> {
        read_acl_file(&self.path).map_err(|e| match e {
            AclError::Io { .. } | AclError::Parse { .. } => {
                AclError::facts(self.source_name(), e.to_string())
            }
            other => other,
        })
    }
}

/// Accepted document shapes: `{acls: [...]}` or a bare list of ACLs.
#[derive(Deserialize)]
#[serde(untagged)]
enum AclDocument {
    Wrapped(AclsConfig),
    List(Vec<AclEntity>),
}

impl AclDocument {
    fn into_acls(self) -> Vec<AclEntity> {
        match self {
            AclDocument::Wrapped(cfg) => cfg.acls,
            AclDocument::List(acls) => acls,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reads a list of ACLs from a JSON or YAML file.
///
/// The format is chosen by extension: `.yaml`/`.yml` are YAML, everything
/// else is JSON. An empty document yields an empty list.
pub fn read_acl_file(path: &Path) -> AclResult<Vec<AclEntity>> {
    let text = fs::read_to_string(path).map_err(|source| AclError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc: AclDocument = if is_yaml(path) {
        serde_yaml::from_str(&text).map_err(|e| AclError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        serde_json::from_str(&text).map_err(|e| AclError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    let acls = doc.into_acls();
    info!("Loaded {} ACLs from {}", acls.len(), path.display());
    Ok(acls)
}
