//! DAG manifests
//!
//! A manifest is a JSON description of a DAG:
//!
//! ```json
//! {
//!   "root": "bafyroot",
//!   "nodes": [
//!     { "cid": "bafyroot", "links": [{ "cid": "bafyleaf", "name": "leaf" }] },
//!     { "cid": "bafyleaf" }
//!   ]
//! }
//! ```
//!
//! Links may point at cids with no node entry. Those fail when fetched.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{MemoryNode, MemoryStore};
use crate::bail_manifest;
use crate::error::{DagwalkError, Result};
use crate::node::Cid;

/// Shown in errors for manifests that did not come from a file
const INLINE_SOURCE: &str = "<inline>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub root: Cid,
    #[serde(default)]
    pub nodes: Vec<MemoryNode>,
    #[serde(skip)]
    source: PathBuf,
}

impl Manifest {
    pub fn new(root: Cid, nodes: Vec<MemoryNode>) -> Self {
        Self {
            root,
            nodes,
            source: PathBuf::from(INLINE_SOURCE),
        }
    }

    /// Read a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DagwalkError::invalid_manifest(path, format!("failed to read: {}", e))
        })?;
        Self::parse(&content, path)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Self::parse(content, Path::new(INLINE_SOURCE))
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut manifest: Manifest = serde_json::from_str(content)
            .map_err(|e| DagwalkError::invalid_manifest(path, e))?;
        manifest.source = path.to_path_buf();
        Ok(manifest)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Build a store holding every node, and return the root with it.
    ///
    /// Fails when a cid is listed twice or the root has no node entry.
    pub fn into_store(self) -> Result<(Arc<MemoryNode>, MemoryStore)> {
        let root = self.root.clone();
        let store = self.build_store()?;
        match store.node(&root) {
            Some(node) => Ok((node, store)),
            None => bail_manifest!(self.source, format!("root {} has no node entry", root)),
        }
    }

    /// Build a store without requiring the root to be present
    pub fn build_store(&self) -> Result<MemoryStore> {
        let mut seen: HashSet<&Cid> = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(&node.cid) {
                bail_manifest!(
                    self.source.clone(),
                    format!("duplicate node entry {}", node.cid)
                );
            }
        }

        let mut store = MemoryStore::new();
        for node in &self.nodes {
            store.insert(node.clone());
        }

        debug!(
            source = %self.source.display(),
            nodes = store.len(),
            root = %self.root,
            "manifest_loaded"
        );

        Ok(store)
    }
}
