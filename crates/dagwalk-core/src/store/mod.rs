//! In-memory node store
//!
//! A [`NodeGetter`] over nodes held in a hash map. The CLI fills one from a
//! JSON manifest; tests build them directly. Links whose target is not in the
//! store fail with [`StoreError::NotFound`], which is how unavailable content
//! shows up to a traversal.

pub mod manifest;


use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::logging::FetchMetrics;
use crate::node::{Cid, Link, Node, NodeGetter};

pub use manifest::Manifest;

/// A node as stored in memory and in manifests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryNode {
    pub cid: Cid,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl MemoryNode {
    pub fn new(cid: Cid, links: Vec<Link>) -> Self {
        Self { cid, links }
    }
}

impl Node for MemoryNode {
    fn cid(&self) -> &Cid {
        &self.cid
    }

    fn links(&self) -> &[Link] {
        &self.links
    }
}

/// Fetch failures from a [`MemoryStore`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("node not found: {cid}")]
    NotFound { cid: Cid },
}

impl StoreError {
    pub fn cid(&self) -> &Cid {
        match self {
            StoreError::NotFound { cid } => cid,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    nodes: HashMap<Cid, Arc<MemoryNode>>,
    metrics: FetchMetrics,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning the one it replaced
    pub fn insert(&mut self, node: MemoryNode) -> Option<Arc<MemoryNode>> {
        self.nodes.insert(node.cid.clone(), Arc::new(node))
    }

    pub fn node(&self, cid: &Cid) -> Option<Arc<MemoryNode>> {
        self.nodes.get(cid).cloned()
    }

    pub fn contains(&self, cid: &Cid) -> bool {
        self.nodes.contains_key(cid)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn metrics(&self) -> &FetchMetrics {
        &self.metrics
    }
}

impl NodeGetter for MemoryStore {
    type Node = Arc<MemoryNode>;
    type Error = StoreError;

    fn get(&self, link: &Link) -> Result<Self::Node, Self::Error> {
        match self.nodes.get(&link.cid) {
            Some(node) => {
                self.metrics.record_hit();
                Ok(Arc::clone(node))
            }
            None => {
                self.metrics.record_miss();
                trace!(cid = %link.cid, "fetch_miss");
                Err(StoreError::NotFound {
                    cid: link.cid.clone(),
                })
            }
        }
    }
}
