//! Node model for content-addressed graphs
//!
//! The engine only needs three things from the outside world:
//! - an identifier it can compare and hash ([`Cid`])
//! - the ordered outgoing links of a node ([`Node::links`])
//! - a way to turn a link into a node ([`NodeGetter::get`])
//!
//! Encoding and identifier computation happen elsewhere; a [`Cid`] here is
//! just the opaque string form of one.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::DagwalkError;

/// Content identifier of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cid(String);

impl Cid {
    /// String key used for duplicate tracking
    pub fn key_string(&self) -> String {
        self.0.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cid {
    type Err = DagwalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            bail_invalid!("cid", "<empty>");
        }
        if s.chars().any(char::is_whitespace) {
            bail_invalid!("cid", format!("{:?}", s));
        }
        Ok(Cid(s.to_string()))
    }
}

impl TryFrom<String> for Cid {
    type Error = DagwalkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cid> for String {
    fn from(cid: Cid) -> Self {
        cid.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unresolved reference from one node to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub cid: Cid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cumulative size of the target, if the encoder recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Link {
    pub fn new(cid: Cid) -> Self {
        Self {
            cid,
            name: None,
            size: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

/// A fetched, immutable graph node
pub trait Node {
    fn cid(&self) -> &Cid;
    fn links(&self) -> &[Link];
}

impl<N: Node + ?Sized> Node for Arc<N> {
    fn cid(&self) -> &Cid {
        (**self).cid()
    }

    fn links(&self) -> &[Link] {
        (**self).links()
    }
}

impl<N: Node + ?Sized> Node for &N {
    fn cid(&self) -> &Cid {
        (**self).cid()
    }

    fn links(&self) -> &[Link] {
        (**self).links()
    }
}

/// Resolves links to nodes.
///
/// May block on I/O. Retries, timeouts and cancellation belong to the
/// implementation; the traversal treats every `Err` the same way.
pub trait NodeGetter {
    type Node: Node;
    type Error;

    fn get(&self, link: &Link) -> Result<Self::Node, Self::Error>;
}

impl<G: NodeGetter + ?Sized> NodeGetter for &G {
    type Node = G::Node;
    type Error = G::Error;

    fn get(&self, link: &Link) -> Result<Self::Node, Self::Error> {
        (**self).get(link)
    }
}
