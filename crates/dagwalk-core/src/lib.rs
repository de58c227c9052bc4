//! dagwalk core library
//!
//! Traversal of content-addressed DAGs whose nodes are fetched lazily,
//! plus the supporting pieces the `dagwalk` binary is built from.

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod node;
pub mod store;
pub mod traverse;

pub use error::TraverseError;
pub use node::{Cid, Link, Node, NodeGetter};
pub use traverse::{traverse, OnError, Options, Order, State};
