//! DAG traversal
//!
//! Walks a graph of lazily fetched nodes, calling a visitor at each one:
//! - `dfs`: depth-first, pre-order or post-order
//! - `bfs`: breadth-first over a FIFO queue
//! - `session`: per-call state shared by both (seen set, fetch and recovery)
//! - `recover`: ready-made fetch failure policies

mod bfs;
mod dfs;
pub mod recover;
mod session;


use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DagwalkError, TraverseError};
use crate::node::{Node, NodeGetter};
use crate::trace_time;
use session::Traversal;

pub use recover::OnError;

/// Traversal algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    /// Depth-first, node before its children
    #[default]
    DfsPre,
    /// Depth-first, node after its children
    DfsPost,
    /// Breadth-first, level by level
    Bfs,
}

impl Order {
    /// Map a numeric order code. Unknown codes fall back to pre-order DFS.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Order::DfsPost,
            2 => Order::Bfs,
            _ => Order::DfsPre,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Order::DfsPre => 0,
            Order::DfsPost => 1,
            Order::Bfs => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Order::DfsPre => "dfs-pre",
            Order::DfsPost => "dfs-post",
            Order::Bfs => "bfs",
        }
    }
}

impl FromStr for Order {
    type Err = DagwalkError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dfs-pre" | "pre" => Ok(Order::DfsPre),
            "dfs-post" | "post" => Ok(Order::DfsPost),
            "bfs" => Ok(Order::Bfs),
            other => Err(DagwalkError::invalid_value(
                "order",
                format!("'{}' (expected: dfs-pre, dfs-post, bfs)", other),
            )),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the visitor sees: the node and how far below the root it sits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State<N> {
    pub node: N,
    pub depth: usize,
}

/// Called once per visited node. An error stops the traversal.
pub type VisitFn<'a, N, E> = Box<dyn FnMut(&State<N>) -> Result<(), E> + 'a>;

/// Decides what a fetch failure means.
/// `Ok(())` skips the node and its subtree, `Err` stops the traversal.
pub type RecoverFn<'a, E> = Box<dyn FnMut(E) -> Result<(), E> + 'a>;

/// Options for a single traversal
pub struct Options<'a, G: NodeGetter> {
    /// Resolves links to nodes
    pub getter: G,
    pub order: Order,
    pub visit: VisitFn<'a, G::Node, G::Error>,
    /// Without one, every fetch failure is fatal
    pub recover: Option<RecoverFn<'a, G::Error>>,
    /// Visit each distinct cid at most once
    pub skip_duplicates: bool,
}

impl<'a, G: NodeGetter> Options<'a, G> {
    /// Pre-order, no recovery, duplicates visited
    pub fn new(
        getter: G,
        visit: impl FnMut(&State<G::Node>) -> Result<(), G::Error> + 'a,
    ) -> Self {
        Self {
            getter,
            order: Order::default(),
            visit: Box::new(visit),
            recover: None,
            skip_duplicates: false,
        }
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_recover(
        mut self,
        recover: impl FnMut(G::Error) -> Result<(), G::Error> + 'a,
    ) -> Self {
        self.recover = Some(Box::new(recover));
        self
    }

    pub fn with_skip_duplicates(mut self, skip_duplicates: bool) -> Self {
        self.skip_duplicates = skip_duplicates;
        self
    }
}

impl<G: NodeGetter> fmt::Debug for Options<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("order", &self.order)
            .field("recover", &self.recover.is_some())
            .field("skip_duplicates", &self.skip_duplicates)
            .finish_non_exhaustive()
    }
}

/// Walk the DAG below `root`, visiting nodes in `opts.order`.
///
/// Returns the first error raised by the visitor, by an unrecovered fetch,
/// or by the recovery function. Nothing is retried.
pub fn traverse<G: NodeGetter>(
    root: G::Node,
    opts: Options<'_, G>,
) -> Result<(), TraverseError<G::Error>> {
    let start = Instant::now();
    let order = opts.order;

    debug!(
        root = %root.cid(),
        order = %order,
        skip_duplicates = opts.skip_duplicates,
        recover = opts.recover.is_some(),
        "traverse_start"
    );

    let mut traversal = Traversal::new(opts);
    let state = State {
        node: root,
        depth: 0,
    };

    let result = match order {
        Order::DfsPre => dfs::pre_order(state, &mut traversal),
        Order::DfsPost => dfs::post_order(state, &mut traversal),
        Order::Bfs => bfs::traverse(state, &mut traversal),
    };

    trace_time!(start, "traverse", visits = traversal.visits());
    debug!(
        visits = traversal.visits(),
        seen = traversal.seen_count(),
        aborted = result.as_ref().err().map(TraverseError::kind),
        "traverse_end"
    );

    result
}
