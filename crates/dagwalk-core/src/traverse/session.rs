use std::collections::HashSet;

use tracing::{trace, warn};

use super::{Options, State};
use crate::error::TraverseError;
use crate::node::{Link, Node, NodeGetter};

/// State owned by one traversal call
pub(super) struct Traversal<'a, G: NodeGetter> {
    opts: Options<'a, G>,
    seen: HashSet<String>,
    visits: usize,
}

impl<'a, G: NodeGetter> Traversal<'a, G> {
    pub(super) fn new(opts: Options<'a, G>) -> Self {
        Self {
            opts,
            seen: HashSet::new(),
            visits: 0,
        }
    }

    pub(super) fn visits(&self) -> usize {
        self.visits
    }

    pub(super) fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Record `node` as seen. True if it had been seen before.
    /// Always false when duplicates are not being skipped.
    pub(super) fn should_skip(&mut self, node: &G::Node) -> bool {
        if !self.opts.skip_duplicates {
            return false;
        }
        let key = node.cid().key_string();
        if self.seen.contains(&key) {
            trace!(cid = %key, "skip_duplicate");
            return true;
        }
        self.seen.insert(key);
        false
    }

    pub(super) fn call_visit(
        &mut self,
        state: &State<G::Node>,
    ) -> Result<(), TraverseError<G::Error>> {
        self.visits += 1;
        trace!(cid = %state.node.cid(), depth = state.depth, "visit");
        (self.opts.visit)(state).map_err(TraverseError::Visit)
    }

    /// Resolve `link`.
    ///
    /// `Ok(Some)` is a node to schedule, `Ok(None)` means skip it (already
    /// seen, or a fetch failure the recovery function accepted), `Err` stops
    /// the traversal.
    pub(super) fn get_node(
        &mut self,
        link: &Link,
    ) -> Result<Option<G::Node>, TraverseError<G::Error>> {
        let err = match self.opts.getter.get(link) {
            Ok(node) => {
                if self.should_skip(&node) {
                    return Ok(None);
                }
                return Ok(Some(node));
            }
            Err(err) => err,
        };

        match self.opts.recover.as_mut() {
            None => Err(TraverseError::Fetch(err)),
            Some(recover) => match recover(err) {
                Ok(()) => {
                    warn!(cid = %link.cid, "fetch failed, skipping subtree");
                    Ok(None)
                }
                Err(escalated) => Err(TraverseError::Recovered(escalated)),
            },
        }
    }
}
