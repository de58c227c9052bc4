use std::collections::VecDeque;

use tracing::error;

use super::session::Traversal;
use super::State;
use crate::error::{TraverseError, DEQUEUE_FAILURE};
use crate::node::{Node, NodeGetter};

/// FIFO work queue used by the breadth-first walk
pub(super) trait Frontier<T> {
    fn push_back(&mut self, item: T);
    fn pop_front(&mut self) -> Option<T>;
    fn is_empty(&self) -> bool;
}

impl<T> Frontier<T> for VecDeque<T> {
    fn push_back(&mut self, item: T) {
        VecDeque::push_back(self, item);
    }

    fn pop_front(&mut self) -> Option<T> {
        VecDeque::pop_front(self)
    }

    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }
}

pub(super) fn traverse<G: NodeGetter>(
    root: State<G::Node>,
    t: &mut Traversal<'_, G>,
) -> Result<(), TraverseError<G::Error>> {
    traverse_with(root, t, VecDeque::new())
}

/// Breadth-first walk over the given queue.
///
/// Unlike the DFS walks, the root goes through the duplicate check before
/// anything is visited.
pub(super) fn traverse_with<G, Q>(
    root: State<G::Node>,
    t: &mut Traversal<'_, G>,
    mut queue: Q,
) -> Result<(), TraverseError<G::Error>>
where
    G: NodeGetter,
    Q: Frontier<State<G::Node>>,
{
    if t.should_skip(&root.node) {
        return Ok(());
    }

    queue.push_back(root);
    while !queue.is_empty() {
        let Some(curr) = queue.pop_front() else {
            error!(visits = t.visits(), "{}", DEQUEUE_FAILURE);
            return Err(TraverseError::Internal(DEQUEUE_FAILURE));
        };

        t.call_visit(&curr)?;

        for link in curr.node.links() {
            let Some(node) = t.get_node(link)? else {
                continue;
            };
            queue.push_back(State {
                node,
                depth: curr.depth + 1,
            });
        }
    }

    Ok(())
}
