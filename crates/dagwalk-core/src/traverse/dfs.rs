use super::session::Traversal;
use super::State;
use crate::error::TraverseError;
use crate::node::{Node, NodeGetter};

/// A node on the DFS stack and the index of its next unexpanded link
struct Frame<N> {
    state: State<N>,
    next_link: usize,
}

impl<N> Frame<N> {
    fn new(state: State<N>) -> Self {
        Self {
            state,
            next_link: 0,
        }
    }
}

pub(super) fn pre_order<G: NodeGetter>(
    root: State<G::Node>,
    t: &mut Traversal<'_, G>,
) -> Result<(), TraverseError<G::Error>> {
    descend(root, t, Visit::Pre)
}

pub(super) fn post_order<G: NodeGetter>(
    root: State<G::Node>,
    t: &mut Traversal<'_, G>,
) -> Result<(), TraverseError<G::Error>> {
    descend(root, t, Visit::Post)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pre,
    Post,
}

/// Depth-first walk with an explicit stack.
///
/// Links are fetched one at a time, and a child's whole subtree is finished
/// before the next sibling is fetched, exactly as a recursive walk would.
/// The root is never recorded in the seen set.
fn descend<G: NodeGetter>(
    root: State<G::Node>,
    t: &mut Traversal<'_, G>,
    when: Visit,
) -> Result<(), TraverseError<G::Error>> {
    if when == Visit::Pre {
        t.call_visit(&root)?;
    }

    let mut stack = vec![Frame::new(root)];

    while let Some(frame) = stack.last_mut() {
        let depth = frame.state.depth + 1;
        let Some(link) = frame.state.node.links().get(frame.next_link).cloned() else {
            // all children done
            if let Some(done) = stack.pop() {
                if when == Visit::Post {
                    t.call_visit(&done.state)?;
                }
            }
            continue;
        };
        frame.next_link += 1;

        let Some(node) = t.get_node(&link)? else {
            continue;
        };

        let child = State { node, depth };
        if when == Visit::Pre {
            t.call_visit(&child)?;
        }
        stack.push(Frame::new(child));
    }

    Ok(())
}
