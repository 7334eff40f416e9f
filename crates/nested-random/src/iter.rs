//! Iteration over a node's integer-indexed children.

use std::iter::FusedIterator;
use std::sync::Arc;

use crate::node::Node;

/// Unbounded iterator yielding `node.get(0)`, `node.get(1)`, ...
///
/// Every element is exactly the memoized object `get(i)` returns, so a second
/// iterator over the same node yields the same objects again. The sequence has
/// no end; callers stop it themselves, typically with `take`.
///
/// `nth` (and therefore `skip`) jumps straight to the target index without
/// materializing the children in between.
#[derive(Debug)]
pub struct Children<'a> {
    node: &'a Node,
    next: u64,
}

impl<'a> Children<'a> {
    pub(crate) fn new(node: &'a Node) -> Self {
        Self { node, next: 0 }
    }

    /// Index of the element the next call to `next` yields.
    pub fn position(&self) -> u64 {
        self.next
    }
}

impl Iterator for Children<'_> {
    type Item = Arc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let child = self.node.get(self.next);
        self.next += 1;
        Some(child)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next += n as u64;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl FusedIterator for Children<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_elements_are_indexed_children() {
        let node = Node::new(4);
        for (i, child) in node.children().take(50).enumerate() {
            assert!(Arc::ptr_eq(&child, &node.get(i as u64)));
        }
    }

    #[test]
    fn test_restart_yields_same_objects() {
        let node = Node::new(4);
        let first: Vec<_> = node.children().take(10).collect();
        let second: Vec<_> = (&node).into_iter().take(10).collect();

        assert!(first.iter().zip(&second).all(|(a, b)| Arc::ptr_eq(a, b)));
        assert_eq!(node.materialized_children(), 10);
    }

    #[test]
    fn test_skip_does_not_materialize_prefix() {
        let node = Node::new(4);
        let mut iter = node.children().skip(1_000);

        let child = iter.next().unwrap();
        assert!(Arc::ptr_eq(&child, &node.get(1_000u64)));
        assert_eq!(node.materialized_children(), 1);
    }

    #[test]
    fn test_position_tracks_progress() {
        let node = Node::default();
        let mut iter = node.children();
        assert_eq!(iter.position(), 0);
        iter.next();
        iter.nth(4);
        assert_eq!(iter.position(), 6);
    }

    #[test]
    fn test_draws_match_direct_lookup_on_fresh_tree() {
        let iterated = Node::new(21);
        let indexed = Node::new(21);

        for (i, leaf) in iterated.children().take(100).enumerate() {
            let a: f64 = leaf.stream().gen();
            let b: f64 = indexed.get(i as u64).stream().gen();
            assert_eq!(a, b);
        }
    }
}
