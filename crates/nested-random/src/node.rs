//! Addressable nodes of the random tree.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::trace;

use crate::iter::Children;
use crate::key::Key;
use crate::seed::{derive, Seed, DEFAULT_SEED};
use crate::stream::{engine_for, Engine, StreamHandle};

/// One address in the tree of random streams.
///
/// A node holds three things:
///
/// - its `seed`, fixed at construction and derived purely from the path that
///   leads to it, so it can be recomputed from scratch at any time;
/// - a lazily created stream, fixed for the lifetime of this node object, so
///   successive draws advance one sequence rather than restart it;
/// - the children requested so far, memoized so repeated lookups return the
///   same object.
///
/// Two node objects built independently for the same address share nothing
/// but the seed: each starts its own stream from the beginning.
///
/// Memory grows with the number of distinct children ever requested. Nothing
/// is evicted until the node itself is dropped.
pub struct Node {
    seed: Seed,
    stream: OnceLock<StreamHandle>,
    children: Mutex<HashMap<Key, Arc<Node>>>,
}

impl Node {
    /// Create a root node with an explicit seed.
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            stream: OnceLock::new(),
            children: Mutex::new(HashMap::new()),
        }
    }

    /// The seed this node's stream starts from.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Get the child reached through `key`, creating it on first request.
    ///
    /// The same object is returned for the same key on every later call. The
    /// child's stream is not touched.
    pub fn get(&self, key: impl Into<Key>) -> Arc<Node> {
        let key = key.into();
        let mut children = self.lock_children();
        if let Some(child) = children.get(&key) {
            return Arc::clone(child);
        }

        let seed = derive(self.seed, &key);
        trace!(parent = self.seed, %key, seed, "Materialized child node");
        let child = Arc::new(Node::new(seed));
        children.insert(key, Arc::clone(&child));
        child
    }

    /// Walk `path` from this node through memoized lookups.
    ///
    /// An empty path returns this node.
    pub fn descend<'a, I>(self: &Arc<Self>, path: I) -> Arc<Node>
    where
        I: IntoIterator<Item = &'a Key>,
    {
        path.into_iter()
            .fold(Arc::clone(self), |node, key| node.get(key))
    }

    /// This node's stream, created from the seed on first call.
    ///
    /// Every call returns a handle to the same engine.
    pub fn stream(&self) -> StreamHandle {
        self.stream
            .get_or_init(|| {
                trace!(seed = self.seed, "Initialized node stream");
                StreamHandle::new(self.seed)
            })
            .clone()
    }

    /// A brand new engine at the start of this node's sequence.
    ///
    /// Never cached and independent of [`Node::stream`], so it can be used to
    /// look at an address without moving the node's own cursor.
    pub fn fresh_stream(&self) -> Engine {
        engine_for(self.seed)
    }

    /// Whether [`Node::stream`] has been called on this node.
    pub fn has_stream(&self) -> bool {
        self.stream.get().is_some()
    }

    /// Number of children memoized so far.
    pub fn materialized_children(&self) -> usize {
        self.lock_children().len()
    }

    /// Lazy, unbounded sequence `get(0), get(1), get(2), ...`.
    pub fn children(&self) -> Children<'_> {
        Children::new(self)
    }

    fn lock_children(&self) -> MutexGuard<'_, HashMap<Key, Arc<Node>>> {
        // The map is only ever inserted into under the lock, so a poisoned
        // guard still holds a consistent map.
        self.children
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = Arc<Node>;
    type IntoIter = Children<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.children()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("seed", &format_args!("{:#018x}", self.seed))
            .field("has_stream", &self.has_stream())
            .field("materialized_children", &self.materialized_children())
            .finish()
    }
}
