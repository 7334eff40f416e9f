//! Deterministic, addressable tree of pseudorandom streams.
//!
//! A [`Node`] is one address in an unbounded tree. Its seed is derived from
//! its parent's seed and the [`Key`] it was reached by, so the same path from
//! the same root seed always lands on the same seed, no matter how often or in
//! which order the tree was visited before.
//!
//! # Architecture
//!
//! ```text
//!            root seed
//!                │
//!                ▼
//!        ┌───────────────┐   get(key)    ┌───────────────┐
//!        │     Node      │──────────────▶│     Node      │──▶ ...
//!        │               │  derive(seed, │               │
//!        │  - seed       │        key)   │  - seed       │
//!        │  - stream     │               │  - stream     │
//!        │  - children   │               │  - children   │
//!        └───────┬───────┘               └───────────────┘
//!                │ stream()
//!                ▼
//!          StreamHandle (ChaCha8)
//! ```
//!
//! # Example
//!
//! ```rust
//! use nested_random::Node;
//! use rand::Rng;
//!
//! let root = Node::new(7);
//! let mut stream = root.get("x").stream();
//! let first: u64 = stream.gen();
//!
//! // A separately built tree reproduces the same draws from the start.
//! let again = Node::new(7);
//! assert_eq!(again.get("x").stream().gen::<u64>(), first);
//!
//! // Repeated indexed children, cut off by the caller.
//! let items: Vec<_> = root.get("items").children().take(3).collect();
//! assert_eq!(items.len(), 3);
//! ```

pub mod iter;
pub mod key;
pub mod node;
pub mod seed;
pub mod stream;

// Re-exports for convenience
pub use iter::Children;
pub use key::{Key, KeyPath, KeyPathError};
pub use node::Node;
pub use seed::{derive, Seed, DEFAULT_SEED};
pub use stream::{Engine, StreamHandle};
