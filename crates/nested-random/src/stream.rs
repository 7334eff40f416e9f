//! Per-node random streams.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::seed::Seed;

/// Random engine behind every stream.
///
/// ChaCha8 output for a given seed is fixed across platforms and releases of
/// `rand_chacha`, which `StdRng` does not promise.
pub type Engine = ChaCha8Rng;

/// Build a new engine positioned at the start of the stream for `seed`.
pub fn engine_for(seed: Seed) -> Engine {
    Engine::seed_from_u64(seed)
}

/// Shared handle to one node's engine.
///
/// Clones point at the same engine, so draws through any clone advance the
/// single sequence owned by the node.
#[derive(Clone)]
pub struct StreamHandle {
    engine: Arc<Mutex<Engine>>,
}

impl StreamHandle {
    pub(crate) fn new(seed: Seed) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine_for(seed))),
        }
    }

    /// True when both handles draw from the same engine.
    pub fn same_stream(&self, other: &StreamHandle) -> bool {
        Arc::ptr_eq(&self.engine, &other.engine)
    }

    /// Run `f` with exclusive access to the engine.
    ///
    /// Several draws done inside one call take the lock once.
    pub fn with<T>(&self, f: impl FnOnce(&mut Engine) -> T) -> T {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Engine> {
        // A panic mid-draw cannot leave the engine in an invalid state.
        self.engine.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RngCore for StreamHandle {
    fn next_u32(&mut self) -> u32 {
        self.lock().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.lock().next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.lock().fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.lock().try_fill_bytes(dest)
    }
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.engine.try_lock() {
            Ok(engine) => f
                .debug_struct("StreamHandle")
                .field("word_pos", &engine.get_word_pos())
                .finish(),
            Err(_) => f.debug_struct("StreamHandle").finish_non_exhaustive(),
        }
    }
}
