//! UUID value generator.

use rand::Rng;
use uuid::Uuid;

use crate::value::GeneratedValue;

/// Generate a UUID with the v4 layout from the provided RNG.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> GeneratedValue {
    GeneratedValue::Uuid(random_uuid(rng))
}

pub(crate) fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}
