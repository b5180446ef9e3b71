//! Invalidation marker generation

/// Number of random bytes in a marker (256 bits)
pub const MARKER_BYTES: usize = 32;

/// Generate a fresh invalidation marker.
///
/// Markers are compared for equality only, so uniqueness matters and ordering
/// does not.
pub fn generate_marker() -> String {
    let bytes: [u8; MARKER_BYTES] = rand::random();
    hex::encode(bytes)
}
