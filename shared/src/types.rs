//! Common types for the shared crate
//!
//! Id aliases and timestamp helpers used across the catalog.

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Category identifier
pub type CategoryId = i64;

/// Product identifier
pub type ProductId = i64;

/// Product variant identifier
pub type VariantId = i64;

/// Product image identifier
pub type ImageId = i64;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a snowflake-style i64 resource id.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at catalog scale)
pub fn next_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}
