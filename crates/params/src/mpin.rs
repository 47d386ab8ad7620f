//! Constants for the M-PIN protocol over BN254

/// Size of a field element in bytes
pub const EFS: usize = 32;

/// Size of a group-order scalar in bytes
pub const EGS: usize = 32;

/// Size of a derived AES session key in bytes
pub const PAS: usize = 16;

/// Uncompressed G1 encoding: tag byte followed by x and y
pub const G1S: usize = 2 * EFS + 1;

/// Compressed G1 encoding: tag byte followed by x
pub const G1_COMPRESSED_SIZE: usize = EFS + 1;

/// G2 encoding: four packed Fp coordinates
pub const G2S: usize = 4 * EFS;

/// Compressed G2 encoding: tag byte followed by the two halves of x
pub const G2_COMPRESSED_SIZE: usize = 2 * EFS + 1;

/// GT encoding: twelve packed Fp coordinates
pub const GTS: usize = 12 * EFS;

/// Size of a SHA-256 digest, which is also the hashed identity size
pub const HASH_BYTES: usize = 32;

/// PINs are reduced modulo this value
pub const MAXPIN: u32 = 10_000;

/// Bits of PIN processed by the fixed-length ladders
pub const PBLEN: usize = 14;

/// Number of kangaroo jump sizes (`2^TS / TS` is roughly `sqrt(MAXPIN)`)
pub const TS: usize = 10;

/// Length of the tame kangaroo's walk
pub const TRAP: usize = 200;

/// Length of a time slot in minutes; one slot per day
pub const TIME_SLOT_MINUTES: u64 = 1440;

/// AES-GCM tag length in bytes
pub const GCM_TAG_SIZE: usize = 16;

/// AES-GCM nonce length in bytes
pub const GCM_IV_SIZE: usize = 12;

/// Wire code returned for a rejected PIN, expired attempt or bad token
pub const BAD_PIN: i32 = -19;

/// Wire code returned for an undecodable point
pub const INVALID_POINT: i32 = -14;

/// Wire code returned for malformed parameters
pub const BAD_PARAMS: i32 = -11;

/// Wire code returned for points outside the prime-order subgroup
pub const WRONG_ORDER: i32 = -18;
