//! Limb layout of the fixed-width integers

/// Signed limb type. The sign bit absorbs borrows between normalisations.
pub type Chunk = i64;

/// Bits per limb
pub const BASEBITS: usize = 56;

/// Bits in a `Chunk`
pub const CHUNK_BITS: usize = 64;

/// Limbs in a single-width integer
pub const NLEN: usize = 5;

/// Limbs in a double-width integer
pub const DNLEN: usize = 2 * NLEN;

/// Mask selecting the low `BASEBITS` bits of a limb
pub const BMASK: Chunk = (1 << BASEBITS) - 1;

/// Bytes in a serialised field element or scalar
pub const MODBYTES: usize = 32;

/// Width of the serialised form in bits; `invmod2m` inverts modulo `2^BIGBITS`
pub const BIGBITS: usize = 8 * MODBYTES;

/// Largest small multiplier a limb can absorb without normalising
pub const NEXCESS: Chunk = 1 << (CHUNK_BITS - BASEBITS - 1);

/// Half a limb, used when splitting products
pub const HBITS: usize = BASEBITS / 2;
