//! Moduli and curve constants

pub mod bn254;
pub mod moduli;

/// Shape of a prime modulus, which selects the reduction used after a
/// double-width product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModType {
    /// `p = 2^MODBITS - c` with small `c`
    PseudoMersenne,
    /// `p = c * 2^((NLEN-1)*BASEBITS) - 1`, Montgomery reduction with trivial quotient digits
    MontgomeryFriendly,
    /// `p = 2^MODBITS - 2^k - 1` with `k <= MODBITS/2`
    GeneralisedMersenne,
    /// No special form, full Montgomery reduction
    NotSpecial,
}
