//! Quadratic extension `Fp2 = Fp[i] / (i^2 + 1)`

use core::fmt;

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::Fp;
use crate::bignum::{Chunk, MODBYTES};

/// Element `c0 + c1*i`
#[derive(Copy, Clone, Default)]
pub struct Fp2 {
    /// Real part
    pub c0: Fp,
    /// Imaginary part
    pub c1: Fp,
}

impl zeroize::DefaultIsZeroes for Fp2 {}

impl fmt::Debug for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + {:?}*i", self.c0, self.c1)
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl_binops!(Fp2);

impl Fp2 {
    /// From real and imaginary parts
    pub fn new(c0: Fp, c1: Fp) -> Fp2 {
        Fp2 { c0, c1 }
    }

    /// Embed a base field element
    pub fn from_fp(c0: Fp) -> Fp2 {
        Fp2 {
            c0,
            c1: Fp::zero(),
        }
    }

    /// From two small integers
    pub fn from_ints(c0: Chunk, c1: Chunk) -> Fp2 {
        Fp2 {
            c0: Fp::from_int(c0),
            c1: Fp::from_int(c1),
        }
    }

    /// Additive identity
    pub fn zero() -> Fp2 {
        Fp2::from_fp(Fp::zero())
    }

    /// Multiplicative identity
    pub fn one() -> Fp2 {
        Fp2::from_fp(Fp::one())
    }

    /// True for zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// `self + rhs`
    pub fn add(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }

    /// `self - rhs`
    pub fn sub(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }

    /// `-self`
    pub fn neg(&self) -> Fp2 {
        Fp2 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }

    /// `2 * self`
    pub fn double(&self) -> Fp2 {
        self.add(self)
    }

    /// `c0 - c1*i`, which is also the p-power Frobenius
    pub fn conjugate(&self) -> Fp2 {
        Fp2 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// `self * rhs`, Karatsuba
    pub fn mul(&self, rhs: &Fp2) -> Fp2 {
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        Fp2 {
            c0: t0 - t1,
            c1: t2 - t0 - t1,
        }
    }

    /// `self^2`
    pub fn square(&self) -> Fp2 {
        let a = self.c0 + self.c1;
        let b = self.c0 - self.c1;
        let c = self.c0 * self.c1;
        Fp2 {
            c0: a * b,
            c1: c.double(),
        }
    }

    /// Multiply both parts by a base field element
    pub fn mul_fp(&self, rhs: &Fp) -> Fp2 {
        Fp2 {
            c0: self.c0 * *rhs,
            c1: self.c1 * *rhs,
        }
    }

    /// Multiply by a small signed integer
    pub fn imul(&self, c: Chunk) -> Fp2 {
        Fp2 {
            c0: self.c0.imul(c),
            c1: self.c1.imul(c),
        }
    }

    /// Multiply by the non-residue `1 + i`
    pub fn mul_by_nonresidue(&self) -> Fp2 {
        Fp2 {
            c0: self.c0 - self.c1,
            c1: self.c0 + self.c1,
        }
    }

    /// Divide by the non-residue `1 + i`
    pub fn div_by_nonresidue(&self) -> Fp2 {
        Fp2 {
            c0: (self.c0 + self.c1).div2(),
            c1: (self.c1 - self.c0).div2(),
        }
    }

    /// `self / 2`
    pub fn div2(&self) -> Fp2 {
        Fp2 {
            c0: self.c0.div2(),
            c1: self.c1.div2(),
        }
    }

    /// Multiplicative inverse, none for zero
    pub fn invert(&self) -> CtOption<Fp2> {
        let norm = self.c0.square() + self.c1.square();
        norm.invert().map(|t| Fp2 {
            c0: self.c0 * t,
            c1: -(self.c1 * t),
        })
    }

    /// Square root, none for a non-residue
    pub fn sqrt(&self) -> CtOption<Fp2> {
        // |self| = sqrt(c0^2 + c1^2) lies in Fp exactly when a root exists
        let norm = self.c0.square() + self.c1.square();
        let alpha = norm.sqrt();
        let alpha = alpha.unwrap_or(Fp::zero());

        let t1 = (self.c0 + alpha).div2();
        let t2 = (self.c0 - alpha).div2();
        let r1 = t1.sqrt();
        let x0 = Fp::conditional_select(&t2.sqrt().unwrap_or(Fp::zero()), &r1.unwrap_or(Fp::zero()), r1.is_some());

        let generic = x0
            .double()
            .invert()
            .map(|inv| Fp2::new(x0, self.c1 * inv));
        // c1 = 0 with c0 a non-residue: the root is purely imaginary
        let imaginary = (-self.c0)
            .sqrt()
            .map(|y| Fp2::new(Fp::zero(), y));

        let candidate = Fp2::conditional_select(
            &imaginary.unwrap_or(Fp2::zero()),
            &generic.unwrap_or(Fp2::zero()),
            generic.is_some(),
        );
        CtOption::new(candidate, candidate.square().ct_eq(self))
    }

    /// Parity of `c0`, or of `c1` when `c0` is zero
    pub fn sign(&self) -> Choice {
        let p0 = self.c0.parity();
        let p1 = self.c1.parity();
        p0 | (self.c0.is_zero() & p1)
    }

    /// Uniform random element
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Fp2 {
        Fp2 {
            c0: Fp::random(rng),
            c1: Fp::random(rng),
        }
    }

    /// Big-endian `c0 || c1`
    pub fn to_bytes(&self) -> [u8; 2 * MODBYTES] {
        let mut out = [0u8; 2 * MODBYTES];
        out[..MODBYTES].copy_from_slice(&self.c0.to_bytes());
        out[MODBYTES..].copy_from_slice(&self.c1.to_bytes());
        out
    }

    /// Decode `c0 || c1`, rejecting parts not below p
    pub fn from_bytes(bytes: &[u8; 2 * MODBYTES]) -> CtOption<Fp2> {
        let mut b0 = [0u8; MODBYTES];
        let mut b1 = [0u8; MODBYTES];
        b0.copy_from_slice(&bytes[..MODBYTES]);
        b1.copy_from_slice(&bytes[MODBYTES..]);
        let c0 = Fp::from_bytes(&b0);
        let c1 = Fp::from_bytes(&b1);
        c0.and_then(|c0| c1.map(|c1| Fp2::new(c0, c1)))
    }
}
