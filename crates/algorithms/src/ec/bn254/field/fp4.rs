//! Quartic extension `Fp4 = Fp2[v] / (v^2 - (1 + i))`

use core::fmt;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::{Fp, Fp2};
use crate::bignum::{Chunk, MODBYTES};

/// Element `c0 + c1*v`
#[derive(Copy, Clone, Default)]
pub struct Fp4 {
    /// Constant part
    pub c0: Fp2,
    /// Coefficient of `v`
    pub c1: Fp2,
}

impl zeroize::DefaultIsZeroes for Fp4 {}

impl fmt::Debug for Fp4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}) + ({:?})*v", self.c0, self.c1)
    }
}

impl ConstantTimeEq for Fp4 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl ConditionallySelectable for Fp4 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp4 {
            c0: Fp2::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp2::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl_binops!(Fp4);

impl Fp4 {
    /// From both coefficients
    pub fn new(c0: Fp2, c1: Fp2) -> Fp4 {
        Fp4 { c0, c1 }
    }

    /// Embed an `Fp2` element
    pub fn from_fp2(c0: Fp2) -> Fp4 {
        Fp4 {
            c0,
            c1: Fp2::zero(),
        }
    }

    /// Additive identity
    pub fn zero() -> Fp4 {
        Fp4::from_fp2(Fp2::zero())
    }

    /// Multiplicative identity
    pub fn one() -> Fp4 {
        Fp4::from_fp2(Fp2::one())
    }

    /// True for zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// True when the `v` coefficient is zero
    pub fn is_real(&self) -> Choice {
        self.c1.is_zero()
    }

    /// `self + rhs`
    pub fn add(&self, rhs: &Fp4) -> Fp4 {
        Fp4 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }

    /// `self - rhs`
    pub fn sub(&self, rhs: &Fp4) -> Fp4 {
        Fp4 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }

    /// `-self`
    pub fn neg(&self) -> Fp4 {
        Fp4 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }

    /// `2 * self`
    pub fn double(&self) -> Fp4 {
        self.add(self)
    }

    /// `c0 - c1*v`
    pub fn conjugate(&self) -> Fp4 {
        Fp4 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// `-c0 + c1*v`
    pub fn neg_conjugate(&self) -> Fp4 {
        Fp4 {
            c0: -self.c0,
            c1: self.c1,
        }
    }

    /// `self * rhs`, Karatsuba
    pub fn mul(&self, rhs: &Fp4) -> Fp4 {
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        Fp4 {
            c0: t0 + t1.mul_by_nonresidue(),
            c1: t2 - t0 - t1,
        }
    }

    /// `self^2`
    pub fn square(&self) -> Fp4 {
        let t0 = self.c0.square();
        let t1 = self.c1.square();
        let t2 = self.c0 * self.c1;
        Fp4 {
            c0: t0 + t1.mul_by_nonresidue(),
            c1: t2.double(),
        }
    }

    /// Multiply both coefficients by an `Fp2` element
    pub fn mul_fp2(&self, rhs: &Fp2) -> Fp4 {
        Fp4 {
            c0: self.c0 * *rhs,
            c1: self.c1 * *rhs,
        }
    }

    /// Multiply both coefficients by a base field element
    pub fn mul_fp(&self, rhs: &Fp) -> Fp4 {
        Fp4 {
            c0: self.c0.mul_fp(rhs),
            c1: self.c1.mul_fp(rhs),
        }
    }

    /// Multiply by a small signed integer
    pub fn imul(&self, c: Chunk) -> Fp4 {
        Fp4 {
            c0: self.c0.imul(c),
            c1: self.c1.imul(c),
        }
    }

    /// Multiply by `v`
    pub fn mul_by_v(&self) -> Fp4 {
        Fp4 {
            c0: self.c1.mul_by_nonresidue(),
            c1: self.c0,
        }
    }

    /// Multiplicative inverse, none for zero
    pub fn invert(&self) -> CtOption<Fp4> {
        let t = self.c0.square() - self.c1.square().mul_by_nonresidue();
        t.invert().map(|t| Fp4 {
            c0: self.c0 * t,
            c1: -(self.c1 * t),
        })
    }

    /// p-power Frobenius, given `f^3` for the tower constant `f`
    pub fn frobenius(&self, f3: &Fp2) -> Fp4 {
        Fp4 {
            c0: self.c0.conjugate(),
            c1: self.c1.conjugate() * *f3,
        }
    }

    /// Big-endian `c0 || c1`
    pub fn to_bytes(&self) -> [u8; 4 * MODBYTES] {
        let mut out = [0u8; 4 * MODBYTES];
        out[..2 * MODBYTES].copy_from_slice(&self.c0.to_bytes());
        out[2 * MODBYTES..].copy_from_slice(&self.c1.to_bytes());
        out
    }

    /// Decode `c0 || c1`
    pub fn from_bytes(bytes: &[u8; 4 * MODBYTES]) -> CtOption<Fp4> {
        let mut b0 = [0u8; 2 * MODBYTES];
        let mut b1 = [0u8; 2 * MODBYTES];
        b0.copy_from_slice(&bytes[..2 * MODBYTES]);
        b1.copy_from_slice(&bytes[2 * MODBYTES..]);
        let c0 = Fp2::from_bytes(&b0);
        let c1 = Fp2::from_bytes(&b1);
        c0.and_then(|c0| c1.map(|c1| Fp4::new(c0, c1)))
    }
}
