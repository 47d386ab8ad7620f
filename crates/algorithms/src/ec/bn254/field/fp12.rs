//! Degree-12 extension `Fp12 = Fp4[w] / (w^3 - v)`, home of the pairing values

use core::fmt;

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::{Fp2, Fp4};
use crate::bignum::{Big, MODBYTES};

/// Shape of an [`Fp12`] value, used to skip work in products.
///
/// The shape is a property of how a value was produced (an identity, a
/// Miller-loop line, or a general product), never of secret data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fp12Kind {
    /// Known to be zero
    Zero,
    /// Known to be one
    One,
    /// A line value: `c1` has a zero `v` part and `c2` is zero
    Sparse,
    /// No known structure
    Dense,
}

/// Element `c0 + c1*w + c2*w^2`
#[derive(Copy, Clone)]
pub struct Fp12 {
    /// Constant part
    pub c0: Fp4,
    /// Coefficient of `w`
    pub c1: Fp4,
    /// Coefficient of `w^2`
    pub c2: Fp4,
    kind: Fp12Kind,
}

impl zeroize::DefaultIsZeroes for Fp12 {}

impl Default for Fp12 {
    fn default() -> Self {
        Fp12::zero()
    }
}

impl fmt::Debug for Fp12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fp12 {{ c0: {:?}, c1: {:?}, c2: {:?} }}",
            self.c0, self.c1, self.c2
        )
    }
}

impl ConstantTimeEq for Fp12 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}

impl ConditionallySelectable for Fp12 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp12 {
            c0: Fp4::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp4::conditional_select(&a.c1, &b.c1, choice),
            c2: Fp4::conditional_select(&a.c2, &b.c2, choice),
            kind: if a.kind == b.kind {
                a.kind
            } else {
                Fp12Kind::Dense
            },
        }
    }
}

impl_binops!(Fp12);

impl Fp12 {
    /// From the three coefficients
    pub fn new(c0: Fp4, c1: Fp4, c2: Fp4) -> Fp12 {
        Fp12 {
            c0,
            c1,
            c2,
            kind: Fp12Kind::Dense,
        }
    }

    /// A line value `c0 + (c1, 0)*w`
    pub fn from_line(c0: Fp4, c1: Fp2) -> Fp12 {
        Fp12 {
            c0,
            c1: Fp4::from_fp2(c1),
            c2: Fp4::zero(),
            kind: Fp12Kind::Sparse,
        }
    }

    /// Additive identity
    pub fn zero() -> Fp12 {
        Fp12 {
            c0: Fp4::zero(),
            c1: Fp4::zero(),
            c2: Fp4::zero(),
            kind: Fp12Kind::Zero,
        }
    }

    /// Multiplicative identity
    pub fn one() -> Fp12 {
        Fp12 {
            c0: Fp4::one(),
            c1: Fp4::zero(),
            c2: Fp4::zero(),
            kind: Fp12Kind::One,
        }
    }

    /// Shape tag
    pub fn kind(&self) -> Fp12Kind {
        self.kind
    }

    /// Same value, with its shape forgotten so products never take shortcuts
    pub fn dense(&self) -> Fp12 {
        Fp12 {
            kind: Fp12Kind::Dense,
            ..*self
        }
    }

    /// True for one
    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Fp12::one())
    }

    /// True for zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero() & self.c2.is_zero()
    }

    /// `self + rhs`
    pub fn add(&self, rhs: &Fp12) -> Fp12 {
        Fp12::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }

    /// `self - rhs`
    pub fn sub(&self, rhs: &Fp12) -> Fp12 {
        Fp12::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }

    /// `-self`
    pub fn neg(&self) -> Fp12 {
        Fp12::new(-self.c0, -self.c1, -self.c2)
    }

    /// Conjugation over `Fp6`, the `p^6`-power Frobenius and the inverse of
    /// a unitary element
    pub fn conjugate(&self) -> Fp12 {
        Fp12 {
            c0: self.c0.conjugate(),
            c1: self.c1.neg_conjugate(),
            c2: self.c2.conjugate(),
            kind: self.kind,
        }
    }

    /// `self * rhs`, dispatching on the operands' shapes
    pub fn mul(&self, rhs: &Fp12) -> Fp12 {
        match (self.kind, rhs.kind) {
            (Fp12Kind::One, _) => *rhs,
            (_, Fp12Kind::One) => *self,
            (Fp12Kind::Zero, _) | (_, Fp12Kind::Zero) => Fp12::zero(),
            (_, Fp12Kind::Sparse) => self.mul_by_line(rhs),
            (Fp12Kind::Sparse, _) => rhs.mul_by_line(self),
            _ => self.mul_dense(rhs),
        }
    }

    fn mul_dense(&self, rhs: &Fp12) -> Fp12 {
        let (a, b, c) = (&self.c0, &self.c1, &self.c2);
        let (d, e, f) = (&rhs.c0, &rhs.c1, &rhs.c2);

        let ad = a * d;
        let be = b * e;
        let cf = c * f;
        // Karatsuba on the cross terms
        let bf_ce = (b + c) * (e + f) - be - cf;
        let ae_bd = (a + b) * (d + e) - ad - be;
        let af_cd = (a + c) * (d + f) - ad - cf;

        Fp12::new(ad + bf_ce.mul_by_v(), ae_bd + cf.mul_by_v(), af_cd + be)
    }

    /// Product with a line value `d + (e0, 0)*w`
    fn mul_by_line(&self, line: &Fp12) -> Fp12 {
        let (a, b, c) = (&self.c0, &self.c1, &self.c2);
        let d = &line.c0;
        let e0 = &line.c1.c0;

        let ce = c.mul_fp2(e0);
        Fp12::new(
            a * d + ce.mul_by_v(),
            a.mul_fp2(e0) + b * d,
            b.mul_fp2(e0) + c * d,
        )
    }

    /// `self^2`
    pub fn square(&self) -> Fp12 {
        match self.kind {
            Fp12Kind::One | Fp12Kind::Zero => *self,
            _ => {
                let (a, b, c) = (&self.c0, &self.c1, &self.c2);
                let bc = b * c;
                let ab = a * b;
                let ac = a * c;
                Fp12::new(
                    a.square() + bc.double().mul_by_v(),
                    ab.double() + c.square().mul_by_v(),
                    b.square() + ac.double(),
                )
            }
        }
    }

    /// Square of an element of the cyclotomic subgroup (Granger-Scott)
    pub fn cyclotomic_square(&self) -> Fp12 {
        if self.kind == Fp12Kind::One {
            return *self;
        }
        let a2 = self.c0.square();
        let a = a2.double() + a2 + self.c0.neg_conjugate().double();

        let c2 = self.c2.square().mul_by_v();
        let b = self.c1.conjugate().double() + c2.double() + c2;

        let b2 = self.c1.square();
        let c = self.c2.neg_conjugate().double() + b2.double() + b2;

        Fp12::new(a, b, c)
    }

    /// Multiplicative inverse, none for zero
    pub fn invert(&self) -> CtOption<Fp12> {
        let (a, b, c) = (&self.c0, &self.c1, &self.c2);
        let f0 = a.square() - (b * c).mul_by_v();
        let f1 = c.square().mul_by_v() - a * b;
        let f2 = b.square() - a * c;
        let f3 = a * &f0 + (b * &f2).mul_by_v() + (c * &f1).mul_by_v();
        f3.invert()
            .map(|t| Fp12::new(f0 * t, f1 * t, f2 * t))
    }

    /// p-power Frobenius for the tower constant `f`
    pub fn frobenius(&self, f: &Fp2) -> Fp12 {
        let f2 = f.square();
        let f3 = f2 * *f;
        Fp12 {
            c0: self.c0.frobenius(&f3),
            c1: self.c1.frobenius(&f3).mul_fp2(f),
            c2: self.c2.frobenius(&f3).mul_fp2(&f2),
            kind: self.kind,
        }
    }

    /// `self^e`, square and multiply on a public exponent
    pub fn pow_vartime(&self, e: &Big) -> Fp12 {
        let mut e = *e;
        e.norm();
        let mut r = Fp12::one();
        for i in (0..e.nbits()).rev() {
            r = r.square();
            if e.bit(i) == 1 {
                r = r * *self;
            }
        }
        r
    }

    /// `self^e` for a public exponent, `self` in the cyclotomic subgroup
    pub fn cyclotomic_pow_vartime(&self, e: &Big) -> Fp12 {
        let mut e = *e;
        e.norm();
        let mut r = Fp12::one();
        for i in (0..e.nbits()).rev() {
            r = r.cyclotomic_square();
            if e.bit(i) == 1 {
                r = r * *self;
            }
        }
        r
    }

    /// `self^e` for a secret exponent of `bits` bits, by a ladder with a
    /// fixed sequence of operations. `self` must be unitary.
    pub fn pinpow(&self, e: u32, bits: usize) -> Fp12 {
        let mut r0 = Fp12::one().dense();
        let mut r1 = self.dense();
        for i in (0..bits).rev() {
            let b = Choice::from(((e >> i) & 1) as u8);
            Fp12::conditional_swap(&mut r0, &mut r1, b);
            r1 = r0.mul_dense(&r1);
            r0 = r0.cyclotomic_square();
            Fp12::conditional_swap(&mut r0, &mut r1, b);
        }
        r0
    }

    /// The trace over `Fp4`, `3 * c0`
    pub fn trace(&self) -> Fp4 {
        self.c0.imul(3)
    }

    /// Big-endian encoding, `c0.c0.c0` first and `c2.c1.c1` last
    pub fn to_bytes(&self) -> [u8; 12 * MODBYTES] {
        let mut out = [0u8; 12 * MODBYTES];
        out[..4 * MODBYTES].copy_from_slice(&self.c0.to_bytes());
        out[4 * MODBYTES..8 * MODBYTES].copy_from_slice(&self.c1.to_bytes());
        out[8 * MODBYTES..].copy_from_slice(&self.c2.to_bytes());
        out
    }

    /// Decode the encoding of [`Fp12::to_bytes`]
    pub fn from_bytes(bytes: &[u8; 12 * MODBYTES]) -> CtOption<Fp12> {
        let mut parts = [[0u8; 4 * MODBYTES]; 3];
        for (i, part) in parts.iter_mut().enumerate() {
            part.copy_from_slice(&bytes[i * 4 * MODBYTES..(i + 1) * 4 * MODBYTES]);
        }
        let c0 = Fp4::from_bytes(&parts[0]);
        let c1 = Fp4::from_bytes(&parts[1]);
        let c2 = Fp4::from_bytes(&parts[2]);
        c0.and_then(|c0| c1.and_then(|c1| c2.map(|c2| Fp12::new(c0, c1, c2))))
    }
}
