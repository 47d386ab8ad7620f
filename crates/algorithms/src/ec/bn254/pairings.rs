//! Optimal ate pairing `e: G2 x G1 -> GT` and the target group
//!
//! The Miller loop keeps the G₂ accumulator in affine coordinates, so every
//! line is a sparse `Fp12` value multiplied in through the sparse path of
//! [`Fp12::mul`].

use core::fmt;
use core::ops::{Mul, MulAssign};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::bn_x;
use super::field::{frobenius_constant, Fp12, Fp2, Fp4};
use super::g1::G1Affine;
use super::g2::G2Affine;
use super::glv::{self, Group};
use super::scalar::Scalar;
use crate::bignum::{Big, MODBYTES};

/// Size of a serialized GT element
pub const GT_SIZE: usize = 12 * MODBYTES;

/// The line through `a` and `b` (the tangent when they are equal) evaluated
/// at `p`, together with `a + b`.
///
/// `a + b = O` gives the vertical line, which the final exponentiation kills,
/// so it is returned as one.
fn line(a: &G2Affine, b: &G2Affine, p: &G1Affine) -> (Fp12, G2Affine) {
    let same_x = bool::from(a.x.ct_eq(&b.x));
    let lambda = if same_x {
        if bool::from(a.y.ct_eq(&-b.y)) {
            return (Fp12::one(), G2Affine::identity());
        }
        let num = a.x.square().imul(3);
        let den = a.y.double();
        num * den.invert().unwrap_or(Fp2::zero())
    } else {
        let num = b.y - a.y;
        let den = b.x - a.x;
        num * den.invert().unwrap_or(Fp2::zero())
    };

    let x3 = lambda.square() - a.x - b.x;
    let y3 = lambda * (a.x - x3) - a.y;
    let sum = G2Affine::from_xy_unchecked(x3, y3);

    let c0 = Fp4::new(Fp2::from_fp(p.y), lambda * a.x - a.y);
    let c1 = -lambda.mul_fp(&p.x);
    (Fp12::from_line(c0, c1), sum)
}

/// Loop length `|6x + 2|`
fn loop_count() -> Big {
    let mut n = bn_x();
    n.pmul(6);
    n.dec(2);
    n.norm();
    n
}

/// Miller loops for several pairs sharing one chain of squarings
fn multi_miller_loop(pairs: &[(&G2Affine, &G1Affine)]) -> Fp12 {
    let pairs: Vec<(G2Affine, G1Affine)> = pairs
        .iter()
        .filter(|(q, p)| !bool::from(q.is_identity() | p.is_identity()))
        .map(|(q, p)| (**q, **p))
        .collect();
    if pairs.is_empty() {
        return Fp12::one();
    }

    let n = loop_count();
    let nb = n.nbits();
    let mut acc: Vec<G2Affine> = pairs.iter().map(|(q, _)| *q).collect();
    let mut r = Fp12::one();

    let step = |r: &mut Fp12, i: usize, acc: &mut [G2Affine]| {
        for (a, (q, p)) in acc.iter_mut().zip(pairs.iter()) {
            let (lv, s) = line(a, a, p);
            *a = s;
            *r = *r * lv;
            if n.bit(i) == 1 {
                let (lv, s) = line(a, q, p);
                *a = s;
                *r = *r * lv;
            }
        }
    };

    for i in (1..nb - 1).rev() {
        step(&mut r, i, &mut acc);
        r = r.square();
    }
    step(&mut r, 0, &mut acc);

    // x < 0
    r = r.conjugate();

    for (a, (q, p)) in acc.iter_mut().zip(pairs.iter()) {
        *a = a.neg();
        let k = q.psi();
        let (lv, s) = line(a, &k, p);
        *a = s;
        r = r * lv;
        let k = k.psi().neg();
        let (lv, _) = line(a, &k, p);
        r = r * lv;
    }
    r
}

/// Miller loop of the optimal ate pairing. One when either input is the
/// identity.
pub fn ate(q: &G2Affine, p: &G1Affine) -> Fp12 {
    multi_miller_loop(&[(q, p)])
}

/// Product of two Miller loops, `ate(q, p) * ate(r, s)`, at the cost of one
/// loop's squarings
pub fn ate2(q: &G2Affine, p: &G1Affine, r: &G2Affine, s: &G1Affine) -> Fp12 {
    multi_miller_loop(&[(q, p), (r, s)])
}

/// Final exponentiation `m^((p^12 - 1) / r)`.
///
/// The easy part `(p^6 - 1)(p^2 + 1)` lands in the cyclotomic subgroup, where
/// the hard part uses cheap squarings and three powers of `|x|`.
pub fn fexp(m: &Fp12) -> Fp12 {
    let f = frobenius_constant();
    let x = bn_x();

    // easy part
    let mut r = m.conjugate() * m.invert().unwrap_or(Fp12::zero());
    let lv = r;
    r = r.frobenius(&f).frobenius(&f) * lv;

    // hard part
    let mut lv = r.frobenius(&f);
    let mut x0 = lv.frobenius(&f);
    lv = lv * r;
    x0 = x0 * lv;
    x0 = x0.frobenius(&f);
    let x1 = r.conjugate();

    let mut x4 = r.cyclotomic_pow_vartime(&x);
    let x3 = x4.frobenius(&f);
    let mut x2 = x4.cyclotomic_pow_vartime(&x);
    let x5 = x2.conjugate();
    lv = x2.cyclotomic_pow_vartime(&x);

    x2 = x2.frobenius(&f);
    r = x2.conjugate();
    x4 = x4 * r;
    x2 = x2.frobenius(&f);

    r = lv.frobenius(&f);
    lv = lv * r;
    lv = lv.cyclotomic_square();
    lv = lv * x4;
    lv = lv * x5;
    r = x3 * x5;
    r = r * lv;
    lv = lv * x2;
    r = r.cyclotomic_square();
    r = r * lv;
    r = r.cyclotomic_square();
    lv = r * x1;
    r = r * x0;
    lv = lv.cyclotomic_square();
    (r * lv).dense()
}

/// Reduced pairing `fexp(ate(q, p))`
pub fn pairing(q: &G2Affine, p: &G1Affine) -> Gt {
    Gt(fexp(&ate(q, p)))
}

/// Reduced product `fexp(ate(q, p) * ate(r, s))` with one shared final
/// exponentiation
pub fn pairing2(q: &G2Affine, p: &G1Affine, r: &G2Affine, s: &G1Affine) -> Gt {
    Gt(fexp(&ate2(q, p, r, s)))
}

/// Element of the order-r subgroup of `Fp12^*`, written multiplicatively
#[derive(Copy, Clone, Debug)]
pub struct Gt(pub(crate) Fp12);

impl Default for Gt {
    fn default() -> Gt {
        Gt::identity()
    }
}

impl zeroize::DefaultIsZeroes for Gt {}

impl fmt::Display for Gt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl PartialEq for Gt {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for Gt {}

impl Group for Gt {
    fn identity() -> Self {
        Gt::identity()
    }

    fn double(&self) -> Self {
        Gt(self.0.cyclotomic_square())
    }

    fn add(&self, rhs: &Self) -> Self {
        Gt(self.0 * rhs.0)
    }

    fn neg(&self) -> Self {
        self.conjugate()
    }
}

impl<'a, 'b> Mul<&'b Gt> for &'a Gt {
    type Output = Gt;

    fn mul(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}

impl Mul<Gt> for Gt {
    type Output = Gt;

    fn mul(self, rhs: Gt) -> Gt {
        &self * &rhs
    }
}

impl MulAssign<Gt> for Gt {
    fn mul_assign(&mut self, rhs: Gt) {
        *self = &*self * &rhs;
    }
}

impl Gt {
    /// The identity element, one
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }

    /// `e(Q, P)` for the fixed generators
    pub fn generator() -> Gt {
        pairing(&G2Affine::generator(), &G1Affine::generator())
    }

    /// Random element, a random power of the generator
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Gt {
        Gt::generator().pow(&Scalar::random(rng))
    }

    /// True for one
    pub fn is_identity(&self) -> Choice {
        self.0.is_one()
    }

    /// Inverse, which for a unitary element is the conjugate
    pub fn conjugate(&self) -> Gt {
        Gt(self.0.conjugate())
    }

    /// `self^e` in constant time by Galbraith-Scott decomposition along the
    /// Frobenius
    pub fn pow(&self, e: &Scalar) -> Gt {
        let f = frobenius_constant();
        let g0 = Gt(self.0.dense());
        let g1 = Gt(g0.0.frobenius(&f));
        let g2 = Gt(g1.0.frobenius(&f));
        let g3 = Gt(g2.0.frobenius(&f));
        glv::endomorphism_mul([g0, g1, g2, g3], e, glv::gs)
    }

    /// `self^e` for a small secret exponent of `bits` bits
    pub fn pinpow(&self, e: u32, bits: usize) -> Gt {
        Gt(self.0.pinpow(e, bits))
    }

    /// Trace over `Fp4`
    pub fn trace(&self) -> Fp4 {
        self.0.trace()
    }

    /// The underlying `Fp12` value
    pub fn as_fp12(&self) -> &Fp12 {
        &self.0
    }

    /// 384-byte big-endian encoding
    pub fn to_bytes(&self) -> [u8; GT_SIZE] {
        self.0.to_bytes()
    }

    /// Decode [`Gt::to_bytes`]. Only the field encoding is checked, not
    /// subgroup membership.
    pub fn from_bytes(bytes: &[u8; GT_SIZE]) -> CtOption<Gt> {
        Fp12::from_bytes(bytes).map(Gt)
    }
}
