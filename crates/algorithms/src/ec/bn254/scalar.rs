//! Integers modulo the BN254 group order `r`

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::bignum::{Big, MODBYTES};
use mpin_params::curves::bn254::CURVE_ORDER;

/// The group order `r`
pub fn order() -> Big {
    Big::from_limbs(CURVE_ORDER)
}

/// Element of `Z/rZ`, always held fully reduced and normalised
#[derive(Copy, Clone, Default)]
pub struct Scalar(pub(crate) Big);

impl zeroize::DefaultIsZeroes for Scalar {}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x{})", self.0)
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Scalar {
        let mut bytes = [0u8; MODBYTES];
        bytes[MODBYTES - 8..].copy_from_slice(&v.to_be_bytes());
        Scalar::from_bytes_reduced(&bytes)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for Scalar {}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Scalar(Big::conditional_select(&a.0, &b.0, choice))
    }
}

impl Scalar {
    /// Zero
    pub fn zero() -> Scalar {
        Scalar(Big::new())
    }

    /// One
    pub fn one() -> Scalar {
        Scalar(Big::from_int(1))
    }

    /// Reduce an arbitrary integer modulo `r`
    pub fn from_big(x: &Big) -> Scalar {
        let mut x = *x;
        x.norm();
        x.rmod(&order());
        Scalar(x)
    }

    /// Decode a canonical big-endian scalar, rejecting values not below `r`
    pub fn from_bytes(bytes: &[u8; MODBYTES]) -> CtOption<Scalar> {
        let x = Big::from_bytes(bytes);
        let below = Choice::from((Big::comp(&x, &order()) == core::cmp::Ordering::Less) as u8);
        CtOption::new(Scalar(x), below)
    }

    /// Decode big-endian bytes and reduce them modulo `r`
    pub fn from_bytes_reduced(bytes: &[u8; MODBYTES]) -> Scalar {
        Scalar::from_big(&Big::from_bytes(bytes))
    }

    /// Big-endian encoding
    pub fn to_bytes(&self) -> [u8; MODBYTES] {
        self.0.to_bytes()
    }

    /// Uniform value in `[0, r)`
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Scalar {
        Scalar(Big::randomnum(&order(), rng))
    }

    /// The underlying integer
    pub fn as_big(&self) -> &Big {
        &self.0
    }

    /// True for zero
    pub fn is_zero(&self) -> Choice {
        self.0.ct_eq(&Big::new())
    }

    /// `self + rhs`
    pub fn add(&self, rhs: &Scalar) -> Scalar {
        let mut t = self.0.plus(&rhs.0);
        t.norm();
        t.rmod(&order());
        Scalar(t)
    }

    /// `self - rhs`
    pub fn sub(&self, rhs: &Scalar) -> Scalar {
        self.add(&rhs.neg())
    }

    /// `-self`
    pub fn neg(&self) -> Scalar {
        Scalar(Big::modneg(&self.0, &order()))
    }

    /// `self * rhs`
    pub fn mul(&self, rhs: &Scalar) -> Scalar {
        Scalar(Big::modmul(&self.0, &rhs.0, &order()))
    }

    /// `self^2`
    pub fn square(&self) -> Scalar {
        Scalar(Big::modsqr(&self.0, &order()))
    }

    /// Multiplicative inverse, none for zero
    pub fn invert(&self) -> CtOption<Scalar> {
        let mut t = self.0;
        t.invmodp(&order());
        CtOption::new(Scalar(t), !self.is_zero())
    }
}

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Scalar {
        Scalar::neg(self)
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Scalar {
        Scalar::neg(&self)
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar::add(self, rhs)
    }
}

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        Scalar::sub(self, rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar::mul(self, rhs)
    }
}

impl Add<Scalar> for Scalar {
    type Output = Scalar;

    #[inline]
    fn add(self, rhs: Scalar) -> Scalar {
        &self + &rhs
    }
}

impl Sub<Scalar> for Scalar {
    type Output = Scalar;

    #[inline]
    fn sub(self, rhs: Scalar) -> Scalar {
        &self - &rhs
    }
}

impl Mul<Scalar> for Scalar {
    type Output = Scalar;

    #[inline]
    fn mul(self, rhs: Scalar) -> Scalar {
        &self * &rhs
    }
}

impl AddAssign<Scalar> for Scalar {
    #[inline]
    fn add_assign(&mut self, rhs: Scalar) {
        *self = &*self + &rhs;
    }
}

impl SubAssign<Scalar> for Scalar {
    #[inline]
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = &*self - &rhs;
    }
}

impl MulAssign<Scalar> for Scalar {
    #[inline]
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = &*self * &rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn test_from_u64() {
        assert_eq!(Scalar::from(5u64) + Scalar::from(7u64), Scalar::from(12u64));
        assert_eq!(Scalar::from(0x0102_0304_0506_0708u64).to_bytes()[24..], [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_field_laws() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        for _ in 0..10 {
            let a = Scalar::random(&mut rng);
            let b = Scalar::random(&mut rng);
            assert_eq!(a - a, Scalar::zero());
            assert_eq!((a + b) - b, a);
            assert_eq!(a * Scalar::one(), a);
            assert_eq!(a.square(), a * a);
            assert_eq!(a * a.invert().unwrap(), Scalar::one());
        }
        assert!(bool::from(Scalar::zero().invert().is_none()));
    }

    #[test]
    fn test_from_bytes_rejects_order() {
        let r = order().to_bytes();
        assert!(bool::from(Scalar::from_bytes(&r).is_none()));
        assert_eq!(Scalar::from_bytes_reduced(&r), Scalar::zero());
        let mut below = order();
        below.dec(1);
        below.norm();
        assert_eq!(Scalar::from_bytes(&below.to_bytes()).unwrap(), -Scalar::one());
    }
}
