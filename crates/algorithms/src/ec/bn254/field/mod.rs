//! BN254 base field and the `Fp2 -> Fp4 -> Fp12` tower
//!
//! * `Fp2 = Fp[i] / (i^2 + 1)`
//! * `Fp4 = Fp2[v] / (v^2 - (1 + i))`
//! * `Fp12 = Fp4[w] / (w^3 - v)`

use crate::bignum::Big;
use crate::field::{Bn254Modulus, FieldElement};
use mpin_params::curves::bn254::{CURVE_FRA, CURVE_FRB};

/// Operator impls forwarding to the inherent `add`, `sub`, `mul` and `neg`
macro_rules! impl_binops {
    ($t:ident) => {
        impl<'a> core::ops::Neg for &'a $t {
            type Output = $t;
            #[inline]
            fn neg(self) -> $t {
                $t::neg(self)
            }
        }

        impl core::ops::Neg for $t {
            type Output = $t;
            #[inline]
            fn neg(self) -> $t {
                $t::neg(&self)
            }
        }

        impl<'a, 'b> core::ops::Add<&'b $t> for &'a $t {
            type Output = $t;
            #[inline]
            fn add(self, rhs: &'b $t) -> $t {
                $t::add(self, rhs)
            }
        }

        impl<'a, 'b> core::ops::Sub<&'b $t> for &'a $t {
            type Output = $t;
            #[inline]
            fn sub(self, rhs: &'b $t) -> $t {
                $t::sub(self, rhs)
            }
        }

        impl<'a, 'b> core::ops::Mul<&'b $t> for &'a $t {
            type Output = $t;
            #[inline]
            fn mul(self, rhs: &'b $t) -> $t {
                $t::mul(self, rhs)
            }
        }

        impl core::ops::Add<$t> for $t {
            type Output = $t;
            #[inline]
            fn add(self, rhs: $t) -> $t {
                &self + &rhs
            }
        }

        impl core::ops::Sub<$t> for $t {
            type Output = $t;
            #[inline]
            fn sub(self, rhs: $t) -> $t {
                &self - &rhs
            }
        }

        impl core::ops::Mul<$t> for $t {
            type Output = $t;
            #[inline]
            fn mul(self, rhs: $t) -> $t {
                &self * &rhs
            }
        }

        impl core::ops::AddAssign<$t> for $t {
            #[inline]
            fn add_assign(&mut self, rhs: $t) {
                *self = &*self + &rhs;
            }
        }

        impl core::ops::SubAssign<$t> for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: $t) {
                *self = &*self - &rhs;
            }
        }

        impl core::ops::MulAssign<$t> for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: $t) {
                *self = &*self * &rhs;
            }
        }

        impl Eq for $t {}
        impl PartialEq for $t {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                bool::from(subtle::ConstantTimeEq::ct_eq(self, other))
            }
        }
    };
}

pub mod fp2;
pub mod fp4;
pub mod fp12;

pub use fp12::{Fp12, Fp12Kind};
pub use fp2::Fp2;
pub use fp4::Fp4;

/// BN254 base field
pub type Fp = FieldElement<Bn254Modulus>;

/// `(1+i)^((p-1)/6)`, the constant of the p-power Frobenius on the tower
pub fn frobenius_constant() -> Fp2 {
    Fp2::new(
        Fp::from_big(&Big::from_limbs(CURVE_FRA)),
        Fp::from_big(&Big::from_limbs(CURVE_FRB)),
    )
}
