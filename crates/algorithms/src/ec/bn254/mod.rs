//! BN254 pairing-friendly curve
//!
//! `E: y^2 = x^3 + 2` over `Fp` with a prime number `r` of points, and the
//! sextic twist `E': y^2 = x^3 + (1 - i)` over `Fp2`. The pairing is the
//! optimal ate pairing into the order-`r` subgroup of `Fp12^*`.
//!
//! Scalar multiplication in all three groups splits the scalar along an
//! endomorphism (GLV in G1, Galbraith-Scott in G2 and GT) and walks the short
//! components with a jointly indexed table read in constant time.

/// Group operator impls forwarding to the inherent methods of a projective
/// type and its affine companion
macro_rules! impl_group_ops {
    ($proj:ident, $affine:ident) => {
        impl<'a> core::ops::Neg for &'a $proj {
            type Output = $proj;
            #[inline]
            fn neg(self) -> $proj {
                $proj::neg(self)
            }
        }

        impl core::ops::Neg for $proj {
            type Output = $proj;
            #[inline]
            fn neg(self) -> $proj {
                $proj::neg(&self)
            }
        }

        impl<'a> core::ops::Neg for &'a $affine {
            type Output = $affine;
            #[inline]
            fn neg(self) -> $affine {
                $affine::neg(self)
            }
        }

        impl core::ops::Neg for $affine {
            type Output = $affine;
            #[inline]
            fn neg(self) -> $affine {
                $affine::neg(&self)
            }
        }

        impl<'a, 'b> core::ops::Add<&'b $proj> for &'a $proj {
            type Output = $proj;
            #[inline]
            fn add(self, rhs: &'b $proj) -> $proj {
                $proj::add(self, rhs)
            }
        }

        impl<'a, 'b> core::ops::Sub<&'b $proj> for &'a $proj {
            type Output = $proj;
            #[inline]
            fn sub(self, rhs: &'b $proj) -> $proj {
                $proj::add(self, &$proj::neg(rhs))
            }
        }

        impl<'a, 'b> core::ops::Add<&'b $affine> for &'a $proj {
            type Output = $proj;
            #[inline]
            fn add(self, rhs: &'b $affine) -> $proj {
                self.add_mixed(rhs)
            }
        }

        impl<'a, 'b> core::ops::Sub<&'b $affine> for &'a $proj {
            type Output = $proj;
            #[inline]
            fn sub(self, rhs: &'b $affine) -> $proj {
                self.add_mixed(&$affine::neg(rhs))
            }
        }

        impl<'a, 'b> core::ops::Add<&'b $proj> for &'a $affine {
            type Output = $proj;
            #[inline]
            fn add(self, rhs: &'b $proj) -> $proj {
                rhs.add_mixed(self)
            }
        }

        impl core::ops::Add<$proj> for $affine {
            type Output = $proj;
            #[inline]
            fn add(self, rhs: $proj) -> $proj {
                rhs.add_mixed(&self)
            }
        }

        impl core::ops::Add<$proj> for $proj {
            type Output = $proj;
            #[inline]
            fn add(self, rhs: $proj) -> $proj {
                &self + &rhs
            }
        }

        impl core::ops::Sub<$proj> for $proj {
            type Output = $proj;
            #[inline]
            fn sub(self, rhs: $proj) -> $proj {
                &self - &rhs
            }
        }

        impl core::ops::Add<$affine> for $proj {
            type Output = $proj;
            #[inline]
            fn add(self, rhs: $affine) -> $proj {
                &self + &rhs
            }
        }

        impl<'b> core::ops::Add<&'b $affine> for $proj {
            type Output = $proj;
            #[inline]
            fn add(self, rhs: &'b $affine) -> $proj {
                &self + rhs
            }
        }

        impl<'b> core::ops::Sub<&'b $affine> for $proj {
            type Output = $proj;
            #[inline]
            fn sub(self, rhs: &'b $affine) -> $proj {
                &self - rhs
            }
        }

        impl core::ops::Sub<$affine> for $proj {
            type Output = $proj;
            #[inline]
            fn sub(self, rhs: $affine) -> $proj {
                &self - &rhs
            }
        }

        impl core::ops::AddAssign<$proj> for $proj {
            #[inline]
            fn add_assign(&mut self, rhs: $proj) {
                *self = &*self + &rhs;
            }
        }

        impl core::ops::SubAssign<$proj> for $proj {
            #[inline]
            fn sub_assign(&mut self, rhs: $proj) {
                *self = &*self - &rhs;
            }
        }

        impl core::ops::AddAssign<$affine> for $proj {
            #[inline]
            fn add_assign(&mut self, rhs: $affine) {
                *self = &*self + &rhs;
            }
        }

        impl core::ops::SubAssign<$affine> for $proj {
            #[inline]
            fn sub_assign(&mut self, rhs: $affine) {
                *self = &*self - &rhs;
            }
        }

        impl<'a, 'b> core::ops::Mul<&'b Scalar> for &'a $proj {
            type Output = $proj;
            #[inline]
            fn mul(self, rhs: &'b Scalar) -> $proj {
                self.multiply(rhs)
            }
        }

        impl<'a, 'b> core::ops::Mul<&'b Scalar> for &'a $affine {
            type Output = $proj;
            #[inline]
            fn mul(self, rhs: &'b Scalar) -> $proj {
                $proj::from(self).multiply(rhs)
            }
        }

        impl core::ops::Mul<Scalar> for $proj {
            type Output = $proj;
            #[inline]
            fn mul(self, rhs: Scalar) -> $proj {
                &self * &rhs
            }
        }

        impl core::ops::Mul<Scalar> for $affine {
            type Output = $proj;
            #[inline]
            fn mul(self, rhs: Scalar) -> $proj {
                &self * &rhs
            }
        }

        impl core::ops::MulAssign<Scalar> for $proj {
            #[inline]
            fn mul_assign(&mut self, rhs: Scalar) {
                *self = &*self * &rhs;
            }
        }

        impl<T> core::iter::Sum<T> for $proj
        where
            T: core::borrow::Borrow<$proj>,
        {
            fn sum<I>(iter: I) -> Self
            where
                I: Iterator<Item = T>,
            {
                iter.fold($proj::identity(), |acc, item| &acc + item.borrow())
            }
        }

        impl Eq for $proj {}
        impl PartialEq for $proj {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                bool::from(subtle::ConstantTimeEq::ct_eq(self, other))
            }
        }

        impl Eq for $affine {}
        impl PartialEq for $affine {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                bool::from(subtle::ConstantTimeEq::ct_eq(self, other))
            }
        }
    };
}

pub mod field;
mod g1;
mod g2;
mod glv;
mod pairings;
mod scalar;

#[cfg(test)]
mod tests;

pub use field::{Fp, Fp12, Fp12Kind, Fp2, Fp4};
pub use g1::{G1Affine, G1Projective, G1_COMPRESSED_SIZE, G1_UNCOMPRESSED_SIZE};
pub use g2::{G2Affine, G2Projective, G2_COMPRESSED_SIZE, G2_UNCOMPRESSED_SIZE};
pub use pairings::{ate, ate2, fexp, pairing, pairing2, Gt, GT_SIZE};
pub use scalar::{order, Scalar};

use crate::bignum::Big;
use mpin_params::curves::bn254::CURVE_BNX;

/// `|x|` for the BN parameter `x = -(2^62 + 2^55 + 1)`
pub(crate) fn bn_x() -> Big {
    Big::from_limbs(CURVE_BNX)
}
