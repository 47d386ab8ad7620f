//! G₂: the order-r subgroup of the sextic twist `y^2 = x^3 + (1 - i)` over `Fp2`

use core::fmt;

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::field::{frobenius_constant, Fp, Fp2};
use super::glv::{self, Group};
use super::scalar::{order, Scalar};
use crate::bignum::{Big, MODBYTES};
use crate::error::{validate, Error, Result};
use mpin_params::curves::bn254::{CURVE_PXA, CURVE_PXB, CURVE_PYA, CURVE_PYB};

/// Size of the encoding `x.c0 || x.c1 || y.c0 || y.c1`
pub const G2_UNCOMPRESSED_SIZE: usize = 4 * MODBYTES;

/// Size of the compressed encoding `(0x02 | sign(y)) || x.c0 || x.c1`
pub const G2_COMPRESSED_SIZE: usize = 2 * MODBYTES + 1;

/// `b' = b / (1 + i) = 1 - i`
fn twist_b() -> Fp2 {
    Fp2::from_ints(1, -1)
}

#[inline(always)]
fn mul_by_3b(a: Fp2) -> Fp2 {
    a * Fp2::from_ints(3, -3)
}

/// `x^3 + b'`
fn rhs(x: &Fp2) -> Fp2 {
    x.square() * *x + twist_b()
}

/// G₂ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Affine {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    infinity: Choice,
}

impl Default for G2Affine {
    fn default() -> G2Affine {
        G2Affine::identity()
    }
}

impl zeroize::DefaultIsZeroes for G2Affine {}

impl fmt::Display for G2Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G2Projective> for G2Affine {
    fn from(p: &'a G2Projective) -> G2Affine {
        let zinv = p.z.invert().unwrap_or(Fp2::zero());
        let x = p.x * zinv;
        let y = p.y * zinv;

        let tmp = G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };

        G2Affine::conditional_select(&tmp, &G2Affine::identity(), zinv.is_zero())
    }
}

impl From<G2Projective> for G2Affine {
    fn from(p: G2Projective) -> G2Affine {
        G2Affine::from(&p)
    }
}

impl ConstantTimeEq for G2Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl ConditionallySelectable for G2Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G2Affine {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl G2Affine {
    /// Point at infinity.
    pub fn identity() -> G2Affine {
        G2Affine {
            x: Fp2::zero(),
            y: Fp2::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G2Affine {
        let fp = |limbs| Fp::from_big(&Big::from_limbs(limbs));
        G2Affine {
            x: Fp2::new(fp(CURVE_PXA), fp(CURVE_PXB)),
            y: Fp2::new(fp(CURVE_PYA), fp(CURVE_PYB)),
            infinity: Choice::from(0u8),
        }
    }

    /// Finite point from coordinates, not checked against the curve
    pub(crate) fn from_xy_unchecked(x: Fp2, y: Fp2) -> G2Affine {
        G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        }
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Affine x coordinate, zero for the identity
    pub fn x(&self) -> Fp2 {
        Fp2::conditional_select(&self.x, &Fp2::zero(), self.infinity)
    }

    /// Affine y coordinate, zero for the identity
    pub fn y(&self) -> Fp2 {
        Fp2::conditional_select(&self.y, &Fp2::zero(), self.infinity)
    }

    /// `-self`
    pub fn neg(&self) -> G2Affine {
        G2Affine {
            x: self.x,
            y: Fp2::conditional_select(&-self.y, &Fp2::one(), self.infinity),
            infinity: self.infinity,
        }
    }

    /// Curve membership check.
    pub fn is_on_curve(&self) -> Choice {
        self.y.square().ct_eq(&rhs(&self.x)) | self.infinity
    }

    /// Subgroup check, `r * Q = O`. The twist has a large cofactor.
    pub fn is_torsion_free(&self) -> Choice {
        G2Projective::from(self).mul_vartime(&order()).is_identity()
    }

    /// The untwist-Frobenius-twist endomorphism `psi`, which acts on G₂ as
    /// multiplication by `p`
    pub fn psi(&self) -> G2Affine {
        let f = frobenius_constant();
        let f2 = f.square();
        let f3 = f2 * f;
        G2Affine {
            x: self.x.conjugate() * f2,
            y: self.y.conjugate() * f3,
            infinity: self.infinity,
        }
    }

    /// The point with abscissa `x` whose ordinate has the given sign
    pub fn from_x(x: &Fp2, sign: Choice) -> CtOption<G2Affine> {
        rhs(x).sqrt().map(|y| {
            let flip = y.sign() ^ sign;
            G2Affine {
                x: *x,
                y: Fp2::conditional_select(&y, &-y, flip),
                infinity: Choice::from(0u8),
            }
        })
    }

    /// Serialize to 128 bytes `x || y`; the identity is all zeros.
    pub fn to_uncompressed(&self) -> [u8; G2_UNCOMPRESSED_SIZE] {
        let mut res = [0u8; G2_UNCOMPRESSED_SIZE];
        res[..2 * MODBYTES].copy_from_slice(&self.x().to_bytes());
        res[2 * MODBYTES..].copy_from_slice(&self.y().to_bytes());
        res
    }

    /// Compress to 65 bytes `(0x02 | sign(y)) || x`; the identity is all zeros.
    pub fn to_compressed(&self) -> [u8; G2_COMPRESSED_SIZE] {
        let mut res = [0u8; G2_COMPRESSED_SIZE];
        let tag = 0x02 | (self.y.sign() & !self.infinity).unwrap_u8();
        res[0] = u8::conditional_select(&tag, &0x00, self.infinity);
        res[1..].copy_from_slice(&self.x().to_bytes());
        res
    }

    /// Deserialize with curve and subgroup checks.
    pub fn from_uncompressed(bytes: &[u8; G2_UNCOMPRESSED_SIZE]) -> CtOption<Self> {
        Self::from_uncompressed_unchecked(bytes)
            .and_then(|p| CtOption::new(p, p.is_torsion_free()))
    }

    /// Deserialize with the curve check only.
    pub fn from_uncompressed_unchecked(bytes: &[u8; G2_UNCOMPRESSED_SIZE]) -> CtOption<Self> {
        let mut xb = [0u8; 2 * MODBYTES];
        let mut yb = [0u8; 2 * MODBYTES];
        xb.copy_from_slice(&bytes[..2 * MODBYTES]);
        yb.copy_from_slice(&bytes[2 * MODBYTES..]);

        Fp2::from_bytes(&xb).and_then(|x| {
            Fp2::from_bytes(&yb).and_then(|y| {
                // (0, 0) is not on the twist, so it is free to encode the identity
                let is_identity = x.is_zero() & y.is_zero();
                let p = G2Affine::conditional_select(
                    &G2Affine {
                        x,
                        y,
                        infinity: Choice::from(0u8),
                    },
                    &G2Affine::identity(),
                    is_identity,
                );
                CtOption::new(p, p.is_on_curve())
            })
        })
    }

    /// Deserialize compressed bytes with the subgroup check.
    pub fn from_compressed(bytes: &[u8; G2_COMPRESSED_SIZE]) -> CtOption<Self> {
        Self::from_compressed_unchecked(bytes)
            .and_then(|p| CtOption::new(p, p.is_torsion_free()))
    }

    /// Deserialize compressed bytes without the subgroup check.
    pub fn from_compressed_unchecked(bytes: &[u8; G2_COMPRESSED_SIZE]) -> CtOption<Self> {
        let mut xb = [0u8; 2 * MODBYTES];
        xb.copy_from_slice(&bytes[1..]);
        let tag = bytes[0];

        Fp2::from_bytes(&xb).and_then(|x| {
            CtOption::new(G2Affine::identity(), tag.ct_eq(&0x00) & x.is_zero()).or_else(|| {
                G2Affine::from_x(&x, Choice::from(tag & 1))
                    .and_then(|p| CtOption::new(p, (tag & 0xfe).ct_eq(&0x02)))
            })
        })
    }

    /// Deserialize either encoding, selecting the form by length. `full`
    /// adds the subgroup check.
    pub fn from_bytes(bytes: &[u8], full: bool) -> Result<Self> {
        let p = match bytes.len() {
            G2_UNCOMPRESSED_SIZE => {
                let mut buf = [0u8; G2_UNCOMPRESSED_SIZE];
                buf.copy_from_slice(bytes);
                G2Affine::from_uncompressed_unchecked(&buf)
            }
            G2_COMPRESSED_SIZE => {
                let mut buf = [0u8; G2_COMPRESSED_SIZE];
                buf.copy_from_slice(bytes);
                G2Affine::from_compressed_unchecked(&buf)
            }
            n => {
                return Err(Error::Length {
                    context: "G2Affine::from_bytes",
                    expected: G2_UNCOMPRESSED_SIZE,
                    actual: n,
                })
            }
        };
        let p = Option::<G2Affine>::from(p).ok_or(Error::Point {
            context: "G2 encoding",
        })?;
        if full {
            validate::in_subgroup(bool::from(p.is_torsion_free()), "G2 point")?;
        }
        Ok(p)
    }

    /// Public key validation: not the identity, on the twist, and when
    /// `full` is set, in the order-r subgroup.
    pub fn validate(&self, full: bool) -> Result<()> {
        validate::point(bool::from(!self.infinity & self.is_on_curve()), "G2 point")?;
        if full {
            validate::in_subgroup(bool::from(self.is_torsion_free()), "G2 point")?;
        }
        Ok(())
    }
}

/// G₂ projective point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Projective {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) z: Fp2,
}

impl Default for G2Projective {
    fn default() -> G2Projective {
        G2Projective::identity()
    }
}

impl zeroize::DefaultIsZeroes for G2Projective {}

impl fmt::Display for G2Projective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G2Affine> for G2Projective {
    fn from(p: &'a G2Affine) -> G2Projective {
        G2Projective {
            x: p.x,
            y: p.y,
            z: Fp2::conditional_select(&Fp2::one(), &Fp2::zero(), p.infinity),
        }
    }
}

impl From<G2Affine> for G2Projective {
    fn from(p: G2Affine) -> G2Projective {
        G2Projective::from(&p)
    }
}

impl ConstantTimeEq for G2Projective {
    fn ct_eq(&self, other: &Self) -> Choice {
        let x1 = self.x * other.z;
        let x2 = other.x * self.z;

        let y1 = self.y * other.z;
        let y2 = other.y * self.z;

        let self_is_zero = self.z.is_zero();
        let other_is_zero = other.z.is_zero();

        (self_is_zero & other_is_zero)
            | ((!self_is_zero) & (!other_is_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
    }
}

impl ConditionallySelectable for G2Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G2Projective {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            z: Fp2::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl_group_ops!(G2Projective, G2Affine);

impl Group for G2Projective {
    fn identity() -> Self {
        G2Projective::identity()
    }

    fn double(&self) -> Self {
        G2Projective::double(self)
    }

    fn add(&self, rhs: &Self) -> Self {
        G2Projective::add(self, rhs)
    }

    fn neg(&self) -> Self {
        G2Projective::neg(self)
    }
}

impl G2Projective {
    /// Point at infinity.
    pub fn identity() -> G2Projective {
        G2Projective {
            x: Fp2::zero(),
            y: Fp2::one(),
            z: Fp2::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G2Projective {
        G2Projective::from(G2Affine::generator())
    }

    /// Uniformly random point of G₂: a random multiple of the generator.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        G2Projective::generator().multiply(&Scalar::random(rng))
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Curve membership check.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() * self.z)
            .ct_eq(&(self.x.square() * self.x + self.z.square() * self.z * twist_b()))
            | self.z.is_zero()
    }

    /// `-self`
    pub fn neg(&self) -> G2Projective {
        G2Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// `psi` on projective coordinates
    pub fn psi(&self) -> G2Projective {
        let f = frobenius_constant();
        let f2 = f.square();
        let f3 = f2 * f;
        G2Projective {
            x: self.x.conjugate() * f2,
            y: self.y.conjugate() * f3,
            z: self.z.conjugate(),
        }
    }

    /// Point doubling.
    pub fn double(&self) -> G2Projective {
        // Algorithm 9 from https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.y.square();
        let z3 = t0 + t0;
        let z3 = z3 + z3;
        let z3 = z3 + z3;
        let t1 = self.y * self.z;
        let t2 = self.z.square();
        let t2 = mul_by_3b(t2);
        let x3 = t2 * z3;
        let y3 = t0 + t2;
        let z3 = t1 * z3;
        let t1 = t2 + t2;
        let t2 = t1 + t2;
        let t0 = t0 - t2;
        let y3 = t0 * y3;
        let y3 = x3 + y3;
        let t1 = self.x * self.y;
        let x3 = t0 * t1;
        let x3 = x3 + x3;

        let tmp = G2Projective { x: x3, y: y3, z: z3 };
        G2Projective::conditional_select(&tmp, &G2Projective::identity(), self.is_identity())
    }

    /// Point addition.
    pub fn add(&self, rhs: &G2Projective) -> G2Projective {
        // Algorithm 7 from https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t2 = self.z * rhs.z;
        let t3 = self.x + self.y;
        let t4 = rhs.x + rhs.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = self.y + self.z;
        let x3 = rhs.y + rhs.z;
        let t4 = t4 * x3;
        let x3 = t1 + t2;
        let t4 = t4 - x3;
        let x3 = self.x + self.z;
        let y3 = rhs.x + rhs.z;
        let x3 = x3 * y3;
        let y3 = t0 + t2;
        let y3 = x3 - y3;
        let x3 = t0 + t0;
        let t0 = x3 + t0;
        let t2 = mul_by_3b(t2);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = mul_by_3b(y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        G2Projective { x: x3, y: y3, z: z3 }
    }

    /// Mixed addition with affine point.
    pub fn add_mixed(&self, rhs: &G2Affine) -> G2Projective {
        // Algorithm 8 from https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t3 = rhs.x + rhs.y;
        let t4 = self.x + self.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = rhs.y * self.z;
        let t4 = t4 + self.y;
        let y3 = rhs.x * self.z;
        let y3 = y3 + self.x;
        let x3 = t0 + t0;
        let t0 = x3 + t0;
        let t2 = mul_by_3b(self.z);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = mul_by_3b(y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        let tmp = G2Projective { x: x3, y: y3, z: z3 };
        G2Projective::conditional_select(&tmp, self, rhs.is_identity())
    }

    /// `e * self` in constant time, by Galbraith-Scott decomposition along
    /// `psi`. Only meaningful for points of G₂.
    pub fn multiply(&self, e: &Scalar) -> G2Projective {
        let q1 = self.psi();
        let q2 = q1.psi();
        let q3 = q2.psi();
        glv::endomorphism_mul([*self, q1, q2, q3], e, glv::gs)
    }

    /// `e * self` for an arbitrary public integer, double and add.
    pub fn mul_vartime(&self, e: &Big) -> G2Projective {
        let mut e = *e;
        e.norm();
        let mut acc = G2Projective::identity();
        for i in (0..e.nbits()).rev() {
            acc = acc.double();
            if e.bit(i) == 1 {
                acc = acc.add(self);
            }
        }
        acc
    }

    /// Affine form.
    pub fn to_affine(&self) -> G2Affine {
        G2Affine::from(self)
    }
}
