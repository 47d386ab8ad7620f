//! G₁: the curve `y^2 = x^3 + 2` over `Fp`, which has prime order `r`

use core::fmt;

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::field::Fp;
use super::glv::{self, Group};
use super::scalar::{order, Scalar};
use crate::bignum::{Big, MODBYTES};
use crate::error::{validate, Error, Result};
use crate::field::{Bn254Modulus, FieldModulus};
use mpin_params::curves::bn254::{CURVE_B, CURVE_CRU, CURVE_GX, CURVE_GY};

/// Size of the uncompressed encoding `0x04 || x || y`
pub const G1_UNCOMPRESSED_SIZE: usize = 2 * MODBYTES + 1;

/// Size of the compressed encoding `(0x02 | parity(y)) || x`
pub const G1_COMPRESSED_SIZE: usize = MODBYTES + 1;

fn curve_b() -> Fp {
    Fp::from_int(CURVE_B)
}

#[inline(always)]
fn mul_by_3b(a: Fp) -> Fp {
    a.imul(3 * CURVE_B)
}

/// `x^3 + b`
fn rhs(x: &Fp) -> Fp {
    x.square() * *x + curve_b()
}

/// G₁ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Affine {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    infinity: Choice,
}

impl Default for G1Affine {
    fn default() -> G1Affine {
        G1Affine::identity()
    }
}

impl zeroize::DefaultIsZeroes for G1Affine {}

impl fmt::Display for G1Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G1Projective> for G1Affine {
    fn from(p: &'a G1Projective) -> G1Affine {
        let zinv = p.z.invert().unwrap_or(Fp::zero());
        let x = p.x * zinv;
        let y = p.y * zinv;

        let tmp = G1Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };

        G1Affine::conditional_select(&tmp, &G1Affine::identity(), zinv.is_zero())
    }
}

impl From<G1Projective> for G1Affine {
    fn from(p: G1Projective) -> G1Affine {
        G1Affine::from(&p)
    }
}

impl ConstantTimeEq for G1Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl ConditionallySelectable for G1Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Affine {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl G1Affine {
    /// Point at infinity.
    pub fn identity() -> G1Affine {
        G1Affine {
            x: Fp::zero(),
            y: Fp::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator `(-1, 1)`.
    pub fn generator() -> G1Affine {
        G1Affine {
            x: Fp::from_big(&Big::from_limbs(CURVE_GX)),
            y: Fp::from_big(&Big::from_limbs(CURVE_GY)),
            infinity: Choice::from(0u8),
        }
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Affine x coordinate, zero for the identity
    pub fn x(&self) -> Fp {
        Fp::conditional_select(&self.x, &Fp::zero(), self.infinity)
    }

    /// Affine y coordinate, zero for the identity
    pub fn y(&self) -> Fp {
        Fp::conditional_select(&self.y, &Fp::zero(), self.infinity)
    }

    /// Parity of `y`, the bit carried by the compressed encoding
    pub fn sign(&self) -> Choice {
        self.y.parity() & !self.infinity
    }

    /// `-self`
    pub fn neg(&self) -> G1Affine {
        G1Affine {
            x: self.x,
            y: Fp::conditional_select(&-self.y, &Fp::one(), self.infinity),
            infinity: self.infinity,
        }
    }

    /// Curve membership check.
    pub fn is_on_curve(&self) -> Choice {
        self.y.square().ct_eq(&rhs(&self.x)) | self.infinity
    }

    /// Subgroup check, `r * P = O`.
    ///
    /// The curve has prime order so this only fails for points that are not
    /// on it at all; it is kept so decoding treats both groups alike.
    pub fn is_torsion_free(&self) -> Choice {
        G1Projective::from(self).mul_vartime(&order()).is_identity()
    }

    /// The point with abscissa `x` whose ordinate has the given parity
    pub fn from_x(x: &Fp, parity: Choice) -> CtOption<G1Affine> {
        rhs(x).sqrt().map(|y| {
            let flip = y.parity() ^ parity;
            G1Affine {
                x: *x,
                y: Fp::conditional_select(&y, &-y, flip),
                infinity: Choice::from(0u8),
            }
        })
    }

    /// Map an integer to the curve: the first `x >= u mod p` that is the
    /// abscissa of a point, with the ordinate of the given parity.
    ///
    /// Runs in time that depends on `u`; only public or random inputs
    /// are mapped.
    pub fn map_to_point(u: &Big, parity: Choice) -> G1Affine {
        let mut x = *u;
        x.norm();
        x.rmod(&Bn254Modulus::modulus());
        loop {
            let candidate = G1Affine::from_x(&Fp::from_big(&x), parity);
            if bool::from(candidate.is_some()) {
                return candidate.unwrap_or(G1Affine::identity());
            }
            x.inc(1);
            x.norm();
        }
    }

    /// Map a 32-byte digest to the curve with an even ordinate
    pub fn from_hash(h: &[u8; MODBYTES]) -> G1Affine {
        G1Affine::map_to_point(&Big::from_bytes(h), Choice::from(0u8))
    }

    /// Inverse walk of [`G1Affine::map_to_point`]: the largest abscissa
    /// below `x(self)` that lies on the curve, and the distance to it.
    ///
    /// Every integer in `(u, x(self)]` maps to `self` up to sign.
    pub fn preimage_gap(&self) -> (Big, u32) {
        let parity = self.sign();
        let mut u = self.x.redc();
        let mut gap = 0u32;
        loop {
            u.dec(1);
            u.norm();
            gap += 1;
            if bool::from(G1Affine::from_x(&Fp::from_big(&u), parity).is_some()) {
                return (u, gap);
            }
        }
    }

    /// Serialize to 65 bytes `0x04 || x || y`; the identity is all zeros.
    pub fn to_uncompressed(&self) -> [u8; G1_UNCOMPRESSED_SIZE] {
        let mut res = [0u8; G1_UNCOMPRESSED_SIZE];
        res[0] = u8::conditional_select(&0x04, &0x00, self.infinity);
        res[1..MODBYTES + 1].copy_from_slice(&self.x().to_bytes());
        res[MODBYTES + 1..].copy_from_slice(&self.y().to_bytes());
        res
    }

    /// Compress to 33 bytes `(0x02 | parity(y)) || x`; the identity is all zeros.
    pub fn to_compressed(&self) -> [u8; G1_COMPRESSED_SIZE] {
        let mut res = [0u8; G1_COMPRESSED_SIZE];
        res[0] = u8::conditional_select(&(0x02 | self.sign().unwrap_u8()), &0x00, self.infinity);
        res[1..].copy_from_slice(&self.x().to_bytes());
        res
    }

    /// Deserialize from uncompressed bytes, with curve and subgroup checks.
    pub fn from_uncompressed(bytes: &[u8; G1_UNCOMPRESSED_SIZE]) -> CtOption<Self> {
        Self::from_uncompressed_unchecked(bytes)
            .and_then(|p| CtOption::new(p, p.is_on_curve() & p.is_torsion_free()))
    }

    /// Deserialize with the curve check only.
    pub fn from_uncompressed_unchecked(bytes: &[u8; G1_UNCOMPRESSED_SIZE]) -> CtOption<Self> {
        let mut xb = [0u8; MODBYTES];
        let mut yb = [0u8; MODBYTES];
        xb.copy_from_slice(&bytes[1..MODBYTES + 1]);
        yb.copy_from_slice(&bytes[MODBYTES + 1..]);
        let tag = bytes[0];

        Fp::from_bytes(&xb).and_then(|x| {
            Fp::from_bytes(&yb).and_then(|y| {
                let is_identity = tag.ct_eq(&0x00) & x.is_zero() & y.is_zero();
                let p = G1Affine::conditional_select(
                    &G1Affine {
                        x,
                        y,
                        infinity: Choice::from(0u8),
                    },
                    &G1Affine::identity(),
                    is_identity,
                );
                CtOption::new(p, is_identity | (tag.ct_eq(&0x04) & p.is_on_curve()))
            })
        })
    }

    /// Deserialize from compressed bytes, with curve and subgroup checks.
    pub fn from_compressed(bytes: &[u8; G1_COMPRESSED_SIZE]) -> CtOption<Self> {
        Self::from_compressed_unchecked(bytes)
            .and_then(|p| CtOption::new(p, p.is_torsion_free()))
    }

    /// Deserialize compressed bytes without the subgroup check.
    pub fn from_compressed_unchecked(bytes: &[u8; G1_COMPRESSED_SIZE]) -> CtOption<Self> {
        let mut xb = [0u8; MODBYTES];
        xb.copy_from_slice(&bytes[1..]);
        let tag = bytes[0];

        Fp::from_bytes(&xb).and_then(|x| {
            CtOption::new(G1Affine::identity(), tag.ct_eq(&0x00) & x.is_zero()).or_else(|| {
                let parity = Choice::from(tag & 1);
                G1Affine::from_x(&x, parity)
                    .and_then(|p| CtOption::new(p, (tag & 0xfe).ct_eq(&0x02)))
            })
        })
    }

    /// Deserialize either encoding with a typed error, selecting the
    /// form by length. `full` adds the subgroup check.
    pub fn from_bytes(bytes: &[u8], full: bool) -> Result<Self> {
        let p = match bytes.len() {
            G1_UNCOMPRESSED_SIZE => {
                let mut buf = [0u8; G1_UNCOMPRESSED_SIZE];
                buf.copy_from_slice(bytes);
                G1Affine::from_uncompressed_unchecked(&buf)
            }
            G1_COMPRESSED_SIZE => {
                let mut buf = [0u8; G1_COMPRESSED_SIZE];
                buf.copy_from_slice(bytes);
                G1Affine::from_compressed_unchecked(&buf)
            }
            n => {
                return Err(Error::Length {
                    context: "G1Affine::from_bytes",
                    expected: G1_UNCOMPRESSED_SIZE,
                    actual: n,
                })
            }
        };
        let p = Option::<G1Affine>::from(p).ok_or(Error::Point {
            context: "G1 encoding",
        })?;
        if full {
            validate::in_subgroup(bool::from(p.is_torsion_free()), "G1 point")?;
        }
        Ok(p)
    }

    /// Public key validation: not the identity, on the curve, and when
    /// `full` is set, in the order-r subgroup.
    pub fn validate(&self, full: bool) -> Result<()> {
        validate::point(bool::from(!self.infinity & self.is_on_curve()), "G1 point")?;
        if full {
            validate::in_subgroup(bool::from(self.is_torsion_free()), "G1 point")?;
        }
        Ok(())
    }
}

/// G₁ projective point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Projective {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) z: Fp,
}

impl Default for G1Projective {
    fn default() -> G1Projective {
        G1Projective::identity()
    }
}

impl zeroize::DefaultIsZeroes for G1Projective {}

impl fmt::Display for G1Projective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G1Affine> for G1Projective {
    fn from(p: &'a G1Affine) -> G1Projective {
        G1Projective {
            x: p.x,
            y: p.y,
            z: Fp::conditional_select(&Fp::one(), &Fp::zero(), p.infinity),
        }
    }
}

impl From<G1Affine> for G1Projective {
    fn from(p: G1Affine) -> G1Projective {
        G1Projective::from(&p)
    }
}

impl ConstantTimeEq for G1Projective {
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

impl ConditionallySelectable for G1Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Projective {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            z: Fp::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl_group_ops!(G1Projective, G1Affine);

impl Group for G1Projective {
    fn identity() -> Self {
        G1Projective::identity()
    }

    fn double(&self) -> Self {
        G1Projective::double(self)
    }

    fn add(&self, rhs: &Self) -> Self {
        G1Projective::add(self, rhs)
    }

    fn neg(&self) -> Self {
        G1Projective::neg(self)
    }
}

impl G1Projective {
    /// Point at infinity.
    pub fn identity() -> G1Projective {
        G1Projective {
            x: Fp::zero(),
            y: Fp::one(),
            z: Fp::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G1Projective {
        G1Projective::from(G1Affine::generator())
    }

    /// Uniformly random point: a random multiple of the generator.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        G1Projective::generator().multiply(&Scalar::random(rng))
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Curve membership check.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() * self.z)
            .ct_eq(&(self.x.square() * self.x + self.z.square() * self.z * curve_b()))
            | self.z.is_zero()
    }

    /// `-self`
    pub fn neg(&self) -> G1Projective {
        G1Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Point doubling.
    pub fn double(&self) -> G1Projective {
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

        let tmp = G1Projective { x: x3, y: y3, z: z3 };
        G1Projective::conditional_select(&tmp, &G1Projective::identity(), self.is_identity())
    }

    /// Point addition.
    pub fn add(&self, rhs: &G1Projective) -> G1Projective {
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

        G1Projective { x: x3, y: y3, z: z3 }
    }

    /// Mixed addition with affine point.
    pub fn add_mixed(&self, rhs: &G1Affine) -> G1Projective {
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

        let tmp = G1Projective { x: x3, y: y3, z: z3 };
        G1Projective::conditional_select(&tmp, self, rhs.is_identity())
    }

    /// The GLV endomorphism `(x, y) -> (cru * x, y)` with `cru` a cube root
    /// of unity in `Fp`
    pub fn endomorphism(&self) -> G1Projective {
        G1Projective {
            x: self.x * Fp::from_big(&Big::from_limbs(CURVE_CRU)),
            y: self.y,
            z: self.z,
        }
    }

    /// `e * self` in constant time, by GLV decomposition.
    pub fn multiply(&self, e: &Scalar) -> G1Projective {
        glv::endomorphism_mul([*self, self.endomorphism()], e, glv::glv)
    }

    /// `e * self + f * q` with one shared doubling chain.
    pub fn mul2(&self, e: &Scalar, q: &G1Projective, f: &Scalar) -> G1Projective {
        glv::joint_mul(&[*self, *q], &[*e.as_big(), *f.as_big()])
    }

    /// `e * self` for an arbitrary public integer, double and add.
    pub fn mul_vartime(&self, e: &Big) -> G1Projective {
        let mut e = *e;
        e.norm();
        let mut acc = G1Projective::identity();
        for i in (0..e.nbits()).rev() {
            acc = acc.double();
            if e.bit(i) == 1 {
                acc = acc.add(self);
            }
        }
        acc
    }

    /// `e * self` for a small secret `e` of at most `bits` bits, by a
    /// Montgomery ladder with a fixed operation sequence.
    pub fn pinmul(&self, e: u32, bits: usize) -> G1Projective {
        let mut r0 = G1Projective::identity();
        let mut r1 = *self;
        for i in (0..bits).rev() {
            let b = Choice::from(((e >> i) & 1) as u8);
            G1Projective::conditional_swap(&mut r0, &mut r1, b);
            r1 = r0.add(&r1);
            r0 = r0.double();
            G1Projective::conditional_swap(&mut r0, &mut r1, b);
        }
        r0
    }

    /// Affine form.
    pub fn to_affine(&self) -> G1Affine {
        G1Affine::from(self)
    }
}
