//! Prime fields `GF(p)` over the fixed-width integers
//!
//! A [`FieldElement`] is a [`Big`] read modulo the prime of its
//! [`FieldModulus`]. Elements are kept in a lazily reduced form: additions
//! and negations let the value grow past `p` and only reduce once the
//! headroom above `MODBITS` (the "excess") would be exhausted by the next
//! product. For the Montgomery reductions the stored value is `x*2^280 mod p`.

use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use mpin_internal::constant_time::ct_lookup;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::bignum::{Big, Chunk, DBig, BASEBITS, MODBYTES, NEXCESS, NLEN};

mod moduli;


pub use moduli::{Bn254Modulus, Gm252, Mf254, Pm255};
pub use mpin_params::curves::ModType;

/// Description of a prime modulus and its reduction strategy.
///
/// Implementors must use a prime of 224 to 279 bits that is `3 mod 4` or
/// `5 mod 8`.
pub trait FieldModulus: Copy + Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Short name used in debug output
    const NAME: &'static str;
    /// The prime, as limbs
    const MODULUS: [Chunk; NLEN];
    /// Bit length of the prime
    const MODBITS: usize;
    /// The prime modulo 8
    const MOD8: usize;
    /// Shape of the prime
    const MODTYPE: ModType;
    /// `c` for pseudo-Mersenne and Montgomery-friendly primes, `-1/p mod 2^BASEBITS` otherwise
    const MCONST: Chunk;
    /// `k` of a generalised-Mersenne prime `2^MODBITS - 2^k - 1`
    const GMBITS: usize = 0;

    /// Bits of the prime held in the top limb
    const TBITS: usize = Self::MODBITS % BASEBITS;
    /// Mask for [`Self::TBITS`]
    const TMASK: Chunk = (1 << Self::TBITS) - 1;
    /// Mask for the top-limb bits above the prime
    const OMASK: Chunk = -1 << Self::TBITS;
    /// Largest excess a reduced product tolerates
    const FEXCESS: Chunk = 1 << (BASEBITS * NLEN - Self::MODBITS - 1);

    /// The prime as a [`Big`]
    fn modulus() -> Big {
        Big::from_limbs(Self::MODULUS)
    }

    /// True when elements are held in Montgomery form
    fn is_montgomery() -> bool {
        matches!(
            Self::MODTYPE,
            ModType::NotSpecial | ModType::MontgomeryFriendly
        )
    }
}

/// Element of `GF(p)` for the prime described by `M`
#[derive(Clone, Copy)]
pub struct FieldElement<M: FieldModulus> {
    x: Big,
    _modulus: PhantomData<M>,
}

impl<M: FieldModulus> zeroize::DefaultIsZeroes for FieldElement<M> {}

// ============================================================================
// Reduction
// ============================================================================

impl<M: FieldModulus> FieldElement<M> {
    /// Bits of the top limb above `MODBITS`
    #[inline]
    fn excess(a: &Big) -> Chunk {
        (a.w[NLEN - 1] & M::OMASK) >> M::TBITS
    }

    /// True if `a * b` could overflow the double-width product's headroom
    #[inline]
    fn pexceed(a: &Big, b: &Big) -> bool {
        let ea = Self::excess(a) as i128;
        let eb = Self::excess(b) as i128;
        (ea + 1) * (eb + 1) > M::FEXCESS as i128
    }

    /// True if `a * a` could overflow the double-width product's headroom
    #[inline]
    fn sexceed(a: &Big) -> bool {
        let ea = Self::excess(a) as i128;
        (ea + 1) * (ea + 1) > M::FEXCESS as i128
    }

    /// Reduce a double-width product using the strategy for `M::MODTYPE`
    pub fn modulo(d: &mut DBig) -> Big {
        match M::MODTYPE {
            ModType::PseudoMersenne => {
                let mut t = d.split(M::MODBITS);
                let b = Big::from_dbig(d);
                let v = t.pmul(M::MCONST);
                t.add(&b);
                t.norm();
                let tw = t.w[NLEN - 1];
                t.w[NLEN - 1] &= M::TMASK;
                t.w[0] += M::MCONST * ((tw >> M::TBITS) + (v << (BASEBITS - M::TBITS)));
                t.norm();
                t
            }
            ModType::MontgomeryFriendly => {
                for i in 0..NLEN {
                    let (top, bot) = crate::bignum::muladd(
                        d.w[i],
                        M::MCONST - 1,
                        d.w[i],
                        d.w[NLEN + i - 1],
                    );
                    d.w[NLEN + i] += top;
                    d.w[NLEN + i - 1] = bot;
                }
                let mut b = Big::new();
                b.w.copy_from_slice(&d.w[NLEN..]);
                b.norm();
                b
            }
            ModType::GeneralisedMersenne => {
                // 2^MODBITS = 2^k + 1, folded until the high part is tiny
                let mut t = *d;
                for _ in 0..3 {
                    t.norm();
                    let mut lo = t;
                    let hi = lo.split(M::MODBITS);
                    let mut acc = DBig::from_big(&Big::from_dbig(&lo));
                    let high = DBig::from_big(&hi);
                    let mut shifted = high;
                    shifted.shl(M::GMBITS);
                    acc.add(&high);
                    acc.add(&shifted);
                    t = acc;
                }
                t.norm();
                Big::from_dbig(&t)
            }
            ModType::NotSpecial => Big::monty(&M::modulus(), M::MCONST, d),
        }
    }

    /// Convert a reduced integer into the internal representation
    fn nres(x: &Big) -> Big {
        if M::is_montgomery() {
            let mut d = DBig::from_big(x);
            d.shl(NLEN * BASEBITS);
            d.dmod(&M::modulus())
        } else {
            let mut r = *x;
            r.rmod(&M::modulus());
            r
        }
    }

    /// The integer this element represents, fully reduced
    pub fn redc(&self) -> Big {
        let mut v = *self;
        v.reduce();
        if M::is_montgomery() {
            let mut d = DBig::from_big(&v.x);
            let mut r = Self::modulo(&mut d);
            r.rmod(&M::modulus());
            r
        } else {
            v.x
        }
    }

    #[inline]
    fn norm(&mut self) {
        self.x.norm();
    }

    /// Bring the internal value into `[0, p)`
    pub fn reduce(&mut self) {
        self.x.rmod(&M::modulus());
    }

    #[inline]
    fn from_raw(x: Big) -> Self {
        FieldElement {
            x,
            _modulus: PhantomData,
        }
    }
}

// ============================================================================
// Core Field Operations
// ============================================================================

impl<M: FieldModulus> FieldElement<M> {
    /// Additive identity
    pub fn zero() -> Self {
        Self::from_raw(Big::new())
    }

    /// Multiplicative identity
    pub fn one() -> Self {
        Self::from_int(1)
    }

    /// From a small signed integer
    pub fn from_int(a: Chunk) -> Self {
        let mut x = Big::from_int(a.abs());
        x.norm();
        let r = Self::from_raw(Self::nres(&x));
        if a < 0 {
            -r
        } else {
            r
        }
    }

    /// From an integer of any size below `2^(NLEN*BASEBITS)`, reduced mod p
    pub fn from_big(a: &Big) -> Self {
        let mut x = *a;
        x.rmod(&M::modulus());
        Self::from_raw(Self::nres(&x))
    }

    /// True for zero
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::zero())
    }

    /// True for one
    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Self::one())
    }

    /// `self + rhs`
    pub fn add(&self, rhs: &Self) -> Self {
        let mut r = *self;
        r.x.add(&rhs.x);
        r.x.norm();
        if Self::excess(&r.x) + 2 >= M::FEXCESS {
            r.reduce();
        }
        r
    }

    /// `2 * self`
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// `-self`, by subtraction from a shifted multiple of p
    pub fn neg(&self) -> Self {
        let mut r = *self;
        r.norm();
        let e = Self::excess(&r.x) + 1;
        let sb = (64 - e.leading_zeros()) as usize + 1;
        let mut p = M::modulus();
        p.fshl(sb);
        r.x.rsub(&p);
        r.norm();
        if Self::excess(&r.x) >= M::FEXCESS {
            r.reduce();
        }
        r
    }

    /// `self - rhs`
    pub fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.neg())
    }

    /// `self * rhs`
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut a = *self;
        let mut b = *rhs;
        a.norm();
        b.norm();
        if Self::pexceed(&a.x, &b.x) {
            a.reduce();
            if Self::pexceed(&a.x, &b.x) {
                b.reduce();
            }
        }
        let mut d = Big::mul(&a.x, &b.x);
        Self::from_raw(Self::modulo(&mut d))
    }

    /// `self^2`
    pub fn square(&self) -> Self {
        let mut a = *self;
        a.norm();
        if Self::sexceed(&a.x) {
            a.reduce();
        }
        let mut d = Big::sqr(&a.x);
        Self::from_raw(Self::modulo(&mut d))
    }

    /// `self * c` for a small signed `c`
    pub fn imul(&self, c: Chunk) -> Self {
        let cc = c.abs();
        let mut r = *self;
        r.norm();
        if !M::is_montgomery() {
            let mut d = r.x.pxmul(cc);
            r.x = Self::modulo(&mut d);
        } else if cc <= NEXCESS && (Self::excess(&r.x) + 1) * cc < M::FEXCESS {
            r.x.imul(cc);
            r.norm();
        } else {
            r = Self::mul(&r, &Self::from_int(cc));
        }
        if c < 0 {
            r = r.neg();
        }
        r
    }

    /// `self / 2`
    pub fn div2(&self) -> Self {
        let mut r = *self;
        r.reduce();
        let mut odd = r.x;
        odd.add(&M::modulus());
        odd.norm();
        r.x.cmove(&odd, Choice::from(r.x.parity() as u8));
        r.x.fshr(1);
        r
    }

    /// `self^e` with a fixed 4-bit window
    pub fn pow(&self, e: &Big) -> Self {
        let mut t = *e;
        t.norm();
        let nb = 1 + (t.nbits() + 3) / 4;
        let mut w = vec![0usize; nb];
        for wi in w.iter_mut() {
            *wi = t.lastbits(4) as usize;
            t.fshr(4);
        }

        let mut tb = [Self::one(); 16];
        tb[1] = *self;
        for i in 2..16 {
            tb[i] = Self::mul(&tb[i - 1], self);
        }

        let mut r = ct_lookup(&tb, w[nb - 1]);
        for i in (0..nb - 1).rev() {
            r = r.square().square().square().square();
            r = Self::mul(&r, &ct_lookup(&tb, w[i]));
        }
        r.reduce();
        r
    }

    /// Multiplicative inverse, none for zero
    pub fn invert(&self) -> CtOption<Self> {
        let mut r = self.redc();
        r.invmodp(&M::modulus());
        let inv = Self::from_raw(Self::nres(&r));
        CtOption::new(inv, !self.is_zero())
    }

    /// Square root, none for a non-residue
    pub fn sqrt(&self) -> CtOption<Self> {
        let mut a = *self;
        a.reduce();
        let root = if M::MOD8 == 5 {
            // Atkin: v = (2a)^((p-5)/8), i = 2a*v^2, root = a*v*(i-1)
            let mut e = M::modulus();
            e.dec(5);
            e.norm();
            e.shr(3);
            let two_a = a.double();
            let v = two_a.pow(&e);
            let i = Self::mul(&Self::mul(&two_a, &v), &v);
            Self::mul(&Self::mul(&a, &v), &Self::sub(&i, &Self::one()))
        } else {
            let mut e = M::modulus();
            e.inc(1);
            e.norm();
            e.shr(2);
            a.pow(&e)
        };
        CtOption::new(root, root.square().ct_eq(&a))
    }

    /// Quadratic character: 1, -1, or 0 for zero
    pub fn jacobi(&self) -> i32 {
        self.redc().jacobi(&M::modulus())
    }

    /// Low bit of the reduced integer
    pub fn parity(&self) -> Choice {
        Choice::from(self.redc().parity() as u8)
    }

    /// Low `n` bits of the reduced integer
    pub fn lastbits(&self, n: usize) -> Chunk {
        self.redc().lastbits(n)
    }

    /// Uniform random element
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let r = Big::randomnum(&M::modulus(), rng);
        Self::from_raw(Self::nres(&r))
    }
}

// ============================================================================
// Serialization
// ============================================================================

impl<M: FieldModulus> FieldElement<M> {
    /// Big-endian encoding of the reduced integer
    pub fn to_bytes(&self) -> [u8; MODBYTES] {
        self.redc().to_bytes()
    }

    /// Decode big-endian bytes, rejecting values not below p
    pub fn from_bytes(bytes: &[u8; MODBYTES]) -> CtOption<Self> {
        let x = Big::from_bytes(bytes);
        let below = Choice::from((x < M::modulus()) as u8);
        CtOption::new(Self::from_raw(Self::nres(&x)), below)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<M: FieldModulus> fmt::Debug for FieldElement<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{})", M::NAME, self.redc())
    }
}

impl<M: FieldModulus> fmt::Display for FieldElement<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redc())
    }
}

impl<M: FieldModulus> Default for FieldElement<M> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<M: FieldModulus> ConstantTimeEq for FieldElement<M> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut a = *self;
        let mut b = *other;
        a.reduce();
        b.reduce();
        a.x.ct_eq(&b.x)
    }
}

impl<M: FieldModulus> Eq for FieldElement<M> {}
impl<M: FieldModulus> PartialEq for FieldElement<M> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<M: FieldModulus> ConditionallySelectable for FieldElement<M> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::from_raw(Big::conditional_select(&a.x, &b.x, choice))
    }
}

impl<'a, M: FieldModulus> Neg for &'a FieldElement<M> {
    type Output = FieldElement<M>;
    #[inline]
    fn neg(self) -> FieldElement<M> {
        FieldElement::neg(self)
    }
}

impl<M: FieldModulus> Neg for FieldElement<M> {
    type Output = FieldElement<M>;
    #[inline]
    fn neg(self) -> FieldElement<M> {
        -&self
    }
}

impl<'a, 'b, M: FieldModulus> Add<&'b FieldElement<M>> for &'a FieldElement<M> {
    type Output = FieldElement<M>;
    #[inline]
    fn add(self, rhs: &'b FieldElement<M>) -> FieldElement<M> {
        FieldElement::add(self, rhs)
    }
}

impl<'a, 'b, M: FieldModulus> Sub<&'b FieldElement<M>> for &'a FieldElement<M> {
    type Output = FieldElement<M>;
    #[inline]
    fn sub(self, rhs: &'b FieldElement<M>) -> FieldElement<M> {
        FieldElement::sub(self, rhs)
    }
}

impl<'a, 'b, M: FieldModulus> Mul<&'b FieldElement<M>> for &'a FieldElement<M> {
    type Output = FieldElement<M>;
    #[inline]
    fn mul(self, rhs: &'b FieldElement<M>) -> FieldElement<M> {
        FieldElement::mul(self, rhs)
    }
}

impl<M: FieldModulus> Add for FieldElement<M> {
    type Output = FieldElement<M>;
    #[inline]
    fn add(self, rhs: FieldElement<M>) -> FieldElement<M> {
        &self + &rhs
    }
}

impl<M: FieldModulus> Sub for FieldElement<M> {
    type Output = FieldElement<M>;
    #[inline]
    fn sub(self, rhs: FieldElement<M>) -> FieldElement<M> {
        &self - &rhs
    }
}

impl<M: FieldModulus> Mul for FieldElement<M> {
    type Output = FieldElement<M>;
    #[inline]
    fn mul(self, rhs: FieldElement<M>) -> FieldElement<M> {
        &self * &rhs
    }
}

impl<M: FieldModulus> AddAssign for FieldElement<M> {
    #[inline]
    fn add_assign(&mut self, rhs: FieldElement<M>) {
        *self = &*self + &rhs;
    }
}

impl<M: FieldModulus> SubAssign for FieldElement<M> {
    #[inline]
    fn sub_assign(&mut self, rhs: FieldElement<M>) {
        *self = &*self - &rhs;
    }
}

impl<M: FieldModulus> MulAssign for FieldElement<M> {
    #[inline]
    fn mul_assign(&mut self, rhs: FieldElement<M>) {
        *self = &*self * &rhs;
    }
}
