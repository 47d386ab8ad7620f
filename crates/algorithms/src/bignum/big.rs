//! Single-width integer

use core::cmp::Ordering;
use core::fmt;

use mpin_internal::constant_time::{limb_mask, non_negative};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::{muladd, Chunk, DBig, BASEBITS, BIGBITS, BMASK, MODBYTES, NLEN};
use crate::error::{validate, Error, Result};

/// Fixed-width integer of `NLEN` limbs in radix `2^BASEBITS`
#[derive(Clone, Copy, Default)]
pub struct Big {
    pub(crate) w: [Chunk; NLEN],
}

impl zeroize::DefaultIsZeroes for Big {}

impl fmt::Display for Big {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes().iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Big {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Big(0x{})", self)
    }
}

impl PartialEq for Big {
    fn eq(&self, other: &Big) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Big {}

impl PartialOrd for Big {
    fn partial_cmp(&self, other: &Big) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Big {
    fn cmp(&self, other: &Big) -> Ordering {
        let mut a = *self;
        let mut b = *other;
        a.norm();
        b.norm();
        Big::comp(&a, &b)
    }
}

impl ConstantTimeEq for Big {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut a = *self;
        let mut b = *other;
        a.norm();
        b.norm();
        a.w[..].ct_eq(&b.w[..])
    }
}

impl ConditionallySelectable for Big {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut r = *a;
        r.cmove(b, choice);
        r
    }
}

#[allow(clippy::should_implement_trait)]
impl Big {
    /// Zero
    pub const fn new() -> Big {
        Big { w: [0; NLEN] }
    }

    /// From limbs, least significant first
    pub const fn from_limbs(w: [Chunk; NLEN]) -> Big {
        Big { w }
    }

    /// From a single small value
    pub fn from_int(x: Chunk) -> Big {
        let mut s = Big::new();
        s.w[0] = x;
        s
    }

    /// Low half of a double-width value
    pub fn from_dbig(d: &DBig) -> Big {
        let mut s = Big::new();
        s.w.copy_from_slice(&d.w[..NLEN]);
        s
    }

    /// Raw limbs
    pub fn limbs(&self) -> &[Chunk; NLEN] {
        &self.w
    }

    /// True if every limb is zero. Expects a normalised value.
    pub fn is_zero(&self) -> bool {
        self.w.iter().all(|&x| x == 0)
    }

    /// True if the value is one. Expects a normalised value.
    pub fn is_one(&self) -> bool {
        self.w[0] == 1 && self.w[1..].iter().all(|&x| x == 0)
    }

    /// Set to zero
    pub fn zero(&mut self) {
        self.w = [0; NLEN];
    }

    /// Set to one
    pub fn one(&mut self) {
        self.zero();
        self.w[0] = 1;
    }

    /// Propagate carries so that every limb but the top lies in `[0, 2^BASEBITS)`.
    ///
    /// Returns the bits of the top limb above the serialised width.
    pub fn norm(&mut self) -> Chunk {
        let mut carry: Chunk = 0;
        for i in 0..NLEN - 1 {
            let d = self.w[i] + carry;
            self.w[i] = d & BMASK;
            carry = d >> BASEBITS;
        }
        self.w[NLEN - 1] += carry;
        self.w[NLEN - 1] >> ((8 * MODBYTES) % BASEBITS)
    }

    /// Swap with `b` when `d` is set, without branching
    pub fn cswap(&mut self, b: &mut Big, d: Choice) {
        let c = limb_mask(d);
        for i in 0..NLEN {
            let t = c & (self.w[i] ^ b.w[i]);
            self.w[i] ^= t;
            b.w[i] ^= t;
        }
    }

    /// Copy `g` into `self` when `d` is set, without branching
    pub fn cmove(&mut self, g: &Big, d: Choice) {
        let b = limb_mask(d);
        for i in 0..NLEN {
            self.w[i] ^= (self.w[i] ^ g.w[i]) & b;
        }
    }

    /// Shift right by less than a limb, returning the bits shifted out
    pub fn fshr(&mut self, k: usize) -> Chunk {
        let r = self.w[0] & ((1 << k) - 1);
        for i in 0..NLEN - 1 {
            self.w[i] = (self.w[i] >> k) | ((self.w[i + 1] << (BASEBITS - k)) & BMASK);
        }
        self.w[NLEN - 1] >>= k;
        r
    }

    /// General shift right
    pub fn shr(&mut self, k: usize) {
        let n = k % BASEBITS;
        let m = k / BASEBITS;
        for i in 0..NLEN - m - 1 {
            self.w[i] = (self.w[m + i] >> n) | ((self.w[m + i + 1] << (BASEBITS - n)) & BMASK);
        }
        self.w[NLEN - m - 1] = self.w[NLEN - 1] >> n;
        for i in NLEN - m..NLEN {
            self.w[i] = 0;
        }
    }

    /// Shift left by less than a limb, returning the new top excess
    pub fn fshl(&mut self, k: usize) -> Chunk {
        self.w[NLEN - 1] = (self.w[NLEN - 1] << k) | (self.w[NLEN - 2] >> (BASEBITS - k));
        for i in (1..NLEN - 1).rev() {
            self.w[i] = ((self.w[i] << k) & BMASK) | (self.w[i - 1] >> (BASEBITS - k));
        }
        self.w[0] = (self.w[0] << k) & BMASK;
        self.w[NLEN - 1] >> ((8 * MODBYTES) % BASEBITS)
    }

    /// General shift left
    pub fn shl(&mut self, k: usize) {
        let n = k % BASEBITS;
        let m = k / BASEBITS;
        self.w[NLEN - 1] = self.w[NLEN - 1 - m] << n;
        if NLEN >= m + 2 {
            self.w[NLEN - 1] |= self.w[NLEN - m - 2] >> (BASEBITS - n);
        }
        for i in (m + 1..NLEN - 1).rev() {
            self.w[i] = ((self.w[i - m] << n) & BMASK) | (self.w[i - m - 1] >> (BASEBITS - n));
        }
        self.w[m] = (self.w[0] << n) & BMASK;
        for i in 0..m {
            self.w[i] = 0;
        }
    }

    /// Number of significant bits
    pub fn nbits(&self) -> usize {
        let mut t = *self;
        t.norm();
        let mut k = NLEN;
        while k > 0 && t.w[k - 1] == 0 {
            k -= 1;
        }
        if k == 0 {
            return 0;
        }
        BASEBITS * (k - 1) + (64 - t.w[k - 1].leading_zeros() as usize)
    }

    /// `self += r`, limb-wise
    pub fn add(&mut self, r: &Big) {
        for i in 0..NLEN {
            self.w[i] += r.w[i];
        }
    }

    /// `self += self`, limb-wise
    pub fn dbl(&mut self) {
        for i in 0..NLEN {
            self.w[i] += self.w[i];
        }
    }

    /// `self + x`, limb-wise
    pub fn plus(&self, x: &Big) -> Big {
        let mut s = *self;
        s.add(x);
        s
    }

    /// Normalise then add a small value
    pub fn inc(&mut self, x: Chunk) {
        self.norm();
        self.w[0] += x;
    }

    /// `self - x`, limb-wise
    pub fn minus(&self, x: &Big) -> Big {
        let mut d = *self;
        d.sub(x);
        d
    }

    /// `self -= x`, limb-wise
    pub fn sub(&mut self, x: &Big) {
        for i in 0..NLEN {
            self.w[i] -= x.w[i];
        }
    }

    /// `self = x - self`, limb-wise
    pub fn rsub(&mut self, x: &Big) {
        for i in 0..NLEN {
            self.w[i] = x.w[i] - self.w[i];
        }
    }

    /// Normalise then subtract a small value
    pub fn dec(&mut self, x: Chunk) {
        self.norm();
        self.w[0] -= x;
    }

    /// `self *= c` for `c < NEXCESS`, without carry propagation
    pub fn imul(&mut self, c: Chunk) {
        for i in 0..NLEN {
            self.w[i] *= c;
        }
    }

    /// `self *= c` with full carry propagation, returning the overflow limb
    pub fn pmul(&mut self, c: Chunk) -> Chunk {
        let mut carry: Chunk = 0;
        self.norm();
        for i in 0..NLEN {
            let (top, bot) = muladd(self.w[i], c, carry, 0);
            carry = top;
            self.w[i] = bot;
        }
        carry
    }

    /// `self * c` as a double-width value
    pub fn pxmul(&self, c: Chunk) -> DBig {
        let mut m = DBig::new();
        let mut carry: Chunk = 0;
        for j in 0..NLEN {
            let (top, bot) = muladd(self.w[j], c, carry, m.w[j]);
            carry = top;
            m.w[j] = bot;
        }
        m.w[NLEN] = carry;
        m
    }

    /// Divide by 3 in place, returning the remainder
    pub fn div3(&mut self) -> Chunk {
        let mut carry: Chunk = 0;
        self.norm();
        let base: i128 = 1 << BASEBITS;
        for i in (0..NLEN).rev() {
            let ak = (carry as i128) * base + self.w[i] as i128;
            self.w[i] = (ak / 3) as Chunk;
            carry = (ak % 3) as Chunk;
        }
        carry
    }

    /// `a * b` truncated to a single width
    pub fn smul(a: &Big, b: &Big) -> Big {
        let mut c = Big::new();
        for i in 0..NLEN {
            let mut carry: Chunk = 0;
            for j in 0..NLEN {
                if i + j < NLEN {
                    let (top, bot) = muladd(a.w[i], b.w[j], carry, c.w[i + j]);
                    carry = top;
                    c.w[i + j] = bot;
                }
            }
        }
        c
    }

    /// Compare two normalised values
    pub fn comp(a: &Big, b: &Big) -> Ordering {
        for i in (0..NLEN).rev() {
            match a.w[i].cmp(&b.w[i]) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// `self = self mod 2^m`
    pub fn mod2m(&mut self, m: usize) {
        let wd = m / BASEBITS;
        let bt = m % BASEBITS;
        if wd >= NLEN {
            return;
        }
        let msk = (1 << bt) - 1;
        self.w[wd] &= msk;
        for i in wd + 1..NLEN {
            self.w[i] = 0;
        }
    }

    /// Arazi and Qi inversion modulo 256 of an odd byte
    pub fn invmod256(a: Chunk) -> Chunk {
        let mut t1: Chunk = 0;
        let mut c = (a >> 1) & 1;
        t1 += c;
        t1 &= 1;
        t1 = 2 - t1;
        t1 <<= 1;
        let mut u = t1 + 1;

        // i=2
        let mut b = a & 3;
        t1 = u * b;
        t1 >>= 2;
        c = (a >> 2) & 3;
        let mut t2 = (u * c) & 3;
        t1 += t2;
        t1 *= u;
        t1 &= 3;
        t1 = 4 - t1;
        t1 <<= 2;
        u += t1;

        // i=4
        b = a & 15;
        t1 = u * b;
        t1 >>= 4;
        c = (a >> 4) & 15;
        t2 = (u * c) & 15;
        t1 += t2;
        t1 *= u;
        t1 &= 15;
        t1 = 16 - t1;
        t1 <<= 4;
        u += t1;

        u
    }

    /// Least significant bit of a normalised value
    pub fn parity(&self) -> Chunk {
        self.w[0] & 1
    }

    /// Bit `n` of a normalised value
    pub fn bit(&self, n: usize) -> Chunk {
        (self.w[n / BASEBITS] >> (n % BASEBITS)) & 1
    }

    /// Normalise and return the low `n` bits
    pub fn lastbits(&mut self, n: usize) -> Chunk {
        let msk: Chunk = (1 << n) - 1;
        self.norm();
        self.w[0] & msk
    }

    /// `self = 1/self mod 2^BIGBITS` by Newton iteration seeded with
    /// [`Big::invmod256`]. `self` must be odd.
    pub fn invmod2m(&mut self) {
        let mut u = Big::new();
        u.inc(Big::invmod256(self.lastbits(8)));

        let mut i = 8;
        while i < BIGBITS {
            u.norm();
            let mut b = *self;
            b.mod2m(i);
            let mut t1 = Big::smul(&u, &b);
            t1.shr(i);

            let mut c = *self;
            c.shr(i);
            c.mod2m(i);
            let mut t2 = Big::smul(&u, &c);
            t2.mod2m(i);
            t1.add(&t2);
            t1.norm();

            b = Big::smul(&t1, &u);
            t1 = b;
            t1.mod2m(i);

            t2.one();
            t2.shl(i);
            t1.rsub(&t2);
            t1.norm();
            t1.shl(i);
            u.add(&t1);
            i <<= 1;
        }
        u.norm();
        u.mod2m(BIGBITS);
        *self = u;
        self.norm();
    }

    /// `self = self mod n` by shift-and-subtract with branch-free selection
    pub fn rmod(&mut self, n: &Big) {
        let mut k = 0;
        let mut m = *n;
        m.norm();
        self.norm();
        if Big::comp(self, &m) == Ordering::Less {
            return;
        }
        loop {
            m.fshl(1);
            k += 1;
            if Big::comp(self, &m) == Ordering::Less {
                break;
            }
        }

        while k > 0 {
            m.fshr(1);
            let mut r = *self;
            r.sub(&m);
            r.norm();
            self.cmove(&r, non_negative(r.w[NLEN - 1]));
            k -= 1;
        }
    }

    /// `self = self / n`, truncated
    pub fn div(&mut self, n: &Big) {
        let mut k = 0;
        self.norm();
        let mut e = Big::from_int(1);
        let mut b = *self;
        let mut m = *n;
        m.norm();
        self.zero();

        while Big::comp(&b, &m) != Ordering::Less {
            e.fshl(1);
            m.fshl(1);
            k += 1;
        }

        while k > 0 {
            m.fshr(1);
            e.fshr(1);
            let mut r = b;
            r.sub(&m);
            r.norm();
            let d = non_negative(r.w[NLEN - 1]);
            b.cmove(&r, d);
            let mut r = *self;
            r.add(&e);
            r.norm();
            self.cmove(&r, d);
            k -= 1;
        }
    }

    /// Uniform value below `q`: twice the bit length of `q` random bits,
    /// drawn one byte at a time, reduced modulo `q`.
    pub fn randomnum<R: RngCore + ?Sized>(q: &Big, rng: &mut R) -> Big {
        let mut d = DBig::new();
        let mut j = 0;
        let mut r = [0u8; 1];
        for _ in 0..2 * q.nbits() {
            if j == 0 {
                rng.fill_bytes(&mut r);
            } else {
                r[0] >>= 1;
            }
            let b = (r[0] & 1) as Chunk;
            d.shl(1);
            d.w[0] += b;
            j += 1;
            j &= 7;
        }
        d.dmod(q)
    }

    /// Jacobi symbol `(self/p)`: 0, 1 or -1.
    ///
    /// Returns 0 for a zero residue and for a modulus that is even or not
    /// greater than one.
    pub fn jacobi(&self, p: &Big) -> i32 {
        let mut m: usize = 0;
        let one = Big::from_int(1);
        let mut x = *self;
        let mut n = *p;
        x.norm();
        n.norm();
        if n.parity() == 0 || x.is_zero() || Big::comp(&n, &one) != Ordering::Greater {
            return 0;
        }
        x.rmod(&n);

        while Big::comp(&n, &one) == Ordering::Greater {
            if x.is_zero() {
                return 0;
            }
            let n8 = n.lastbits(3) as usize;
            let mut k = 0;
            while x.parity() == 0 {
                k += 1;
                x.shr(1);
            }
            if k % 2 == 1 {
                m += (n8 * n8 - 1) / 8;
            }
            m += (n8 - 1) * ((x.lastbits(2) as usize) - 1) / 4;
            let mut t = n;
            t.rmod(&x);
            n = x;
            x = t;
            m %= 2;
        }
        if m == 0 {
            1
        } else {
            -1
        }
    }

    /// `self = 1/self mod p` by the binary extended Euclidean algorithm.
    ///
    /// Zero has no inverse and stays zero.
    pub fn invmodp(&mut self, p: &Big) {
        self.rmod(p);
        if self.is_zero() {
            return;
        }
        let mut u = *self;
        let mut v = *p;
        v.norm();
        let mut x1 = Big::from_int(1);
        let mut x2 = Big::new();
        let one = Big::from_int(1);

        while Big::comp(&u, &one) != Ordering::Equal && Big::comp(&v, &one) != Ordering::Equal {
            while u.parity() == 0 {
                u.fshr(1);
                if x1.parity() != 0 {
                    x1.add(p);
                    x1.norm();
                }
                x1.fshr(1);
            }
            while v.parity() == 0 {
                v.fshr(1);
                if x2.parity() != 0 {
                    x2.add(p);
                    x2.norm();
                }
                x2.fshr(1);
            }
            if Big::comp(&u, &v) != Ordering::Less {
                u.sub(&v);
                u.norm();
                if Big::comp(&x1, &x2) != Ordering::Less {
                    x1.sub(&x2);
                } else {
                    let mut t = *p;
                    t.sub(&x2);
                    x1.add(&t);
                }
                x1.norm();
            } else {
                v.sub(&u);
                v.norm();
                if Big::comp(&x2, &x1) != Ordering::Less {
                    x2.sub(&x1);
                } else {
                    let mut t = *p;
                    t.sub(&x1);
                    x2.add(&t);
                }
                x2.norm();
            }
        }
        if Big::comp(&u, &one) == Ordering::Equal {
            *self = x1;
        } else {
            *self = x2;
        }
    }

    /// Full double-width product
    pub fn mul(a: &Big, b: &Big) -> DBig {
        let mut c = DBig::new();
        for i in 0..NLEN {
            let mut carry: Chunk = 0;
            for j in 0..NLEN {
                let (top, bot) = muladd(a.w[i], b.w[j], carry, c.w[i + j]);
                carry = top;
                c.w[i + j] = bot;
            }
            c.w[NLEN + i] = carry;
        }
        c
    }

    /// Full double-width square
    pub fn sqr(a: &Big) -> DBig {
        let mut c = DBig::new();
        for i in 0..NLEN {
            let mut carry: Chunk = 0;
            for j in i + 1..NLEN {
                let (top, bot) = muladd(2 * a.w[i], a.w[j], carry, c.w[i + j]);
                carry = top;
                c.w[i + j] = bot;
            }
            c.w[NLEN + i] = carry;
        }
        for i in 0..NLEN {
            let (top, bot) = muladd(a.w[i], a.w[i], 0, c.w[2 * i]);
            c.w[2 * i] = bot;
            c.w[2 * i + 1] += top;
        }
        c.norm();
        c
    }

    /// Montgomery reduction of `d` by `md`, where `mconst = -1/md mod 2^BASEBITS`
    pub fn monty(md: &Big, mconst: Chunk, d: &mut DBig) -> Big {
        for i in 0..NLEN {
            let m = mconst.wrapping_mul(d.w[i]) & BMASK;
            let mut carry: Chunk = 0;
            for j in 0..NLEN {
                let (top, bot) = muladd(m, md.w[j], carry, d.w[i + j]);
                carry = top;
                d.w[i + j] = bot;
            }
            d.w[NLEN + i] += carry;
        }
        let mut b = Big::new();
        b.w.copy_from_slice(&d.w[NLEN..]);
        b.norm();
        b
    }

    /// `a * b mod m`
    pub fn modmul(a: &Big, b: &Big, m: &Big) -> Big {
        let mut a = *a;
        let mut b = *b;
        a.rmod(m);
        b.rmod(m);
        let mut d = Big::mul(&a, &b);
        d.dmod(m)
    }

    /// `a^2 mod m`
    pub fn modsqr(a: &Big, m: &Big) -> Big {
        let mut a = *a;
        a.rmod(m);
        let mut d = Big::sqr(&a);
        d.dmod(m)
    }

    /// `-a mod m`
    pub fn modneg(a: &Big, m: &Big) -> Big {
        let mut a = *a;
        a.rmod(m);
        let mut r = m.minus(&a);
        r.norm();
        r
    }

    /// `self^e mod m`, square and multiply
    pub fn powmod(&self, e: &Big, m: &Big) -> Big {
        let mut a = Big::from_int(1);
        let mut z = *e;
        let mut s = *self;
        z.norm();
        s.norm();
        loop {
            let bt = z.parity();
            z.fshr(1);
            if bt == 1 {
                a = Big::modmul(&a, &s, m);
            }
            if z.is_zero() {
                break;
            }
            s = Big::modsqr(&s, m);
        }
        a
    }

    /// Big-endian encoding of a normalised value
    pub fn to_bytes(&self) -> [u8; MODBYTES] {
        let mut c = *self;
        c.norm();
        let mut b = [0u8; MODBYTES];
        for i in (0..MODBYTES).rev() {
            b[i] = (c.w[0] & 0xff) as u8;
            c.fshr(8);
        }
        b
    }

    /// From a big-endian encoding
    pub fn from_bytes(b: &[u8; MODBYTES]) -> Big {
        let mut m = Big::new();
        for byte in b.iter() {
            m.fshl(8);
            m.w[0] += *byte as Chunk;
        }
        m
    }

    /// From a big-endian slice of at most `MODBYTES` bytes
    pub fn from_be_slice(b: &[u8]) -> Result<Big> {
        validate::max_length("Big::from_be_slice", b.len(), MODBYTES)?;
        let mut padded = [0u8; MODBYTES];
        padded[MODBYTES - b.len()..].copy_from_slice(b);
        Ok(Big::from_bytes(&padded))
    }

    /// From a hexadecimal string of at most `2*MODBYTES` digits
    pub fn from_hex(s: &str) -> Result<Big> {
        let digits = if s.len() % 2 == 1 {
            let mut padded = String::with_capacity(s.len() + 1);
            padded.push('0');
            padded.push_str(s);
            padded
        } else {
            s.to_string()
        };
        let bytes =
            hex::decode(digits).map_err(|_| Error::param("hex", "not a hexadecimal string"))?;
        Big::from_be_slice(&bytes)
    }
}
