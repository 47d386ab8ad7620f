//! Double-width integer, the result of a full product before reduction

use core::cmp::Ordering;

use mpin_internal::constant_time::{limb_mask, non_negative};
use subtle::Choice;

use super::{Big, Chunk, BASEBITS, BMASK, DNLEN, NLEN};

/// Integer of `DNLEN` limbs
#[derive(Clone, Copy, Default, Debug)]
pub struct DBig {
    pub(crate) w: [Chunk; DNLEN],
}

impl zeroize::DefaultIsZeroes for DBig {}

impl DBig {
    /// Zero
    pub fn new() -> DBig {
        DBig { w: [0; DNLEN] }
    }

    /// Widen a single-width value
    pub fn from_big(x: &Big) -> DBig {
        let mut b = DBig::new();
        b.w[..NLEN].copy_from_slice(&x.w);
        b.w[NLEN - 1] = x.w[NLEN - 1] & BMASK;
        b.w[NLEN] = x.w[NLEN - 1] >> BASEBITS;
        b
    }

    /// From a big-endian byte string of at most `2*MODBYTES` bytes
    pub fn from_bytes(b: &[u8]) -> DBig {
        let mut m = DBig::new();
        for byte in b.iter() {
            m.shl(8);
            m.w[0] += *byte as Chunk;
        }
        m
    }

    /// Copy `g` into `self` when `d` is set, without branching
    pub fn cmove(&mut self, g: &DBig, d: Choice) {
        let b = limb_mask(d);
        for i in 0..DNLEN {
            self.w[i] ^= (self.w[i] ^ g.w[i]) & b;
        }
    }

    /// Propagate carries
    pub fn norm(&mut self) {
        let mut carry: Chunk = 0;
        for i in 0..DNLEN - 1 {
            let d = self.w[i] + carry;
            self.w[i] = d & BMASK;
            carry = d >> BASEBITS;
        }
        self.w[DNLEN - 1] += carry;
    }

    /// `self -= x`, limb-wise
    pub fn sub(&mut self, x: &DBig) {
        for i in 0..DNLEN {
            self.w[i] -= x.w[i];
        }
    }

    /// `self += x`, limb-wise
    pub fn add(&mut self, x: &DBig) {
        for i in 0..DNLEN {
            self.w[i] += x.w[i];
        }
    }

    /// Compare two normalised values
    pub fn comp(a: &DBig, b: &DBig) -> Ordering {
        for i in (0..DNLEN).rev() {
            match a.w[i].cmp(&b.w[i]) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// General shift left
    pub fn shl(&mut self, k: usize) {
        let n = k % BASEBITS;
        let m = k / BASEBITS;
        self.w[DNLEN - 1] =
            (self.w[DNLEN - 1 - m] << n) | (self.w[DNLEN - m - 2] >> (BASEBITS - n));
        for i in (m + 1..DNLEN - 1).rev() {
            self.w[i] = ((self.w[i - m] << n) & BMASK) | (self.w[i - m - 1] >> (BASEBITS - n));
        }
        self.w[m] = (self.w[0] << n) & BMASK;
        for i in 0..m {
            self.w[i] = 0;
        }
    }

    /// General shift right
    pub fn shr(&mut self, k: usize) {
        let n = k % BASEBITS;
        let m = k / BASEBITS;
        for i in 0..DNLEN - m - 1 {
            self.w[i] = (self.w[m + i] >> n) | ((self.w[m + i + 1] << (BASEBITS - n)) & BMASK);
        }
        self.w[DNLEN - m - 1] = self.w[DNLEN - 1] >> n;
        for i in DNLEN - m..DNLEN {
            self.w[i] = 0;
        }
    }

    /// Return bits `n` and above as a single-width value, keeping the
    /// low `n` bits in `self`
    pub fn split(&mut self, n: usize) -> Big {
        let mut t = Big::new();
        let m = n % BASEBITS;
        let mut carry = self.w[DNLEN - 1] << (BASEBITS - m);

        for i in (NLEN - 1..DNLEN - 1).rev() {
            let nw = (self.w[i] >> m) | carry;
            carry = (self.w[i] << (BASEBITS - m)) & BMASK;
            t.w[i + 1 - NLEN] = nw;
        }
        self.w[NLEN - 1] &= (1 << m) - 1;
        t
    }

    /// Number of significant bits
    pub fn nbits(&self) -> usize {
        let mut t = *self;
        t.norm();
        let mut k = DNLEN;
        while k > 0 && t.w[k - 1] == 0 {
            k -= 1;
        }
        if k == 0 {
            return 0;
        }
        BASEBITS * (k - 1) + (64 - t.w[k - 1].leading_zeros() as usize)
    }

    /// `self mod c`, by shift-and-subtract with branch-free selection
    pub fn dmod(&mut self, c: &Big) -> Big {
        let mut k = 0;
        self.norm();
        let mut m = DBig::from_big(c);

        if DBig::comp(self, &m) == Ordering::Less {
            return Big::from_dbig(self);
        }

        loop {
            m.shl(1);
            k += 1;
            if DBig::comp(self, &m) == Ordering::Less {
                break;
            }
        }

        while k > 0 {
            m.shr(1);
            let mut r = *self;
            r.sub(&m);
            r.norm();
            self.cmove(&r, non_negative(r.w[DNLEN - 1]));
            k -= 1;
        }
        Big::from_dbig(self)
    }

    /// `self / c`, truncated. `self` is left holding scratch values.
    pub fn div(&mut self, c: &Big) -> Big {
        let mut k = 0;
        let mut m = DBig::from_big(c);
        let mut a = Big::new();
        let mut e = Big::from_int(1);
        self.norm();

        while DBig::comp(self, &m) != Ordering::Less {
            e.fshl(1);
            m.shl(1);
            k += 1;
        }

        while k > 0 {
            m.shr(1);
            e.shr(1);

            let mut dr = *self;
            dr.sub(&m);
            dr.norm();
            let d = non_negative(dr.w[DNLEN - 1]);
            self.cmove(&dr, d);

            let mut r = a;
            r.add(&e);
            r.norm();
            a.cmove(&r, d);
            k -= 1;
        }
        a
    }
}
