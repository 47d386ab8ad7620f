//! Endomorphism-split scalar multiplication shared by G1, G2 and GT

use mpin_internal::constant_time::ct_lookup;
use mpin_params::curves::bn254::{CURVE_BB, CURVE_SB, CURVE_W, CURVE_WB};
use subtle::{Choice, ConditionallySelectable};

use super::scalar::{order, Scalar};
use crate::bignum::{Big, Chunk, NLEN};

/// The operations the joint multiplication needs, written additively.
///
/// For GT "double" is the cyclotomic square and "add" the product.
pub(crate) trait Group: Copy + Default + ConditionallySelectable {
    fn identity() -> Self;
    fn double(&self) -> Self;
    fn add(&self, rhs: &Self) -> Self;
    fn neg(&self) -> Self;
}

/// Round the lattice basis against `e` and return the short components,
/// each in `[0, r)`. `v[i] = floor(w[i] * e / r)` then
/// `u[i] = e*[i == 0] - sum_j v[j] * b[j][i] mod r`.
fn decompose<const N: usize>(
    e: &Big,
    w: &[[Chunk; NLEN]; N],
    b: &[[[Chunk; NLEN]; N]; N],
) -> [Big; N] {
    let r = order();
    let mut v = [Big::new(); N];
    for (vi, wi) in v.iter_mut().zip(w.iter()) {
        let mut d = Big::mul(&Big::from_limbs(*wi), e);
        *vi = d.div(&r);
    }

    let mut u = [Big::new(); N];
    u[0] = *e;
    u[0].norm();
    for (i, ui) in u.iter_mut().enumerate() {
        for (j, vj) in v.iter().enumerate() {
            let t = Big::modmul(vj, &Big::from_limbs(b[j][i]), &r);
            let mut s = r.minus(&t);
            s.norm();
            ui.add(&s);
            ui.norm();
            ui.rmod(&r);
        }
    }
    u
}

/// GLV split of `e` into two components of about half its length
pub(crate) fn glv(e: &Big) -> [Big; 2] {
    decompose(e, &CURVE_W, &CURVE_SB)
}

/// Galbraith-Scott split of `e` into four components of about a quarter of
/// its length
pub(crate) fn gs(e: &Big) -> [Big; 4] {
    decompose(e, &CURVE_WB, &CURVE_BB)
}

/// Replace `u` by `r - u` when that is shorter, negating `base` to match
fn shorten<G: Group>(u: &mut Big, base: &mut G) {
    let mut t = order().minus(u);
    t.norm();
    let flip = Choice::from((t.nbits() < u.nbits()) as u8);
    u.cmove(&t, flip);
    let negated = base.neg();
    base.conditional_assign(&negated, flip);
}

/// `sum_i u[i] * bases[i]` with one doubling and one table addition per bit.
///
/// The table of all `2^n` subset sums is read at every step without a
/// secret-dependent access pattern. The number of steps is the length of the
/// longest component.
pub(crate) fn joint_mul<G: Group>(bases: &[G], u: &[Big]) -> G {
    let n = bases.len();
    let mut table = vec![G::identity(); 1 << n];
    for mask in 1..(1usize << n) {
        let low = mask.trailing_zeros() as usize;
        table[mask] = table[mask & (mask - 1)].add(&bases[low]);
    }

    let nb = u.iter().map(Big::nbits).max().unwrap_or(0);
    let mut acc = G::identity();
    for i in (0..nb).rev() {
        acc = acc.double();
        let mut index = 0usize;
        for (j, x) in u.iter().enumerate() {
            index |= (x.bit(i) as usize) << j;
        }
        acc = acc.add(&ct_lookup(&table, index));
    }
    acc
}

/// `e * bases[0]` where `bases[i]` is the image of `bases[0]` under the
/// i-th power of the endomorphism matching `split`
pub(crate) fn endomorphism_mul<G: Group, const N: usize>(
    mut bases: [G; N],
    e: &Scalar,
    split: fn(&Big) -> [Big; N],
) -> G {
    let mut u = split(e.as_big());
    for (ui, base) in u.iter_mut().zip(bases.iter_mut()) {
        shorten(ui, base);
    }
    joint_mul(&bases, &u)
}
