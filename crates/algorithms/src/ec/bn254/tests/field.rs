//! Extension field tests for the BN254 tower

use super::super::field::frobenius_constant;
use super::super::{fexp, Fp, Fp12, Fp12Kind, Fp2, Fp4};
use super::rng;
use crate::bignum::Big;
use crate::field::{Bn254Modulus, FieldModulus};

use subtle::ConstantTimeEq;

fn random_fp4(rng: &mut impl rand_core::RngCore) -> Fp4 {
    Fp4::new(Fp2::random(rng), Fp2::random(rng))
}

fn random_fp12(rng: &mut impl rand_core::RngCore) -> Fp12 {
    Fp12::new(random_fp4(rng), random_fp4(rng), random_fp4(rng))
}

// ============================================================================
// Fp2
// ============================================================================

#[test]
fn test_fp2_i_squared_is_minus_one() {
    let i = Fp2::from_ints(0, 1);
    assert_eq!(i.square(), -Fp2::one());
}

#[test]
fn test_fp2_mul_square_inverse() {
    let mut rng = rng(1);
    for _ in 0..10 {
        let a = Fp2::random(&mut rng);
        let b = Fp2::random(&mut rng);
        assert_eq!(a.square(), a * a);
        assert_eq!(a * b, b * a);
        assert_eq!(a * a.invert().unwrap(), Fp2::one());
        assert_eq!(a.mul_by_nonresidue().div_by_nonresidue(), a);
        assert_eq!(a.mul_by_nonresidue(), a * Fp2::from_ints(1, 1));
    }
    assert!(bool::from(Fp2::zero().invert().is_none()));
}

#[test]
fn test_fp2_sqrt() {
    let mut rng = rng(2);
    for _ in 0..10 {
        let a = Fp2::random(&mut rng);
        let sq = a.square();
        let root = sq.sqrt().unwrap();
        assert!(bool::from(root.ct_eq(&a) | root.ct_eq(&-a)));
    }
    // Real and purely imaginary squares exercise the degenerate branches
    let r = Fp2::from_fp(Fp::from_int(9));
    assert_eq!(r.sqrt().unwrap().square(), r);
    let m = Fp2::from_fp(-Fp::from_int(9));
    assert_eq!(m.sqrt().unwrap().square(), m);
}

#[test]
fn test_fp2_sign_of_negation() {
    let mut rng = rng(3);
    for _ in 0..10 {
        let a = Fp2::random(&mut rng);
        assert_ne!(bool::from(a.sign()), bool::from((-a).sign()));
    }
}

// ============================================================================
// Fp4
// ============================================================================

#[test]
fn test_fp4_field_laws() {
    let mut rng = rng(4);
    for _ in 0..10 {
        let a = random_fp4(&mut rng);
        let b = random_fp4(&mut rng);
        let c = random_fp4(&mut rng);
        assert_eq!(a * (b + c), a * b + a * c);
        assert_eq!(a.square(), a * a);
        assert_eq!(a * a.invert().unwrap(), Fp4::one());
    }
}

// ============================================================================
// Fp12
// ============================================================================

#[test]
fn test_fp12_field_laws() {
    let mut rng = rng(5);
    for _ in 0..5 {
        let a = random_fp12(&mut rng);
        let b = random_fp12(&mut rng);
        let c = random_fp12(&mut rng);
        assert_eq!((a * b) * c, a * (b * c));
        assert_eq!(a * (b + c), a * b + a * c);
        assert_eq!(a.square(), a * a);
        assert_eq!(a * a.invert().unwrap(), Fp12::one());
    }
}

#[test]
fn test_fp12_sparse_product_matches_dense() {
    let mut rng = rng(6);
    let a = random_fp12(&mut rng);
    let line = Fp12::from_line(random_fp4(&mut rng), Fp2::random(&mut rng));
    assert_eq!(line.kind(), Fp12Kind::Sparse);
    let dense_line = line.dense();
    assert_eq!(a * line, a * dense_line);
    assert_eq!(line * a, a * dense_line);
    assert_eq!(Fp12::one() * a, a);
    assert_eq!((Fp12::zero() * a).kind(), Fp12Kind::Zero);
}

#[test]
fn test_fp12_frobenius_is_pth_power() {
    let mut rng = rng(7);
    let a = random_fp12(&mut rng);
    let p: Big = Bn254Modulus::modulus();
    assert_eq!(a.frobenius(&frobenius_constant()), a.pow_vartime(&p));
}

#[test]
fn test_cyclotomic_square_on_unitary_values() {
    let mut rng = rng(8);
    let g = fexp(&random_fp12(&mut rng));
    assert_eq!(g.cyclotomic_square(), g.square());
    assert_eq!(g * g.conjugate(), Fp12::one());
}

#[test]
fn test_pinpow_matches_pow() {
    let mut rng = rng(9);
    let g = fexp(&random_fp12(&mut rng));
    for e in [0u32, 1, 1234, 9999] {
        assert_eq!(g.pinpow(e, 14), g.pow_vartime(&Big::from_int(e as i64)));
    }
}

#[test]
fn test_fp12_bytes_roundtrip() {
    let mut rng = rng(10);
    let a = random_fp12(&mut rng);
    let back = Fp12::from_bytes(&a.to_bytes()).unwrap();
    assert_eq!(back, a);
    assert!(bool::from(Fp12::from_bytes(&[0xff; 384]).is_none()));
}
