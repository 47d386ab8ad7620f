//! Group operation tests for BN254 G1 and G2

use super::super::{order, Fp, G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use super::rng;
use crate::bignum::Big;
use crate::field::{Bn254Modulus, FieldModulus};

use subtle::Choice;

// ============================================================================
// G1 Group Tests
// ============================================================================

#[test]
fn test_g1_generator() {
    let g = G1Affine::generator();
    assert_eq!(g.x(), -Fp::one());
    assert_eq!(g.y(), Fp::one());
    assert!(bool::from(g.is_on_curve()));
    assert!(bool::from(g.is_torsion_free()));
}

#[test]
fn test_g1_identity_operations() {
    let identity = G1Projective::identity();
    let point = G1Projective::generator() * Scalar::from(42u64);

    assert_eq!(identity + point, point);
    assert_eq!(point + identity, point);
    assert_eq!(identity * Scalar::from(42u64), identity);
    assert_eq!(identity.double(), identity);
    assert_eq!(-identity, identity);
    assert_eq!(point - point, identity);
}

#[test]
fn test_g1_group_laws() {
    let g = G1Projective::generator();
    let p = g * Scalar::from(2u64);
    let q = g * Scalar::from(3u64);
    let r = g * Scalar::from(5u64);

    assert_eq!((p + q) + r, p + (q + r));
    assert_eq!(p + q, q + p);
    assert_eq!(p + p, p.double());
    assert_eq!(p + q, g * Scalar::from(5u64));
    assert_eq!(p + G1Affine::from(q), r);
}

#[test]
fn test_g1_multiply_matches_double_and_add() {
    let mut rng = rng(20);
    let g = G1Projective::generator();
    for _ in 0..5 {
        let e = Scalar::random(&mut rng);
        assert_eq!(g.multiply(&e), g.mul_vartime(e.as_big()));
    }
    assert_eq!(g * Scalar::zero(), G1Projective::identity());
    assert_eq!(g * -Scalar::one(), -g);
}

#[test]
fn test_g1_order() {
    assert_eq!(G1Projective::generator().mul_vartime(&order()), G1Projective::identity());
}

#[test]
fn test_g1_endomorphism_has_order_three() {
    let mut rng = rng(21);
    let p = G1Projective::random(&mut rng);
    let phi = p.endomorphism();
    assert_eq!(phi.endomorphism().endomorphism(), p);
    assert_ne!(phi, p);
    assert!(bool::from(G1Affine::from(phi).is_on_curve()));
}

#[test]
fn test_g1_mul2() {
    let mut rng = rng(22);
    let p = G1Projective::random(&mut rng);
    let q = G1Projective::random(&mut rng);
    let e = Scalar::random(&mut rng);
    let f = Scalar::random(&mut rng);
    assert_eq!(p.mul2(&e, &q, &f), p * e + q * f);
}

#[test]
fn test_g1_pinmul() {
    let g = G1Projective::generator();
    for pin in [0u32, 1, 1234, 9999] {
        assert_eq!(g.pinmul(pin, 14), g * Scalar::from(pin as u64));
    }
}

#[test]
fn test_g1_sum_over_iterator() {
    let g = G1Projective::generator();
    let points = [g, g, g];
    let total: G1Projective = points.iter().sum();
    assert_eq!(total, g * Scalar::from(3u64));
}

#[test]
fn test_g1_map_to_point() {
    let mut rng = rng(23);
    let modulus = Bn254Modulus::modulus();
    for _ in 0..10 {
        let u = Big::randomnum(&modulus, &mut rng);
        for parity in [0u8, 1] {
            let p = G1Affine::map_to_point(&u, Choice::from(parity));
            assert!(bool::from(p.is_on_curve()));
            assert_eq!(p.sign().unwrap_u8(), parity);

            // everything just above the previous abscissa maps to p
            let (below, gap) = p.preimage_gap();
            assert!(gap >= 1);
            assert_eq!(Big::comp(&below, &u), core::cmp::Ordering::Less);
            let mut next = below;
            next.inc(1);
            next.norm();
            assert_eq!(G1Affine::map_to_point(&next, Choice::from(parity)), p);
        }
    }
}

// ============================================================================
// G2 Group Tests
// ============================================================================

#[test]
fn test_g2_generator() {
    let g = G2Affine::generator();
    assert!(bool::from(g.is_on_curve()));
    assert!(bool::from(g.is_torsion_free()));
    assert!(!bool::from(g.is_identity()));
}

#[test]
fn test_g2_group_laws() {
    let g = G2Projective::generator();
    let p = g * Scalar::from(2u64);
    let q = g * Scalar::from(3u64);
    let r = g * Scalar::from(5u64);

    assert_eq!((p + q) + r, p + (q + r));
    assert_eq!(p + q, q + p);
    assert_eq!(p.double(), p + p);
    assert_eq!(p + q, r);
    assert_eq!(p - p, G2Projective::identity());
    assert_eq!(p + G2Affine::from(q), r);
}

#[test]
fn test_g2_multiply_matches_double_and_add() {
    let mut rng = rng(24);
    let g = G2Projective::generator();
    for _ in 0..3 {
        let e = Scalar::random(&mut rng);
        assert_eq!(g.multiply(&e), g.mul_vartime(e.as_big()));
    }
}

#[test]
fn test_g2_psi_is_multiplication_by_p() {
    let g = G2Projective::generator();
    let mut p = Bn254Modulus::modulus();
    p.rmod(&order());
    assert_eq!(g.psi(), g.mul_vartime(&p));
    assert_eq!(G2Affine::generator().psi(), G2Affine::from(g.psi()));
}

#[test]
fn test_g2_order() {
    assert_eq!(G2Projective::generator().mul_vartime(&order()), G2Projective::identity());
}

#[test]
fn test_g2_validate_rejects_identity() {
    assert!(G2Affine::identity().validate(false).is_err());
    assert!(G2Affine::generator().validate(true).is_ok());
}

#[test]
fn test_mixed_addition_both_orders() {
    let p = G1Projective::generator() * Scalar::from(11u64);
    let a = G1Affine::from(G1Projective::generator() * Scalar::from(4u64));
    let want = G1Projective::generator() * Scalar::from(15u64);
    assert_eq!(a + p, want);
    assert_eq!(p + a, want);
    assert_eq!(&a + &p, want);

    let q = G2Projective::generator() * Scalar::from(11u64);
    let b = G2Affine::from(G2Projective::generator() * Scalar::from(4u64));
    let want = G2Projective::generator() * Scalar::from(15u64);
    assert_eq!(b + q, want);
    assert_eq!(q + b, want);
}
