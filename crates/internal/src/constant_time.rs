//! Constant-time operations to prevent timing attacks

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise.
/// Slices of different length compare unequal without inspecting contents.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// Constant-time selection
///
/// Returns `a` if `condition` is false, `b` if `condition` is true.
pub fn ct_select<T>(a: T, b: T, condition: Choice) -> T
where
    T: ConditionallySelectable,
{
    T::conditional_select(&a, &b, condition)
}

/// Constant-time conditional assignment of byte slices
///
/// Sets `dst` to `src` if `condition` is set, otherwise leaves `dst` unchanged.
pub fn ct_assign(dst: &mut [u8], src: &[u8], condition: Choice) {
    assert_eq!(dst.len(), src.len());

    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(s, condition);
    }
}

/// All-ones limb mask when `choice` is set, zero otherwise.
#[inline(always)]
pub fn limb_mask(choice: Choice) -> i64 {
    -(choice.unwrap_u8() as i64)
}

/// `Choice` set when the signed limb is non-negative.
///
/// Used by the shift-and-subtract reductions, which keep a trial difference
/// only when its top limb did not borrow.
#[inline(always)]
pub fn non_negative(limb: i64) -> Choice {
    Choice::from((1 - ((limb >> 63) & 1)) as u8)
}

/// `Choice` set when the two small integers are equal.
#[inline(always)]
pub fn ct_eq_usize(a: usize, b: usize) -> Choice {
    (a as u64).ct_eq(&(b as u64))
}

/// Reads `table[index]` while touching every entry.
///
/// The index is secret-dependent in windowed scalar multiplication, so the
/// access pattern must not depend on it.
pub fn ct_lookup<T>(table: &[T], index: usize) -> T
where
    T: ConditionallySelectable + Default,
{
    let mut out = T::default();
    for (i, entry) in table.iter().enumerate() {
        out.conditional_assign(entry, ct_eq_usize(i, index));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ct_eq_slices() {
        assert!(ct_eq([1u8, 2, 3], [1u8, 2, 3]));
        assert!(!ct_eq([1u8, 2, 3], [1u8, 2, 4]));
        assert!(!ct_eq([1u8, 2], [1u8, 2, 3]));
    }

    #[test]
    fn test_limb_mask() {
        assert_eq!(limb_mask(Choice::from(1)), -1);
        assert_eq!(limb_mask(Choice::from(0)), 0);
    }

    #[test]
    fn test_non_negative() {
        assert!(bool::from(non_negative(0)));
        assert!(bool::from(non_negative(i64::MAX)));
        assert!(!bool::from(non_negative(-1)));
    }

    #[test]
    fn test_ct_lookup_reads_every_slot() {
        let table = [10u64, 20, 30, 40];
        for (i, expected) in table.iter().enumerate() {
            assert_eq!(ct_lookup(&table, i), *expected);
        }
        // Out of range yields the default
        assert_eq!(ct_lookup(&table, 9), 0);
    }

    #[test]
    fn test_ct_assign() {
        let mut dst = [0u8; 4];
        ct_assign(&mut dst, &[1, 2, 3, 4], Choice::from(0));
        assert_eq!(dst, [0; 4]);
        ct_assign(&mut dst, &[1, 2, 3, 4], Choice::from(1));
        assert_eq!(dst, [1, 2, 3, 4]);
    }

    #[test]
    fn test_ct_select() {
        assert_eq!(ct_select(5u32, 9u32, Choice::from(0)), 5);
        assert_eq!(ct_select(5u32, 9u32, Choice::from(1)), 9);
    }

    proptest::proptest! {
        #[test]
        fn prop_ct_eq_matches_slice_eq(a in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..64),
                                       b in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..64)) {
            proptest::prop_assert_eq!(ct_eq(&a, &b), a == b);
        }
    }
}
