//! Pollard's kangaroo over the PIN error
//!
//! After a failed check the server holds `E = F^(-d)`, where `d` is the PIN
//! the client used minus the right one. A tame kangaroo jumps from `1` in
//! powers of `F` and sets a trap where it stops; a wild one jumps from `E`
//! with the same jump rule. If the wild kangaroo lands in the trap the
//! difference of distances travelled is `d`.
//!
//! A single walk misses now and then, so the search is repeated with a fresh
//! jump rule a few times before giving up.

use mpin_algorithms::ec::bn254::Gt;
use tracing::{debug, trace};

use crate::config::ProtocolConfig;

/// Independent walks tried before reporting that no offset was found
pub const KANGAROO_ROUNDS: u64 = 8;

/// Jump index for `g` under the rule of a given round
fn jump_index(g: &Gt, round: u64, jumps: usize) -> usize {
    let bytes = g.to_bytes();
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[24..32]);
    let key = u64::from_be_bytes(word) ^ round.wrapping_mul(0xD1B5_4A32_D192_ED03);
    let mixed = key.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32;
    (mixed % jumps as u64) as usize
}

/// One tame and one wild walk, returning `d` when the trap is hit
fn walk(e: &Gt, table: &[(Gt, i64)], round: u64, config: &ProtocolConfig) -> Option<i64> {
    let jumps = table.len();
    let max_pin = i64::from(config.max_pin);

    let mut t = Gt::identity();
    let mut dn = 0i64;
    for _ in 0..config.kangaroo_trap {
        let (step, dist) = &table[jump_index(&t, round, jumps)];
        t = &t * step;
        dn += dist;
    }

    let mut ge = *e;
    let mut dm = 0i64;
    let mut steps = 0usize;
    while dm - dn < max_pin {
        steps += 1;
        if steps > 4 * config.kangaroo_trap {
            break;
        }
        let (step, dist) = &table[jump_index(&ge, round, jumps)];
        ge = &ge * step;
        dm += dist;
        if ge == t {
            let d = dm - dn;
            trace!(round, steps, d, "wild kangaroo trapped");
            return (d.abs() < max_pin).then_some(d);
        }
    }
    trace!(round, steps, "wild kangaroo escaped");
    None
}

/// Recover `d` with `E = F^(-d)` and `|d| < config.max_pin`.
///
/// Returns 0 when no such `d` is found, which is also what a failed check
/// with the right PIN (a bad token) looks like.
pub fn kangaroo(e: &Gt, f: &Gt, config: &ProtocolConfig) -> i32 {
    let mut table = Vec::with_capacity(config.kangaroo_jumps);
    let mut step = *f;
    let mut dist = 1i64;
    for _ in 0..config.kangaroo_jumps {
        table.push((step, dist));
        step = &step * &step;
        dist <<= 1;
    }
    if table.is_empty() {
        return 0;
    }

    for round in 0..KANGAROO_ROUNDS {
        if let Some(d) = walk(e, &table, round, config) {
            debug!(round, "pin offset recovered");
            // |d| < max_pin <= u32::MAX
            return i32::try_from(d).unwrap_or(0);
        }
    }
    debug!("pin offset not recovered");
    0
}
