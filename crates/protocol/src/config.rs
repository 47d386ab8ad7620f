//! Protocol settings an application may want to load from its own config

use mpin_api::error::validate;
use mpin_api::Result;
use mpin_params::mpin::{MAXPIN, PBLEN, TRAP, TS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tolerance between a single-pass request's timestamp and the
/// server clock, in seconds
pub const DEFAULT_TIME_WINDOW_SECS: u32 = 5;

/// Tunable parameters of the protocol.
///
/// The defaults match deployed M-PIN services: four-digit PINs, a 14-bit
/// PIN ladder and full subgroup checks on decoded points.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProtocolConfig {
    /// PINs are reduced modulo this value before use
    pub max_pin: u32,
    /// Number of bits walked by the fixed-length PIN ladders
    pub pin_bits: usize,
    /// Check subgroup membership when decoding points from the wire
    pub full_validation: bool,
    /// Largest accepted distance between a single-pass request's timestamp
    /// and the server's clock, in seconds
    pub time_window_secs: u32,
    /// Number of distinct kangaroo jump sizes (powers of two)
    pub kangaroo_jumps: usize,
    /// Steps taken by the tame kangaroo
    pub kangaroo_trap: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_pin: MAXPIN,
            pin_bits: PBLEN,
            full_validation: true,
            time_window_secs: DEFAULT_TIME_WINDOW_SECS,
            kangaroo_jumps: TS,
            kangaroo_trap: TRAP,
        }
    }
}

impl ProtocolConfig {
    /// Check the settings are consistent with each other
    pub fn validate(&self) -> Result<()> {
        validate::parameter(self.max_pin > 0, "max_pin", "must be positive")?;
        validate::parameter(
            (1..=31).contains(&self.pin_bits),
            "pin_bits",
            "must be between 1 and 31",
        )?;
        validate::parameter(
            u64::from(self.max_pin) <= 1u64 << self.pin_bits,
            "pin_bits",
            "too short to hold every PIN below max_pin",
        )?;
        validate::parameter(
            (1..=30).contains(&self.kangaroo_jumps),
            "kangaroo_jumps",
            "must be between 1 and 30",
        )?;
        validate::parameter(self.kangaroo_trap > 0, "kangaroo_trap", "must be positive")?;
        Ok(())
    }

    /// Reduce a PIN into range
    pub fn reduce_pin(&self, pin: u32) -> u32 {
        pin % self.max_pin
    }
}
