//! Clock helpers for time permits and single-pass timestamps

use std::time::{SystemTime, UNIX_EPOCH};

use mpin_api::{Error, Result};
use mpin_params::mpin::TIME_SLOT_MINUTES;

fn unix_seconds() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| Error::Other {
            context: "time",
            message: "system clock is before the Unix epoch".into(),
        })
}

/// Permit slot for a Unix time: whole `TIME_SLOT_MINUTES` periods since
/// the epoch
pub fn slot_of(unix_secs: u64) -> u32 {
    (unix_secs / (60 * TIME_SLOT_MINUTES)) as u32
}

/// Current permit slot, the `date` time permits are issued for
pub fn today() -> Result<u32> {
    unix_seconds().map(slot_of)
}

/// Seconds since the epoch, the single-pass `time_value`
pub fn get_time() -> Result<u32> {
    let secs = unix_seconds()?;
    u32::try_from(secs).map_err(|_| Error::Other {
        context: "get_time",
        message: "time no longer fits in 32 bits".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_of_known_time() {
        // 2015-08-13, the date of the published M-PIN test vectors
        assert_eq!(slot_of(1_439_465_203), 16660);
        assert_eq!(slot_of(0), 0);
        assert_eq!(slot_of(86_399), 0);
        assert_eq!(slot_of(86_400), 1);
    }

    #[test]
    fn test_today_matches_clock() {
        let now = get_time().unwrap();
        let day = today().unwrap();
        assert!(day == slot_of(u64::from(now)) || day == slot_of(u64::from(now)) + 1);
        assert!(day > 16660);
    }
}
