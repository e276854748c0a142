//! Time-based moving factor derivation.
//!
//! [RFC 6238][6238] reuses the HOTP algorithm with the counter replaced by
//! the number of whole time steps elapsed since the Unix epoch (T0 = 0).
//! The counter travels to the HMAC as eight big-endian bytes, exactly as
//! prescribed for HOTP counters in [RFC 4226][4226] §5.3.
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238

use std::time::{SystemTime, UNIX_EPOCH};

use crate::Error;

/// Derives the moving factor for a timestamp and time step.
///
/// Timestamps are millisecond-resolution, non-negative, and truncated
/// toward zero: `millis / 1000 / step_secs`.
pub(crate) fn at(timestamp_millis: u64, step_secs: u64) -> u64 {
    timestamp_millis / 1000 / step_secs
}

/// Milliseconds since the Unix epoch, per the system clock.
pub(crate) fn now_millis() -> Result<u64, Error> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(elapsed.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_within_a_step() {
        assert_eq!(at(0, 30), 0);
        assert_eq!(at(29_999, 30), 0);
        assert_eq!(at(30_000, 30), 1);
        assert_eq!(at(59_999, 30), 1);
        assert_eq!(at(60_000, 30), 2);
    }

    #[test]
    fn rfc_6238_appendix_b_counters() {
        assert_eq!(at(59_000, 30), 0x1);
        assert_eq!(at(1_111_111_109_000, 30), 0x0235_23ec);
        assert_eq!(at(1_111_111_111_000, 30), 0x0235_23ed);
        assert_eq!(at(1_234_567_890_000, 30), 0x0273_ef07);
        assert_eq!(at(2_000_000_000_000, 30), 0x03f9_40aa);
        assert_eq!(at(20_000_000_000_000, 30), 0x27bc_86aa);
    }

    #[test]
    fn counter_serializes_big_endian() {
        assert_eq!(
            at(59_000, 30).to_be_bytes(),
            [0, 0, 0, 0, 0, 0, 0, 1]
        );
    }
}
