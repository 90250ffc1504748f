//! Clock conversion. Period boundaries are epoch milliseconds while the
//! runtime clock reports whole seconds.

use crate::constants::MS_PER_SECOND;
use crate::error::EscrowError;

/// Converts a `Clock::unix_timestamp` (seconds) into epoch milliseconds.
pub fn unix_ms(unix_ts: i64) -> Result<i64, EscrowError> {
    if unix_ts < 0 {
        return Err(EscrowError::InvalidTimestamp);
    }
    unix_ts
        .checked_mul(MS_PER_SECOND)
        .ok_or(EscrowError::MathOverflow)
}
