//! Protocol timestamp conversion
//!
//! Rule activation/deactivation and revalidation instants travel in the
//! policy model as seconds/nanoseconds from the Unix epoch, restricted to
//! years 0001 through 9999.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::TimestampError;

/// Seconds of 0001-01-01T00:00:00Z relative to the Unix epoch
pub const MIN_VALID_SECONDS: i64 = -62_135_596_800;

/// Seconds of 9999-12-31T23:59:59Z relative to the Unix epoch
pub const MAX_VALID_SECONDS: i64 = 253_402_300_799;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Policy model timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    /// Seconds since the Unix epoch (may be negative)
    pub seconds: i64,
    /// Non-negative sub-second part, always below one second
    pub nanos: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}

impl TryFrom<SystemTime> for Timestamp {
    type Error = TimestampError;

    fn try_from(time: SystemTime) -> Result<Self, Self::Error> {
        let (seconds, nanos) = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => (after.as_secs() as i128, after.subsec_nanos()),
            Err(e) => {
                let before = e.duration();
                let secs = -(before.as_secs() as i128);
                match before.subsec_nanos() {
                    0 => (secs, 0),
                    sub => (secs - 1, NANOS_PER_SECOND - sub),
                }
            }
        };

        if seconds < MIN_VALID_SECONDS as i128 || seconds > MAX_VALID_SECONDS as i128 {
            return Err(TimestampError::OutOfRange { seconds });
        }

        Ok(Timestamp {
            seconds: seconds as i64,
            nanos: nanos as i32,
        })
    }
}

/// Convert an optional native time, leaving the field absent on failure
pub fn convert_to_timestamp(time: Option<SystemTime>) -> Option<Timestamp> {
    let time = time?;
    match Timestamp::try_from(time) {
        Ok(ts) => Some(ts),
        Err(e) => {
            log::error!("Unable to convert {time:?} to a policy timestamp: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_convert_after_epoch() {
        let time = UNIX_EPOCH + Duration::new(1_600_000_000, 250);
        let ts = Timestamp::try_from(time).unwrap();
        assert_eq!(ts, Timestamp::new(1_600_000_000, 250));
    }

    #[test]
    fn test_convert_epoch() {
        assert_eq!(Timestamp::try_from(UNIX_EPOCH).unwrap(), Timestamp::default());
    }

    #[test]
    fn test_convert_before_epoch_normalizes_nanos() {
        let time = UNIX_EPOCH - Duration::new(1, 500_000_000);
        let ts = Timestamp::try_from(time).unwrap();
        assert_eq!(ts.seconds, -2);
        assert_eq!(ts.nanos, 500_000_000);

        let time = UNIX_EPOCH - Duration::from_secs(10);
        assert_eq!(Timestamp::try_from(time).unwrap(), Timestamp::new(-10, 0));
    }

    #[test]
    fn test_convert_upper_bound() {
        let last = UNIX_EPOCH + Duration::from_secs(MAX_VALID_SECONDS as u64);
        assert!(Timestamp::try_from(last).is_ok());

        let past_last = UNIX_EPOCH + Duration::from_secs(MAX_VALID_SECONDS as u64 + 1);
        assert_eq!(
            Timestamp::try_from(past_last),
            Err(TimestampError::OutOfRange {
                seconds: MAX_VALID_SECONDS as i128 + 1
            })
        );
    }

    #[test]
    fn test_convert_optional() {
        assert_eq!(convert_to_timestamp(None), None);

        let time = UNIX_EPOCH + Duration::from_secs(42);
        assert_eq!(convert_to_timestamp(Some(time)), Some(Timestamp::new(42, 0)));

        let too_late = UNIX_EPOCH + Duration::from_secs(MAX_VALID_SECONDS as u64 + 60);
        assert_eq!(convert_to_timestamp(Some(too_late)), None);
    }
}
