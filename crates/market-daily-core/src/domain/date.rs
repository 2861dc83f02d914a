use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::{format_description, offset};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Fixed offset used to stamp snapshots, independent of the host time zone.
pub const SNAPSHOT_OFFSET: UtcOffset = offset!(+9);

/// Calendar day a snapshot was built, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotDate(Date);

impl SnapshotDate {
    /// Date of `instant` once shifted to UTC+9.
    pub fn from_instant(instant: OffsetDateTime) -> Self {
        Self(instant.to_offset(SNAPSHOT_OFFSET).date())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }
}

impl Display for SnapshotDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Serialize for SnapshotDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SnapshotDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn instant_before_utc_midnight_rolls_into_next_day() {
        let date = SnapshotDate::from_instant(datetime!(2024-03-31 15:30 UTC));
        assert_eq!(date.to_string(), "2024-04-01");
    }

    #[test]
    fn instant_early_in_utc_day_stays_on_same_day() {
        let date = SnapshotDate::from_instant(datetime!(2024-03-31 14:59 UTC));
        assert_eq!(date.to_string(), "2024-03-31");
    }

    #[test]
    fn parse_and_display_agree() {
        let date = SnapshotDate::parse("2025-01-09").expect("must parse");
        assert_eq!(date.to_string(), "2025-01-09");
    }

    #[test]
    fn rejects_non_calendar_dates() {
        let error = SnapshotDate::parse("2025-13-01").expect_err("must fail");
        assert!(matches!(error, ValidationError::InvalidDate { .. }));
        assert!(SnapshotDate::parse("20250101").is_err());
    }
}
