use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Half-open stay interval `[check_in, check_out)`.
///
/// The check-out day is free: a stay ending on the 5th and one starting on the 5th
/// do not overlap. Construction rejects zero-length and inverted ranges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStay", into = "RawStay")]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl ValueObject for StayRange {}

impl StayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> DomainResult<Self> {
        if check_in >= check_out {
            return Err(DomainError::validation(
                "check-out date must be after check-in date",
            ));
        }
        Ok(Self { check_in, check_out })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn overlaps(&self, other: &StayRange) -> bool {
        overlaps(self.check_in, self.check_out, other.check_in, other.check_out)
    }

    /// Middle day of the stay (rounded down), used to schedule mid-stay visits.
    pub fn midpoint(&self) -> NaiveDate {
        let half = (self.nights() / 2) as u64;
        self.check_in
            .checked_add_days(Days::new(half))
            .unwrap_or(self.check_in)
    }
}

/// Half-open overlap test on raw dates: `a_start < b_end && a_end > b_start`.
///
/// Does not validate ordering; callers reject inverted ranges first.
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start < b_end && a_end > b_start
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStay {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawStay> for StayRange {
    type Error = DomainError;

    fn try_from(raw: RawStay) -> Result<Self, Self::Error> {
        StayRange::new(raw.check_in, raw.check_out)
    }
}

impl From<StayRange> for RawStay {
    fn from(stay: StayRange) -> Self {
        RawStay {
            check_in: stay.check_in,
            check_out: stay.check_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn rejects_zero_length_and_inverted_ranges() {
        assert!(StayRange::new(d("2023-10-05"), d("2023-10-05")).is_err());
        assert!(StayRange::new(d("2023-10-06"), d("2023-10-05")).is_err());
    }

    #[test]
    fn adjacent_stays_do_not_overlap() {
        let a = StayRange::new(d("2023-10-01"), d("2023-10-05")).unwrap();
        let b = StayRange::new(d("2023-10-05"), d("2023-10-08")).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn midpoint_rounds_down() {
        let ten = StayRange::new(d("2023-11-01"), d("2023-11-11")).unwrap();
        assert_eq!(ten.midpoint(), d("2023-11-06"));
        let nine = StayRange::new(d("2023-11-01"), d("2023-11-10")).unwrap();
        assert_eq!(nine.midpoint(), d("2023-11-05"));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric_and_reflexive(
            a in 0i64..400, a_len in 1i64..30,
            b in 0i64..400, b_len in 1i64..30,
        ) {
            let base = d("2023-01-01");
            let stay = |start: i64, len: i64| {
                StayRange::new(
                    base + chrono::Duration::days(start),
                    base + chrono::Duration::days(start + len),
                )
                .unwrap()
            };
            let (x, y) = (stay(a, a_len), stay(b, b_len));
            prop_assert_eq!(x.overlaps(&y), y.overlaps(&x));
            prop_assert!(x.overlaps(&x));
            if a + a_len == b {
                prop_assert!(!x.overlaps(&y));
            }
        }
    }

    #[test]
    fn deserialize_validates_ordering() {
        let bad = serde_json::json!({ "checkIn": "2023-10-05", "checkOut": "2023-10-01" });
        assert!(serde_json::from_value::<StayRange>(bad).is_err());
    }
}
