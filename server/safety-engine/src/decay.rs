//! Step time decay: whole-day age buckets mapped to a recency multiplier.

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Age in whole days, rounded up, from the absolute distance between the two instants.
///
/// Timestamps after `now` are aged the same as past ones (no rejection, no clamping).
pub fn age_days(published_at: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
  let millis = (*now - *published_at).num_milliseconds().abs();
  (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Multiplier for an age in days: <=7 → 1.0, <=14 → 0.8, <=30 → 0.5, older → 0.2.
pub fn weight_for_age(age_days: i64) -> f64 {
  if age_days <= 7 {
    1.0
  } else if age_days <= 14 {
    0.8
  } else if age_days <= 30 {
    0.5
  } else {
    0.2
  }
}

/// Recency multiplier in (0, 1] for an incident evaluated at `now`.
pub fn decay_weight(published_at: &DateTime<Utc>, now: &DateTime<Utc>) -> f64 {
  weight_for_age(age_days(published_at, now))
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
  }

  #[test]
  fn age_rounds_partial_days_up() {
    let n = now();
    assert_eq!(age_days(&n, &n), 0);
    assert_eq!(age_days(&(n - Duration::milliseconds(1)), &n), 1);
    assert_eq!(age_days(&(n - Duration::days(1)), &n), 1);
    assert_eq!(age_days(&(n - Duration::days(1) - Duration::minutes(1)), &n), 2);
  }

  #[test]
  fn breakpoints_are_inclusive() {
    assert_eq!(weight_for_age(0), 1.0);
    assert_eq!(weight_for_age(7), 1.0);
    assert_eq!(weight_for_age(8), 0.8);
    assert_eq!(weight_for_age(14), 0.8);
    assert_eq!(weight_for_age(15), 0.5);
    assert_eq!(weight_for_age(30), 0.5);
    assert_eq!(weight_for_age(31), 0.2);
    assert_eq!(weight_for_age(3650), 0.2);
  }

  #[test]
  fn weight_never_increases_with_age() {
    let mut prev = weight_for_age(0);
    for days in 1..=60 {
      let w = weight_for_age(days);
      assert!(w <= prev, "weight rose at day {}", days);
      assert!(w > 0.0 && w <= 1.0);
      prev = w;
    }
  }

  #[test]
  fn future_timestamps_decay_like_past_ones() {
    // Known quirk: clock-skewed items are aged by absolute distance.
    let n = now();
    let past = n - Duration::days(20);
    let future = n + Duration::days(20);
    assert_eq!(decay_weight(&past, &n), 0.5);
    assert_eq!(decay_weight(&future, &n), 0.5);
  }
}
