//! # Schedule Resolver
//!
//! Turns an area's abstract weekly delivery schedule (a set of weekdays) into
//! concrete, user-selectable calendar dates.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  schedule = {monday, thursday}, today = Wed 2026-09-02                  │
//! │                                                                         │
//! │  scan tomorrow .. tomorrow+lookahead (28 days):                         │
//! │    Thu 03 ✓  Fri 04  Sat 05  Sun 06  Mon 07 ✓  ... Thu 10 ✓  Mon 14 ✓   │
//! │                                                                         │
//! │  group by weekday, cap at max_dates_per_weekday:                        │
//! │    thursday → [03, 10, 17, 24]                                          │
//! │    monday   → [07, 14, 21, 28]                                          │
//! │                                                                         │
//! │  slots sorted chronologically by their first date (thursday first).     │
//! │  Empty schedule → empty output: "unspecified", never an error.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `max_dates_per_weekday = 1` this is the "one per weekday" policy;
//! the default of 4 lets the user pick among the next few occurrences.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Output Shape
// =============================================================================

/// The upcoming dates for one weekday of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySlot {
    /// Lowercase weekday name for display ("monday").
    pub weekday: String,

    /// Upcoming dates for that weekday, ascending. Never empty.
    #[ts(as = "Vec<String>")]
    pub dates: Vec<NaiveDate>,
}

// =============================================================================
// Resolver
// =============================================================================

/// Configuration for schedule resolution.
///
/// Both knobs are bounded by construction: resolution always terminates and
/// the output size is `schedule.len() * max_dates_per_weekday` at most.
#[derive(Debug, Clone)]
pub struct ScheduleResolver {
    /// How many days past tomorrow to scan. Default 28 (four weeks covers
    /// every weekday at least four times).
    pub lookahead_days: u32,

    /// How many dates to keep per weekday. Default 4; use 1 for the
    /// "one per weekday" policy.
    pub max_dates_per_weekday: usize,
}

impl Default for ScheduleResolver {
    fn default() -> Self {
        ScheduleResolver {
            lookahead_days: 28,
            max_dates_per_weekday: 4,
        }
    }
}

impl ScheduleResolver {
    /// "One per weekday" policy: the single next occurrence of each weekday.
    pub fn one_per_weekday() -> Self {
        ScheduleResolver {
            max_dates_per_weekday: 1,
            ..ScheduleResolver::default()
        }
    }

    /// Resolves the schedule into concrete dates, starting from tomorrow.
    ///
    /// Slots are ordered chronologically by their first date; dates within a
    /// slot ascend. An empty or unparseable schedule yields an empty vec.
    pub fn resolve(&self, schedule: &[Weekday], today: NaiveDate) -> Vec<DeliverySlot> {
        if schedule.is_empty() {
            return Vec::new();
        }

        // First-seen order is chronological because we scan day by day.
        let mut slots: Vec<DeliverySlot> = Vec::new();

        for offset in 1..=self.lookahead_days as i64 {
            let date = today + Duration::days(offset);
            if !schedule.contains(&date.weekday()) {
                continue;
            }

            let name = weekday_name(date.weekday());
            match slots.iter_mut().find(|s| s.weekday == name) {
                Some(slot) => {
                    if slot.dates.len() < self.max_dates_per_weekday {
                        slot.dates.push(date);
                    }
                }
                None => slots.push(DeliverySlot {
                    weekday: name.to_string(),
                    dates: vec![date],
                }),
            }
        }

        slots
    }

    /// Flattens the resolution into one chronological date list, for UIs
    /// that present a single picker instead of per-weekday groups.
    pub fn first_dates(&self, schedule: &[Weekday], today: NaiveDate) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .resolve(schedule, today)
            .into_iter()
            .flat_map(|slot| slot.dates)
            .collect();
        dates.sort_unstable();
        dates
    }
}

/// Lowercase display name for a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn wednesday() -> NaiveDate {
        // 2026-09-02 is a Wednesday
        let date = NaiveDate::from_ymd_opt(2026, 9, 2).unwrap();
        assert_eq!(date.weekday(), Weekday::Wed);
        date
    }

    /// Scenario E: {monday, thursday}, today Wednesday, one per weekday →
    /// exactly next Thursday and next Monday, chronological.
    #[test]
    fn test_one_per_weekday_from_wednesday() {
        let resolver = ScheduleResolver::one_per_weekday();
        let slots = resolver.resolve(&[Weekday::Mon, Weekday::Thu], wednesday());

        assert_eq!(slots.len(), 2);
        // Thursday (tomorrow) comes before next Monday
        assert_eq!(slots[0].weekday, "thursday");
        assert_eq!(
            slots[0].dates,
            vec![NaiveDate::from_ymd_opt(2026, 9, 3).unwrap()]
        );
        assert_eq!(slots[1].weekday, "monday");
        assert_eq!(
            slots[1].dates,
            vec![NaiveDate::from_ymd_opt(2026, 9, 7).unwrap()]
        );
    }

    #[test]
    fn test_four_per_weekday_default() {
        let resolver = ScheduleResolver::default();
        let slots = resolver.resolve(&[Weekday::Mon], wednesday());

        assert_eq!(slots.len(), 1);
        assert_eq!(
            slots[0].dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 21).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 28).unwrap(),
            ]
        );
    }

    #[test]
    fn test_starts_tomorrow_not_today() {
        // Today is Wednesday; a Wednesday schedule must skip today.
        let resolver = ScheduleResolver::one_per_weekday();
        let slots = resolver.resolve(&[Weekday::Wed], wednesday());

        assert_eq!(slots.len(), 1);
        assert_eq!(
            slots[0].dates,
            vec![NaiveDate::from_ymd_opt(2026, 9, 9).unwrap()]
        );
    }

    #[test]
    fn test_empty_schedule_is_empty_output() {
        let resolver = ScheduleResolver::default();
        assert!(resolver.resolve(&[], wednesday()).is_empty());
    }

    #[test]
    fn test_lookahead_bounds_output() {
        // A 3-day window from Wednesday only reaches Thu/Fri/Sat.
        let resolver = ScheduleResolver {
            lookahead_days: 3,
            max_dates_per_weekday: 4,
        };
        let slots = resolver.resolve(&[Weekday::Mon, Weekday::Thu], wednesday());

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].weekday, "thursday");
    }

    #[test]
    fn test_first_dates_flattens_chronologically() {
        let resolver = ScheduleResolver {
            lookahead_days: 14,
            max_dates_per_weekday: 2,
        };
        let dates = resolver.first_dates(&[Weekday::Mon, Weekday::Thu], wednesday());

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            ]
        );
    }
}
