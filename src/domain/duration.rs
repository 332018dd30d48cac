//! Wage-to-time conversion
//!
//! Turns a price and an effective hourly rate into a tiered, readable duration.
//! The scale assumes an 8-hour workday and a 40-hour workweek; anything past 12
//! work weeks is expressed in months (4.33 weeks each).

use serde::Serialize;

use super::price::NormalizedAmount;

pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const HOURS_PER_WORKDAY: f64 = 8.0;
pub const WORKDAYS_PER_WEEK: f64 = 5.0;
pub const HOURS_PER_WORKWEEK: f64 = HOURS_PER_WORKDAY * WORKDAYS_PER_WEEK;
pub const WEEKS_PER_MONTH: f64 = 4.33;
/// Week counts above this are reported as months.
pub const MONTHS_AFTER_WEEKS: i64 = 12;

/// Human-readable time cost of a price.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DurationDescription {
    /// Compact duration, e.g. "2h 30m"
    pub primary: String,
    /// Qualitative context, e.g. "Half your morning"
    pub secondary: String,
    /// Rounded minutes expressed in hours
    pub raw_hours: f64,
}

impl DurationDescription {
    fn new(primary: impl Into<String>, secondary: impl Into<String>, raw_hours: f64) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            raw_hours,
        }
    }
}

fn plural(count: i64, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Describe `amount` in working time at `effective_hourly_rate`.
///
/// Returns `None` when either input is non-positive or non-finite.
pub fn describe(amount: f64, effective_hourly_rate: f64) -> Option<DurationDescription> {
    if !(amount.is_finite() && effective_hourly_rate.is_finite()) {
        return None;
    }
    if effective_hourly_rate <= 0.0 || amount <= 0.0 {
        return None;
    }

    let total_min = (amount / effective_hourly_rate * MINUTES_PER_HOUR).round();
    let hours = total_min / MINUTES_PER_HOUR;

    if total_min < 1.0 {
        return Some(DurationDescription::new(
            "Less than 1 minute",
            "Almost free!",
            hours,
        ));
    }

    let days = hours / HOURS_PER_WORKDAY;
    let weeks = hours / HOURS_PER_WORKWEEK;

    let description = if total_min < MINUTES_PER_HOUR {
        DurationDescription::new(plural(total_min as i64, "minute"), "Quick work", hours)
    } else if hours < HOURS_PER_WORKDAY {
        hour_tier(total_min as i64, hours)
    } else if days < WORKDAYS_PER_WEEK {
        day_tier(days, hours)
    } else if weeks < 4.0 {
        week_tier(weeks, hours)
    } else {
        long_tier(weeks, hours)
    };

    Some(description)
}

/// Convenience for a value that already passed normalization.
pub fn describe_amount(
    amount: NormalizedAmount,
    effective_hourly_rate: f64,
) -> Option<DurationDescription> {
    describe(amount.value(), effective_hourly_rate)
}

fn hour_tier(total_min: i64, hours: f64) -> DurationDescription {
    let h = hours.floor() as i64;
    let m = total_min % 60;
    let primary = if m > 0 {
        format!("{h}h {m}m")
    } else {
        plural(h, "hour")
    };
    let secondary = if hours < 2.0 {
        "Part of your morning"
    } else if hours < 4.0 {
        "Half your morning"
    } else {
        "Most of your workday"
    };
    DurationDescription::new(primary, secondary, hours)
}

fn day_tier(days: f64, hours: f64) -> DurationDescription {
    let whole_days = days.floor() as i64;
    let remaining_hours = ((days - whole_days as f64) * HOURS_PER_WORKDAY).round() as i64;

    if whole_days == 0 {
        DurationDescription::new("Full workday", "8 hours of work", hours)
    } else if whole_days == 1 && remaining_hours == 0 {
        DurationDescription::new("1 full workday", "8 hours of work", hours)
    } else if remaining_hours == 0 {
        DurationDescription::new(
            format!("{whole_days} workdays"),
            format!("{} hours of work", whole_days * 8),
            hours,
        )
    } else {
        DurationDescription::new(
            format!("{}, {remaining_hours}h", plural(whole_days, "day")),
            format!("{} hours of work", (days * HOURS_PER_WORKDAY).round() as i64),
            hours,
        )
    }
}

fn week_tier(weeks: f64, hours: f64) -> DurationDescription {
    let whole_weeks = weeks.floor() as i64;
    let remaining_days = ((weeks - whole_weeks as f64) * WORKDAYS_PER_WEEK).round() as i64;
    let hours_of_work = format!("{} hours of work", (weeks * HOURS_PER_WORKWEEK).round() as i64);

    if whole_weeks == 0 {
        DurationDescription::new(
            format!("{remaining_days} workdays"),
            "Almost a work week",
            hours,
        )
    } else if remaining_days == 0 {
        DurationDescription::new(
            plural(whole_weeks, "work week"),
            format!("{} hours of work", whole_weeks * 40),
            hours,
        )
    } else {
        DurationDescription::new(
            format!("{whole_weeks}w {remaining_days}d"),
            hours_of_work,
            hours,
        )
    }
}

fn long_tier(weeks: f64, hours: f64) -> DurationDescription {
    let whole_weeks = weeks.round() as i64;
    if whole_weeks > MONTHS_AFTER_WEEKS {
        let months = (whole_weeks as f64 / WEEKS_PER_MONTH).round() as i64;
        DurationDescription::new(
            format!("{} of work", plural(months, "month")),
            format!("{whole_weeks} weeks"),
            hours,
        )
    } else {
        DurationDescription::new(
            format!("{whole_weeks} work weeks"),
            format!("{} hours of work", (weeks * HOURS_PER_WORKWEEK).round() as i64),
            hours,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rate of 60/h makes one dollar one minute.
    fn at_minutes(minutes: f64) -> DurationDescription {
        describe(minutes, 60.0).unwrap()
    }

    #[test]
    fn impossible_conversions() {
        assert!(describe(100.0, 0.0).is_none());
        assert!(describe(100.0, -1.0).is_none());
        assert!(describe(0.0, 20.0).is_none());
        assert!(describe(-5.0, 20.0).is_none());
        assert!(describe(f64::NAN, 20.0).is_none());
    }

    #[test]
    fn under_a_minute() {
        let d = describe(0.1, 20.0).unwrap();
        assert_eq!(d.primary, "Less than 1 minute");
        assert_eq!(d.secondary, "Almost free!");
    }

    #[test]
    fn minute_tier_and_plurals() {
        assert_eq!(at_minutes(1.0).primary, "1 minute");
        let d = at_minutes(59.0);
        assert_eq!(d.primary, "59 minutes");
        assert_eq!(d.secondary, "Quick work");
    }

    #[test]
    fn sixty_minutes_is_hour_tier() {
        let d = at_minutes(60.0);
        assert_eq!(d.primary, "1 hour");
        assert_eq!(d.secondary, "Part of your morning");
        assert_eq!(d.raw_hours, 1.0);
    }

    #[test]
    fn hour_tier_sub_ranges() {
        assert_eq!(at_minutes(90.0).primary, "1h 30m");
        let d = at_minutes(150.0);
        assert_eq!(d.primary, "2h 30m");
        assert_eq!(d.secondary, "Half your morning");
        let d = at_minutes(479.0);
        assert_eq!(d.primary, "7h 59m");
        assert_eq!(d.secondary, "Most of your workday");
    }

    #[test]
    fn hundred_dollars_at_twenty_is_five_hours() {
        let d = describe(100.0, 20.0).unwrap();
        assert_eq!(d.primary, "5 hours");
        assert_eq!(d.secondary, "Most of your workday");
        assert_eq!(d.raw_hours, 5.0);
    }

    #[test]
    fn eight_hours_is_workday_tier() {
        let d = at_minutes(480.0);
        assert_eq!(d.primary, "1 full workday");
        assert_eq!(d.secondary, "8 hours of work");
    }

    #[test]
    fn workday_composites() {
        // 1.5 days
        let d = at_minutes(720.0);
        assert_eq!(d.primary, "1 day, 4h");
        assert_eq!(d.secondary, "12 hours of work");

        // exact multiple
        let d = at_minutes(3.0 * 480.0);
        assert_eq!(d.primary, "3 workdays");
        assert_eq!(d.secondary, "24 hours of work");

        let d = at_minutes(2.0 * 480.0 + 120.0);
        assert_eq!(d.primary, "2 days, 2h");
    }

    #[test]
    fn five_days_is_week_tier() {
        let d = at_minutes(5.0 * 480.0);
        assert_eq!(d.primary, "1 work week");
        assert_eq!(d.secondary, "40 hours of work");

        let d = at_minutes(2400.0 + 2.0 * 480.0);
        assert_eq!(d.primary, "1w 2d");
        assert_eq!(d.secondary, "56 hours of work");

        let d = at_minutes(3.0 * 2400.0);
        assert_eq!(d.primary, "3 work weeks");
        assert_eq!(d.secondary, "120 hours of work");
    }

    #[test]
    fn long_tier_weeks_then_months() {
        let d = at_minutes(4.0 * 2400.0);
        assert_eq!(d.primary, "4 work weeks");
        assert_eq!(d.secondary, "160 hours of work");

        let d = at_minutes(12.0 * 2400.0);
        assert_eq!(d.primary, "12 work weeks");

        let d = at_minutes(13.0 * 2400.0);
        assert_eq!(d.primary, "3 months of work");
        assert_eq!(d.secondary, "13 weeks");
    }

    #[test]
    fn describe_is_idempotent() {
        let a = describe(1234.56, 17.5);
        let b = describe(1234.56, 17.5);
        assert_eq!(a, b);
    }

    #[test]
    fn months_for_large_price() {
        // 49990 at 25/h: 119976 minutes, 49.99 weeks -> 50 -> 12 months
        let d = describe(49_990.0, 25.0).unwrap();
        assert_eq!(d.primary, "12 months of work");
        assert_eq!(d.secondary, "50 weeks");
        assert!((d.raw_hours - 1999.6).abs() < 1e-9);
    }
}
