use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use smallvec::SmallVec;

use crate::core::primitives::datetime_to_unix_millis;

/// Tick count requested from every axis unless explicit ticks are supplied.
pub const DEFAULT_TICK_COUNT: usize = 6;

pub type NumericTicks = SmallVec<[f64; 8]>;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Signed "nice" step between ticks.
///
/// Positive values are the step itself, negative values encode `1 / -step`
/// so sub-unit steps stay exact when multiplied back.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Absolute tick step for the given extent, used to pick label precision.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    let increment = tick_increment(low, high, count);
    if increment < 0.0 { -1.0 / increment } else { increment }
}

/// Round-number ticks covering `[start, stop]`, in the direction of the extent.
#[must_use]
pub fn numeric_ticks(start: f64, stop: f64, count: usize) -> NumericTicks {
    let mut ticks = NumericTicks::new();
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return ticks;
    }
    if start == stop {
        ticks.push(start);
        return ticks;
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let increment = tick_increment(low, high, count);
    if increment == 0.0 || !increment.is_finite() {
        return ticks;
    }

    if increment > 0.0 {
        let first = (low / increment).ceil() as i64;
        let last = (high / increment).floor() as i64;
        for i in first..=last {
            ticks.push(i as f64 * increment);
        }
    } else {
        let inverse = -increment;
        let first = (low * inverse).ceil() as i64;
        let last = (high * inverse).floor() as i64;
        for i in first..=last {
            ticks.push(i as f64 / inverse);
        }
    }

    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Calendar-aware interval used for time ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    Millis(i64),
    Seconds(i64),
    Minutes(i64),
    Hours(i64),
    Days(i64),
    Weeks,
    Months(u32),
    Years(i32),
}

impl TimeInterval {
    fn approximate_millis(self) -> i64 {
        match self {
            Self::Millis(step) => step,
            Self::Seconds(step) => step * SECOND_MS,
            Self::Minutes(step) => step * MINUTE_MS,
            Self::Hours(step) => step * HOUR_MS,
            Self::Days(step) => step * DAY_MS,
            Self::Weeks => WEEK_MS,
            Self::Months(step) => i64::from(step) * MONTH_MS,
            Self::Years(step) => i64::from(step) * YEAR_MS,
        }
    }
}

const TICK_INTERVALS: [TimeInterval; 17] = [
    TimeInterval::Seconds(1),
    TimeInterval::Seconds(5),
    TimeInterval::Seconds(15),
    TimeInterval::Seconds(30),
    TimeInterval::Minutes(1),
    TimeInterval::Minutes(5),
    TimeInterval::Minutes(15),
    TimeInterval::Minutes(30),
    TimeInterval::Hours(1),
    TimeInterval::Hours(3),
    TimeInterval::Hours(6),
    TimeInterval::Hours(12),
    TimeInterval::Days(1),
    TimeInterval::Days(2),
    TimeInterval::Weeks,
    TimeInterval::Months(1),
    TimeInterval::Months(3),
];

/// Picks the calendar interval whose length is closest to `span / count`.
#[must_use]
pub fn select_time_interval(start_ms: f64, end_ms: f64, count: usize) -> TimeInterval {
    let span = (end_ms - start_ms).abs();
    let target = span / count.max(1) as f64;

    let upper = TICK_INTERVALS
        .iter()
        .position(|interval| interval.approximate_millis() as f64 > target);

    match upper {
        Some(0) => {
            let step = tick_step(start_ms, end_ms, count).max(1.0);
            TimeInterval::Millis(step as i64)
        }
        Some(index) => {
            let below = TICK_INTERVALS[index - 1];
            let above = TICK_INTERVALS[index];
            if target / (below.approximate_millis() as f64)
                < (above.approximate_millis() as f64) / target
            {
                below
            } else {
                above
            }
        }
        None => {
            let years = tick_step(start_ms / YEAR_MS as f64, end_ms / YEAR_MS as f64, count);
            TimeInterval::Years((years.round() as i32).max(1))
        }
    }
}

/// Calendar-aligned ticks inside `[start, end]` (inclusive, ascending).
#[must_use]
pub fn time_ticks(start: DateTime<Utc>, end: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    let (low, high) = if end < start { (end, start) } else { (start, end) };
    if count == 0 {
        return Vec::new();
    }
    if low == high {
        return vec![low];
    }

    let interval = select_time_interval(
        datetime_to_unix_millis(low),
        datetime_to_unix_millis(high),
        count,
    );

    let mut ticks = Vec::new();
    let mut cursor = Some(floor_to_interval(low, interval));
    while let Some(tick) = cursor {
        if tick > high {
            break;
        }
        if tick >= low {
            ticks.push(tick);
        }
        cursor = step_interval(tick, interval);
    }

    if end < start {
        ticks.reverse();
    }
    ticks
}

fn floor_to_interval(time: DateTime<Utc>, interval: TimeInterval) -> DateTime<Utc> {
    let millis = time.timestamp_millis();
    let epoch_floor = |step: i64| {
        let floored = millis.div_euclid(step) * step;
        Utc.timestamp_millis_opt(floored).single().unwrap_or(time)
    };

    match interval {
        TimeInterval::Millis(step) => epoch_floor(step.max(1)),
        TimeInterval::Seconds(step) => epoch_floor(step * SECOND_MS),
        TimeInterval::Minutes(step) => epoch_floor(step * MINUTE_MS),
        TimeInterval::Hours(step) => epoch_floor(step * HOUR_MS),
        TimeInterval::Days(step) => epoch_floor(step * DAY_MS),
        TimeInterval::Weeks => {
            let date = time.date_naive();
            let back = i64::from(date.weekday().num_days_from_sunday());
            midnight(date) - Duration::days(back)
        }
        TimeInterval::Months(step) => {
            let month0 = time.month0() / step * step;
            calendar_start(time.year(), month0 + 1).unwrap_or(time)
        }
        TimeInterval::Years(step) => {
            let year = time.year().div_euclid(step) * step;
            calendar_start(year, 1).unwrap_or(time)
        }
    }
}

fn step_interval(time: DateTime<Utc>, interval: TimeInterval) -> Option<DateTime<Utc>> {
    match interval {
        TimeInterval::Millis(_)
        | TimeInterval::Seconds(_)
        | TimeInterval::Minutes(_)
        | TimeInterval::Hours(_)
        | TimeInterval::Days(_)
        | TimeInterval::Weeks => {
            time.checked_add_signed(Duration::milliseconds(interval.approximate_millis().max(1)))
        }
        TimeInterval::Months(step) => {
            let months = time.year() * 12 + time.month0() as i32 + step as i32;
            calendar_start(months.div_euclid(12), months.rem_euclid(12) as u32 + 1)
        }
        TimeInterval::Years(step) => calendar_start(time.year() + step, 1),
    }
}

fn calendar_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1).map(midnight)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{TimeInterval, numeric_ticks, select_time_interval, time_ticks};

    #[test]
    fn numeric_ticks_use_nice_steps() {
        assert_eq!(
            numeric_ticks(0.0, 10.0, 6).to_vec(),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
        );
        assert_eq!(
            numeric_ticks(0.0, 1.0, 6).to_vec(),
            vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]
        );
    }

    #[test]
    fn numeric_ticks_follow_descending_extent() {
        assert_eq!(
            numeric_ticks(30.0, 10.0, 6).to_vec(),
            vec![30.0, 25.0, 20.0, 15.0, 10.0]
        );
    }

    #[test]
    fn quarter_year_extent_selects_monthly_interval() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let interval = select_time_interval(
            start.timestamp_millis() as f64,
            end.timestamp_millis() as f64,
            6,
        );
        assert_eq!(interval, TimeInterval::Months(1));

        let ticks = time_ticks(start, end, 6);
        assert_eq!(ticks.len(), 7);
        assert_eq!(ticks[1], Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn nearest_interval_is_chosen_by_ratio() {
        let hour = 3_600_000.0;
        assert_eq!(select_time_interval(0.0, 4.0 * 8.0 * hour, 4), TimeInterval::Hours(6));
        assert_eq!(select_time_interval(0.0, 4.0 * 9.0 * hour, 4), TimeInterval::Hours(12));
    }

    #[test]
    fn decade_extent_selects_multi_year_interval() {
        let start = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let ticks = time_ticks(start, end, 6);
        assert_eq!(ticks.first().copied(), Some(start));
        assert_eq!(ticks[1], Utc.with_ymd_and_hms(2005, 1, 1, 0, 0, 0).unwrap());
    }
}
