use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

use crate::core::ticks::tick_step;
use crate::core::{AxisScale, FieldValue, ScaleDomain};

/// Formats one tick value for display on `scale`.
///
/// Numbers get the precision of the tick step for `count` ticks and thousands
/// separators; dates use the coarsest calendar unit they are aligned to.
#[must_use]
pub fn format_tick(value: &FieldValue, scale: &AxisScale, count: usize) -> String {
    match value {
        FieldValue::Number(number) => {
            let precision = match scale.domain() {
                ScaleDomain::Numeric { start, end } => step_precision(tick_step(*start, *end, count)),
                _ => 0,
            };
            format_number(*number, precision)
        }
        FieldValue::Date(date) => format_date(*date),
        FieldValue::Text(text) => text.clone(),
    }
}

fn step_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

pub(crate) fn format_number(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.');
    let sign = if negative { "−" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

pub(crate) fn format_date(date: DateTime<Utc>) -> String {
    let pattern = if date.timestamp_subsec_millis() != 0 {
        ".%3f"
    } else if date.second() != 0 {
        ":%S"
    } else if date.minute() != 0 {
        "%I:%M"
    } else if date.hour() != 0 {
        "%I %p"
    } else if date.day() != 1 {
        if date.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if date.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    date.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{format_date, format_number};

    #[test]
    fn numbers_are_grouped_and_signed() {
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
        assert_eq!(format_number(-0.25, 2), "−0.25");
        assert_eq!(format_number(-0.0, 1), "0.0");
    }

    #[test]
    fn dates_use_their_coarsest_aligned_unit() {
        assert_eq!(
            format_date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            "2024"
        );
        assert_eq!(
            format_date(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            "March"
        );
        assert_eq!(
            format_date(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()),
            "Tue 05"
        );
        assert_eq!(
            format_date(Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()),
            "02:30"
        );
    }
}
