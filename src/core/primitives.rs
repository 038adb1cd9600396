use chrono::{DateTime, TimeZone, Utc};

use crate::error::{ChartError, ChartResult};

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(millis: f64) -> ChartResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(ChartError::InvalidData(
            "timestamp must be finite".to_owned(),
        ));
    }
    Utc.timestamp_millis_opt(millis.round() as i64)
        .single()
        .ok_or_else(|| ChartError::InvalidData(format!("timestamp {millis} is out of range")))
}

/// Orders a pair so the smaller value comes first, widening a zero-width
/// range by `min_span` around its center.
pub fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    if start == end {
        let half = min_span / 2.0;
        return Ok((start - half, end + half));
    }

    Ok((start.min(end), start.max(end)))
}
