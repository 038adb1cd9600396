use crate::core::{Band, StackLayoutComputer, StackSeries};
use crate::error::{ChartError, ChartResult};

/// Chooses how characters' value bands are derived from their records.
///
/// The band extent also drives the y-axis domain, so the strategy decides
/// both the shape of each character and the scale it is drawn against.
pub trait LayoutStrategy {
    fn bands(
        &self,
        series: &[StackSeries<'_>],
        x_field: &str,
        y_field: &str,
    ) -> ChartResult<Vec<Vec<Band>>>;

    /// Smallest `min` and largest `max` over every band.
    fn value_extent(&self, bands: &[Vec<Band>]) -> Option<(f64, f64)> {
        bands.iter().flatten().fold(None, |extent, band| {
            let (low, high) = extent.unwrap_or((band.min, band.max));
            Some((low.min(band.min), high.max(band.max)))
        })
    }
}

/// Every point is its own value: `min == max == value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainArea;

impl LayoutStrategy for PlainArea {
    fn bands(
        &self,
        series: &[StackSeries<'_>],
        _x_field: &str,
        y_field: &str,
    ) -> ChartResult<Vec<Vec<Band>>> {
        series
            .iter()
            .map(|entry| {
                entry
                    .records
                    .iter()
                    .map(|record| {
                        let value = record
                            .get(y_field)
                            .and_then(|value| value.as_number())
                            .ok_or_else(|| {
                                ChartError::InvalidData(format!(
                                    "character `{}` has a missing or non-numeric `{y_field}` value",
                                    entry.name
                                ))
                            })?;
                        Ok(Band::new(value, value))
                    })
                    .collect()
            })
            .collect()
    }
}

/// Characters are stacked in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackedArea;

impl LayoutStrategy for StackedArea {
    fn bands(
        &self,
        series: &[StackSeries<'_>],
        x_field: &str,
        y_field: &str,
    ) -> ChartResult<Vec<Vec<Band>>> {
        StackLayoutComputer::new(x_field, y_field).compute(series)
    }
}
