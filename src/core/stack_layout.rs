use std::collections::HashMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{FieldValue, Record};
use crate::error::{ChartError, ChartResult};

/// Vertical extent of one data point in value space.
///
/// Unstacked series use a degenerate band (`min == max == value`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// One series handed to the stack computation, in draw order.
#[derive(Debug, Clone, Copy)]
pub struct StackSeries<'a> {
    pub name: &'a str,
    pub records: &'a [Record],
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum StackKey {
    Ordered(OrderedFloat<f64>),
    Text(String),
}

impl StackKey {
    fn from_value(value: &FieldValue) -> Self {
        match value.normalized_key() {
            Some(key) => Self::Ordered(OrderedFloat(key)),
            None => Self::Text(value.to_string()),
        }
    }
}

/// Computes cumulative bands for series stacked on top of each other.
///
/// The first series sits on zero; every later point sits on the previous
/// series' `max` at the same x value. Matching is by x value, not by index.
#[derive(Debug, Clone, Copy)]
pub struct StackLayoutComputer<'a> {
    x_field: &'a str,
    y_field: &'a str,
}

impl<'a> StackLayoutComputer<'a> {
    #[must_use]
    pub fn new(x_field: &'a str, y_field: &'a str) -> Self {
        Self { x_field, y_field }
    }

    pub fn compute(&self, series: &[StackSeries<'_>]) -> ChartResult<Vec<Vec<Band>>> {
        let mut layout = Vec::with_capacity(series.len());
        let mut previous: Option<HashMap<StackKey, f64>> = None;

        for entry in series {
            let mut bands = Vec::with_capacity(entry.records.len());
            let mut maxima = HashMap::with_capacity(entry.records.len());

            for record in entry.records {
                let x = self.field(record, self.x_field, entry.name)?;
                let value = self
                    .field(record, self.y_field, entry.name)?
                    .as_number()
                    .ok_or_else(|| {
                        ChartError::InvalidData(format!(
                            "character `{}` has a non-numeric `{}` value",
                            entry.name, self.y_field
                        ))
                    })?;

                let key = StackKey::from_value(x);
                let baseline = match &previous {
                    None => 0.0,
                    Some(maxima) => {
                        *maxima
                            .get(&key)
                            .ok_or_else(|| ChartError::MissingBaseline {
                                character: entry.name.to_owned(),
                                x: x.to_string(),
                            })?
                    }
                };

                let band = Band::new(baseline, baseline + value);
                maxima.entry(key).or_insert(band.max);
                bands.push(band);
            }

            trace!(character = entry.name, points = bands.len(), "stacked character");
            layout.push(bands);
            previous = Some(maxima);
        }

        Ok(layout)
    }

    fn field<'r>(&self, record: &'r Record, field: &str, character: &str) -> ChartResult<&'r FieldValue> {
        record.get(field).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "a record of character `{character}` has no `{field}` field"
            ))
        })
    }
}
