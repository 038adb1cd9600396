use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::ticks::{numeric_ticks, time_ticks};
use crate::core::{FieldValue, LinearScale};
use crate::error::{ChartError, ChartResult};

/// Family of domain an axis maps from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Time,
    Categorical,
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Time => "time",
            Self::Categorical => "categorical",
        })
    }
}

/// Domain of an axis scale.
///
/// Continuous domains keep their orientation: a y axis stores `max..min` so
/// that the largest value lands on the top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScaleDomain {
    Numeric { start: f64, end: f64 },
    Temporal {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    Categorical(Vec<String>),
}

impl ScaleDomain {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Numeric { .. } => ScaleKind::Linear,
            Self::Temporal { .. } => ScaleKind::Time,
            Self::Categorical(_) => ScaleKind::Categorical,
        }
    }

    /// Returns the same domain with its endpoints swapped.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Numeric { start, end } => Self::Numeric {
                start: end,
                end: start,
            },
            Self::Temporal { start, end } => Self::Temporal {
                start: end,
                end: start,
            },
            Self::Categorical(mut categories) => {
                categories.reverse();
                Self::Categorical(categories)
            }
        }
    }

    fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Numeric { start, end } => {
                if !start.is_finite() || !end.is_finite() || start == end {
                    return Err(ChartError::InvalidData(
                        "numeric domain must be finite and non-zero".to_owned(),
                    ));
                }
            }
            Self::Temporal { start, end } => {
                if start == end {
                    return Err(ChartError::InvalidData(
                        "time domain must span a non-zero duration".to_owned(),
                    ));
                }
            }
            Self::Categorical(categories) => {
                if categories.is_empty() {
                    return Err(ChartError::InvalidData(
                        "categorical domain must contain at least one category".to_owned(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Domain-to-pixel mapping owned by an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScale {
    domain: ScaleDomain,
    range: (f64, f64),
}

impl AxisScale {
    pub fn new(domain: ScaleDomain, range: (f64, f64)) -> ChartResult<Self> {
        domain.validate()?;
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        Ok(Self { domain, range })
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        self.domain.kind()
    }

    #[must_use]
    pub fn domain(&self) -> &ScaleDomain {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Copies the scale with `domain` substituted, keeping the range.
    pub fn with_domain(&self, domain: ScaleDomain) -> ChartResult<Self> {
        Self::new(domain, self.range)
    }

    pub fn map(&self, value: &FieldValue) -> ChartResult<f64> {
        match (&self.domain, value) {
            (ScaleDomain::Numeric { .. }, FieldValue::Number(number)) => self.map_number(*number),
            (ScaleDomain::Temporal { .. }, FieldValue::Date(date)) => {
                self.map_number(datetime_to_unix_millis(*date))
            }
            (ScaleDomain::Categorical(categories), FieldValue::Text(text)) => {
                let index = categories
                    .iter()
                    .position(|category| category == text)
                    .ok_or_else(|| {
                        ChartError::InvalidData(format!("`{text}` is not a category of this scale"))
                    })?;
                Ok(self.category_position(index, categories.len()))
            }
            (domain, value) => Err(ChartError::InvalidData(format!(
                "value `{value}` cannot be mapped by a {} scale",
                domain.kind()
            ))),
        }
    }

    /// Maps a raw number; dates are read as unix milliseconds.
    pub fn map_number(&self, value: f64) -> ChartResult<f64> {
        self.continuous()?.map(value)
    }

    /// Tick values for this scale, `count` being a target rather than a promise.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<FieldValue> {
        match &self.domain {
            ScaleDomain::Numeric { start, end } => numeric_ticks(*start, *end, count)
                .into_iter()
                .map(FieldValue::Number)
                .collect(),
            ScaleDomain::Temporal { start, end } => time_ticks(*start, *end, count)
                .into_iter()
                .map(FieldValue::Date)
                .collect(),
            ScaleDomain::Categorical(categories) => categories
                .iter()
                .cloned()
                .map(FieldValue::Text)
                .collect(),
        }
    }

    fn continuous(&self) -> ChartResult<LinearScale> {
        match &self.domain {
            ScaleDomain::Numeric { start, end } => LinearScale::new((*start, *end), self.range),
            ScaleDomain::Temporal { start, end } => LinearScale::new(
                (
                    datetime_to_unix_millis(*start),
                    datetime_to_unix_millis(*end),
                ),
                self.range,
            ),
            ScaleDomain::Categorical(_) => Err(ChartError::InvalidData(
                "categorical scales have no continuous mapping".to_owned(),
            )),
        }
    }

    fn category_position(&self, index: usize, count: usize) -> f64 {
        let step = (self.range.1 - self.range.0) / count as f64;
        self.range.0 + step * (index as f64 + 0.5)
    }
}

/// Builds a temporal domain from unix-millisecond endpoints.
pub fn temporal_domain(start_ms: f64, end_ms: f64) -> ChartResult<ScaleDomain> {
    Ok(ScaleDomain::Temporal {
        start: unix_millis_to_datetime(start_ms)?,
        end: unix_millis_to_datetime(end_ms)?,
    })
}
