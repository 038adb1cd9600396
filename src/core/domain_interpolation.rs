use crate::core::axis_scale::temporal_domain;
use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::types::lerp;
use crate::core::{FieldValue, ScaleDomain, ScaleKind};
use crate::error::{ChartError, ChartResult};

/// Interpolates between two scale domains of the same kind.
///
/// Kinds are checked once, when the interpolator is created; `at` then only
/// does componentwise endpoint interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleInterpolator {
    from: ScaleDomain,
    to: ScaleDomain,
}

impl ScaleInterpolator {
    pub fn new(from: &ScaleDomain, to: &ScaleDomain) -> ChartResult<Self> {
        match (from, to) {
            (ScaleDomain::Numeric { .. }, ScaleDomain::Numeric { .. })
            | (ScaleDomain::Temporal { .. }, ScaleDomain::Temporal { .. }) => {}
            (ScaleDomain::Categorical(left), ScaleDomain::Categorical(right)) => {
                if left != right {
                    return Err(ChartError::IncompatibleCategories);
                }
            }
            _ => {
                return Err(ChartError::DomainKindMismatch {
                    from: from.kind(),
                    to: to.kind(),
                });
            }
        }

        Ok(Self {
            from: from.clone(),
            to: to.clone(),
        })
    }

    /// Domain at `position`; `0` and `1` return the input domains themselves.
    pub fn at(&self, position: f64) -> ChartResult<ScaleDomain> {
        if position == 0.0 {
            return Ok(self.from.clone());
        }
        if position == 1.0 {
            return Ok(self.to.clone());
        }

        match (&self.from, &self.to) {
            (
                ScaleDomain::Numeric { start, end },
                ScaleDomain::Numeric {
                    start: to_start,
                    end: to_end,
                },
            ) => Ok(ScaleDomain::Numeric {
                start: lerp(*start, *to_start, position),
                end: lerp(*end, *to_end, position),
            }),
            (
                ScaleDomain::Temporal { start, end },
                ScaleDomain::Temporal {
                    start: to_start,
                    end: to_end,
                },
            ) => temporal_domain(
                lerp(
                    datetime_to_unix_millis(*start),
                    datetime_to_unix_millis(*to_start),
                    position,
                ),
                lerp(
                    datetime_to_unix_millis(*end),
                    datetime_to_unix_millis(*to_end),
                    position,
                ),
            ),
            (categorical, _) => Ok(categorical.clone()),
        }
    }
}

/// One-shot domain interpolation, see [`ScaleInterpolator`].
pub fn interpolate_domain(
    from: &ScaleDomain,
    to: &ScaleDomain,
    position: f64,
) -> ChartResult<ScaleDomain> {
    ScaleInterpolator::new(from, to)?.at(position)
}

/// Interpolates explicit tick lists index by index.
///
/// The result takes the length of `to`; ticks beyond the end of `from` are
/// copied from `to` unchanged.
pub fn interpolate_ticks(
    from: &[FieldValue],
    to: &[FieldValue],
    position: f64,
) -> ChartResult<Vec<FieldValue>> {
    to.iter()
        .enumerate()
        .map(|(index, target)| match from.get(index) {
            Some(origin) => interpolate_value(origin, target, position),
            None => Ok(target.clone()),
        })
        .collect()
}

fn interpolate_value(
    from: &FieldValue,
    to: &FieldValue,
    position: f64,
) -> ChartResult<FieldValue> {
    match (from, to) {
        (FieldValue::Number(left), FieldValue::Number(right)) => {
            Ok(FieldValue::Number(lerp(*left, *right, position)))
        }
        (FieldValue::Date(left), FieldValue::Date(right)) => {
            let millis = lerp(
                datetime_to_unix_millis(*left),
                datetime_to_unix_millis(*right),
                position,
            );
            Ok(FieldValue::Date(unix_millis_to_datetime(millis)?))
        }
        (FieldValue::Text(_), FieldValue::Text(_)) => Ok(to.clone()),
        _ => Err(ChartError::DomainKindMismatch {
            from: value_kind(from),
            to: value_kind(to),
        }),
    }
}

fn value_kind(value: &FieldValue) -> ScaleKind {
    match value {
        FieldValue::Number(_) => ScaleKind::Linear,
        FieldValue::Date(_) => ScaleKind::Time,
        FieldValue::Text(_) => ScaleKind::Categorical,
    }
}
