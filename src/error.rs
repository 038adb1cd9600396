use std::fmt;

use thiserror::Error;

use crate::core::ScaleKind;

pub type ChartResult<T> = Result<T, ChartError>;

/// Definition element whose `field` reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOwner {
    Axis(String),
    Cast,
}

impl fmt::Display for FieldOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Axis(name) => write!(f, "axis `{name}`"),
            Self::Cast => f.write_str("cast"),
        }
    }
}

/// Coarse error taxonomy.
///
/// `Config` errors abort chart or transition construction, `Geometry` errors
/// surface on the first draw that needs the offending pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Geometry,
    Data,
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart has no name")]
    MissingName,

    #[error("there is no data for chart `{chart}`")]
    EmptyData { chart: String },

    #[error("there is no `{field}` field (referenced by {owner}) in the data provided to chart `{chart}`")]
    FieldNotFound {
        chart: String,
        field: String,
        owner: FieldOwner,
    },

    #[error("in chart `{chart}`, an axis named `{axis}` is missing")]
    AxisMissing { chart: String, axis: String },

    #[error("in chart `{chart}`, an axis named `{axis}` occurs more than once")]
    AxisAmbiguous { chart: String, axis: String },

    #[error("in chart `{chart}`, the character `{series}` can't be found in the `{field}` field")]
    SeriesNotFound {
        chart: String,
        series: String,
        field: String,
    },

    #[error("no chart named `{name}` has been built")]
    ChartNotFound { name: String },

    #[error("transition `{transition}` expects chart `{expected}` but got `{actual}`")]
    ChartMismatch {
        transition: String,
        expected: String,
        actual: String,
    },

    #[error("transition `{transition}` references unknown character `{name}` in chart `{chart}`")]
    UnknownCharacter {
        transition: String,
        chart: String,
        name: String,
    },

    #[error("transition `{transition}` references unknown axis `{name}` in chart `{chart}`")]
    UnknownAxis {
        transition: String,
        chart: String,
        name: String,
    },

    #[error("character `{character}` has no stacked baseline at x={x}")]
    MissingBaseline { character: String, x: String },

    #[error("cannot interpolate a {from} domain into a {to} domain")]
    DomainKindMismatch { from: ScaleKind, to: ScaleKind },

    #[error("categorical domains with different categories cannot be interpolated")]
    IncompatibleCategories,

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingName
            | Self::EmptyData { .. }
            | Self::FieldNotFound { .. }
            | Self::AxisMissing { .. }
            | Self::AxisAmbiguous { .. }
            | Self::SeriesNotFound { .. }
            | Self::ChartNotFound { .. }
            | Self::ChartMismatch { .. }
            | Self::UnknownCharacter { .. }
            | Self::UnknownAxis { .. }
            | Self::MissingBaseline { .. } => ErrorKind::Config,
            Self::DomainKindMismatch { .. } | Self::IncompatibleCategories => ErrorKind::Geometry,
            Self::InvalidViewport { .. } | Self::InvalidData(_) => ErrorKind::Data,
        }
    }
}
