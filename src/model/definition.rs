use serde::{Deserialize, Serialize};

use crate::core::{Coordinates, DesignOverride, FieldValue, Record, Resampling, ScaleKind};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Where an annotation attaches along its owner's data.
///
/// Strings other than `"start"`/`"end"` are kept as written and resolve to
/// index `0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "AnchorRepr", into = "AnchorRepr")]
pub enum Anchor {
    #[default]
    Start,
    End,
    Index(usize),
    Unrecognized(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AnchorRepr {
    Index(f64),
    Text(String),
}

impl From<AnchorRepr> for Anchor {
    fn from(repr: AnchorRepr) -> Self {
        match repr {
            AnchorRepr::Index(index) if index.is_finite() && index >= 0.0 => {
                Self::Index(index as usize)
            }
            AnchorRepr::Index(_) => Self::Index(0),
            AnchorRepr::Text(text) => match text.as_str() {
                "start" => Self::Start,
                "end" => Self::End,
                _ => Self::Unrecognized(text),
            },
        }
    }
}

impl From<Anchor> for AnchorRepr {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::Start => Self::Text("start".to_owned()),
            Anchor::End => Self::Text("end".to_owned()),
            Anchor::Index(index) => Self::Index(index as f64),
            Anchor::Unrecognized(text) => Self::Text(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDefinition {
    pub name: String,
    #[serde(default)]
    pub offset: Coordinates,
    #[serde(default)]
    pub anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDefinition {
    pub name: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub kind: Option<ScaleKind>,
    #[serde(default)]
    pub ticks: Option<Vec<FieldValue>>,
    #[serde(default)]
    pub annotations: Vec<AnnotationDefinition>,
}

impl AxisDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: Some(field.into()),
            kind: None,
            ticks: None,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ScaleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: Vec<FieldValue>) -> Self {
        self.ticks = Some(ticks);
        self
    }
}

/// One named series; its selector field comes from the cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    pub name: String,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub annotations: Vec<AnnotationDefinition>,
}

impl CharacterDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color: Some(color),
            annotations: Vec::new(),
        }
    }
}

/// Names of the axes the cast's characters are drawn against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastAxes {
    #[serde(default = "default_x_axis")]
    pub x: String,
    #[serde(default = "default_y_axis")]
    pub y: String,
}

impl Default for CastAxes {
    fn default() -> Self {
        Self {
            x: default_x_axis(),
            y: default_y_axis(),
        }
    }
}

fn default_x_axis() -> String {
    "x".to_owned()
}

fn default_y_axis() -> String {
    "y".to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastDefinition {
    /// Series-selector field shared by every character.
    pub field: String,
    #[serde(default)]
    pub axes: CastAxes,
    #[serde(default)]
    pub characters: Vec<CharacterDefinition>,
}

/// Geometry used for a chart's characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Area,
    Stacked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub axes: Vec<AxisDefinition>,
    pub cast: CastDefinition,
    #[serde(default)]
    pub annotations: Vec<AnnotationDefinition>,
    #[serde(default)]
    pub design: Option<DesignOverride>,
    #[serde(default)]
    pub layout: LayoutKind,
}

impl ChartDefinition {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart definition json: {e}"))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    #[default]
    Morph,
    Fade,
}

/// Names one element of the `from` chart and its counterpart in `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDefinition {
    pub from: String,
    pub to: String,
}

impl PairDefinition {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Pairs an element with the same-named element of the other chart.
    #[must_use]
    pub fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            from: name.clone(),
            to: name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: TransitionKind,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub characters: Vec<PairDefinition>,
    #[serde(default)]
    pub axes: Vec<PairDefinition>,
    #[serde(default)]
    pub design: Option<DesignOverride>,
    #[serde(default)]
    pub resampling: Resampling,
}

impl TransitionDefinition {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: TransitionKind,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            kind,
            from: from.into(),
            to: to.into(),
            characters: Vec::new(),
            axes: Vec::new(),
            design: None,
            resampling: Resampling::default(),
        }
    }

    #[must_use]
    pub fn with_character(mut self, pair: PairDefinition) -> Self {
        self.characters.push(pair);
        self
    }

    #[must_use]
    pub fn with_axis(mut self, pair: PairDefinition) -> Self {
        self.axes.push(pair);
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse transition definition json: {e}"))
        })
    }
}
