use serde::{Deserialize, Serialize};

use crate::core::Coordinates;
use crate::render::Color;

const DEFAULT_INK: Color = Color::rgb(0x22 as f64 / 255.0, 0x22 as f64 / 255.0, 0x22 as f64 / 255.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub weight: f64,
}

/// Visual theme shared by a chart's axes, characters and annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub font: Font,
    pub margin: Margin,
    pub line: LineStyle,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            font: Font {
                family: "Fira Sans".to_owned(),
                size: 10.0,
                color: DEFAULT_INK,
            },
            margin: Margin {
                left: 80.0,
                top: 140.0,
                right: 80.0,
                bottom: 80.0,
            },
            line: LineStyle {
                color: DEFAULT_INK,
                weight: 3.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOverride {
    pub family: Option<String>,
    pub size: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginOverride {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOverride {
    pub color: Option<Color>,
    pub weight: Option<f64>,
}

/// Partial design; only keys that are present replace the base value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignOverride {
    pub font: Option<FontOverride>,
    pub margin: Option<MarginOverride>,
    pub line: Option<LineOverride>,
}

impl Design {
    /// Deep-merges `overrides` onto `self` and returns the result.
    #[must_use]
    pub fn merged(&self, overrides: Option<&DesignOverride>) -> Self {
        let Some(overrides) = overrides else {
            return self.clone();
        };
        let mut design = self.clone();

        if let Some(font) = &overrides.font {
            if let Some(family) = &font.family {
                design.font.family.clone_from(family);
            }
            design.font.size = font.size.unwrap_or(design.font.size);
            design.font.color = font.color.unwrap_or(design.font.color);
        }
        if let Some(margin) = overrides.margin {
            design.margin.left = margin.left.unwrap_or(design.margin.left);
            design.margin.top = margin.top.unwrap_or(design.margin.top);
            design.margin.right = margin.right.unwrap_or(design.margin.right);
            design.margin.bottom = margin.bottom.unwrap_or(design.margin.bottom);
        }
        if let Some(line) = overrides.line {
            design.line.color = line.color.unwrap_or(design.line.color);
            design.line.weight = line.weight.unwrap_or(design.line.weight);
        }

        design
    }

    /// Top-left corner of the plot area inside the margins.
    #[must_use]
    pub fn plot_origin(&self) -> Coordinates {
        Coordinates::new(self.margin.left, self.margin.top)
    }
}
