use indexmap::IndexSet;

use crate::core::axis_scale::temporal_domain;
use crate::core::primitives::{datetime_to_unix_millis, normalize_range};
use crate::core::{
    AxisScale, Coordinates, DEFAULT_TICK_COUNT, Design, FieldValue, Record, ScaleDomain,
    ScaleKind, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{AxisOrientation, FrameLayer, LayerRole, TextHAlign, TextPrimitive, push_axis};

use super::{AnnotationModel, AxisDefinition};

const UNIT_SPAN: f64 = 1.0;
const DAY_MS: f64 = 86_400_000.0;

/// Part an axis plays for the chart's cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRole {
    /// Positions records horizontally; any kind of domain.
    Horizontal,
    /// Carries the cast's values; always linear and drawn top-down.
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisModel {
    name: String,
    field: Option<String>,
    orientation: AxisOrientation,
    scale: AxisScale,
    ticks: Option<Vec<FieldValue>>,
    width: f64,
    height: f64,
    annotations: Vec<AnnotationModel>,
}

impl AxisModel {
    /// Builds the axis scale over `data`.
    ///
    /// A vertical axis spans `value_extent` when one is given (the layout's
    /// band extent) and the field's own extent otherwise.
    pub fn build(
        definition: &AxisDefinition,
        data: &[Record],
        role: AxisRole,
        extent: Viewport,
        value_extent: Option<(f64, f64)>,
    ) -> ChartResult<Self> {
        let (orientation, scale) = match role {
            AxisRole::Vertical => {
                if let Some(kind) = definition.kind.filter(|kind| *kind != ScaleKind::Linear) {
                    return Err(ChartError::InvalidData(format!(
                        "axis `{}` carries the cast's values and cannot be {kind}",
                        definition.name
                    )));
                }
                let (low, high) = match value_extent {
                    Some(bounds) => bounds,
                    None => numeric_extent(definition, data)?,
                };
                let (low, high) = normalize_range(low, high, UNIT_SPAN)?;
                let domain = ScaleDomain::Numeric {
                    start: low,
                    end: high,
                }
                .reversed();
                (
                    AxisOrientation::Left,
                    AxisScale::new(domain, (0.0, extent.height))?,
                )
            }
            AxisRole::Horizontal => (
                AxisOrientation::Bottom,
                AxisScale::new(horizontal_domain(definition, data)?, (0.0, extent.width))?,
            ),
        };

        Ok(Self {
            name: definition.name.clone(),
            field: definition.field.clone(),
            orientation,
            scale,
            ticks: definition.ticks.clone(),
            width: extent.width,
            height: extent.height,
            annotations: definition
                .annotations
                .iter()
                .map(AnnotationModel::new)
                .collect(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    #[must_use]
    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    /// Explicit ticks from the definition, if any.
    #[must_use]
    pub fn explicit_ticks(&self) -> Option<&[FieldValue]> {
        self.ticks.as_deref()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn annotations(&self) -> &[AnnotationModel] {
        &self.annotations
    }

    /// Explicit ticks, or the scale's own ticks for the default count.
    #[must_use]
    pub fn tick_values(&self) -> Vec<FieldValue> {
        match &self.ticks {
            Some(ticks) => ticks.clone(),
            None => self.scale.ticks(DEFAULT_TICK_COUNT),
        }
    }

    /// Offset of the axis group inside the plot area.
    #[must_use]
    pub fn translate(&self) -> Coordinates {
        match self.orientation {
            AxisOrientation::Bottom => Coordinates::new(0.0, self.height),
            AxisOrientation::Left => Coordinates::default(),
        }
    }

    pub(crate) fn frame_layer(&self, origin: Coordinates, design: &Design) -> FrameLayer {
        self.frame_layer_with(&self.scale, &self.tick_values(), origin, design)
    }

    /// Draws this axis' placement and annotations around a substitute scale.
    pub(crate) fn frame_layer_with(
        &self,
        scale: &AxisScale,
        ticks: &[FieldValue],
        origin: Coordinates,
        design: &Design,
    ) -> FrameLayer {
        let mut layer = FrameLayer::new(
            self.name.clone(),
            LayerRole::Scene,
            origin.offset_by(self.translate()),
        );
        push_axis(
            &mut layer,
            self.orientation,
            scale,
            ticks,
            DEFAULT_TICK_COUNT,
            design,
        );
        for annotation in &self.annotations {
            if annotation.name().is_empty() {
                continue;
            }
            let offset = annotation.offset();
            layer.push_text(
                TextPrimitive::new(
                    annotation.name(),
                    offset.left,
                    offset.top,
                    design.font.size,
                    design.font.color,
                    TextHAlign::Left,
                )
                .with_font_family(design.font.family.clone()),
            );
        }
        layer
    }
}

fn field_values<'a>(
    definition: &'a AxisDefinition,
    data: &'a [Record],
) -> Option<impl Iterator<Item = &'a FieldValue> + 'a> {
    let field = definition.field.as_deref()?;
    Some(data.iter().filter_map(move |record| record.get(field)))
}

fn numeric_extent(definition: &AxisDefinition, data: &[Record]) -> ChartResult<(f64, f64)> {
    let Some(values) = field_values(definition, data) else {
        return Ok((0.0, UNIT_SPAN));
    };
    let mut extent: Option<(f64, f64)> = None;
    for value in values {
        let number = value.as_number().ok_or_else(|| {
            ChartError::InvalidData(format!(
                "axis `{}` expects numbers but found `{value}`",
                definition.name
            ))
        })?;
        let (low, high) = extent.unwrap_or((number, number));
        extent = Some((low.min(number), high.max(number)));
    }
    Ok(extent.unwrap_or((0.0, UNIT_SPAN)))
}

fn inferred_kind(definition: &AxisDefinition, data: &[Record]) -> ScaleKind {
    if let Some(kind) = definition.kind {
        return kind;
    }
    match field_values(definition, data).and_then(|mut values| values.next()) {
        Some(FieldValue::Date(_)) => ScaleKind::Time,
        Some(FieldValue::Text(_)) => ScaleKind::Categorical,
        Some(FieldValue::Number(_)) | None => ScaleKind::Linear,
    }
}

fn horizontal_domain(definition: &AxisDefinition, data: &[Record]) -> ChartResult<ScaleDomain> {
    match inferred_kind(definition, data) {
        ScaleKind::Linear => {
            let (low, high) = numeric_extent(definition, data)?;
            let (start, end) = normalize_range(low, high, UNIT_SPAN)?;
            Ok(ScaleDomain::Numeric { start, end })
        }
        ScaleKind::Time => {
            let Some(values) = field_values(definition, data) else {
                return temporal_domain(0.0, DAY_MS);
            };
            let mut extent: Option<(f64, f64)> = None;
            for value in values {
                let millis = value.as_date().map(datetime_to_unix_millis).ok_or_else(|| {
                    ChartError::InvalidData(format!(
                        "axis `{}` expects dates but found `{value}`",
                        definition.name
                    ))
                })?;
                let (low, high) = extent.unwrap_or((millis, millis));
                extent = Some((low.min(millis), high.max(millis)));
            }
            let (low, high) = extent.unwrap_or((0.0, DAY_MS));
            let (start, end) = normalize_range(low, high, DAY_MS)?;
            temporal_domain(start, end)
        }
        ScaleKind::Categorical => {
            let mut categories = IndexSet::new();
            if let Some(values) = field_values(definition, data) {
                for value in values {
                    let text = value.as_text().ok_or_else(|| {
                        ChartError::InvalidData(format!(
                            "axis `{}` expects category names but found `{value}`",
                            definition.name
                        ))
                    })?;
                    categories.insert(text.to_owned());
                }
            }
            Ok(ScaleDomain::Categorical(categories.into_iter().collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{AxisModel, AxisRole};
    use crate::core::{Coordinates, FieldValue, Record, ScaleDomain, ScaleKind, Viewport};
    use crate::model::AxisDefinition;
    use crate::render::AxisOrientation;

    fn records(values: &[(FieldValue, f64)]) -> Vec<Record> {
        values
            .iter()
            .map(|(x, y)| {
                let mut record = Record::new();
                record.insert("date".to_owned(), x.clone());
                record.insert("value".to_owned(), FieldValue::Number(*y));
                record
            })
            .collect()
    }

    #[test]
    fn vertical_axis_is_reversed_over_its_height() {
        let data = records(&[(FieldValue::Number(1.0), 4.0), (FieldValue::Number(2.0), 9.0)]);
        let axis = AxisModel::build(
            &AxisDefinition::new("y", "value"),
            &data,
            AxisRole::Vertical,
            Viewport::new(200.0, 100.0),
            None,
        )
        .expect("axis");

        assert_eq!(axis.orientation(), AxisOrientation::Left);
        assert_eq!(
            axis.scale().domain(),
            &ScaleDomain::Numeric {
                start: 9.0,
                end: 4.0
            }
        );
        assert_eq!(axis.scale().range(), (0.0, 100.0));
        assert_eq!(axis.translate(), Coordinates::default());
    }

    #[test]
    fn horizontal_axis_infers_time_from_dates() {
        let jan = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("date");
        let mar = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("date");
        let data = records(&[(FieldValue::Date(mar), 1.0), (FieldValue::Date(jan), 2.0)]);
        let axis = AxisModel::build(
            &AxisDefinition::new("x", "date"),
            &data,
            AxisRole::Horizontal,
            Viewport::new(300.0, 100.0),
            None,
        )
        .expect("axis");

        assert_eq!(axis.scale().kind(), ScaleKind::Time);
        assert_eq!(
            axis.scale().domain(),
            &ScaleDomain::Temporal {
                start: jan,
                end: mar
            }
        );
        assert_eq!(axis.translate(), Coordinates::new(0.0, 100.0));
        assert!(axis.tick_values().len() > 1);
    }

    #[test]
    fn explicit_ticks_override_scale_ticks() {
        let data = records(&[(FieldValue::Number(0.0), 0.0), (FieldValue::Number(10.0), 1.0)]);
        let definition = AxisDefinition::new("x", "date")
            .with_ticks(vec![FieldValue::Number(0.0), FieldValue::Number(10.0)]);
        let axis = AxisModel::build(
            &definition,
            &data,
            AxisRole::Horizontal,
            Viewport::new(100.0, 100.0),
            None,
        )
        .expect("axis");
        assert_eq!(axis.tick_values().len(), 2);
    }

    #[test]
    fn vertical_axis_rejects_non_numeric_kind() {
        let data = records(&[(FieldValue::Number(0.0), 0.0)]);
        let definition = AxisDefinition::new("y", "value").with_kind(ScaleKind::Time);
        assert!(
            AxisModel::build(
                &definition,
                &data,
                AxisRole::Vertical,
                Viewport::new(100.0, 100.0),
                None
            )
            .is_err()
        );
    }
}
