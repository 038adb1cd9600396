use crate::core::{Band, Coordinates, Design, Path, Point, Record};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FrameLayer, LayerRole, PathStyle, TextHAlign, TextPrimitive};

use super::{AnnotationModel, AxisModel, CharacterDefinition};

const ANNOTATION_DX: f64 = 5.0;
const ANNOTATION_DY: f64 = 10.0;

/// Everything a character needs from its chart to lay out its shape.
#[derive(Debug, Clone, Copy)]
pub struct CharacterContext<'a> {
    /// Series-selector field of the cast.
    pub field: &'a str,
    pub x_field: &'a str,
    pub x_axis: &'a AxisModel,
    pub y_axis: &'a AxisModel,
    pub default_color: Color,
}

/// One named series: its records, value bands and outline in plot space.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterModel {
    name: String,
    field: String,
    color: Color,
    data: Vec<Record>,
    bands: Vec<Band>,
    path: Path,
    annotations: Vec<AnnotationModel>,
}

impl CharacterModel {
    /// Builds the outline: forward along each band's `min`, back along `max`.
    pub fn build(
        definition: &CharacterDefinition,
        data: Vec<Record>,
        bands: Vec<Band>,
        context: CharacterContext<'_>,
    ) -> ChartResult<Self> {
        if data.is_empty() {
            return Err(ChartError::InvalidData(format!(
                "character `{}` has no records",
                definition.name
            )));
        }
        if data.len() != bands.len() {
            return Err(ChartError::InvalidData(format!(
                "character `{}` has {} records but {} bands",
                definition.name,
                data.len(),
                bands.len()
            )));
        }

        let xs = data
            .iter()
            .map(|record| x_position(record, &definition.name, context))
            .collect::<ChartResult<Vec<f64>>>()?;

        let y_scale = context.y_axis.scale();
        let mut points = Vec::with_capacity(xs.len() * 2);
        for (x, band) in xs.iter().zip(&bands) {
            points.push(Point::new(*x, y_scale.map_number(band.min)?));
        }
        for (x, band) in xs.iter().zip(&bands).rev() {
            points.push(Point::new(*x, y_scale.map_number(band.max)?));
        }

        Ok(Self {
            name: definition.name.clone(),
            field: context.field.to_owned(),
            color: definition.color.unwrap_or(context.default_color),
            data,
            bands,
            path: Path::new(points),
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
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn data(&self) -> &[Record] {
        &self.data
    }

    #[must_use]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn annotations(&self) -> &[AnnotationModel] {
        &self.annotations
    }

    #[must_use]
    pub fn style(&self) -> PathStyle {
        PathStyle::filled(self.color)
    }

    /// Label positions, resolved against the chart's scales.
    pub(crate) fn annotation_texts(
        &self,
        x_field: &str,
        x_axis: &AxisModel,
        y_axis: &AxisModel,
        design: &Design,
    ) -> ChartResult<Vec<TextPrimitive>> {
        let context = CharacterContext {
            field: &self.field,
            x_field,
            x_axis,
            y_axis,
            default_color: self.color,
        };
        let mut texts = Vec::with_capacity(self.annotations.len());
        for annotation in &self.annotations {
            if annotation.name().is_empty() {
                continue;
            }
            let index = annotation.anchor_index(self.data.len());
            let x = x_position(&self.data[index], &self.name, context)?;
            let y = y_axis.scale().map_number(self.bands[index].max)?;
            let offset = annotation.offset();
            texts.push(
                TextPrimitive::new(
                    annotation.name(),
                    x + ANNOTATION_DX + offset.left,
                    y + ANNOTATION_DY + offset.top,
                    design.font.size,
                    self.color,
                    TextHAlign::Left,
                )
                .with_font_family(design.font.family.clone()),
            );
        }
        Ok(texts)
    }

    /// Layer holding this character's outline and labels.
    pub(crate) fn frame_layer(
        &self,
        origin: Coordinates,
        texts: Vec<TextPrimitive>,
        opacity: f64,
    ) -> FrameLayer {
        let mut layer = FrameLayer::new(self.name.clone(), LayerRole::Characters, origin);
        layer.push_path(self.path.clone(), self.style().with_opacity(opacity));
        for mut text in texts {
            text.color.alpha *= opacity;
            layer.push_text(text);
        }
        layer
    }
}

fn x_position(record: &Record, character: &str, context: CharacterContext<'_>) -> ChartResult<f64> {
    let value = record.get(context.x_field).ok_or_else(|| {
        ChartError::InvalidData(format!(
            "a record of character `{character}` has no `{}` field",
            context.x_field
        ))
    })?;
    context.x_axis.scale().map(value)
}
