use std::cell::Cell;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{Coordinates, Design, Record, StackSeries, Viewport};
use crate::error::{ChartError, ChartResult, FieldOwner};
use crate::render::{
    Drawable, FrameLayer, LayerRole, MountPoint, NodeId, RenderFrame, RenderSurface, TextHAlign,
    TextPrimitive,
};

use super::annotation::{TITLE_WORDS_PER_LINE, word_wrap};
use super::validation::validate_chart_definition;
use super::{
    AnnotationModel, AxisDefinition, AxisModel, AxisRole, CastAxes, CharacterContext,
    CharacterModel, ChartDefinition, LayoutKind, LayoutStrategy, PlainArea, StackedArea,
};

const TITLE_SCALE: f64 = 1.4;
const TITLE_LINE_SPACING: f64 = 2.0;

/// A validated chart: axes, characters and annotations laid out for one mount.
///
/// The model is immutable once built. Drawing only remembers which surface
/// groups it owns so later passes can replace them.
#[derive(Debug, Clone)]
pub struct ChartModel {
    name: String,
    data: Vec<Record>,
    axes: IndexMap<String, AxisModel>,
    characters: IndexMap<String, CharacterModel>,
    annotations: Vec<AnnotationModel>,
    design: Design,
    layout: LayoutKind,
    cast_axes: CastAxes,
    x_field: String,
    mount: MountPoint,
    viewport: Viewport,
    scene_group: Cell<Option<NodeId>>,
    character_group: Cell<Option<NodeId>>,
}

impl ChartModel {
    /// Validates `definition` and builds it with the layout it asks for.
    pub fn build(definition: &ChartDefinition, mount: MountPoint) -> ChartResult<Self> {
        match definition.layout {
            LayoutKind::Area => Self::build_with(definition, mount, &PlainArea),
            LayoutKind::Stacked => Self::build_with(definition, mount, &StackedArea),
        }
    }

    pub fn build_with<L: LayoutStrategy + ?Sized>(
        definition: &ChartDefinition,
        mount: MountPoint,
        layout: &L,
    ) -> ChartResult<Self> {
        let name = validate_chart_definition(definition)?;
        ensure_fields_in_every_record(definition, name)?;
        let design = Design::default().merged(definition.design.as_ref());

        let viewport = mount.viewport();
        let inner = Viewport::new(
            viewport.width - (design.margin.left + design.margin.right),
            viewport.height - (design.margin.top + design.margin.bottom),
        );
        if !inner.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: inner.width,
                height: inner.height,
            });
        }

        let cast = &definition.cast;
        let x_field = cast_axis_field(definition, &cast.axes.x)?;
        let y_field = cast_axis_field(definition, &cast.axes.y)?;

        let character_data: Vec<Vec<Record>> = cast
            .characters
            .iter()
            .map(|character| {
                definition
                    .data
                    .iter()
                    .filter(|record| {
                        record
                            .get(&cast.field)
                            .is_some_and(|value| value.selects(&character.name))
                    })
                    .cloned()
                    .collect()
            })
            .collect();

        let bands = {
            let series: Vec<StackSeries<'_>> = cast
                .characters
                .iter()
                .zip(&character_data)
                .map(|(character, records)| StackSeries {
                    name: &character.name,
                    records,
                })
                .collect();
            layout.bands(&series, x_field, y_field)?
        };
        let value_extent = layout.value_extent(&bands);

        let mut axes = IndexMap::with_capacity(definition.axes.len());
        for axis in &definition.axes {
            let model = if axis.name == cast.axes.y {
                AxisModel::build(axis, &definition.data, AxisRole::Vertical, inner, value_extent)?
            } else {
                AxisModel::build(axis, &definition.data, AxisRole::Horizontal, inner, None)?
            };
            axes.insert(axis.name.clone(), model);
        }

        let x_axis = lookup_axis(&axes, name, &cast.axes.x)?;
        let y_axis = lookup_axis(&axes, name, &cast.axes.y)?;
        let context = CharacterContext {
            field: &cast.field,
            x_field,
            x_axis,
            y_axis,
            default_color: design.line.color,
        };

        let mut characters = IndexMap::with_capacity(cast.characters.len());
        for ((character, records), character_bands) in
            cast.characters.iter().zip(character_data).zip(bands)
        {
            let model = CharacterModel::build(character, records, character_bands, context)?;
            characters.insert(character.name.clone(), model);
        }

        debug!(
            chart = name,
            records = definition.data.len(),
            axes = axes.len(),
            characters = characters.len(),
            layout = ?definition.layout,
            "built chart"
        );

        Ok(Self {
            name: name.to_owned(),
            data: definition.data.clone(),
            axes,
            characters,
            annotations: definition
                .annotations
                .iter()
                .map(AnnotationModel::new)
                .collect(),
            design,
            layout: definition.layout,
            cast_axes: cast.axes.clone(),
            x_field: x_field.to_owned(),
            mount,
            viewport,
            scene_group: Cell::new(None),
            character_group: Cell::new(None),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn data(&self) -> &[Record] {
        &self.data
    }

    #[must_use]
    pub fn axes(&self) -> &IndexMap<String, AxisModel> {
        &self.axes
    }

    #[must_use]
    pub fn axis(&self, name: &str) -> Option<&AxisModel> {
        self.axes.get(name)
    }

    #[must_use]
    pub fn characters(&self) -> &IndexMap<String, CharacterModel> {
        &self.characters
    }

    #[must_use]
    pub fn character(&self, name: &str) -> Option<&CharacterModel> {
        self.characters.get(name)
    }

    #[must_use]
    pub fn annotations(&self) -> &[AnnotationModel] {
        &self.annotations
    }

    #[must_use]
    pub fn design(&self) -> &Design {
        &self.design
    }

    #[must_use]
    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    #[must_use]
    pub fn mount(&self) -> MountPoint {
        self.mount
    }

    /// Screen origin of the chart's mount point.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.mount.coordinates()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.viewport.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.viewport.height
    }

    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.width() - (self.design.margin.left + self.design.margin.right)
    }

    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.height() - (self.design.margin.top + self.design.margin.bottom)
    }

    /// Axis the cast positions records along.
    #[must_use]
    pub fn x_axis(&self) -> Option<&AxisModel> {
        self.axes.get(&self.cast_axes.x)
    }

    /// Axis the cast's values are drawn against.
    #[must_use]
    pub fn y_axis(&self) -> Option<&AxisModel> {
        self.axes.get(&self.cast_axes.y)
    }

    /// Title lines, then one layer per axis.
    pub fn scene_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(Coordinates::default());
        let mut titles = FrameLayer::new("annotations", LayerRole::Scene, Coordinates::default());
        let size = self.design.font.size * TITLE_SCALE;
        for annotation in &self.annotations {
            let offset = annotation.offset();
            let x = self.design.margin.left + offset.left;
            let y = self.design.margin.top / 3.0 + offset.top;
            for (line_index, line) in word_wrap(annotation.name(), TITLE_WORDS_PER_LINE)
                .into_iter()
                .enumerate()
            {
                if line.is_empty() {
                    continue;
                }
                titles.push_text(
                    TextPrimitive::new(
                        line,
                        x,
                        y + line_index as f64 * TITLE_LINE_SPACING * self.design.font.size,
                        size,
                        self.design.font.color,
                        TextHAlign::Left,
                    )
                    .with_font_family(self.design.font.family.clone()),
                );
            }
        }
        frame.push_layer(titles);

        let origin = self.design.plot_origin();
        for axis in self.axes.values() {
            frame.push_layer(axis.frame_layer(origin, &self.design));
        }
        frame
    }

    /// One layer per character, in cast order.
    pub fn character_frame(&self) -> ChartResult<RenderFrame> {
        self.character_frame_with_opacity(&self.design, 1.0)
    }

    pub(crate) fn character_frame_with_opacity(
        &self,
        design: &Design,
        opacity: f64,
    ) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(Coordinates::default());
        for layer in self.character_layers(design, opacity)? {
            frame.push_layer(layer);
        }
        Ok(frame)
    }

    pub(crate) fn character_layers(
        &self,
        design: &Design,
        opacity: f64,
    ) -> ChartResult<Vec<FrameLayer>> {
        self.characters
            .values()
            .map(|character| self.character_layer(character, design, opacity))
            .collect()
    }

    /// Layer for one of this chart's characters, labels resolved on its axes.
    pub(crate) fn character_layer(
        &self,
        character: &CharacterModel,
        design: &Design,
        opacity: f64,
    ) -> ChartResult<FrameLayer> {
        let x_axis = lookup_axis(&self.axes, &self.name, &self.cast_axes.x)?;
        let y_axis = lookup_axis(&self.axes, &self.name, &self.cast_axes.y)?;
        let texts = character.annotation_texts(&self.x_field, x_axis, y_axis, design)?;
        Ok(character.frame_layer(design.plot_origin(), texts, opacity))
    }

    /// Emits `frame` into the group held by `slot`, creating it on first use.
    fn replace_group(
        &self,
        surface: &mut dyn RenderSurface,
        slot: &Cell<Option<NodeId>>,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        frame.validate()?;
        match slot.get() {
            Some(group) => {
                surface.clear_children(group)?;
                frame.emit_layers(surface, group)?;
            }
            None => slot.set(Some(frame.emit(surface, self.mount.node)?)),
        }
        Ok(())
    }
}

impl Drawable for ChartModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn draw(&self, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        self.hide(surface)?;
        self.draw_scene(surface)?;
        self.draw_characters(surface)
    }

    fn draw_scene(&self, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        let frame = self.scene_frame();
        self.replace_group(surface, &self.scene_group, &frame)?;
        trace!(chart = %self.name, primitives = frame.primitive_count(), "drew chart scene");
        Ok(())
    }

    fn draw_characters(&self, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        let frame = self.character_frame()?;
        self.replace_group(surface, &self.character_group, &frame)?;
        trace!(chart = %self.name, primitives = frame.primitive_count(), "drew chart characters");
        Ok(())
    }

    fn hide(&self, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        surface.clear_children(self.mount.node)?;
        self.scene_group.set(None);
        self.character_group.set(None);
        Ok(())
    }

    fn hide_characters(&self, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        if let Some(group) = self.character_group.get() {
            surface.clear_children(group)?;
        }
        Ok(())
    }
}

/// Every declared axis field and the cast field must be present on every record.
fn ensure_fields_in_every_record(definition: &ChartDefinition, chart: &str) -> ChartResult<()> {
    for (index, record) in definition.data.iter().enumerate() {
        for axis in &definition.axes {
            let Some(field) = axis.field.as_deref() else {
                continue;
            };
            if !record.contains_key(field) {
                debug!(chart, record = index, field, axis = %axis.name, "record lacks axis field");
                return Err(ChartError::FieldNotFound {
                    chart: chart.to_owned(),
                    field: field.to_owned(),
                    owner: FieldOwner::Axis(axis.name.clone()),
                });
            }
        }
        if !record.contains_key(&definition.cast.field) {
            debug!(chart, record = index, field = %definition.cast.field, "record lacks cast field");
            return Err(ChartError::FieldNotFound {
                chart: chart.to_owned(),
                field: definition.cast.field.clone(),
                owner: FieldOwner::Cast,
            });
        }
    }
    Ok(())
}

fn cast_axis_field<'a>(definition: &'a ChartDefinition, axis: &str) -> ChartResult<&'a str> {
    let chart = definition.name.as_deref().unwrap_or_default();
    let found: Option<&AxisDefinition> = definition.axes.iter().find(|entry| entry.name == axis);
    let Some(found) = found else {
        return Err(ChartError::AxisMissing {
            chart: chart.to_owned(),
            axis: axis.to_owned(),
        });
    };
    found.field.as_deref().ok_or_else(|| {
        ChartError::InvalidData(format!(
            "in chart `{chart}`, the cast axis `{axis}` declares no field"
        ))
    })
}

fn lookup_axis<'a>(
    axes: &'a IndexMap<String, AxisModel>,
    chart: &str,
    axis: &str,
) -> ChartResult<&'a AxisModel> {
    axes.get(axis).ok_or_else(|| ChartError::AxisMissing {
        chart: chart.to_owned(),
        axis: axis.to_owned(),
    })
}
