use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{AxisScale, Design, FieldValue, Path, Point};
use crate::render::label_format::format_tick;
use crate::render::{FrameLayer, PathStyle, TextHAlign, TextPrimitive};

const TICK_SIZE_PX: f64 = 6.0;
const TICK_PADDING_PX: f64 = 3.0;
const AXIS_STROKE_PX: f64 = 1.0;

/// Side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrientation {
    Bottom,
    Left,
}

/// Adds a domain line, tick marks and tick labels to `layer`.
///
/// Returns the number of primitives added.
pub fn push_axis(
    layer: &mut FrameLayer,
    orientation: AxisOrientation,
    scale: &AxisScale,
    ticks: &[FieldValue],
    tick_count: usize,
    design: &Design,
) -> usize {
    let stroke = PathStyle::stroked(design.font.color, AXIS_STROKE_PX);
    let (range_start, range_end) = scale.range();
    let outer = -TICK_SIZE_PX;
    let before = layer.primitive_count();

    let domain_line = match orientation {
        AxisOrientation::Bottom => Path::new(vec![
            Point::new(range_start, TICK_SIZE_PX),
            Point::new(range_start, 0.0),
            Point::new(range_end, 0.0),
            Point::new(range_end, TICK_SIZE_PX),
        ]),
        AxisOrientation::Left => Path::new(vec![
            Point::new(outer, range_start),
            Point::new(0.0, range_start),
            Point::new(0.0, range_end),
            Point::new(outer, range_end),
        ]),
    };
    layer.push_path(domain_line, stroke);

    for tick in ticks {
        let position = match scale.map(tick) {
            Ok(position) => position,
            Err(err) => {
                warn!(axis = %layer.name, error = %err, "skipping tick the axis scale cannot place");
                continue;
            }
        };
        let label = format_tick(tick, scale, tick_count);

        let (mark, text) = match orientation {
            AxisOrientation::Bottom => (
                Path::new(vec![
                    Point::new(position, 0.0),
                    Point::new(position, TICK_SIZE_PX),
                ]),
                TextPrimitive::new(
                    label,
                    position,
                    TICK_SIZE_PX + TICK_PADDING_PX + design.font.size,
                    design.font.size,
                    design.font.color,
                    TextHAlign::Center,
                ),
            ),
            AxisOrientation::Left => (
                Path::new(vec![Point::new(outer, position), Point::new(0.0, position)]),
                TextPrimitive::new(
                    label,
                    outer - TICK_PADDING_PX,
                    position + design.font.size / 3.0,
                    design.font.size,
                    design.font.color,
                    TextHAlign::Right,
                ),
            ),
        };

        layer.push_path(mark, stroke);
        if !text.text.is_empty() {
            layer.push_text(text.with_font_family(design.font.family.clone()));
        }
    }

    layer.primitive_count() - before
}
