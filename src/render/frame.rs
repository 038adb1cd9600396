use crate::core::{Coordinates, Path};
use crate::error::{ChartError, ChartResult};
use crate::render::{NodeId, PathStyle, RenderSurface, TextPrimitive};

/// What a layer holds; hiding characters only touches `Characters` layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    Scene,
    Characters,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FramePath {
    pub path: Path,
    pub style: PathStyle,
}

/// One translated group of primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayer {
    pub name: String,
    pub role: LayerRole,
    pub offset: Coordinates,
    pub paths: Vec<FramePath>,
    pub texts: Vec<TextPrimitive>,
}

impl FrameLayer {
    #[must_use]
    pub fn new(name: impl Into<String>, role: LayerRole, offset: Coordinates) -> Self {
        Self {
            name: name.into(),
            role,
            offset,
            paths: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn push_path(&mut self, path: Path, style: PathStyle) {
        self.paths.push(FramePath { path, style });
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.texts.push(text);
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.paths.len() + self.texts.len()
    }
}

/// Backend-agnostic scene for one draw pass.
///
/// Frames are fully computed and validated before anything touches the
/// surface, so a failing computation never leaves half a scene behind.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub offset: Coordinates,
    pub layers: Vec<FrameLayer>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(offset: Coordinates) -> Self {
        Self {
            offset,
            layers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer: FrameLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn push_layer(&mut self, layer: FrameLayer) {
        self.layers.push(layer);
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.offset.left.is_finite() || !self.offset.top.is_finite() {
            return Err(ChartError::InvalidData(
                "frame offset must be finite".to_owned(),
            ));
        }

        for layer in &self.layers {
            if !layer.offset.left.is_finite() || !layer.offset.top.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "layer `{}` has a non-finite offset",
                    layer.name
                )));
            }
            for entry in &layer.paths {
                entry.style.validate()?;
                if entry
                    .path
                    .points()
                    .iter()
                    .any(|point| !point.x.is_finite() || !point.y.is_finite())
                {
                    return Err(ChartError::InvalidData(format!(
                        "layer `{}` holds a path with non-finite points",
                        layer.name
                    )));
                }
            }
            for text in &layer.texts {
                text.validate()?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.primitive_count() == 0)
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.layers.iter().map(FrameLayer::primitive_count).sum()
    }

    /// Creates a group at `offset` under `parent` and emits every layer in it.
    pub fn emit(&self, surface: &mut dyn RenderSurface, parent: NodeId) -> ChartResult<NodeId> {
        let root = surface.create_group(parent, self.offset)?;
        self.emit_layers(surface, root)?;
        Ok(root)
    }

    /// Emits every layer into an existing group, ignoring `offset`.
    pub fn emit_layers(&self, surface: &mut dyn RenderSurface, group: NodeId) -> ChartResult<()> {
        for layer in &self.layers {
            let node = surface.create_group(group, layer.offset)?;
            for entry in &layer.paths {
                surface.append_path(node, &entry.path, &entry.style)?;
            }
            for text in &layer.texts {
                surface.append_text(node, text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameLayer, LayerRole, RenderFrame};
    use crate::core::{BoundingBox, Coordinates, Path, Point};
    use crate::render::{Color, PathStyle, RecordingSurface};

    #[test]
    fn emit_nests_layers_under_one_group() {
        let mut layer = FrameLayer::new("line", LayerRole::Characters, Coordinates::new(10.0, 20.0));
        layer.push_path(
            Path::new(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]),
            PathStyle::filled(Color::rgb(1.0, 0.0, 0.0)),
        );
        let frame = RenderFrame::new(Coordinates::new(1.0, 2.0)).with_layer(layer);
        frame.validate().expect("valid frame");

        let mut surface = RecordingSurface::new();
        let mount = surface.add_mount(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
        let root = frame.emit(&mut surface, mount).expect("emit");

        assert_eq!(surface.children(mount), &[root]);
        let paths = surface.paths(root);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].offset, Coordinates::new(11.0, 22.0));
    }

    #[test]
    fn non_finite_points_fail_validation() {
        let mut layer = FrameLayer::new("bad", LayerRole::Scene, Coordinates::default());
        layer.push_path(
            Path::new(vec![Point::new(f64::NAN, 0.0)]),
            PathStyle::filled(Color::rgb(0.0, 0.0, 0.0)),
        );
        assert!(RenderFrame::new(Coordinates::default()).with_layer(layer).validate().is_err());
    }
}
