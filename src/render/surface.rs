use serde::{Deserialize, Serialize};

use crate::core::{BoundingBox, Coordinates, Path, Viewport};
use crate::error::ChartResult;
use crate::render::{PathStyle, TextPrimitive};

/// Opaque handle to a node owned by a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Drawing capability the chart core renders through.
///
/// The core creates and clears children under nodes it is handed; creating or
/// removing the mount nodes themselves is the host's job.
pub trait RenderSurface {
    /// Appends a group translated by `transform` relative to `parent`.
    fn create_group(&mut self, parent: NodeId, transform: Coordinates) -> ChartResult<NodeId>;

    fn append_path(&mut self, parent: NodeId, path: &Path, style: &PathStyle)
    -> ChartResult<NodeId>;

    fn append_text(&mut self, parent: NodeId, text: &TextPrimitive) -> ChartResult<NodeId>;

    /// Removes every descendant of `node`, keeping `node` itself.
    fn clear_children(&mut self, node: NodeId) -> ChartResult<()>;

    /// Screen-space box of `node`.
    fn measure_bounding_box(&self, node: NodeId) -> ChartResult<BoundingBox>;
}

/// Size used when a mount point reports an empty box.
pub const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 1080.0,
    height: 720.0,
};

/// Host-provided node a chart or transition renders into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountPoint {
    pub node: NodeId,
    pub bounds: BoundingBox,
}

impl MountPoint {
    #[must_use]
    pub const fn new(node: NodeId, bounds: BoundingBox) -> Self {
        Self { node, bounds }
    }

    /// Captures the current screen box of `node`.
    pub fn measure<S: RenderSurface + ?Sized>(surface: &S, node: NodeId) -> ChartResult<Self> {
        Ok(Self::new(node, surface.measure_bounding_box(node)?))
    }

    /// Screen origin of the mount.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.bounds.origin()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        if self.bounds.is_empty() {
            FALLBACK_VIEWPORT
        } else {
            Viewport::new(self.bounds.width, self.bounds.height)
        }
    }
}

/// Anything that renders itself into a mount point.
pub trait Drawable {
    fn name(&self) -> &str;

    /// Full redraw: clears previous output first.
    fn draw(&self, surface: &mut dyn RenderSurface) -> ChartResult<()>;

    /// Annotations and axes only.
    fn draw_scene(&self, surface: &mut dyn RenderSurface) -> ChartResult<()>;

    fn draw_characters(&self, surface: &mut dyn RenderSurface) -> ChartResult<()>;

    /// Clears everything rendered under the mount point.
    fn hide(&self, surface: &mut dyn RenderSurface) -> ChartResult<()>;

    fn hide_characters(&self, surface: &mut dyn RenderSurface) -> ChartResult<()>;
}
