mod axis_renderer;
mod frame;
pub mod label_format;
mod primitives;
mod recording_surface;
mod surface;

pub use axis_renderer::{AxisOrientation, push_axis};
pub use frame::{FrameLayer, FramePath, LayerRole, RenderFrame};
pub use primitives::{Color, PathStyle, TextHAlign, TextPrimitive};
pub use recording_surface::{
    RecordingSurface, RenderedPath, RenderedText, SceneNode, SceneNodeKind,
};
pub use surface::{Drawable, FALLBACK_VIEWPORT, MountPoint, NodeId, RenderSurface};
