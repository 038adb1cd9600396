//! chart-morph: declarative charts and scrubbable transitions between them.
//!
//! Charts are built once from serde definitions into immutable models
//! (`model`), drawn through a host-provided `RenderSurface` (`render`), and
//! animated by `TransitionChart`s that blend two built charts at a position
//! in `[0, 1]` (`transition`). The geometry underneath lives in `core`.

pub mod core;
pub mod error;
pub mod model;
pub mod render;
pub mod telemetry;
pub mod transition;

pub use error::{ChartError, ChartResult, ErrorKind};
pub use model::{ChartCatalog, ChartDefinition, ChartModel, TransitionDefinition};
pub use render::{Drawable, MountPoint, RecordingSurface, RenderSurface};
pub use transition::{TransitionChart, TransitionState};
