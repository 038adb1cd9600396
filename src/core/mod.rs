pub mod axis_scale;
pub mod design;
pub mod domain_interpolation;
pub mod path;
pub mod primitives;
pub mod scale;
pub mod stack_layout;
pub mod ticks;
pub mod types;
pub mod value;

pub use axis_scale::{AxisScale, ScaleDomain, ScaleKind};
pub use design::{Design, DesignOverride, Font, FontOverride, LineOverride, LineStyle, Margin, MarginOverride};
pub use domain_interpolation::{ScaleInterpolator, interpolate_domain, interpolate_ticks};
pub use path::{Path, PathInterpolator, Resampling, interpolate_path};
pub use scale::LinearScale;
pub use stack_layout::{Band, StackLayoutComputer, StackSeries};
pub use ticks::DEFAULT_TICK_COUNT;
pub use types::{BoundingBox, Coordinates, Point, Viewport, lerp};
pub use value::{FieldValue, Record};
