mod annotation;
mod axis;
mod catalog;
mod character;
mod chart;
mod definition;
mod layout;
mod validation;

pub use annotation::{AnnotationModel, TITLE_WORDS_PER_LINE, word_wrap};
pub use axis::{AxisModel, AxisRole};
pub use catalog::ChartCatalog;
pub use character::{CharacterContext, CharacterModel};
pub use chart::ChartModel;
pub use definition::{
    Anchor, AnnotationDefinition, AxisDefinition, CastAxes, CastDefinition, CharacterDefinition,
    ChartDefinition, LayoutKind, PairDefinition, TransitionDefinition, TransitionKind,
};
pub use layout::{LayoutStrategy, PlainArea, StackedArea};
