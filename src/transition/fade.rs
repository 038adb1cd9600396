use tracing::debug;

use crate::core::{Coordinates, Design};
use crate::error::{ChartError, ChartResult};
use crate::model::{AxisModel, CharacterModel, ChartModel, TransitionDefinition};
use crate::render::{FrameLayer, RenderFrame};

use super::TransitionCore;
use super::morph::resolve_pair;

/// `to`'s axis, drawn undeformed.
#[derive(Debug, Clone, Copy)]
pub struct FadingAxis<'a> {
    axis: &'a AxisModel,
}

impl<'a> FadingAxis<'a> {
    #[must_use]
    pub fn axis(&self) -> &'a AxisModel {
        self.axis
    }

    #[must_use]
    pub fn frame_layer(&self, origin: Coordinates, design: &Design) -> FrameLayer {
        self.axis.frame_layer(origin, design)
    }
}

/// One chart's character drawn at an opacity the transition picks.
#[derive(Debug, Clone, Copy)]
pub struct FadingCharacter<'a> {
    chart: &'a ChartModel,
    character: &'a CharacterModel,
    fades_in: bool,
}

impl<'a> FadingCharacter<'a> {
    #[must_use]
    pub fn character(&self) -> &'a CharacterModel {
        self.character
    }

    /// `to` characters follow the position; `from` characters stay opaque.
    #[must_use]
    pub fn opacity_at(&self, position: f64) -> f64 {
        if self.fades_in {
            position.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn frame_layer(&self, position: f64, design: &Design) -> ChartResult<FrameLayer> {
        self.chart
            .character_layer(self.character, design, self.opacity_at(position))
    }
}

/// Overlays both charts' characters without reconciling their scales.
#[derive(Debug)]
pub struct FadeTransition<'a> {
    pub(super) core: TransitionCore<'a>,
    axes: Vec<FadingAxis<'a>>,
    characters: Vec<FadingCharacter<'a>>,
}

impl<'a> FadeTransition<'a> {
    pub(super) fn new(
        core: TransitionCore<'a>,
        definition: &TransitionDefinition,
    ) -> ChartResult<Self> {
        let (from, to) = (core.from(), core.to());

        // Declared pairs are not blended, but they must still exist.
        for pair in &definition.characters {
            resolve_pair(&core, pair, ChartModel::character, |chart, name| {
                ChartError::UnknownCharacter {
                    transition: core.name().to_owned(),
                    chart,
                    name,
                }
            })?;
        }
        for pair in &definition.axes {
            resolve_pair(&core, pair, ChartModel::axis, |chart, name| ChartError::UnknownAxis {
                transition: core.name().to_owned(),
                chart,
                name,
            })?;
        }

        let axes = to.axes().values().map(|axis| FadingAxis { axis }).collect();
        let characters = from
            .characters()
            .values()
            .map(|character| FadingCharacter {
                chart: from,
                character,
                fades_in: false,
            })
            .chain(to.characters().values().map(|character| FadingCharacter {
                chart: to,
                character,
                fades_in: true,
            }))
            .collect::<Vec<_>>();

        debug!(
            transition = core.name(),
            from = from.name(),
            to = to.name(),
            characters = characters.len(),
            "built fade transition"
        );

        Ok(Self {
            core,
            axes,
            characters,
        })
    }

    #[must_use]
    pub fn axes(&self) -> &[FadingAxis<'a>] {
        &self.axes
    }

    #[must_use]
    pub fn characters(&self) -> &[FadingCharacter<'a>] {
        &self.characters
    }

    /// `from`'s characters, then `to`'s characters, then `to`'s axes on top.
    pub fn frame_at(&self, position: f64) -> ChartResult<RenderFrame> {
        let design = self.core.design();
        let origin = design.plot_origin();
        let mut frame = RenderFrame::new(self.core.offset_at(position));
        for character in &self.characters {
            frame.push_layer(character.frame_layer(position, design)?);
        }
        for axis in &self.axes {
            frame.push_layer(axis.frame_layer(origin, design));
        }
        Ok(frame)
    }
}
