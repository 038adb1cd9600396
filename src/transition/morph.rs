use tracing::debug;

use crate::core::{
    Coordinates, DEFAULT_TICK_COUNT, Design, PathInterpolator, interpolate_domain,
    interpolate_ticks,
};
use crate::error::{ChartError, ChartResult};
use crate::model::{AxisModel, CharacterModel, ChartModel, PairDefinition, TransitionDefinition};
use crate::render::{FrameLayer, LayerRole, RenderFrame};

use super::TransitionCore;

/// Axis pair whose domain and ticks slide from `from` to `to`.
#[derive(Debug, Clone, Copy)]
pub struct MorphingAxis<'a> {
    from: &'a AxisModel,
    to: &'a AxisModel,
}

impl<'a> MorphingAxis<'a> {
    #[must_use]
    pub fn from(&self) -> &'a AxisModel {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> &'a AxisModel {
        self.to
    }

    /// `from`'s axis drawn with the blended domain.
    ///
    /// Ticks are blended only when both sides declare explicit ticks.
    pub fn frame_layer(
        &self,
        position: f64,
        origin: Coordinates,
        design: &Design,
    ) -> ChartResult<FrameLayer> {
        let domain = interpolate_domain(
            self.from.scale().domain(),
            self.to.scale().domain(),
            position,
        )?;
        let scale = self.from.scale().with_domain(domain)?;
        let ticks = match (self.from.explicit_ticks(), self.to.explicit_ticks()) {
            (Some(from), Some(to)) => interpolate_ticks(from, to, position)?,
            _ => scale.ticks(DEFAULT_TICK_COUNT),
        };
        Ok(self.from.frame_layer_with(&scale, &ticks, origin, design))
    }
}

/// Character pair whose outlines blend; the color stays `from`'s.
#[derive(Debug, Clone)]
pub struct MorphingCharacter<'a> {
    from: &'a CharacterModel,
    to: &'a CharacterModel,
    interpolator: PathInterpolator,
}

impl<'a> MorphingCharacter<'a> {
    #[must_use]
    pub fn from(&self) -> &'a CharacterModel {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> &'a CharacterModel {
        self.to
    }

    #[must_use]
    pub fn interpolator(&self) -> &PathInterpolator {
        &self.interpolator
    }

    #[must_use]
    pub fn frame_layer(&self, position: f64, origin: Coordinates) -> FrameLayer {
        let mut layer = FrameLayer::new(self.from.name(), LayerRole::Characters, origin);
        layer.push_path(self.interpolator.at(position), self.from.style());
        layer
    }
}

/// Reconciles named axes and characters of two charts and blends them.
#[derive(Debug)]
pub struct MorphTransition<'a> {
    pub(super) core: TransitionCore<'a>,
    axes: Vec<MorphingAxis<'a>>,
    characters: Vec<MorphingCharacter<'a>>,
}

impl<'a> MorphTransition<'a> {
    pub(super) fn new(core: TransitionCore<'a>, definition: &TransitionDefinition) -> ChartResult<Self> {
        let (from, to) = (core.from(), core.to());

        let axes = definition
            .axes
            .iter()
            .map(|pair| {
                let (from_axis, to_axis) = resolve_pair(&core, pair, ChartModel::axis, |chart, name| {
                    ChartError::UnknownAxis {
                        transition: core.name().to_owned(),
                        chart,
                        name,
                    }
                })?;
                Ok(MorphingAxis {
                    from: from_axis,
                    to: to_axis,
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let characters = definition
            .characters
            .iter()
            .map(|pair| {
                let (from_character, to_character) =
                    resolve_pair(&core, pair, ChartModel::character, |chart, name| {
                        ChartError::UnknownCharacter {
                            transition: core.name().to_owned(),
                            chart,
                            name,
                        }
                    })?;
                Ok(MorphingCharacter {
                    from: from_character,
                    to: to_character,
                    interpolator: PathInterpolator::new(
                        from_character.path(),
                        to_character.path(),
                        definition.resampling,
                    ),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        debug!(
            transition = core.name(),
            from = from.name(),
            to = to.name(),
            axes = axes.len(),
            characters = characters.len(),
            "built morph transition"
        );

        Ok(Self {
            core,
            axes,
            characters,
        })
    }

    #[must_use]
    pub fn axes(&self) -> &[MorphingAxis<'a>] {
        &self.axes
    }

    #[must_use]
    pub fn characters(&self) -> &[MorphingCharacter<'a>] {
        &self.characters
    }

    /// Characters first, then axes on top, at the blended stage offset.
    pub fn frame_at(&self, position: f64) -> ChartResult<RenderFrame> {
        let design = self.core.design();
        let origin = design.plot_origin();
        let mut frame = RenderFrame::new(self.core.offset_at(position));
        for character in &self.characters {
            frame.push_layer(character.frame_layer(position, origin));
        }
        for axis in &self.axes {
            frame.push_layer(axis.frame_layer(position, origin, design)?);
        }
        Ok(frame)
    }
}

/// Looks a pair up in both charts; `unknown(chart, name)` builds the error.
pub(super) fn resolve_pair<'a, T: 'a>(
    core: &TransitionCore<'a>,
    pair: &PairDefinition,
    lookup: impl Fn(&'a ChartModel, &str) -> Option<&'a T>,
    unknown: impl Fn(String, String) -> ChartError,
) -> ChartResult<(&'a T, &'a T)> {
    let (from, to) = (core.from(), core.to());
    let from_item =
        lookup(from, &pair.from).ok_or_else(|| unknown(from.name().to_owned(), pair.from.clone()))?;
    let to_item =
        lookup(to, &pair.to).ok_or_else(|| unknown(to.name().to_owned(), pair.to.clone()))?;
    Ok((from_item, to_item))
}
