mod fade;
mod morph;

use std::cell::Cell;

use tracing::{trace, warn};

use crate::core::{Coordinates, Design};
use crate::error::{ChartError, ChartResult};
use crate::model::{ChartModel, TransitionDefinition, TransitionKind};
use crate::render::{Drawable, MountPoint, RenderFrame, RenderSurface};

pub use fade::{FadeTransition, FadingAxis, FadingCharacter};
pub use morph::{MorphTransition, MorphingAxis, MorphingCharacter};

/// Observable lifecycle of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    /// Constructed, nothing drawn yet.
    Built,
    /// Last draw succeeded at `position`.
    Drawing { position: f64 },
    /// Output cleared by `hide` or by a failed draw.
    Hidden,
}

/// State shared by every transition strategy.
#[derive(Debug)]
pub(crate) struct TransitionCore<'a> {
    name: String,
    from: &'a ChartModel,
    to: &'a ChartModel,
    design: Design,
    position: f64,
    initial_coordinates: Coordinates,
    mount: MountPoint,
    state: Cell<TransitionState>,
}

impl<'a> TransitionCore<'a> {
    fn new(
        definition: &TransitionDefinition,
        from: &'a ChartModel,
        to: &'a ChartModel,
        mount: MountPoint,
    ) -> ChartResult<Self> {
        let name = definition
            .name
            .clone()
            .unwrap_or_else(|| format!("{}-{}", definition.from, definition.to));

        for (expected, chart) in [(&definition.from, from), (&definition.to, to)] {
            if chart.name() != expected {
                return Err(ChartError::ChartMismatch {
                    transition: name,
                    expected: expected.clone(),
                    actual: chart.name().to_owned(),
                });
            }
        }

        Ok(Self {
            design: from.design().merged(definition.design.as_ref()),
            name,
            from,
            to,
            position: 0.0,
            initial_coordinates: mount.coordinates(),
            mount,
            state: Cell::new(TransitionState::Built),
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn from(&self) -> &'a ChartModel {
        self.from
    }

    pub(crate) fn to(&self) -> &'a ChartModel {
        self.to
    }

    pub(crate) fn design(&self) -> &Design {
        &self.design
    }

    /// Local offset of the stage: the charts' screen positions blended by
    /// `position`, relative to where the transition was mounted.
    pub(crate) fn offset_at(&self, position: f64) -> Coordinates {
        self.from
            .coordinates()
            .lerp(self.to.coordinates(), position)
            .relative_to(self.initial_coordinates)
    }

    /// Clears the stage and emits `frame`; any failure leaves it cleared.
    fn render(
        &self,
        surface: &mut dyn RenderSurface,
        position: f64,
        frame: ChartResult<RenderFrame>,
    ) -> ChartResult<()> {
        surface.clear_children(self.mount.node)?;

        let emitted = frame.and_then(|frame| {
            frame.validate()?;
            frame.emit(surface, self.mount.node)?;
            Ok(frame.primitive_count())
        });

        match emitted {
            Ok(primitives) => {
                self.state.set(TransitionState::Drawing { position });
                trace!(transition = %self.name, position, primitives, "drew transition");
                Ok(())
            }
            Err(err) => {
                warn!(transition = %self.name, position, error = %err, "transition draw failed");
                if let Err(clear_err) = surface.clear_children(self.mount.node) {
                    warn!(transition = %self.name, error = %clear_err, "could not clear stage");
                }
                self.state.set(TransitionState::Hidden);
                Err(err)
            }
        }
    }

    fn hide(&self, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        surface.clear_children(self.mount.node)?;
        self.state.set(TransitionState::Hidden);
        Ok(())
    }
}

/// Animated change between two built charts, driven by a position in `[0, 1]`.
///
/// Positions outside the unit range are not clamped and extrapolate.
#[derive(Debug)]
pub enum TransitionChart<'a> {
    Morph(MorphTransition<'a>),
    Fade(FadeTransition<'a>),
}

impl<'a> TransitionChart<'a> {
    /// Builds the strategy named by `definition` between `from` and `to`.
    pub fn build(
        definition: &TransitionDefinition,
        from: &'a ChartModel,
        to: &'a ChartModel,
        mount: MountPoint,
    ) -> ChartResult<Self> {
        let core = TransitionCore::new(definition, from, to, mount)?;
        Ok(match definition.kind {
            TransitionKind::Morph => Self::Morph(MorphTransition::new(core, definition)?),
            TransitionKind::Fade => Self::Fade(FadeTransition::new(core, definition)?),
        })
    }

    fn core(&self) -> &TransitionCore<'a> {
        match self {
            Self::Morph(morph) => &morph.core,
            Self::Fade(fade) => &fade.core,
        }
    }

    fn core_mut(&mut self) -> &mut TransitionCore<'a> {
        match self {
            Self::Morph(morph) => &mut morph.core,
            Self::Fade(fade) => &mut fade.core,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::Morph(_) => TransitionKind::Morph,
            Self::Fade(_) => TransitionKind::Fade,
        }
    }

    #[must_use]
    pub fn from(&self) -> &'a ChartModel {
        self.core().from()
    }

    #[must_use]
    pub fn to(&self) -> &'a ChartModel {
        self.core().to()
    }

    #[must_use]
    pub fn design(&self) -> &Design {
        self.core().design()
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.core().position
    }

    pub fn set_position(&mut self, position: f64) {
        self.core_mut().position = position;
    }

    /// Returns the transition moved to `position`.
    #[must_use]
    pub fn at_position(mut self, position: f64) -> Self {
        self.set_position(position);
        self
    }

    #[must_use]
    pub fn state(&self) -> TransitionState {
        self.core().state.get()
    }

    /// Mount origin captured when the transition was built.
    #[must_use]
    pub fn initial_coordinates(&self) -> Coordinates {
        self.core().initial_coordinates
    }

    /// Stage offset the transition uses at `position`.
    #[must_use]
    pub fn offset_at(&self, position: f64) -> Coordinates {
        self.core().offset_at(position)
    }

    /// Everything a draw at `position` would emit, without touching a surface.
    pub fn frame_at(&self, position: f64) -> ChartResult<RenderFrame> {
        match self {
            Self::Morph(morph) => morph.frame_at(position),
            Self::Fade(fade) => fade.frame_at(position),
        }
    }

    /// Sets the position and redraws from scratch.
    pub fn draw_at(&mut self, position: f64, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        self.set_position(position);
        self.draw(surface)
    }
}

impl Drawable for TransitionChart<'_> {
    fn name(&self) -> &str {
        self.core().name()
    }

    fn draw(&self, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        let position = self.position();
        self.core()
            .render(surface, position, self.frame_at(position))
    }

    fn draw_scene(&self, _surface: &mut dyn RenderSurface) -> ChartResult<()> {
        Ok(())
    }

    fn draw_characters(&self, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        self.draw(surface)
    }

    fn hide(&self, surface: &mut dyn RenderSurface) -> ChartResult<()> {
        self.core().hide(surface)
    }

    fn hide_characters(&self, _surface: &mut dyn RenderSurface) -> ChartResult<()> {
        Ok(())
    }
}
