//! Validated lighting request.
//!
//! A [`LightingRequest`] carries at most one color. Callers holding an
//! open-ended list go through [`LightingRequest::with_colors`], which keeps
//! the first color and drops the rest with a single warning.

use serde::Serialize;
use tracing::warn;

use crate::output::{DEFAULT_BRIGHTNESS, Report, build_settings_report};
use crate::types::{ChannelSelection, ColorMode, Rgb, Speed};
use crate::{RgbFusionError, RgbFusionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LightingRequest {
    pub selection: ChannelSelection,
    pub mode: ColorMode,
    pub color: Option<Rgb>,
    pub speed: Speed,
    /// Colors supplied beyond the one the mode can use.
    pub dropped_colors: usize,
}

impl LightingRequest {
    /// Single-color request. Fails with [`RgbFusionError::MissingColor`] when
    /// `mode` needs a color and `color` is `None`.
    pub fn new(
        selection: ChannelSelection,
        mode: ColorMode,
        color: Option<Rgb>,
        speed: Speed,
    ) -> RgbFusionResult<Self> {
        Self::validated(selection, mode, color, usize::from(color.is_some()), speed)
    }

    /// Request from a list of colors.
    ///
    /// Modes that take a color use the first entry. Everything the mode can't
    /// use is dropped and reported by one `warn!` event.
    pub fn with_colors(
        selection: ChannelSelection,
        mode: ColorMode,
        colors: &[Rgb],
        speed: Speed,
    ) -> RgbFusionResult<Self> {
        Self::validated(selection, mode, colors.first().copied(), colors.len(), speed)
    }

    fn validated(
        selection: ChannelSelection,
        mode: ColorMode,
        first: Option<Rgb>,
        supplied: usize,
        speed: Speed,
    ) -> RgbFusionResult<Self> {
        let color = if mode.descriptor().takes_color {
            Some(first.ok_or(RgbFusionError::MissingColor { mode })?)
        } else {
            None
        };
        let dropped_colors = supplied.saturating_sub(usize::from(color.is_some()));
        if dropped_colors > 0 {
            warn!(
                mode = %mode,
                dropped = dropped_colors,
                "too many colors for mode, ignoring extras"
            );
        }
        Ok(Self {
            selection,
            mode,
            color,
            speed,
            dropped_colors,
        })
    }

    /// Resolve operator-supplied names and color literals.
    ///
    /// Mode is resolved first, then channel, then speed, then colors; the
    /// first bad value is the error returned. The speed name is only looked
    /// up for modes with variable timing and color literals are only parsed
    /// for modes that take a color. Anything a mode ignores is never checked.
    pub fn from_names<S: AsRef<str>>(
        channel: &str,
        mode: &str,
        colors: &[S],
        speed: &str,
    ) -> RgbFusionResult<Self> {
        let mode: ColorMode = mode.parse()?;
        let selection: ChannelSelection = channel.parse()?;
        let descriptor = mode.descriptor();

        let speed = if descriptor.timing.is_variable() {
            speed.parse()?
        } else {
            Speed::default()
        };

        let first = if descriptor.takes_color {
            let parsed = colors
                .iter()
                .map(|c| c.as_ref().parse::<Rgb>())
                .collect::<RgbFusionResult<Vec<_>>>()?;
            parsed.first().copied()
        } else {
            None
        };

        Self::validated(selection, mode, first, colors.len(), speed)
    }

    /// Settings report template for this request, address left zero.
    pub fn report(&self) -> RgbFusionResult<Report> {
        build_settings_report(self.mode, self.color, self.speed, DEFAULT_BRIGHTNESS)
    }
}
