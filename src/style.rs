//! A bundle of cosmetic settings shared by all the axes of a session.
//!
//! [`StyleOptions`] names every setting with its default; an
//! [`AxesStyler`] checks them once and applies them to as many
//! [`Axes`] as needed:
//!
//! ```
//! use mplstyle::{self as plt, AxesStyler, StyleOptions};
//! let styler = AxesStyler::new(StyleOptions {
//!     label_size: 20.,
//!     ..StyleOptions::default()
//! })?;
//! let (fig, [[mut ax0, mut ax1]]) = plt::subplots()?;
//! styler.apply(&mut ax0)?;
//! styler.apply(&mut ax1)?;
//! assert_eq!(ax1.xaxis()?.label_size()?, 20.);
//! # Ok::<(), mplstyle::Error>(())
//! ```

use tracing::{debug, trace};
use crate::{
    check_size, Axes, AxisName, Error, GridStyle, TickDirection,
    TickLabelFormat, TickLabelStyle, TickParams, Which,
};

/// Cosmetic settings applied by an [`AxesStyler`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    /// Draw the frame around the data area.  Default: `true`.
    pub frame_on: bool,
    /// Major gridlines, `None` to leave the grid alone.
    /// Default: grey, dashed, width 1, on both axes.
    pub grid: Option<GridStyle>,
    /// Minor gridlines.  Default: `None`.
    pub minor_grid: Option<GridStyle>,
    /// Direction of major and minor ticks.  Default: inward.
    pub tick_direction: TickDirection,
    /// Font size of the major tick labels.  Default: 22.
    pub tick_label_size: f64,
    /// Display minor ticks.  Default: `false`.
    pub minor_ticks: bool,
    /// Font size of the axis labels.  Default: 28.
    pub label_size: f64,
    /// Font size of the offset texts.  Default: 20.
    pub offset_text_size: f64,
    /// Scientific notation is used for numbers below
    /// 10^`scilimits.0` or above 10^`scilimits.1`.  Default: (-3, 3).
    pub scilimits: (i32, i32),
    /// Factor a shared offset out of the tick labels.  Default: `true`.
    pub use_offset: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        StyleOptions {
            frame_on: true,
            grid: Some(GridStyle::major()),
            minor_grid: None,
            tick_direction: TickDirection::In,
            tick_label_size: 22.,
            minor_ticks: false,
            label_size: 28.,
            offset_text_size: 20.,
            scilimits: (-3, 3),
            use_offset: true,
        }
    }
}

impl StyleOptions {
    pub fn validate(&self) -> Result<(), Error> {
        for g in [&self.grid, &self.minor_grid].into_iter().flatten() {
            g.validate()?
        }
        check_size("tick label size", self.tick_label_size)?;
        check_size("label size", self.label_size)?;
        check_size("offset text size", self.offset_text_size)?;
        let (lo, hi) = self.scilimits;
        if lo > hi {
            return Err(Error::invalid(
                "scilimits", format!("({lo}, {hi}) is not ordered")))
        }
        Ok(())
    }
}

/// Applies a fixed set of [`StyleOptions`] to axes.
#[derive(Debug, Clone, Default)]
pub struct AxesStyler {
    options: StyleOptions,
}

impl AxesStyler {
    /// Return a styler for `options`, or an error if one of them is
    /// out of range.
    pub fn new(options: StyleOptions) -> Result<Self, Error> {
        options.validate()?;
        Ok(AxesStyler { options })
    }

    pub fn options(&self) -> &StyleOptions { &self.options }

    /// Apply the settings to `ax`.  Applying them again has no
    /// further effect, and other axes are left untouched.  Invalid
    /// options are reported before `ax` is modified.
    pub fn apply(&self, ax: &mut Axes) -> Result<(), Error> {
        let o = &self.options;
        o.validate()?;
        debug!(options = ?o, "styling axes");
        ax.set_frame_on(o.frame_on)?;
        for g in [&o.grid, &o.minor_grid].into_iter().flatten() {
            ax.grid(g)?;
        }
        ax.tick_params(&TickParams {
            which: Which::Major,
            direction: Some(o.tick_direction),
            labelsize: Some(o.tick_label_size),
            ..TickParams::default()
        })?;
        ax.tick_params(&TickParams {
            which: Which::Minor,
            direction: Some(o.tick_direction),
            ..TickParams::default()
        })?;
        if o.minor_ticks {
            ax.minorticks_on()?;
        }
        for mut axis in [ax.xaxis()?, ax.yaxis()?] {
            axis.set_label_size(o.label_size)?
                .set_offset_text_fontsize(o.offset_text_size)?;
        }
        for axis in [AxisName::X, AxisName::Y] {
            ax.ticklabel_format(&TickLabelFormat {
                axis,
                style: TickLabelStyle::Sci,
                scilimits: Some(o.scilimits),
                use_offset: Some(o.use_offset),
            })?;
        }
        Ok(())
    }
}

/// Apply the default [`StyleOptions`] to `ax`.
pub fn apply_standard_style(ax: &mut Axes) -> Result<(), Error> {
    AxesStyler::default().apply(ax)
}

/// Styling state read back from an [`Axes`], one value per axis
/// (x, y) where it applies.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedStyle {
    pub frame_on: bool,
    pub grid: (bool, bool),
    pub tick_direction: (TickDirection, TickDirection),
    pub tick_label_size: (f64, f64),
    pub label_size: (f64, f64),
    pub offset_text_size: (f64, f64),
    pub power_limits: ((i32, i32), (i32, i32)),
    pub use_offset: (bool, bool),
}

impl AppliedStyle {
    pub fn read(ax: &Axes) -> Result<Self, Error> {
        let (x, y) = (ax.xaxis()?, ax.yaxis()?);
        let s = AppliedStyle {
            frame_on: ax.get_frame_on()?,
            grid: (x.gridlines_visible()?, y.gridlines_visible()?),
            tick_direction: (x.tick_direction()?, y.tick_direction()?),
            tick_label_size: (x.tick_label_size()?, y.tick_label_size()?),
            label_size: (x.label_size()?, y.label_size()?),
            offset_text_size: (x.offset_text_fontsize()?,
                               y.offset_text_fontsize()?),
            power_limits: (x.power_limits()?, y.power_limits()?),
            use_offset: (x.use_offset()?, y.use_offset()?),
        };
        trace!(style = ?s, "read axes style");
        Ok(s)
    }

    /// Whether the state is the one `o` produces.
    pub fn matches(&self, o: &StyleOptions) -> bool {
        let both = |v| (v, v);
        self.frame_on == o.frame_on
            && (o.grid.is_none() || self.grid == (true, true))
            && self.tick_direction == both(o.tick_direction)
            && self.tick_label_size == (o.tick_label_size, o.tick_label_size)
            && self.label_size == (o.label_size, o.label_size)
            && self.offset_text_size == (o.offset_text_size,
                                         o.offset_text_size)
            && self.power_limits == (o.scilimits, o.scilimits)
            && self.use_offset == (o.use_offset, o.use_offset)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{demos, subplots};

    #[test]
    fn default_bundle() {
        let o = StyleOptions::default();
        assert!(o.frame_on);
        assert_eq!(o.grid, Some(GridStyle::major()));
        assert_eq!(o.tick_direction, TickDirection::In);
        assert_eq!(o.tick_label_size, 22.);
        assert_eq!(o.label_size, 28.);
        assert_eq!(o.offset_text_size, 20.);
        assert_eq!(o.scilimits, (-3, 3));
        assert!(o.use_offset);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn invalid_options() {
        let bad = [
            StyleOptions { label_size: 0., ..StyleOptions::default() },
            StyleOptions { offset_text_size: f64::NAN,
                           ..StyleOptions::default() },
            StyleOptions { scilimits: (3, -3), ..StyleOptions::default() },
            StyleOptions {
                grid: Some(GridStyle { linewidth: -1., ..GridStyle::major() }),
                ..StyleOptions::default()
            },
        ];
        for o in bad {
            assert!(matches!(AxesStyler::new(o),
                             Err(Error::InvalidOption { .. })));
        }
    }

    #[test]
    fn apply_checks_options_first() -> Result<(), Error> {
        let styler = AxesStyler {
            options: StyleOptions { frame_on: false, label_size: 0.,
                                    ..StyleOptions::default() },
        };
        let (fig, [[mut ax]]) = subplots()?;
        let before = AppliedStyle::read(&ax)?;
        assert!(matches!(styler.apply(&mut ax),
                         Err(Error::InvalidOption { name: "label size", .. })));
        assert_eq!(AppliedStyle::read(&ax)?, before);
        assert!(ax.get_frame_on()?);
        fig.close()
    }

    #[test]
    fn idempotent() -> Result<(), Error> {
        let styler = AxesStyler::default();
        let (fig, [[mut ax]]) = subplots()?;
        styler.apply(&mut ax)?;
        let once = AppliedStyle::read(&ax)?;
        styler.apply(&mut ax)?;
        let twice = AppliedStyle::read(&ax)?;
        assert_eq!(once, twice);
        assert!(twice.matches(styler.options()));
        assert_eq!(twice.grid, (true, true));
        assert_eq!(twice.tick_direction, (TickDirection::In, TickDirection::In));
        assert_eq!(twice.label_size, (28., 28.));
        assert_eq!(twice.offset_text_size, (20., 20.));
        assert_eq!(twice.power_limits, ((-3, 3), (-3, 3)));
        fig.close()
    }

    #[test]
    fn independent_axes() -> Result<(), Error> {
        let (fig, [[mut ax0, ax1]]) = subplots()?;
        let before = AppliedStyle::read(&ax1)?;
        apply_standard_style(&mut ax0)?;
        assert_eq!(AppliedStyle::read(&ax1)?, before);
        assert!(!before.matches(&StyleOptions::default()));
        fig.close()
    }

    #[test]
    fn styled_standard_data() -> Result<(), Error> {
        let s = demos::StandardSeries::generate();
        let (fig, [[mut ax]]) = subplots()?;
        apply_standard_style(&mut ax)?;
        ax.xy(&s.t, &s.x).label("x data")
            .xy(&s.t, &s.y).label("y data").plot()?;
        assert_eq!(ax.xaxis()?.label_size()?, 28.);
        assert!(ax.xaxis()?.gridlines_visible()?);
        assert!(ax.yaxis()?.gridlines_visible()?);
        fig.save().to_file("target/styled_standard_data.pdf")?;
        fig.close()
    }

    #[test]
    fn minor_ticks_and_grid() -> Result<(), Error> {
        let styler = AxesStyler::new(StyleOptions {
            minor_ticks: true,
            minor_grid: Some(GridStyle::minor()),
            ..StyleOptions::default()
        })?;
        let (fig, [[mut ax]]) = subplots()?;
        styler.apply(&mut ax)?;
        assert!(AppliedStyle::read(&ax)?.matches(styler.options()));
        fig.close()
    }
}
