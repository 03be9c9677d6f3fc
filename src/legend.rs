//! Legends.

use pyo3::{prelude::*, types::PyDict};
use crate::{check_size, Color, Error, LineStyle};

/// Where a legend is placed inside the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    /// The position overlapping the least with the data.
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    Right,
    CenterLeft,
    CenterRight,
    LowerCenter,
    UpperCenter,
    Center,
}

impl Location {
    fn as_str(self) -> &'static str {
        match self {
            Location::Best => "best",
            Location::UpperRight => "upper right",
            Location::UpperLeft => "upper left",
            Location::LowerLeft => "lower left",
            Location::LowerRight => "lower right",
            Location::Right => "right",
            Location::CenterLeft => "center left",
            Location::CenterRight => "center right",
            Location::LowerCenter => "lower center",
            Location::UpperCenter => "upper center",
            Location::Center => "center",
        }
    }
}

/// Legend settings.  The default is a large framed legend at the best
/// location, with a black edge and a white background.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendOptions {
    pub fontsize: f64,
    pub loc: Location,
    /// Put the line sample before the label.
    pub markerfirst: bool,
    pub frameon: bool,
    pub edgecolor: Option<Color>,
    pub facecolor: Option<Color>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        LegendOptions { fontsize: 26., loc: Location::Best,
                        markerfirst: true, frameon: true,
                        edgecolor: Some(Color::BLACK),
                        facecolor: Some(Color::WHITE) }
    }
}

impl LegendOptions {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        check_size("legend fontsize", self.fontsize)?;
        for c in [&self.edgecolor, &self.facecolor].into_iter().flatten() {
            c.validate()?
        }
        Ok(())
    }

    pub(crate) fn kwargs<'py>(&self, py: Python<'py>)
                              -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        kwargs.set_item("fontsize", self.fontsize)?;
        kwargs.set_item("loc", self.loc.as_str())?;
        kwargs.set_item("markerfirst", self.markerfirst)?;
        kwargs.set_item("frameon", self.frameon)?;
        Ok(kwargs)
    }
}

/// Custom legend entry: a line sample drawn with `style` and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub style: LineStyle,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, style: LineStyle) -> Self {
        LegendEntry { label: label.into(), style }
    }
}

/// A legend placed on an [`Axes`][crate::Axes].
#[derive(Debug, Clone)]
pub struct Legend {
    leg: PyObject, // instance of matplotlib.legend.Legend
}

impl Legend {
    pub(crate) fn wrap(leg: PyObject) -> Legend { Legend { leg } }

    /// Wrap a freshly created legend and colour its frame.
    pub(crate) fn finish(leg: PyObject, opt: &LegendOptions)
                         -> Result<Legend, Error> {
        let mut leg = Legend::wrap(leg);
        if let Some(c) = &opt.edgecolor { leg.set_frame_edgecolor(c)?; }
        if let Some(c) = &opt.facecolor { leg.set_frame_facecolor(c)?; }
        Ok(leg)
    }

    fn frame<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        self.leg.bind(py).call_method0("get_frame")
    }

    pub fn set_frame_edgecolor(&mut self, c: &Color)
                               -> Result<&mut Self, Error> {
        c.validate()?;
        Python::with_gil(|py| -> Result<(), Error> {
            self.frame(py)?.call_method1("set_edgecolor", (c,))?;
            Ok(())
        })?;
        Ok(self)
    }

    pub fn set_frame_facecolor(&mut self, c: &Color)
                               -> Result<&mut Self, Error> {
        c.validate()?;
        Python::with_gil(|py| -> Result<(), Error> {
            self.frame(py)?.call_method1("set_facecolor", (c,))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// RGBA colour of the frame background.
    pub fn frame_facecolor(&self) -> Result<Color, Error> {
        Python::with_gil(|py| {
            let (r, g, b, a): (f64, f64, f64, f64) =
                self.frame(py)?.call_method0("get_facecolor")?.extract()?;
            Ok(Color::Rgba([r, g, b, a]))
        })
    }

    /// Labels of the entries, in order.
    pub fn texts(&self) -> Result<Vec<String>, Error> {
        Python::with_gil(|py| {
            let mut texts = vec![];
            for t in self.leg.bind(py).call_method0("get_texts")?.iter()? {
                texts.push(t?.call_method0("get_text")?.extract()?);
            }
            Ok(texts)
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{subplots, LineKind};

    #[test]
    fn framed_legend() -> Result<(), Error> {
        let (fig, [[mut ax]]) = subplots()?;
        ax.y(&[1., 4., 2.]).label("x data")
            .y(&[3., 1., 2.]).label("y data").plot()?;
        let leg = ax.legend(&LegendOptions::default())?;
        assert_eq!(leg.texts()?, ["x data", "y data"]);
        // The frame alpha comes from `legend.framealpha`.
        match leg.frame_facecolor()? {
            Color::Rgba([r, g, b, _]) => assert_eq!([r, g, b], [1., 1., 1.]),
            c => panic!("unexpected {c:?}"),
        }
        fig.close()
    }

    #[test]
    fn custom_entries() -> Result<(), Error> {
        let (fig, [[mut ax]]) = subplots()?;
        let solid = LineStyle::new().linestyle(LineKind::Solid);
        let entries = [
            LegendEntry::new("x", solid.clone().color("indianred")),
            LegendEntry::new("y", solid.color("royalblue")),
        ];
        let opt = LegendOptions { fontsize: 20., markerfirst: false,
                                  ..LegendOptions::default() };
        let leg = ax.legend_with(&entries, &opt)?;
        assert_eq!(leg.texts()?, ["x", "y"]);
        fig.close()
    }

    #[test]
    fn invalid_fontsize() -> Result<(), Error> {
        let (fig, [[mut ax]]) = subplots()?;
        let opt = LegendOptions { fontsize: -1., ..LegendOptions::default() };
        assert!(matches!(ax.legend(&opt),
                         Err(Error::InvalidOption { .. })));
        fig.close()
    }
}
