//! Line plots.

use std::mem::swap;
use pyo3::{prelude::*, types::PyDict};
use crate::{check_width, Axes, Color, Data, Error};

/// How the line joining data points is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// No line, only markers.
    None,
}

impl LineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LineKind::Solid => "-",
            LineKind::Dashed => "--",
            LineKind::Dotted => ":",
            LineKind::DashDot => "-.",
            LineKind::None => "None",
        }
    }
}

/// Symbol drawn at each data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Point,
    Circle,
    X,
    Plus,
    Square,
    Diamond,
    Triangle,
    Star,
}

impl Marker {
    pub fn as_str(self) -> &'static str {
        match self {
            Marker::None => "None",
            Marker::Point => ".",
            Marker::Circle => "o",
            Marker::X => "x",
            Marker::Plus => "+",
            Marker::Square => "s",
            Marker::Diamond => "D",
            Marker::Triangle => "^",
            Marker::Star => "*",
        }
    }
}

/// Appearance of a line and its markers.  Fields left to `None` keep
/// Matplotlib's defaults (usually the property cycle).
///
/// # Example
///
/// ```
/// use mplstyle::{Color, LineKind, LineStyle, Marker};
/// let s = LineStyle::new()
///     .marker(Marker::Circle).markersize(10.)
///     .linestyle(LineKind::Dashed).linewidth(3.)
///     .color(Color::BLACK)
///     .markerfacecolor(Color::NONE);
/// assert_eq!(s.linewidth, Some(3.));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStyle {
    pub linestyle: Option<LineKind>,
    pub linewidth: Option<f64>,
    pub color: Option<Color>,
    pub marker: Option<Marker>,
    pub markersize: Option<f64>,
    pub markeredgewidth: Option<f64>,
    pub markeredgecolor: Option<Color>,
    pub markerfacecolor: Option<Color>,
}

impl LineStyle {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn linestyle(mut self, k: LineKind) -> Self {
        self.linestyle = Some(k);
        self
    }

    #[must_use]
    pub fn linewidth(mut self, w: f64) -> Self {
        self.linewidth = Some(w);
        self
    }

    #[must_use]
    pub fn color(mut self, c: impl Into<Color>) -> Self {
        self.color = Some(c.into());
        self
    }

    #[must_use]
    pub fn marker(mut self, m: Marker) -> Self {
        self.marker = Some(m);
        self
    }

    #[must_use]
    pub fn markersize(mut self, s: f64) -> Self {
        self.markersize = Some(s);
        self
    }

    #[must_use]
    pub fn markeredgewidth(mut self, w: f64) -> Self {
        self.markeredgewidth = Some(w);
        self
    }

    #[must_use]
    pub fn markeredgecolor(mut self, c: impl Into<Color>) -> Self {
        self.markeredgecolor = Some(c.into());
        self
    }

    #[must_use]
    pub fn markerfacecolor(mut self, c: impl Into<Color>) -> Self {
        self.markerfacecolor = Some(c.into());
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if let Some(w) = self.linewidth { check_width("linewidth", w)? }
        if let Some(w) = self.markeredgewidth {
            check_width("markeredgewidth", w)?
        }
        if let Some(s) = self.markersize { check_width("markersize", s)? }
        for c in [&self.color, &self.markeredgecolor, &self.markerfacecolor]
            .into_iter().flatten() {
            c.validate()?
        }
        Ok(())
    }

    /// Keyword arguments for `Axes.plot` or `Line2D`, one per set field.
    pub(crate) fn kwargs<'py>(&self, py: Python<'py>)
                              -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if let Some(k) = self.linestyle {
            kwargs.set_item("linestyle", k.as_str())?
        }
        if let Some(w) = self.linewidth { kwargs.set_item("linewidth", w)? }
        if let Some(c) = &self.color { kwargs.set_item("color", c)? }
        if let Some(m) = self.marker { kwargs.set_item("marker", m.as_str())? }
        if let Some(s) = self.markersize { kwargs.set_item("markersize", s)? }
        if let Some(w) = self.markeredgewidth {
            kwargs.set_item("markeredgewidth", w)?
        }
        if let Some(c) = &self.markeredgecolor {
            kwargs.set_item("markeredgecolor", c)?
        }
        if let Some(c) = &self.markerfacecolor {
            kwargs.set_item("markerfacecolor", c)?
        }
        Ok(kwargs)
    }
}

enum PlotData<'a, D>
where D: ?Sized {
    XY(&'a D, &'a D),
    Y(&'a D),
}

#[derive(Clone)]
struct PlotOptions<'a> {
    fmt: &'a str,
    animated: bool,
    antialiased: bool,
    label: &'a str,
    style: LineStyle,
}

impl<'a> PlotOptions<'a> {
    fn new() -> PlotOptions<'static> {
        PlotOptions { fmt: "", animated: false, antialiased: true,
                      label: "", style: LineStyle::default() }
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = self.style.kwargs(py)?;
        if self.animated {
            kwargs.set_item("animated", true)?
        }
        kwargs.set_item("antialiased", self.antialiased)?;
        if !self.label.is_empty() {
            kwargs.set_item("label", self.label)?
        }
        Ok(kwargs)
    }

    fn plot_data<D>(&self, py: Python<'_>, axes: &Axes, data: &PlotData<'_, D>)
                    -> Result<(), Error>
    where D: Data + ?Sized {
        let kwargs = Some(self.kwargs(py)?);
        let ax = axes.ax.bind(py);
        match (data, self.fmt.is_empty()) {
            (PlotData::XY(x, y), true) => {
                ax.call_method("plot", (x.to_numpy(py), y.to_numpy(py)),
                               kwargs.as_ref())?
            }
            (PlotData::XY(x, y), false) => {
                ax.call_method("plot", (x.to_numpy(py), y.to_numpy(py),
                                        self.fmt), kwargs.as_ref())?
            }
            (PlotData::Y(y), true) => {
                ax.call_method("plot", (y.to_numpy(py),), kwargs.as_ref())?
            }
            (PlotData::Y(y), false) => {
                ax.call_method("plot", (y.to_numpy(py), self.fmt),
                               kwargs.as_ref())?
            }
        };
        Ok(())
    }
}

/// Builder for one or more data sets to draw on an [`Axes`], created
/// by [`Axes::xy`] or [`Axes::y`].  Nothing is drawn until
/// [`XY::plot`] is called.
#[must_use]
pub struct XY<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    // Latest data and its setting.
    options: PlotOptions<'a>,
    data: PlotData<'a, D>,
    // Previous data with their settings.
    prev_data: Vec<(PlotOptions<'a>, PlotData<'a, D>)>,
}

impl<'a, D> XY<'a, D>
where D: Data + ?Sized {
    pub(crate) fn new(axes: &'a Axes, x: Option<&'a D>, y: &'a D) -> Self {
        let data = match x {
            Some(x) => PlotData::XY(x, y),
            None => PlotData::Y(y),
        };
        XY { axes, options: PlotOptions::new(), data, prev_data: vec![] }
    }

    /// Matplotlib format string such as "r." or "k--".
    pub fn fmt(mut self, fmt: &'a str) -> Self {
        self.options.fmt = fmt;
        self
    }

    pub fn animated(mut self) -> Self {
        self.options.animated = true;
        self
    }

    pub fn antialiased(mut self, b: bool) -> Self {
        self.options.antialiased = b;
        self
    }

    /// Text of the legend entry for the current data set.
    pub fn label(mut self, label: &'a str) -> Self {
        self.options.label = label;
        self
    }

    /// Replace the whole line style of the current data set.
    pub fn style(mut self, style: &LineStyle) -> Self {
        self.options.style = style.clone();
        self
    }

    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.style.linewidth = Some(w);
        self
    }

    pub fn linestyle(mut self, k: LineKind) -> Self {
        self.options.style.linestyle = Some(k);
        self
    }

    pub fn color(mut self, c: impl Into<Color>) -> Self {
        self.options.style.color = Some(c.into());
        self
    }

    pub fn marker(mut self, m: Marker) -> Self {
        self.options.style.marker = Some(m);
        self
    }

    /// Add the dataset (`x`, `y`).  It starts with the options of the
    /// previous data set, except for the label.
    pub fn xy(mut self, x: &'a D, y: &'a D) -> Self {
        self.push(PlotData::XY(x, y));
        self
    }

    /// Add the dataset `y`.
    pub fn y(mut self, y: &'a D) -> Self {
        self.push(PlotData::Y(y));
        self
    }

    fn push(&mut self, mut data: PlotData<'a, D>) {
        swap(&mut data, &mut self.data);
        let mut options = self.options.clone();
        options.label = "";
        swap(&mut options, &mut self.options);
        self.prev_data.push((options, data));
    }

    /// Plot the data sets with their options.  Nothing is drawn if
    /// one of the data sets or styles is invalid.
    pub fn plot(self) -> Result<(), Error> {
        let all = || self.prev_data.iter().map(|(o, d)| (o, d))
            .chain([(&self.options, &self.data)]);
        for (opt, data) in all() {
            opt.style.validate()?;
            if let PlotData::XY(x, y) = data {
                if x.len() != y.len() {
                    return Err(Error::DimensionMismatch {
                        x: x.len(), y: y.len() })
                }
            }
        }
        Python::with_gil(|py| {
            for (opt, data) in all() {
                opt.plot_data(py, self.axes, data)?
            }
            Ok(())
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};
    use crate::subplots;

    #[test]
    fn invalid_styles() {
        assert!(LineStyle::new().linewidth(-1.).validate().is_err());
        assert!(LineStyle::new().markersize(f64::INFINITY).validate().is_err());
        assert!(LineStyle::new().color("").validate().is_err());
        assert!(LineStyle::new().linewidth(0.).validate().is_ok());
    }

    #[test]
    fn lines_with_styles() -> Result<(), Error> {
        let (fig, [[mut ax]]) = subplots()?;
        let dashed = LineStyle::new().linestyle(LineKind::Dashed)
            .marker(Marker::Circle).markerfacecolor(Color::NONE);
        ax.xy(&[1., 2., 3.], &[1., 4., 2.]).style(&dashed).label("a")
            .xy(&[1., 2., 3.], &[3., 1., 2.]).color("royalblue").label("b")
            .plot()?;
        Python::with_gil(|py| -> Result<(), Error> {
            let lines = ax.ax.call_method0(py, "get_lines")?;
            assert_eq!(lines.bind(py).len()?, 2);
            Ok(())
        })?;
        fig.save().to_file("target/lines_with_styles.pdf")?;
        fig.close()
    }

    /// Samples shared between owners on one thread only.
    struct Shared(Rc<RefCell<Vec<f64>>>);

    impl Data for Shared {
        fn len(&self) -> usize { self.0.borrow().len() }

        fn to_numpy(&self, py: Python<'_>) -> PyObject {
            self.0.borrow().to_numpy(py)
        }
    }

    #[test]
    fn thread_local_data() -> Result<(), Error> {
        let (fig, [[mut ax]]) = subplots()?;
        let t = Shared(Rc::new(RefCell::new(vec![0., 1., 2.])));
        let y = Shared(Rc::clone(&t.0));
        y.0.borrow_mut().push(3.);
        ax.xy(&t, &y).plot()?;
        assert_eq!(ax.line_labels()?.len(), 1);
        fig.close()
    }

    #[test]
    fn mismatched_lengths() -> Result<(), Error> {
        let (fig, [[mut ax]]) = subplots()?;
        let r = ax.xy(&vec![1., 2., 3.], &vec![1., 2.]).plot();
        assert!(matches!(r, Err(Error::DimensionMismatch { x: 3, y: 2 })));
        fig.close()
    }
}
