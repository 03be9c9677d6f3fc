//! Axes: the drawing surfaces of a figure, and their two axes.

use std::str::FromStr;
use pyo3::{prelude::*, types::PyDict};
use tracing::trace;
use crate::{
    check_size, check_width, color::to_rgba, Color, Data, Error, Legend,
    LegendEntry, LegendOptions, LineKind, XY, COLORS, LINES,
};

/// One rectangular drawing surface of a [`Figure`][crate::Figure].
#[derive(Debug, Clone)]
pub struct Axes {
    pub(crate) ax: PyObject, // instance of matplotlib.axes.Axes
}

/// Which ticks (or gridlines) a setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Which { Major, Minor, Both }

impl Which {
    fn as_str(self) -> &'static str {
        match self {
            Which::Major => "major",
            Which::Minor => "minor",
            Which::Both => "both",
        }
    }
}

/// Which axis of an [`Axes`] a setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisName { X, Y, Both }

impl AxisName {
    fn as_str(self) -> &'static str {
        match self {
            AxisName::X => "x",
            AxisName::Y => "y",
            AxisName::Both => "both",
        }
    }
}

/// Side of the axis line the tick marks are drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDirection { In, Out, InOut }

impl TickDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TickDirection::In => "in",
            TickDirection::Out => "out",
            TickDirection::InOut => "inout",
        }
    }
}

impl FromStr for TickDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "in" => Ok(TickDirection::In),
            "out" => Ok(TickDirection::Out),
            "inout" => Ok(TickDirection::InOut),
            _ => Err(Error::invalid("tick direction", s)),
        }
    }
}

/// Gridline settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    pub which: Which,
    pub axis: AxisName,
    pub color: Color,
    pub linestyle: LineKind,
    pub linewidth: f64,
}

impl GridStyle {
    /// Grey dashed major gridlines on both axes.
    pub fn major() -> Self {
        GridStyle { which: Which::Major, axis: AxisName::Both,
                    color: Color::GREY, linestyle: LineKind::Dashed,
                    linewidth: 1. }
    }

    /// Dark grey dashed minor gridlines on both axes.
    pub fn minor() -> Self {
        GridStyle { which: Which::Minor, axis: AxisName::Both,
                    color: Color::named("darkgrey"),
                    linestyle: LineKind::Dashed, linewidth: 2. }
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_width("grid linewidth", self.linewidth)?;
        self.color.validate()
    }
}

impl Default for GridStyle {
    fn default() -> Self { GridStyle::major() }
}

/// Appearance of ticks, tick labels and gridlines.  `None` fields are
/// left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TickParams {
    pub axis: AxisName,
    pub which: Which,
    pub direction: Option<TickDirection>,
    pub labelsize: Option<f64>,
    pub labelcolor: Option<Color>,
    /// Draw ticks on the top side.
    pub top: Option<bool>,
    pub bottom: Option<bool>,
    pub left: Option<bool>,
    pub right: Option<bool>,
}

impl Default for TickParams {
    fn default() -> Self {
        TickParams { axis: AxisName::Both, which: Which::Major,
                     direction: None, labelsize: None, labelcolor: None,
                     top: None, bottom: None, left: None, right: None }
    }
}

impl TickParams {
    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        kwargs.set_item("axis", self.axis.as_str())?;
        kwargs.set_item("which", self.which.as_str())?;
        if let Some(d) = self.direction {
            kwargs.set_item("direction", d.as_str())?
        }
        if let Some(s) = self.labelsize { kwargs.set_item("labelsize", s)? }
        if let Some(c) = &self.labelcolor { kwargs.set_item("labelcolor", c)? }
        for (side, on) in [("top", self.top), ("bottom", self.bottom),
                           ("left", self.left), ("right", self.right)] {
            if let Some(on) = on { kwargs.set_item(side, on)? }
        }
        Ok(kwargs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickLabelStyle {
    /// Scientific notation, used outside the power limits.
    Sci,
    /// Never scientific notation.
    Plain,
}

/// Formatting of the numbers labelling the ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabelFormat {
    pub axis: AxisName,
    pub style: TickLabelStyle,
    /// Scientific notation is used for numbers smaller than
    /// 10^`scilimits.0` or larger than 10^`scilimits.1`.  (0, 0)
    /// includes all numbers.
    pub scilimits: Option<(i32, i32)>,
    /// Whether a shared offset (the "offset text") may be factored
    /// out of the tick labels.
    pub use_offset: Option<bool>,
}

impl TickLabelFormat {
    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        kwargs.set_item("axis", self.axis.as_str())?;
        kwargs.set_item("style", match self.style {
            TickLabelStyle::Sci => "sci",
            TickLabelStyle::Plain => "plain",
        })?;
        if let Some(l) = self.scilimits { kwargs.set_item("scilimits", l)? }
        if let Some(b) = self.use_offset { kwargs.set_item("useOffset", b)? }
        Ok(kwargs)
    }
}

/// Box drawn around a text annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct BBox {
    /// Matplotlib box style: "square", "round", "round4",...
    pub boxstyle: &'static str,
    pub pad: f64,
    pub facecolor: Color,
    pub edgecolor: Color,
    pub linewidth: f64,
}

impl Default for BBox {
    fn default() -> Self {
        BBox { boxstyle: "square", pad: 0.2, facecolor: Color::WHITE,
               edgecolor: Color::BLACK, linewidth: 1. }
    }
}

/// Options of [`Axes::text`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOptions {
    pub fontsize: Option<f64>,
    pub color: Option<Color>,
    pub bbox: Option<BBox>,
}

impl TextOptions {
    fn validate(&self) -> Result<(), Error> {
        if let Some(s) = self.fontsize { check_size("fontsize", s)? }
        if let Some(c) = &self.color { c.validate()? }
        if let Some(b) = &self.bbox {
            check_width("bbox pad", b.pad)?;
            check_width("bbox linewidth", b.linewidth)?;
            b.facecolor.validate()?;
            b.edgecolor.validate()?;
        }
        Ok(())
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if let Some(s) = self.fontsize { kwargs.set_item("fontsize", s)? }
        if let Some(c) = &self.color { kwargs.set_item("color", c)? }
        if let Some(b) = &self.bbox {
            let bbox = PyDict::new_bound(py);
            bbox.set_item("boxstyle", format!("{},pad={}", b.boxstyle, b.pad))?;
            bbox.set_item("facecolor", &b.facecolor)?;
            bbox.set_item("edgecolor", &b.edgecolor)?;
            bbox.set_item("linewidth", b.linewidth)?;
            kwargs.set_item("bbox", bbox)?;
        }
        Ok(kwargs)
    }
}

/// Spines of an [`Axes`], the lines framing the data area.
const SPINES: [&str; 4] = ["top", "bottom", "left", "right"];

impl Axes {
    /// Plot `y` versus `x` as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```
    /// use mplstyle as plt;
    /// let (fig, [[mut ax]]) = plt::subplots()?;
    /// ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
    /// fig.save().to_file("target/XY_plot.pdf")?;
    /// # Ok::<(), mplstyle::Error>(())
    /// ```
    pub fn xy<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> XY<'a, D>
    where D: Data + ?Sized {
        // The chain leading to plot starts with the data (using this
        // function) so that additional data may be added, sharing
        // common options.  We also mutably borrow `self` to reflect that
        // the final `.plot()` will mutate the underlying Python object.
        XY::new(self, Some(x), y)
    }

    /// Plot `y` versus its indices as lines and/or markers.
    pub fn y<'a, D>(&'a mut self, y: &'a D) -> XY<'a, D>
    where D: Data + ?Sized {
        XY::new(self, None, y)
    }

    /// Draw or hide the frame around the data area.
    pub fn set_frame_on(&mut self, b: bool) -> Result<&mut Self, Error> {
        meth!(self.ax, set_frame_on, (b,))?;
        Ok(self)
    }

    pub fn get_frame_on(&self) -> Result<bool, Error> {
        Python::with_gil(|py| {
            Ok(self.ax.call_method0(py, "get_frame_on")?.extract(py)?)
        })
    }

    /// Turn gridlines on with the given style.
    pub fn grid(&mut self, g: &GridStyle) -> Result<&mut Self, Error> {
        g.validate()?;
        meth!(self.ax, grid, py -> (true,), {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("which", g.which.as_str())
                .and_then(|_| kwargs.set_item("axis", g.axis.as_str()))
                .and_then(|_| kwargs.set_item("color", &g.color))
                .and_then(|_| kwargs.set_item("linestyle", g.linestyle.as_str()))
                .and_then(|_| kwargs.set_item("linewidth", g.linewidth))
                .map(|_| kwargs)
        })?;
        Ok(self)
    }

    /// Change the appearance of ticks and tick labels.
    pub fn tick_params(&mut self, p: &TickParams) -> Result<&mut Self, Error> {
        if let Some(s) = p.labelsize { check_size("labelsize", s)? }
        if let Some(c) = &p.labelcolor { c.validate()? }
        meth!(self.ax, tick_params, py -> (), p.kwargs(py))?;
        Ok(self)
    }

    /// Display minor ticks on both axes.
    pub fn minorticks_on(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, minorticks_on, ())?;
        Ok(self)
    }

    /// Configure the formatter of tick labels.  Only valid for the
    /// default (scalar) formatter.
    pub fn ticklabel_format(&mut self, f: &TickLabelFormat)
                            -> Result<&mut Self, Error> {
        if let Some((lo, hi)) = f.scilimits {
            if lo > hi {
                return Err(Error::invalid(
                    "scilimits", format!("({lo}, {hi}) is not ordered")))
            }
        }
        meth!(self.ax, ticklabel_format, py -> (), f.kwargs(py))?;
        Ok(self)
    }

    pub fn set_xlabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlabel, (label,))?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylabel, (label,))?;
        Ok(self)
    }

    /// Colour of the data area background.
    pub fn set_facecolor(&mut self, c: &Color) -> Result<&mut Self, Error> {
        c.validate()?;
        meth!(self.ax, set_facecolor, (c,))?;
        Ok(self)
    }

    /// Colour of the spine `side` ("top", "bottom", "left" or "right").
    pub fn set_spine_color(&mut self, side: &str, c: &Color)
                           -> Result<&mut Self, Error> {
        if !SPINES.contains(&side) {
            return Err(Error::invalid("spine", side))
        }
        c.validate()?;
        Python::with_gil(|py| -> Result<(), Error> {
            self.ax.bind(py).getattr("spines")?.get_item(side)?
                .call_method1("set_color", (c,))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Make the axes invisible while keeping its place in the layout:
    /// transparent spines and background, hidden tick labels and no
    /// tick marks.
    pub fn hide_decorations(&mut self) -> Result<&mut Self, Error> {
        for side in SPINES {
            self.set_spine_color(side, &Color::NONE)?;
        }
        self.set_facecolor(&Color::NONE)?;
        self.tick_params(&TickParams {
            labelcolor: Some(Color::NONE),
            top: Some(false), bottom: Some(false),
            left: Some(false), right: Some(false),
            ..TickParams::default()
        })
    }

    /// Add the text `s` at the data coordinates (`x`, `y`).
    pub fn text(&mut self, x: f64, y: f64, s: &str, opt: &TextOptions)
                -> Result<&mut Self, Error> {
        opt.validate()?;
        meth!(self.ax, text, py -> (x, y, s), opt.kwargs(py))?;
        Ok(self)
    }

    /// RGBA colour of the spine `side`.
    pub fn spine_color(&self, side: &str) -> Result<Color, Error> {
        if !SPINES.contains(&side) {
            return Err(Error::invalid("spine", side))
        }
        let colors = pymod!(COLORS)?;
        Python::with_gil(|py| {
            let c = self.ax.bind(py).getattr("spines")?.get_item(side)?
                .call_method0("get_edgecolor")?;
            to_rgba(colors, &c)
        })
    }

    /// Labels of the lines drawn on the axes, in drawing order.
    pub fn line_labels(&self) -> Result<Vec<String>, Error> {
        Python::with_gil(|py| {
            let mut labels = vec![];
            for l in self.ax.bind(py).call_method0("get_lines")?.iter()? {
                labels.push(l?.call_method0("get_label")?.extract()?);
            }
            Ok(labels)
        })
    }

    /// RGBA colours of the lines drawn on the axes, in drawing order.
    pub fn line_colors(&self) -> Result<Vec<Color>, Error> {
        let colors = pymod!(COLORS)?;
        Python::with_gil(|py| {
            let mut cs = vec![];
            for l in self.ax.bind(py).call_method0("get_lines")?.iter()? {
                cs.push(to_rgba(colors, &l?.call_method0("get_color")?)?);
            }
            Ok(cs)
        })
    }

    /// The legend of the axes, if one was placed.
    pub fn get_legend(&self) -> Result<Option<Legend>, Error> {
        Python::with_gil(|py| {
            let leg = self.ax.bind(py).call_method0("get_legend")?;
            Ok(if leg.is_none() { None } else { Some(Legend::wrap(leg.unbind())) })
        })
    }

    /// Place a legend gathering the labelled lines of the axes.
    ///
    /// # Example
    ///
    /// ```
    /// use mplstyle::{self as plt, LegendOptions};
    /// let (fig, [[mut ax]]) = plt::subplots()?;
    /// ax.y(&[1., 4., 2., 3.]).label("data").plot()?;
    /// let leg = ax.legend(&LegendOptions::default())?;
    /// assert_eq!(leg.texts()?, ["data"]);
    /// # Ok::<(), mplstyle::Error>(())
    /// ```
    pub fn legend(&mut self, opt: &LegendOptions) -> Result<Legend, Error> {
        opt.validate()?;
        let leg = Python::with_gil(|py| -> Result<PyObject, Error> {
            let kwargs = opt.kwargs(py)?;
            Ok(self.ax.bind(py).call_method("legend", (), Some(&kwargs))?
               .unbind())
        })?;
        Legend::finish(leg, opt)
    }

    /// Place a legend made of the given entries rather than of the
    /// lines drawn on the axes.
    pub fn legend_with(&mut self, entries: &[LegendEntry],
                       opt: &LegendOptions) -> Result<Legend, Error> {
        opt.validate()?;
        for e in entries { e.style.validate()? }
        let lines = pymod!(LINES)?;
        let leg = Python::with_gil(|py| -> Result<PyObject, Error> {
            let line2d = lines.bind(py).getattr("Line2D")?;
            let mut handles = Vec::with_capacity(entries.len());
            for e in entries {
                let kw = e.style.kwargs(py)?;
                let h = line2d.call((Vec::<f64>::new(), Vec::<f64>::new()),
                                    Some(&kw))?;
                handles.push(h.unbind());
            }
            let labels: Vec<&str> = entries.iter()
                .map(|e| e.label.as_str()).collect();
            let kwargs = opt.kwargs(py)?;
            kwargs.set_item("handles", handles)?;
            kwargs.set_item("labels", labels)?;
            Ok(self.ax.bind(py).call_method("legend", (), Some(&kwargs))?
               .unbind())
        })?;
        Legend::finish(leg, opt)
    }

    /// Handle to the horizontal axis.
    pub fn xaxis(&self) -> Result<Axis, Error> { self.axis("xaxis") }

    /// Handle to the vertical axis.
    pub fn yaxis(&self) -> Result<Axis, Error> { self.axis("yaxis") }

    fn axis(&self, name: &str) -> Result<Axis, Error> {
        Python::with_gil(|py| {
            let axis = self.ax.getattr(py, name)?;
            Ok(Axis { axis })
        })
    }
}

/// One axis (x or y) of an [`Axes`]: its label, ticks and offset text.
#[derive(Debug, Clone)]
pub struct Axis {
    axis: PyObject, // instance of matplotlib.axis.Axis
}

impl Axis {
    /// Font size of the axis label (e.g. "Time [s]").
    pub fn set_label_size(&mut self, size: f64) -> Result<&mut Self, Error> {
        check_size("label size", size)?;
        Python::with_gil(|py| -> Result<(), Error> {
            self.axis.bind(py).getattr("label")?
                .call_method1("set_size", (size,))?;
            Ok(())
        })?;
        Ok(self)
    }

    pub fn label_size(&self) -> Result<f64, Error> {
        Python::with_gil(|py| {
            Ok(self.axis.bind(py).getattr("label")?
               .call_method0("get_size")?.extract()?)
        })
    }

    /// Font size of the offset text (e.g. "1e3" or "+2.5").
    pub fn set_offset_text_fontsize(&mut self, size: f64)
                                    -> Result<&mut Self, Error> {
        check_size("offset text size", size)?;
        Python::with_gil(|py| -> Result<(), Error> {
            self.axis.bind(py).call_method0("get_offset_text")?
                .call_method1("set_fontsize", (size,))?;
            Ok(())
        })?;
        Ok(self)
    }

    pub fn offset_text_fontsize(&self) -> Result<f64, Error> {
        Python::with_gil(|py| {
            Ok(self.axis.bind(py).call_method0("get_offset_text")?
               .call_method0("get_fontsize")?.extract()?)
        })
    }

    /// Whether the major gridlines are drawn.
    pub fn gridlines_visible(&self) -> Result<bool, Error> {
        Python::with_gil(|py| {
            let lines = self.axis.bind(py).call_method0("get_gridlines")?;
            let mut any = false;
            for line in lines.iter()? {
                any = true;
                if !line?.call_method0("get_visible")?.extract::<bool>()? {
                    return Ok(false)
                }
            }
            Ok(any)
        })
    }

    /// Direction of the major tick marks.
    pub fn tick_direction(&self) -> Result<TickDirection, Error> {
        let dir: String = Python::with_gil(|py| -> Result<_, Error> {
            Ok(self.first_major_tick(py)?
               .call_method0("get_tickdir")?.extract()?)
        })?;
        dir.parse()
    }

    /// Font size of the major tick labels.
    pub fn tick_label_size(&self) -> Result<f64, Error> {
        Python::with_gil(|py| {
            Ok(self.first_major_tick(py)?.getattr("label1")?
               .call_method0("get_fontsize")?.extract()?)
        })
    }

    /// RGBA colour of the major tick labels.
    pub fn tick_label_color(&self) -> Result<Color, Error> {
        let colors = pymod!(COLORS)?;
        Python::with_gil(|py| {
            let c = self.first_major_tick(py)?.getattr("label1")?
                .call_method0("get_color")?;
            to_rgba(colors, &c)
        })
    }

    /// Whether major tick marks are drawn on either side.
    pub fn tick_marks_visible(&self) -> Result<bool, Error> {
        Python::with_gil(|py| {
            let tick = self.first_major_tick(py)?;
            for line in ["tick1line", "tick2line"] {
                if tick.getattr(line)?.call_method0("get_visible")?
                    .extract::<bool>()? {
                    return Ok(true)
                }
            }
            Ok(false)
        })
    }

    fn first_major_tick<'py>(&self, py: Python<'py>)
                             -> PyResult<Bound<'py, PyAny>> {
        self.axis.bind(py).call_method0("get_major_ticks")?.get_item(0)
    }

    /// Exponents outside of which the tick labels switch to
    /// scientific notation.
    pub fn power_limits(&self) -> Result<(i32, i32), Error> {
        let lims: Vec<i32> = Python::with_gil(|py| -> Result<_, Error> {
            let f = self.axis.bind(py).call_method0("get_major_formatter")?;
            trace!(formatter = %f, "reading power limits");
            // A list when taken from rcParams, a tuple otherwise.
            Ok(f.getattr("_powerlimits")?.extract()?)
        })?;
        match lims[..] {
            [lo, hi] => Ok((lo, hi)),
            _ => Err(Error::invalid("power limits", format!("{lims:?}"))),
        }
    }

    /// Whether the tick label formatter may use an offset.
    pub fn use_offset(&self) -> Result<bool, Error> {
        Python::with_gil(|py| {
            Ok(self.axis.bind(py).call_method0("get_major_formatter")?
               .call_method0("get_useOffset")?.extract()?)
        })
    }
}
