//! [Rust][] helpers giving [Matplotlib][] figures a consistent look.
//!
//! Usage
//! -----
//!
//! Figures and axes are created through an interface close to
//! [Matplotlib][]'s explicit one.  An [`AxesStyler`] then applies a
//! bundle of cosmetic settings (frame, grid, ticks, font sizes,
//! scientific notation) to any axes so that all the plots of a
//! session share the same presentation:
//!
//! ```
//! use mplstyle as plt;
//! let (fig, [[mut ax]]) = plt::subplots()?;
//! plt::AxesStyler::default().apply(&mut ax)?;
//! ax.xy(&[1., 2., 3., 4.], &[1e4, 4e4, 2e4, 3e4]).plot()?;
//! ax.set_xlabel("Time [s]")?;
//! fig.save().to_file("target/styled.pdf")?;
//! # Ok::<(), mplstyle::Error>(())
//! ```
//!
//! The [`demos`] module holds worked examples (standard styling, colour
//! gradients, multi-panel layouts, LaTeX labels).
//!
//! [Rust]: https://www.rust-lang.org/
//! [Matplotlib]: https://matplotlib.org/

use std::path::Path;
use lazy_static::lazy_static;
use pyo3::{
    prelude::*,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::PyDict,
};
use thiserror::Error;
use tracing::debug;

/// Call the method `$m` of the Python object `$obj` (a `PyObject`),
/// discarding its result.
macro_rules! meth {
    ($obj: expr, $m: ident, $py: ident -> $args: expr, $kwargs: expr) => {
        Python::with_gil(|$py| -> Result<(), $crate::Error> {
            let kwargs = $kwargs?;
            $obj.bind($py).call_method(stringify!($m), $args, Some(&kwargs))?;
            Ok(())
        })
    };
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| -> Result<(), $crate::Error> {
            $obj.bind(py).call_method1(stringify!($m), $args)?;
            Ok(())
        })
    };
}

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(|m| m.unbind()))
}}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| $crate::Error::NoMatplotlib)
}}

mod axes;
mod color;
mod legend;
mod plot;
pub mod style;
pub mod demos;

pub use axes::{
    Axes, Axis, AxisName, BBox, GridStyle, TextOptions, TickDirection,
    TickLabelFormat, TickLabelStyle, TickParams, Which,
};
pub use color::{Color, Colormap};
pub use legend::{Legend, LegendEntry, LegendOptions, Location};
pub use plot::{LineKind, LineStyle, Marker, XY};
pub use style::{apply_standard_style, AppliedStyle, AxesStyler, StyleOptions};

/// Possible errors of matplotlib functions.
#[derive(Debug, Error)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    #[error("The matplotlib library has not been found.\n\
             Please install it.  See https://matplotlib.org/\n\
             If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554")]
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    #[error("A path contains an element that is not a directory or does not exist")]
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    #[error("Permission denied to access or create the filesystem path")]
    PermissionError,
    /// No colormap is registered under this name.
    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),
    /// A configuration value is out of its admissible range.
    #[error("Invalid value for {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    /// The abscissas and ordinates of a data set differ in length.
    #[error("x and y must have the same length (got {x} and {y})")]
    DimensionMismatch { x: usize, y: usize },
    /// Other Python errors.
    #[error("Python error: {0}")]
    Python(#[from] PyErr),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidOption { name, reason: reason.into() }
    }
}

/// Check that a font or marker size is finite and positive.
pub(crate) fn check_size(name: &'static str, v: f64) -> Result<(), Error> {
    if v.is_finite() && v > 0. {
        Ok(())
    } else {
        Err(Error::invalid(name, format!("{v} is not a positive size")))
    }
}

/// Check that a width is finite and non-negative (0 hides the line).
pub(crate) fn check_width(name: &'static str, v: f64) -> Result<(), Error> {
    if v.is_finite() && v >= 0. {
        Ok(())
    } else {
        Err(Error::invalid(name, format!("{v} is not a non-negative width")))
    }
}

lazy_static! {
    // Import matplotlib modules.
    static ref MATPLOTLIB: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib")
    };
    static ref FIGURE: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.figure")
    };
    static ref PYPLOT: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.pyplot")
    };
    static ref LINES: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.lines")
    };
    static ref COLORS: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.colors")
    };
}

/// Data that can be handed to Matplotlib as a 1D numpy array.
pub trait Data {
    /// Number of values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }

    fn to_numpy(&self, py: Python<'_>) -> PyObject;
}

impl Data for [f64] {
    fn len(&self) -> usize { <[f64]>::len(self) }

    fn to_numpy(&self, py: Python<'_>) -> PyObject {
        numpy::PyArray1::from_slice_bound(py, self).into_any().unbind()
    }
}

impl<const N: usize> Data for [f64; N] {
    fn len(&self) -> usize { N }

    fn to_numpy(&self, py: Python<'_>) -> PyObject {
        self.as_slice().to_numpy(py)
    }
}

impl Data for Vec<f64> {
    fn len(&self) -> usize { self.as_slice().len() }

    fn to_numpy(&self, py: Python<'_>) -> PyObject {
        self.as_slice().to_numpy(py)
    }
}

impl<S> Data for ndarray::ArrayBase<S, ndarray::Ix1>
where S: ndarray::Data<Elem = f64> {
    fn len(&self) -> usize { self.dim() }

    fn to_numpy(&self, py: Python<'_>) -> PyObject {
        use numpy::ToPyArray;
        self.to_pyarray_bound(py).into_any().unbind()
    }
}

/// The top level container for all the plot elements.
#[derive(Debug, Clone)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

/// Decode a three-digit subplot position `RCI` (rows, columns, index).
fn subplot_position(pos: u16) -> Result<(u16, u16, u16), Error> {
    let (r, c, i) = (pos / 100, pos / 10 % 10, pos % 10);
    if !(100..1000).contains(&pos) || c == 0 || i == 0 || i > r * c {
        return Err(Error::invalid(
            "subplot position",
            format!("{pos} is not a three-digit code RCI with 1 <= I <= R*C")));
    }
    Ok((r, c, i))
}

impl Figure {
    /// Return a new `Figure`, not managed by pyplot.
    pub fn new() -> Result<Figure, Error> {
        let figure = pymod!(FIGURE)?;
        Python::with_gil(|py| {
            let fig = figure.bind(py).getattr("Figure")?.call0()?;
            Ok(Self { fig: fig.unbind() })
        })
    }

    /// Create a grid of `R` × `C` axes filling the figure.
    ///
    /// Return an error if Matplotlib is not present on the system.
    pub fn subplots<const R: usize, const C: usize>(
        &self) -> Result<[[Axes; C]; R], Error> {
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("squeeze", false)?;
            // With `squeeze=False` the result is always a 2D array.
            let axs: Vec<Vec<PyObject>> = self.fig.bind(py)
                .call_method("subplots", (R, C), Some(&kwargs))?
                .call_method0("tolist")?
                .extract()?;
            Ok(std::array::from_fn(|r| std::array::from_fn(|c| {
                Axes { ax: axs[r][c].clone_ref(py) }
            })))
        })
    }

    /// Add axes at the position `pos`, a three-digit code `RCI`
    /// meaning the `I`th cell of a grid with `R` rows and `C` columns.
    ///
    /// # Example
    ///
    /// ```
    /// use mplstyle as plt;
    /// let fig = plt::figure()?;
    /// let mut ax = fig.add_subplot(223)?;
    /// ax.y(&[1., 4., 2., 3.]).plot()?;
    /// # Ok::<(), mplstyle::Error>(())
    /// ```
    pub fn add_subplot(&self, pos: u16) -> Result<Axes, Error> {
        let (r, c, i) = subplot_position(pos)?;
        Python::with_gil(|py| {
            let ax = self.fig.bind(py).call_method1("add_subplot", (r, c, i))?;
            Ok(Axes { ax: ax.unbind() })
        })
    }

    /// Set the width (`wspace`) and height (`hspace`) of the padding
    /// between subplots, as fractions of the average axes size.
    pub fn subplots_adjust(&self, wspace: f64, hspace: f64)
                           -> Result<&Self, Error> {
        check_width("wspace", wspace)?;
        check_width("hspace", hspace)?;
        meth!(self.fig, subplots_adjust, py -> (), {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("wspace", wspace)
                .and_then(|_| kwargs.set_item("hspace", hspace))
                .map(|_| kwargs)
        })?;
        Ok(self)
    }

    /// Whether the figure background patch is drawn.
    pub fn set_frameon(&self, b: bool) -> Result<&Self, Error> {
        meth!(self.fig, set_frameon, (b,))?;
        Ok(self)
    }

    /// If using a GUI backend with pyplot, display the figure window.
    ///
    /// ⚠ [This does not manage an GUI event loop][GUI]. Consequently,
    /// the figure may only be shown briefly or not shown at all if
    /// you or your environment are not managing an event loop.  Use
    /// [`show()`] for that.
    ///
    /// [GUI]: https://matplotlib.org/stable/api/figure_api.html#matplotlib.figure.Figure.show
    pub fn show(self) -> Result<(), Error> {
        Python::with_gil(|py| {
            self.fig.bind(py).call_method0("show")?;
            Ok(())
        })
    }

    /// All the axes of the figure, in the order they were added.
    pub fn axes(&self) -> Result<Vec<Axes>, Error> {
        Python::with_gil(|py| {
            let axs: Vec<PyObject> = self.fig.bind(py)
                .call_method0("get_axes")?.extract()?;
            Ok(axs.into_iter().map(|ax| Axes { ax }).collect())
        })
    }

    /// Release the figure from pyplot's figure manager.
    pub fn close(self) -> Result<(), Error> {
        let pyplot = pymod!(PYPLOT)?;
        Python::with_gil(|py| {
            pyplot.bind(py).call_method1("close", (self.fig.clone_ref(py),))?;
            Ok(())
        })
    }

    pub fn save(&self) -> Savefig {
        Savefig { fig: self.fig.clone(), dpi: None }
    }
}

pub struct Savefig {
    fig: PyObject,
    dpi: Option<f64>,
}

impl Savefig {
    /// Resolution in dots per inch.  Return an error unless `dpi` is
    /// finite and positive.
    pub fn dpi(&mut self, dpi: f64) -> Result<&mut Self, Error> {
        check_size("dpi", dpi)?;
        self.dpi = Some(dpi);
        Ok(self)
    }

    /// Save the figure to `path`; the format is deduced from the
    /// extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        debug!(path = %path.display(), dpi = ?self.dpi, "saving figure");
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            if let Some(dpi) = self.dpi {
                kwargs.set_item("dpi", dpi)?;
            }
            self.fig.bind(py).call_method("savefig", (path,), Some(&kwargs))
                .map_err(|e| {
                    if e.is_instance_of::<PyFileNotFoundError>(py) {
                        Error::FileNotFoundError
                    } else if e.is_instance_of::<PyPermissionError>(py) {
                        Error::PermissionError
                    } else {
                        Error::Python(e)
                    }
                })?;
            Ok(())
        })
    }
}


/// Create a new figure managed by pyplot.
pub fn figure() -> Result<Figure, Error> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| {
        let fig = pyplot.bind(py).call_method0("figure")?;
        Ok(Figure { fig: fig.unbind() })
    })
}

/// Create a pyplot figure together with a grid of `R` × `C` axes.
pub fn subplots<const R: usize, const C: usize>(
) -> Result<(Figure, [[Axes; C]; R]), Error> {
    let fig = figure()?;
    let ax = fig.subplots()?;
    Ok((fig, ax))
}

/// Display all open figures.
pub fn show() -> Result<(), Error> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| {
        pyplot.bind(py).call_method0("show")?;
        Ok(())
    })
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subplot_codes() {
        assert_eq!(subplot_position(221).unwrap(), (2, 2, 1));
        assert_eq!(subplot_position(224).unwrap(), (2, 2, 4));
        assert_eq!(subplot_position(111).unwrap(), (1, 1, 1));
        assert!(subplot_position(225).is_err());
        assert!(subplot_position(210).is_err());
        assert!(subplot_position(21).is_err());
        assert!(subplot_position(1000).is_err());
    }

    #[test]
    fn a_basic_pdf() -> Result<(), Error> {
        let (fig, [[mut ax]]) = subplots()?;
        AxesStyler::default().apply(&mut ax)?;
        ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
        fig.save().to_file("target/a_basic.pdf")?;
        fig.close()
    }

    #[test]
    fn a_basic_row() -> Result<(), Error> {
        let (fig, [[mut ax0, mut ax1]]) = subplots()?;
        ax0.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
        ax1.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).fmt(".").plot()?;
        fig.save().to_file("target/a_basic_row.pdf")?;
        fig.close()
    }

    #[test]
    fn a_basic_grid() -> Result<(), Error> {
        let (fig, [[mut ax0, mut ax1],
                   [mut ax2, mut ax3]]) = subplots()?;
        ax0.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
        ax1.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).fmt(".").plot()?;
        ax2.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).fmt("r").plot()?;
        ax3.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).fmt("r.").plot()?;
        fig.save().dpi(50.)?.to_file("target/a_basic_grid.png")?;
        fig.close()
    }

    #[test]
    fn rejects_bad_dpi() -> Result<(), Error> {
        let fig = Figure::new()?;
        let mut save = fig.save();
        for dpi in [-3., 0., f64::NAN, f64::INFINITY] {
            assert!(matches!(save.dpi(dpi),
                             Err(Error::InvalidOption { name: "dpi", .. })));
        }
        assert_eq!(save.dpi(72.)?.dpi, Some(72.));
        Ok(())
    }

    #[test]
    fn a_detached_figure() -> Result<(), Error> {
        let fig = Figure::new()?;
        let [[mut ax]] = fig.subplots()?;
        apply_standard_style(&mut ax)?;
        ax.y(&ndarray::Array1::linspace(0., 2e4, 5)).plot()?;
        fig.save().to_file("target/a_detached_figure.svg")?;
        Ok(())
    }

    #[test]
    fn save_into_missing_directory() -> Result<(), Error> {
        let dir = tempfile::tempdir().unwrap();
        let (fig, [[mut ax]]) = subplots()?;
        ax.y(&[1., 4., 2., 3.]).plot()?;
        let r = fig.save().to_file(dir.path().join("no/such/dir/fig.pdf"));
        assert!(matches!(r, Err(Error::FileNotFoundError)));
        fig.save().to_file(dir.path().join("fig.pdf"))?;
        assert!(dir.path().join("fig.pdf").exists());
        fig.close()
    }
}
