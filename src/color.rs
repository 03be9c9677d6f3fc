//! Colours and colormaps.

use std::borrow::Cow;
use pyo3::{prelude::*, exceptions::PyKeyError};
use tracing::trace;
use crate::{Error, MATPLOTLIB};

/// A Matplotlib colour specification.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// Any name Matplotlib understands: "k", "indianred", "#1f77b4",
    /// "none",...
    Named(Cow<'static, str>),
    /// Red, green, blue and alpha components in \[0, 1\].
    Rgba([f64; 4]),
}

impl Color {
    pub const BLACK: Color = Color::Named(Cow::Borrowed("k"));
    pub const WHITE: Color = Color::Named(Cow::Borrowed("w"));
    pub const GREY: Color = Color::Named(Cow::Borrowed("grey"));
    /// Fully transparent.
    pub const NONE: Color = Color::Named(Cow::Borrowed("none"));

    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Color::Named(name.into())
    }

    /// Return the colour with components `r`, `g`, `b` and opacity
    /// `a`, or an error if one of them is not in \[0, 1\].
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Result<Self, Error> {
        let c = Color::Rgba([r, g, b, a]);
        c.validate()?;
        Ok(c)
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        match self {
            Color::Named(name) if name.trim().is_empty() =>
                Err(Error::invalid("color", "empty colour name")),
            Color::Named(_) => Ok(()),
            Color::Rgba(c) => {
                if c.iter().all(|v| (0. ..= 1.).contains(v)) {
                    Ok(())
                } else {
                    Err(Error::invalid(
                        "color", format!("RGBA components {c:?} not in [0, 1]")))
                }
            }
        }
    }
}

/// Convert any Matplotlib colour specification `c` to RGBA using the
/// module `matplotlib.colors`.
pub(crate) fn to_rgba(colors: &Py<PyModule>, c: &Bound<'_, PyAny>)
                      -> Result<Color, Error> {
    let (r, g, b, a): (f64, f64, f64, f64) =
        colors.bind(c.py()).call_method1("to_rgba", (c.clone(),))?.extract()?;
    Ok(Color::Rgba([r, g, b, a]))
}

impl From<&'static str> for Color {
    fn from(name: &'static str) -> Self { Color::named(name) }
}

impl ToPyObject for Color {
    fn to_object(&self, py: Python<'_>) -> PyObject {
        match self {
            Color::Named(name) => {
                let name: &str = name;
                name.to_object(py)
            }
            Color::Rgba([r, g, b, a]) => (*r, *g, *b, *a).to_object(py),
        }
    }
}

impl IntoPy<PyObject> for &Color {
    fn into_py(self, py: Python<'_>) -> PyObject { self.to_object(py) }
}

/// A Matplotlib colormap, mapping \[0, 1\] to colours.
#[derive(Debug, Clone)]
pub struct Colormap {
    name: String,
    cmap: PyObject, // instance of matplotlib.colors.Colormap
}

impl Colormap {
    /// Look up the colormap registered under `name` ("viridis",
    /// "magma",...).
    pub fn get(name: &str) -> Result<Self, Error> {
        let mpl = pymod!(MATPLOTLIB)?;
        Python::with_gil(|py| {
            let cmap = mpl.bind(py).getattr("colormaps")?
                .get_item(name)
                .map_err(|e| {
                    if e.is_instance_of::<PyKeyError>(py) {
                        Error::UnknownColormap(name.to_string())
                    } else {
                        Error::Python(e)
                    }
                })?;
            Ok(Colormap { name: name.to_string(), cmap: cmap.unbind() })
        })
    }

    pub fn name(&self) -> &str { &self.name }

    /// Opaque colour at position `v`.  Values outside \[0, 1\] map to
    /// the colormap's under/over colours.
    pub fn at(&self, v: f64) -> Result<Color, Error> {
        if !v.is_finite() {
            return Err(Error::invalid("colormap position", v.to_string()))
        }
        Python::with_gil(|py| {
            let rgba: (f64, f64, f64, f64) =
                self.cmap.call1(py, (v, 1.))?.extract(py)?;
            Ok(Color::Rgba([rgba.0, rgba.1, rgba.2, rgba.3]))
        })
    }

    /// `n` colours taken at evenly spaced positions over \[0, 1\],
    /// both ends included.
    ///
    /// # Example
    ///
    /// ```
    /// use mplstyle::Colormap;
    /// let cs = Colormap::get("magma")?.sample(6)?;
    /// assert_eq!(cs.len(), 6);
    /// # Ok::<(), mplstyle::Error>(())
    /// ```
    pub fn sample(&self, n: usize) -> Result<Vec<Color>, Error> {
        trace!(cmap = %self.name, n, "sampling colormap");
        match n {
            0 => Ok(vec![]),
            1 => Ok(vec![self.at(0.)?]),
            _ => (0 .. n).map(|i| self.at(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::COLORS;

    #[test]
    fn rgba_range() {
        assert!(Color::rgba(0., 0.5, 1., 1.).is_ok());
        assert!(Color::rgba(1.2, 0., 0., 1.).is_err());
        assert!(Color::rgba(f64::NAN, 0., 0., 1.).is_err());
        assert!(Color::named(" ").validate().is_err());
        assert!(Color::from("indianred").validate().is_ok());
    }

    #[test]
    fn magma_six_distinct() -> Result<(), Error> {
        let magma = Colormap::get("magma")?;
        let cs = magma.sample(6)?;
        assert_eq!(cs.len(), 6);
        for (i, a) in cs.iter().enumerate() {
            for b in &cs[i + 1 ..] {
                assert_ne!(a, b);
            }
        }
        // Stable order.
        assert_eq!(cs, magma.sample(6)?);
        assert_eq!(cs[0], magma.at(0.)?);
        assert_eq!(cs[5], magma.at(1.)?);
        Ok(())
    }

    #[test]
    fn names_to_rgba() -> Result<(), Error> {
        let colors = pymod!(COLORS)?;
        Python::with_gil(|py| -> Result<(), Error> {
            let rgba = |c: &Color| to_rgba(colors, c.to_object(py).bind(py));
            assert_eq!(rgba(&Color::NONE)?, Color::Rgba([0., 0., 0., 0.]));
            assert_eq!(rgba(&Color::BLACK)?, Color::Rgba([0., 0., 0., 1.]));
            let c = Color::rgba(0.25, 0.5, 0.75, 1.)?;
            assert_eq!(rgba(&c)?, c);
            Ok(())
        })
    }

    #[test]
    fn unknown_colormap() {
        match Colormap::get("no-such-colormap") {
            Err(Error::UnknownColormap(name)) =>
                assert_eq!(name, "no-such-colormap"),
            r => panic!("unexpected {r:?}"),
        }
    }
}
