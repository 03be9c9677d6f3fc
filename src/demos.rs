//! Worked examples of axes, colour, legend and text formatting.
//!
//! Each example builds and returns its [`Figure`]; the caller decides
//! whether to show or save it.  Data generators are kept separate so
//! that the plotted values can be checked without Matplotlib.

use std::f64::consts::PI;
use ndarray::Array1;
use tracing::info;
use crate::{
    figure, subplots, AxesStyler, BBox, Color, Colormap, Error, Figure,
    LegendEntry, LegendOptions, LineKind, LineStyle, Marker, TextOptions,
};

/// A nice red.
pub const INDIAN_RED: Color = Color::Named(std::borrow::Cow::Borrowed("indianred"));
/// A nice blue.
pub const ROYAL_BLUE: Color = Color::Named(std::borrow::Cow::Borrowed("royalblue"));

/// Data of the standard axes example.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardSeries {
    pub t: Array1<f64>,
    /// (t - 6.5)²
    pub x: Array1<f64>,
    /// 30 sin(t)
    pub y: Array1<f64>,
}

impl StandardSeries {
    /// 25 evenly spaced times over \[0, 4π\].
    pub fn generate() -> Self {
        let t = Array1::linspace(0., 4. * PI, 25);
        let x = t.mapv(|t| (t - 6.5).powi(2));
        let y = t.mapv(|t| 30. * t.sin());
        StandardSeries { t, x, y }
    }
}

/// Probability density of the normal distribution with mean `mean`
/// and standard deviation `sd` at `t`.
pub fn normal_pdf(t: f64, mean: f64, sd: f64) -> f64 {
    let z = (t - mean) / sd;
    (-0.5 * z * z).exp() / (sd * (2. * PI).sqrt())
}

/// Data of the colour range example: one Gaussian density per
/// standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianFamily {
    pub t: Array1<f64>,
    pub mean: f64,
    pub sds: Array1<f64>,
    /// `densities[i]` is the density for `sds[i]` at each `t`.
    pub densities: Vec<Array1<f64>>,
}

impl GaussianFamily {
    pub fn generate() -> Self {
        let t = Array1::linspace(-5., 5., 100);
        let mean = 0.;
        let sds = Array1::linspace(0.5, 5., 6);
        let densities = sds.iter()
            .map(|&sd| t.mapv(|t| normal_pdf(t, mean, sd)))
            .collect();
        GaussianFamily { t, mean, sds, densities }
    }
}

/// Data of the four panel example.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSeries {
    pub t: Array1<f64>,
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
    pub v: Array1<f64>,
    pub q: Array1<f64>,
}

impl PanelSeries {
    pub fn generate() -> Self {
        let t = Array1::linspace(-5., 5., 100);
        PanelSeries {
            x: t.mapv(f64::cos),
            y: t.mapv(f64::sin),
            z: t.mapv(|t| t.powi(3)),
            v: t.mapv(|t| t * t),
            q: t.mapv(|t| 3. * t.powi(4) - t.powi(3) + 2.),
            t,
        }
    }
}

/// One styled axes with two data sets drawn with custom line styles
/// and a legend built from their labels.
pub fn standard_axes(styler: &AxesStyler) -> Result<Figure, Error> {
    info!("standard axes example");
    let (fig, [[mut ax]]) = subplots()?;
    styler.apply(&mut ax)?;
    let s = StandardSeries::generate();
    let x_style = LineStyle::new()
        .marker(Marker::Circle).linewidth(3.).markersize(10.)
        .linestyle(LineKind::Dashed).color(Color::BLACK)
        .markeredgewidth(2.).markeredgecolor("red")
        .markerfacecolor(Color::NONE);
    let y_style = LineStyle::new()
        .marker(Marker::X).linewidth(3.).markersize(7.)
        .linestyle(LineKind::Dotted).color("darkslategray")
        .markeredgewidth(2.).markeredgecolor("blue")
        .markerfacecolor("blue");
    ax.xy(&s.t, &s.x).style(&x_style).label("x data")
        .xy(&s.t, &s.y).style(&y_style).label("y data")
        .plot()?;
    ax.set_xlabel("Time [s]")?.set_ylabel("Dependent Variable")?;
    ax.legend(&LegendOptions::default())?;
    Ok(fig)
}

/// Gaussian densities coloured along the "magma" colormap.
pub fn color_range(styler: &AxesStyler) -> Result<Figure, Error> {
    info!("colour range example");
    let (fig, [[mut ax]]) = subplots()?;
    styler.apply(&mut ax)?;
    let g = GaussianFamily::generate();
    let colors = Colormap::get("magma")?.sample(g.sds.len())?;
    for ((sd, pdf), c) in g.sds.iter().zip(&g.densities).zip(colors) {
        let label = format!(r"$\sigma$ = {sd:.1}");
        ax.xy(&g.t, pdf)
            .marker(Marker::None).linestyle(LineKind::Solid)
            .linewidth(2.5).color(c).label(&label)
            .plot()?;
    }
    ax.set_xlabel(r"Distance [$\mu$m]")?.set_ylabel("Intensity")?;
    ax.legend(&LegendOptions::default())?;
    Ok(fig)
}

/// Four styled panels over an invisible pair of backdrop axes, with a
/// hand-made legend and a boxed annotation.
pub fn four_panels(styler: &AxesStyler) -> Result<Figure, Error> {
    info!("four panels example");
    let fig = figure()?;
    let [[mut left, mut right]] = fig.subplots()?;
    fig.set_frameon(false)?;
    left.hide_decorations()?;
    right.hide_decorations()?;
    let mut axes = [fig.add_subplot(221)?, fig.add_subplot(223)?,
                    fig.add_subplot(222)?, fig.add_subplot(224)?];
    fig.subplots_adjust(0.3, 0.3)?;
    for ax in axes.iter_mut() {
        styler.apply(ax)?;
    }
    let [q_ax, v_ax, xy_ax, z_ax] = &mut axes;
    let s = PanelSeries::generate();
    let solid = LineStyle::new().linestyle(LineKind::Solid);

    xy_ax.xy(&s.t, &s.x).style(&solid).color(INDIAN_RED).label("x(t)")
        .xy(&s.t, &s.y).color(ROYAL_BLUE).label("y(t)")
        .plot()?;
    xy_ax.set_ylabel("Position [m]")?;

    z_ax.xy(&s.t, &s.z).style(&solid).color("purple").label("z(t)").plot()?;
    z_ax.set_xlabel("t [s]")?.set_ylabel(r"$z$ [${ms}^{-1}$]")?;

    v_ax.xy(&s.t, &s.v).style(&solid).color("orange").label(r"$v$(t)")
        .plot()?;
    v_ax.set_xlabel("t [s]")?.set_ylabel(r"$v$ [${ms}^{-1}$]")?;

    q_ax.xy(&s.t, &s.q).style(&solid).color(Color::BLACK).label(r"$q$(t)")
        .plot()?;
    q_ax.set_ylabel(r"$q$ [${s}^{-1}$]")?;

    let entries = [
        LegendEntry::new("x", solid.clone().color(INDIAN_RED)),
        LegendEntry::new("y", solid.color(ROYAL_BLUE)),
    ];
    xy_ax.legend_with(&entries, &LegendOptions {
        fontsize: 20.,
        markerfirst: false,
        ..LegendOptions::default()
    })?;

    q_ax.text(-1., 1.25e3, "Some useful text", &TextOptions {
        fontsize: Some(24.),
        bbox: Some(BBox::default()),
        ..TextOptions::default()
    })?;
    Ok(fig)
}

/// Value formatted into the θ label.
pub const THETA: f64 = 35.4282711;

/// Strings mixing LaTeX markup and number formatting.  Braces that
/// belong to LaTeX are doubled in the format string.
pub fn latex_strings() -> Vec<String> {
    vec![
        r"$\theta$".to_string(),
        format!(r"$\theta$ = {THETA:.2}"),
        format!(r"$\Delta_{{\mu}}$ = {PI:.2}"),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppliedStyle, StyleOptions};

    #[test]
    fn standard_series_values() {
        let s = StandardSeries::generate();
        assert_eq!(s.t.len(), 25);
        assert_eq!(s.t[0], 0.);
        assert!((s.t[24] - 4. * PI).abs() < 1e-12);
        assert_eq!(s.x[0], 42.25);
        assert_eq!(s.y[0], 0.);
        assert!((s.t[6] - PI).abs() < 1e-12);
        assert!(s.y[6].abs() < 1e-12);
    }

    #[test]
    fn deterministic_data() {
        let bits = |a: &Array1<f64>| a.iter().map(|v| v.to_bits())
            .collect::<Vec<_>>();
        let (a, b) = (StandardSeries::generate(), StandardSeries::generate());
        for (u, v) in [(&a.t, &b.t), (&a.x, &b.x), (&a.y, &b.y)] {
            assert_eq!(bits(u), bits(v));
        }
        assert_eq!(GaussianFamily::generate(), GaussianFamily::generate());
        assert_eq!(PanelSeries::generate(), PanelSeries::generate());
    }

    #[test]
    fn gaussian_densities() {
        let g = GaussianFamily::generate();
        let sds = [0.5, 1.4, 2.3, 3.2, 4.1, 5.];
        assert_eq!(g.sds.len(), sds.len());
        for (a, b) in g.sds.iter().zip(sds) {
            assert!((a - b).abs() < 1e-12);
        }
        assert_eq!(g.densities.len(), 6);
        assert!(g.densities.iter().all(|d| d.len() == g.t.len()));
        let peak = 1. / (0.5 * (2. * PI).sqrt());
        assert!((normal_pdf(0., 0., 0.5) - peak).abs() < 1e-12);
        // Riemann sum over [-5, 5] for sd = 1.
        let dt = 10. / 99.;
        let mass: f64 = g.t.iter().map(|&t| normal_pdf(t, 0., 1.) * dt).sum();
        assert!((mass - 1.).abs() < 1e-3);
    }

    #[test]
    fn latex() {
        assert_eq!(latex_strings(),
                   [r"$\theta$", r"$\theta$ = 35.43", r"$\Delta_{\mu}$ = 3.14"]);
    }

    #[test]
    fn standard_axes_figure() -> Result<(), Error> {
        let fig = standard_axes(&AxesStyler::default())?;
        let axes = fig.axes()?;
        assert_eq!(axes.len(), 1);
        assert!(AppliedStyle::read(&axes[0])?.matches(&StyleOptions::default()));
        assert_eq!(axes[0].line_labels()?, ["x data", "y data"]);
        let leg = axes[0].get_legend()?.expect("legend");
        assert_eq!(leg.texts()?, ["x data", "y data"]);
        fig.save().to_file("target/demo_standard_axes.png")?;
        fig.close()
    }

    #[test]
    fn color_range_figure() -> Result<(), Error> {
        let fig = color_range(&AxesStyler::default())?;
        let axes = fig.axes()?;
        assert_eq!(axes.len(), 1);
        assert_eq!(axes[0].line_colors()?, Colormap::get("magma")?.sample(6)?);
        let leg = axes[0].get_legend()?.expect("legend");
        assert_eq!(leg.texts()?, [r"$\sigma$ = 0.5", r"$\sigma$ = 1.4",
                                  r"$\sigma$ = 2.3", r"$\sigma$ = 3.2",
                                  r"$\sigma$ = 4.1", r"$\sigma$ = 5.0"]);
        fig.save().to_file("target/demo_color_range.png")?;
        fig.close()
    }

    #[test]
    fn four_panels_figure() -> Result<(), Error> {
        let fig = four_panels(&AxesStyler::default())?;
        let axes = fig.axes()?;
        assert_eq!(axes.len(), 6);
        let (backdrop, panels) = axes.split_at(2);
        for ax in backdrop {
            assert_eq!(ax.spine_color("left")?, Color::Rgba([0., 0., 0., 0.]));
            assert!(!ax.xaxis()?.tick_marks_visible()?);
        }
        for ax in panels {
            assert!(AppliedStyle::read(ax)?.matches(&StyleOptions::default()));
        }
        // Panels are added as 221, 223, 222 and 224.
        let labels: Vec<_> = panels.iter().map(|ax| ax.line_labels())
            .collect::<Result<_, _>>()?;
        assert_eq!(labels, [vec![r"$q$(t)"], vec![r"$v$(t)"],
                            vec!["x(t)", "y(t)"], vec!["z(t)"]]);
        let leg = panels[2].get_legend()?.expect("legend");
        assert_eq!(leg.texts()?, ["x", "y"]);
        for ax in [&panels[0], &panels[1], &panels[3]] {
            assert!(ax.get_legend()?.is_none());
        }
        fig.save().to_file("target/demo_four_panels.png")?;
        fig.close()
    }
}
