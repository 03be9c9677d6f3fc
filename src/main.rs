//! graph-formatting - Matplotlib formatting examples.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mplstyle::{self as plt, demos, AxesStyler, Figure, StyleOptions};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    /// Styled axes, custom line styles and a legend
    Standard,
    /// Gaussian densities coloured along a colormap
    ColorRange,
    /// Four panels with a custom legend and an annotation
    FourPanels,
    /// LaTeX markup in formatted strings
    Latex,
}

impl Demo {
    const ALL: [Demo; 4] =
        [Demo::Standard, Demo::ColorRange, Demo::FourPanels, Demo::Latex];

    fn name(self) -> &'static str {
        match self {
            Demo::Standard => "standard",
            Demo::ColorRange => "color-range",
            Demo::FourPanels => "four-panels",
            Demo::Latex => "latex",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "graph-formatting")]
#[command(about = "Examples of Matplotlib axes, colour, legend and text formatting",
          long_about = None)]
struct Args {
    /// Examples to run (default: all)
    #[arg(long = "demo", value_enum)]
    demos: Vec<Demo>,

    /// Save the figures in this directory instead of showing them
    #[arg(long)]
    save: Option<PathBuf>,

    /// Image format of saved figures
    #[arg(long, default_value = "svg")]
    format: String,

    /// Resolution of saved figures
    #[arg(long, value_parser = positive)]
    dpi: Option<f64>,

    /// Font size of the axis labels
    #[arg(long)]
    label_size: Option<f64>,

    /// Font size of the tick labels
    #[arg(long)]
    tick_label_size: Option<f64>,

    /// Font size of the offset texts
    #[arg(long)]
    offset_text_size: Option<f64>,

    /// Do not draw gridlines
    #[arg(long)]
    no_grid: bool,

    /// Display minor ticks
    #[arg(long)]
    minor_ticks: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

/// Parse a finite positive number.
fn positive(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0. => Ok(v),
        Ok(v) => Err(format!("{v} is not a positive number")),
        Err(e) => Err(e.to_string()),
    }
}

impl Args {
    /// The demos to run, in order.
    fn selected(&self) -> Vec<Demo> {
        if self.demos.is_empty() {
            Demo::ALL.to_vec()
        } else {
            self.demos.clone()
        }
    }

    /// Where `demo` is saved inside `dir`.
    fn output_path(&self, dir: &Path, demo: Demo) -> PathBuf {
        dir.join(format!("{}.{}", demo.name(), self.format))
    }

    fn style(&self) -> StyleOptions {
        let d = StyleOptions::default();
        StyleOptions {
            grid: if self.no_grid { None } else { d.grid },
            minor_ticks: self.minor_ticks,
            label_size: self.label_size.unwrap_or(d.label_size),
            tick_label_size: self.tick_label_size.unwrap_or(d.tick_label_size),
            offset_text_size: self.offset_text_size
                .unwrap_or(d.offset_text_size),
            ..d
        }
    }
}

fn init_logging(log: Option<&PathBuf>) -> Result<()> {
    if let Some(log_path) = log {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("cannot open log file {}",
                                     log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_ref())?;
    tracing::info!("Starting graph-formatting");

    let styler = AxesStyler::new(args.style()).context("invalid style")?;
    if let Some(dir) = &args.save {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create {}", dir.display()))?;
    }
    for demo in args.selected() {
        let fig: Figure = match demo {
            Demo::Standard => demos::standard_axes(&styler)?,
            Demo::ColorRange => demos::color_range(&styler)?,
            Demo::FourPanels => demos::four_panels(&styler)?,
            Demo::Latex => {
                for s in demos::latex_strings() {
                    println!("{s}");
                }
                continue
            }
        };
        match &args.save {
            Some(dir) => {
                let path = args.output_path(dir, demo);
                let mut save = fig.save();
                if let Some(dpi) = args.dpi { save.dpi(dpi)?; }
                save.to_file(&path)
                    .with_context(|| format!("cannot save {}", path.display()))?;
                println!("{}", path.display());
                fig.close()?;
            }
            None => plt::show()?,
        }
    }

    tracing::info!("graph-formatting exited");
    Ok(())
}
