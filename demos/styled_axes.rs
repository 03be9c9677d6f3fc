//! Standard axes settings applied to a sine curve with large values,
//! so that the offset text and scientific notation show up.

use std::error::Error;
use mplstyle::{self as plt, AxesStyler};

fn main() -> Result<(), Box<dyn Error>> {
    let (fig, [[mut ax]]) = plt::subplots()?;
    AxesStyler::default().apply(&mut ax)?;
    let x: Vec<_> = (0 .. 1000).map(|i| i as f64 / 10.).collect();
    let y: Vec<_> = x.iter().map(|x| 1e4 * x.sin()).collect();
    ax.xy(&x, &y).fmt("r.").label("sin").plot()?;
    ax.set_xlabel("Time [s]")?.set_ylabel("Amplitude")?;
    // plt::show()?;
    fig.save().to_file("target/styled_axes.svg")?;
    Ok(())
}
