use std::path::PathBuf;

use anyhow::{
    anyhow,
    Context,
    Result
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use emnumerics::configuration::Configuration;
use emnumerics::dataset::datasetlayout::DatasetLayout;
use emnumerics::math::differentiation::holoborodko::holoborodko_auto;
use emnumerics::math::integration::elementwise::elementwise_quad;

#[derive(Parser)]
#[command(author, version, about = "Current distribution summary for a thin-wire half-dipole", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: PathBuf,

    /// Operating frequency in Hz
    #[arg(long)]
    frequency: f64,

    /// Column layout of the dataset, overrides the configuration
    #[arg(long)]
    layout: Option<DatasetLayout>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let configuration = Configuration::from_reader(&cli.config)
        .with_context(|| format!("reading {}", cli.config.display()))?;
    let mut source = configuration
        .dataset
        .clone()
        .ok_or_else(|| anyhow!("configuration has no `dataset` section"))?;
    if let Some(layout) = cli.layout {
        source.layout = layout;
    }

    let distribution = source.load(cli.frequency)?;
    info!(samples = distribution.len(), layout = %source.layout, "dataset loaded");
    if distribution.len() < 2 {
        return Err(anyhow!("{} GHz has {} sample(s) in the dataset", cli.frequency / 1e9, distribution.len()));
    }

    let x = distribution.positions();
    let currents = distribution.currents();
    let real: Vec<f64> = currents.iter().map(|c| c.re).collect();
    let imag: Vec<f64> = currents.iter().map(|c| c.im).collect();
    let points = configuration.quadrature.points;

    println!("samples: {}", distribution.len());
    println!("integral of Re(I): {:.6e}", elementwise_quad(&real, &x, points)?);
    println!("integral of Im(I): {:.6e}", elementwise_quad(&imag, &x, points)?);

    let dx = x[1] - x[0];
    let derivative = holoborodko_auto(&currents, dx)?;
    let peak = derivative.magnitudes().into_iter().fold(0.0_f64, f64::max);
    println!("peak |dI/dx|: {:.6e}", peak);
    Ok(())
}
