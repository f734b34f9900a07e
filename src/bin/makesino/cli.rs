/// Command line interface for `makesino` executable
#[derive(clap::Parser, Debug, Clone)]
#[clap(
    name = "makesino",
    about = "Accumulate two-hit events into a sinogram image",
)]
pub (super) struct Cli {
    /// Text files with reconstructed hits: `window event x y layer` per line
    #[clap(required = true)]
    pub infiles: Vec<PathBuf>,

    /// TOML file describing the reconstruction geometry
    #[clap(short, long, default_value = "sinogram-config.toml")]
    pub config: PathBuf,

    /// Override the sinogram image location given in the config file
    #[clap(short, long)]
    pub out: Option<PathBuf>,

    /// Maximum number of rayon threads. With 1, batches are processed sequentially
    #[clap(short = 'j', long, default_value = "1")]
    pub threads: usize,

    /// Mirror accepted projections into a diagnostic histogram. Implies sequential processing
    #[clap(long)]
    pub histogram: bool,
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::path::PathBuf;
