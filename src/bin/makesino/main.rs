mod cli;
mod progress;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Cli::parse();

    // --- Geometry: an invalid one must stop us before anything is read ------------
    let config = read_config_file(&args.config)?;
    let geometry = config.geometry()?;
    let out = args.out.clone().unwrap_or_else(|| config.output.clone());

    // Before starting the potentially long computation, make sure that we can
    // write the result to the requested destination.
    if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    log::info!("Writing sinogram to {}", out.display());

    let mut creator = SinogramCreator::new(geometry);
    if args.histogram {
        creator = creator.with_diagnostic(Box::new(ReconstructionHistogram::new(&geometry)));
    }
    let parallel = args.threads > 1 && !args.histogram;
    rayon::ThreadPoolBuilder::new().num_threads(args.threads).build_global()?;

    // --- Process input files -------------------------------------------------------
    let mut progress = Progress::new(&args.infiles);
    for file in &args.infiles {
        let windows = io::hits::read_file(file);
        progress.read_file_done(file, &windows);
        let Ok(windows) = windows else { continue };
        let batches = windows.into_iter().map(Batch::from).collect::<Vec<_>>();
        if parallel {
            creator.exec_parallel(&batches);
        } else {
            for batch in &batches {
                // Malformed batches are logged and counted by the creator
                let _ = creator.exec(batch);
            }
        }
    }

    // --- Write the image -----------------------------------------------------------
    let stats = *creator.stats();
    if let Some(sink) = creator.diagnostic() {
        log::info!("Diagnostic histogram holds {} entries", group_digits(sink.entries()));
    }
    let mut timing = timing::Progress::new();
    timing.start("Writing sinogram");
    let sinogram = creator.terminate(&out)?;
    timing.done();
    if sinogram.max() > MAX_GREY {
        log::warn!("Largest count {} exceeds the declared maximum grey value {MAX_GREY}", sinogram.max());
    }

    progress.final_report(&stats);
    Ok(())
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::error::Error;
use clap::Parser;
use env_logger::Env;
use petsino::{
    Batch, SinogramCreator,
    config::sinogram::read_config_file,
    diagnostic::ReconstructionHistogram,
    io::{self, pgm::MAX_GREY},
    utils::{group_digits, timing},
};
use cli::Cli;
use progress::Progress;
