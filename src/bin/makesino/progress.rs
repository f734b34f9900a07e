/// Progress bar and statistics for `makesino` executable
pub (super) struct Progress {
    n_windows_read: u64,
    files_bar: ProgressBar,
    failed_files: Vec<PathBuf>,
}

impl Progress {

    pub (super) fn new(infiles: &[PathBuf]) -> Self {
        let first = infiles.first().map(|f| f.display().to_string()).unwrap_or_default();
        let bar = ProgressBar::new(infiles.len() as u64).with_message(first);
        bar.set_style(ProgressStyle::default_bar()
                      .template("Processing file: {msg}\n[{elapsed_precise}] {wide_bar} {pos}/{len} ({eta_precise})")
                      .unwrap_or_else(|_| ProgressStyle::default_bar())
        );
        bar.tick();
        Self {
            n_windows_read: 0,
            files_bar: bar,
            failed_files: vec![],
        }
    }

    pub (super) fn read_file_done<T>(&mut self, file: &Path, result: &Result<Vec<T>>) {
        match result {
            Ok(windows) => self.n_windows_read += windows.len() as u64,
            Err(e) => {
                log::error!("Could not read {}: {e}", file.display());
                self.failed_files.push(file.to_owned());
            }
        }
        self.files_bar.set_message(file.display().to_string());
        self.files_bar.inc(1);
    }

    pub (super) fn final_report(&self, stats: &Stats) {
        self.files_bar.finish_with_message("<finished processing files>");
        println!("Read {} time windows", group_digits(self.n_windows_read));
        println!("{stats}");
        if stats.two_hit_events > 0 {
            println!("{} / {} ({}%) two-hit events were on the reconstruction layer",
                     group_digits(stats.two_hit_events - stats.off_layer), group_digits(stats.two_hit_events),
                     100 * (stats.two_hit_events - stats.off_layer) / stats.two_hit_events);
        }
        if !self.failed_files.is_empty() {
            println!("Failed to read {} files:", self.failed_files.len());
            for file in &self.failed_files { println!("  {}", file.display()) }
        }
    }
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use petsino::{Result, Stats, utils::group_digits};
