//! Run-scoped accumulation of time windows into a sinogram.

use std::path::Path;

use rayon::prelude::*;
use units::todo::{Anglef32, Lengthf32};

use crate::diagnostic::DiagnosticSink;
use crate::discrete::{Bin, Binning};
use crate::error::{Error, Result};
use crate::hit::{Batch, Event, TimeWindow};
use crate::io;
use crate::lor::{signed_distance, LayerFilter, LOR};
use crate::parameters::GeometryParameters;
use crate::sinogram::Sinogram;
use crate::stats::Stats;
use crate::utils::group_digits;

/// Finds the sinogram cells crossed by the LORs of two-hit events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    binning: Binning,
    filter: LayerFilter,
}

impl Projector {

    pub fn new(geometry: GeometryParameters) -> Self {
        Self {
            binning: Binning::new(geometry),
            filter: LayerFilter::new(geometry.layer()),
        }
    }

    pub fn binning(&self) -> &Binning { &self.binning }

    /// Sweep all angles for `event`, calling `accept(bin, distance, theta)` for
    /// every projection which lands inside the sinogram.
    ///
    /// Only events with exactly two hits, both on the reconstruction layer,
    /// are projected. Everything that is skipped is tallied in `stats`.
    pub fn project_event(
        &self,
        event: &Event,
        stats: &mut Stats,
        mut accept: impl FnMut(Bin, Lengthf32, Anglef32),
    ) {
        stats.events += 1;
        let &[first, second] = event.hits() else { return };
        stats.two_hit_events += 1;
        if !(self.filter.accepts(&first) && self.filter.accepts(&second)) {
            stats.off_layer += 1;
            return;
        }
        let lor = LOR::from((first, second));
        let radius = self.binning.geometry().radius();
        for theta in self.binning.angles() {
            let Some(crossing) = lor.crossing(theta, radius)       else { stats.no_crossing      += 1; continue };
            let Some(distance) = signed_distance(crossing, radius) else { stats.outside_circle   += 1; continue };
            let Some(bin)      = self.binning.bin(distance, theta) else { stats.outside_sinogram += 1; continue };
            stats.accepted += 1;
            accept(bin, distance, theta);
        }
    }

    /// Project every event of `window`, in order.
    pub fn project_window(
        &self,
        window: &TimeWindow,
        stats: &mut Stats,
        mut accept: impl FnMut(Bin, Lengthf32, Anglef32),
    ) {
        for event in window.events() {
            self.project_event(event, stats, &mut accept);
        }
        stats.batches += 1;
    }
}

/// Owns the sinogram for the whole run.
///
/// The sinogram is allocated by the first call to [`exec`](Self::exec) (or
/// [`exec_parallel`](Self::exec_parallel)), accumulates over all subsequent
/// calls, and is written out once by [`terminate`](Self::terminate).
pub struct SinogramCreator {
    projector: Projector,
    sinogram: Option<Sinogram>,
    stats: Stats,
    diagnostic: Option<Box<dyn DiagnosticSink>>,
}

impl SinogramCreator {

    pub fn new(geometry: GeometryParameters) -> Self {
        Self {
            projector: Projector::new(geometry),
            sinogram: None,
            stats: Stats::default(),
            diagnostic: None,
        }
    }

    /// Mirror every accepted projection into `sink`
    pub fn with_diagnostic(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.diagnostic = Some(sink);
        self
    }

    pub fn projector(&self) -> &Projector { &self.projector }
    pub fn sinogram (&self) -> Option<&Sinogram> { self.sinogram.as_ref() }
    pub fn stats    (&self) -> &Stats { &self.stats }
    pub fn diagnostic(&self) -> Option<&dyn DiagnosticSink> { self.diagnostic.as_deref() }

    /// Accumulate one batch into the sinogram.
    ///
    /// A batch which is not a time window is skipped without touching the
    /// sinogram, and reported as `Error::MalformedBatch`.
    pub fn exec(&mut self, batch: &Batch) -> Result<()> {
        let Self { projector, sinogram, stats, diagnostic } = self;
        let sinogram = sinogram.get_or_insert_with(|| allocate(projector));
        let window = batch.time_window().map_err(|e| skip_malformed(stats, e))?;

        let mut batch_stats = Stats::default();
        projector.project_window(window, &mut batch_stats, |bin, distance, theta| {
            sinogram.increment(bin);
            if let Some(sink) = diagnostic.as_mut() { sink.fill(distance, theta) }
        });
        log::debug!("{} events in window: {} projections accepted",
                    window.number_of_events(), batch_stats.accepted);
        *stats += batch_stats;
        Ok(())
    }

    /// Accumulate many batches using all rayon threads.
    ///
    /// Each thread fills a private sinogram; these are summed and added to
    /// the run's sinogram in a single step once all batches are done. The
    /// result is identical to calling `exec` on each batch in turn, except
    /// that the diagnostic sink is not fed. Returns the errors of any
    /// malformed batches, which were skipped.
    pub fn exec_parallel(&mut self, batches: &[Batch]) -> Vec<Error> {
        let Self { projector, sinogram, stats, .. } = self;
        let sinogram = sinogram.get_or_insert_with(|| allocate(projector));
        let shape = sinogram.shape();
        let projector = &*projector;

        let empty = || (Sinogram::new(shape), Stats::default(), Vec::new());
        let (partial, partial_stats, errors) = batches
            .par_iter()
            .fold(empty, |(mut partial, mut partial_stats, mut errors), batch| {
                match batch.time_window() {
                    Ok(window) => projector.project_window(window, &mut partial_stats, |bin, _, _| partial.increment(bin)),
                    Err(e)     => errors.push(skip_malformed(&mut partial_stats, e)),
                }
                (partial, partial_stats, errors)
            })
            .reduce(empty, |(mut a, mut a_stats, mut a_errors), (b, b_stats, b_errors)| {
                a.merge(&b);
                a_stats += b_stats;
                a_errors.extend(b_errors);
                (a, a_stats, a_errors)
            });

        sinogram.merge(&partial);
        *stats += partial_stats;
        errors
    }

    /// Write the sinogram to `path` as a plain PGM image, ending the run.
    ///
    /// Fails with `Error::NotInitialized` if no batch was ever processed.
    pub fn terminate(self, path: &Path) -> Result<Sinogram> {
        let sinogram = self.sinogram.ok_or(Error::NotInitialized)?;
        io::pgm::write_to_file(&sinogram, path)?;
        log::info!("Wrote {}x{} sinogram holding {} projections to {}",
                   sinogram.n_distance(), sinogram.n_theta(),
                   group_digits(sinogram.total()), path.display());
        Ok(sinogram)
    }
}

fn allocate(projector: &Projector) -> Sinogram {
    let shape = projector.binning().shape();
    log::info!("Allocating sinogram: {} distance bins x {} angle bins", shape.0, shape.1);
    Sinogram::new(shape)
}

fn skip_malformed(stats: &mut Stats, e: Error) -> Error {
    stats.malformed_batches += 1;
    log::warn!("Skipping batch: {e}");
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::ReconstructionHistogram;
    use crate::hit::Hit;
    use crate::parameters::AngleRange;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    const LAYER: u32 = 1;

    fn geometry() -> GeometryParameters {
        GeometryParameters::from_f32s_in_mm(LAYER, 50.0, AngleRange::default(), 1.0, 192).unwrap()
    }

    fn event(hits: &[(f32, f32, u32)]) -> Event {
        hits.iter().map(|&(x, y, layer)| Hit::new(x, y, layer)).collect::<Vec<_>>().into()
    }

    fn window(events: Vec<Event>) -> Batch { TimeWindow::new(events).into() }

    fn run(batches: &[Batch]) -> SinogramCreator {
        let mut creator = SinogramCreator::new(geometry());
        for batch in batches { creator.exec(batch).unwrap(); }
        creator
    }

    #[test]
    fn lor_through_centre_fills_central_distance_bin() {
        let creator = run(&[window(vec![event(&[(-40.0, 0.0, LAYER), (40.0, 0.0, LAYER)])])]);
        let sinogram = creator.sinogram().unwrap();
        let centre = creator.projector().binning().distance_index(0.0) as usize;
        assert_eq!(centre, 52);
        // Parallel at 0°
        assert_eq!(sinogram.get((centre, 0)), Some(0));
        for t in 1..180 {
            assert_eq!(sinogram.get((centre, t)), Some(1), "angle bin {t}");
        }
        assert_eq!(sinogram.total(), 179);
        assert_eq!(creator.stats().no_crossing, 1);
        assert_eq!(creator.stats().accepted, 179);
    }

    #[test]
    fn off_centre_lor_changes_side_at_closest_approach() {
        let creator = run(&[window(vec![event(&[(-40.0, 10.0, LAYER), (40.0, 10.0, LAYER)])])]);
        let stats = creator.stats();
        assert_eq!(stats.no_crossing     ,   1);
        assert_eq!(stats.outside_circle  ,  22);
        assert_eq!(stats.outside_sinogram,   0);
        assert_eq!(stats.accepted        , 157);

        let sinogram = creator.sinogram().unwrap();
        let filled_row = |t: usize| (0..sinogram.n_distance()).find(|&d| sinogram.get((d, t)) == Some(1));
        assert_eq!(filled_row(11), None);
        assert_eq!(filled_row(12), Some(51 + 49)); // d = 48.1
        assert_eq!(filled_row(89), Some(51 + 11)); // d = 10.0015
        assert_eq!(filled_row(91), Some(51 - 10)); // d = -10.0015
        assert_eq!(filled_row(168), Some(51 - 48)); // d = -48.1
        assert_eq!(filled_row(169), None);
    }

    #[test]
    fn off_layer_event_leaves_sinogram_untouched() {
        let creator = run(&[window(vec![
            event(&[(-40.0, 0.0, LAYER), (40.0, 0.0, 2)]),
            event(&[(-40.0, 0.0, 3), (40.0, 0.0, LAYER)]),
        ])]);
        assert_eq!(creator.sinogram().unwrap().total(), 0);
        assert_eq!(creator.stats().off_layer, 2);
    }

    #[test]
    fn events_without_exactly_two_hits_are_ignored() {
        let h = (10.0, 10.0, LAYER);
        let creator = run(&[window(vec![
            event(&[]),
            event(&[h]),
            event(&[h, (-10.0, 0.0, LAYER), (0.0, 30.0, LAYER)]),
            event(&[h, h, h, h]),
        ])]);
        assert_eq!(creator.sinogram().unwrap().total(), 0);
        assert_eq!(creator.stats().events, 4);
        assert_eq!(creator.stats().two_hit_events, 0);
    }

    #[test]
    fn degenerate_lor_is_skipped_at_every_angle() {
        let creator = run(&[window(vec![event(&[(5.0, 5.0, LAYER), (5.0, 5.0, LAYER)])])]);
        assert_eq!(creator.sinogram().unwrap().total(), 0);
        assert_eq!(creator.stats().no_crossing, 180);
    }

    #[test]
    fn sinogram_accumulates_across_batches() {
        let lor = || event(&[(-40.0, 0.0, LAYER), (40.0, 0.0, LAYER)]);
        let creator = run(&[window(vec![lor()]), window(vec![]), window(vec![lor(), lor()])]);
        let sinogram = creator.sinogram().unwrap();
        assert_eq!(sinogram.shape(), (101, 180));
        assert_eq!(sinogram.get((52, 90)), Some(3));
        assert_eq!(sinogram.total(), 3 * 179);
        assert_eq!(creator.stats().batches, 3);
    }

    #[test]
    fn malformed_batch_is_skipped() {
        let mut creator = SinogramCreator::new(geometry());
        let result = creator.exec(&Batch::Unexpected { kind: "RawSignal".into() });
        assert!(matches!(result, Err(Error::MalformedBatch { .. })));
        assert_eq!(creator.sinogram().unwrap().total(), 0);
        assert_eq!(creator.stats().malformed_batches, 1);

        creator.exec(&window(vec![event(&[(-40.0, 0.0, LAYER), (40.0, 0.0, LAYER)])])).unwrap();
        assert_eq!(creator.sinogram().unwrap().total(), 179);
    }

    #[test]
    fn terminate_before_any_batch_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sinogram.ppm");
        let result = SinogramCreator::new(geometry()).terminate(&path);
        assert!(matches!(result, Err(Error::NotInitialized)));
        assert!(!path.exists());
    }

    #[test]
    fn terminate_writes_image() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sinogram.ppm");
        let creator = run(&[window(vec![event(&[(-40.0, 0.0, LAYER), (40.0, 0.0, LAYER)])])]);
        let written = creator.terminate(&path)?;
        let reloaded = io::pgm::read(std::io::BufReader::new(std::fs::File::open(&path)?))?;
        assert_eq!(reloaded, written);
        Ok(())
    }

    #[test]
    fn terminate_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sinogram.ppm");
        let creator = run(&[window(vec![event(&[(-40.0, 0.0, LAYER), (40.0, 0.0, LAYER)])])]);
        let result = creator.terminate(&path);
        assert!(matches!(result, Err(Error::Io(_))), "{result:?}");
        assert!(!path.exists());
    }

    #[test]
    fn diagnostic_sink_mirrors_without_changing_sinogram() {
        let events = || window(vec![
            event(&[(-40.0, 10.0, LAYER), ( 40.0, -3.0, LAYER)]),
            event(&[(-20.0, 45.0, LAYER), ( 15.0,-45.0, LAYER)]),
            event(&[( 30.0, 30.0, LAYER), ( 30.0,-30.0, 2    )]),
        ]);
        let plain = run(&[events()]);
        let mut mirrored = SinogramCreator::new(geometry())
            .with_diagnostic(Box::new(ReconstructionHistogram::new(&geometry())));
        mirrored.exec(&events()).unwrap();

        assert_eq!(plain.sinogram(), mirrored.sinogram());
        assert_eq!(plain.stats(), mirrored.stats());
        assert_eq!(mirrored.diagnostic().unwrap().entries(), mirrored.stats().accepted);
        assert!(plain.diagnostic().is_none());
    }

    #[test]
    fn parallel_matches_sequential() {
        let batches: Vec<Batch> = (0..20)
            .map(|i| {
                let y = i as f32 * 2.0 - 20.0;
                window(vec![
                    event(&[(-45.0, y, LAYER), (45.0, -y * 0.5, LAYER)]),
                    event(&[(y, -45.0, LAYER), (0.3 * y, 45.0, LAYER)]),
                ])
            })
            .chain(std::iter::once(Batch::Unexpected { kind: "Hit".into() }))
            .collect();

        let mut sequential = SinogramCreator::new(geometry());
        for batch in &batches { let _ = sequential.exec(batch); }

        let mut parallel = SinogramCreator::new(geometry());
        let errors = parallel.exec_parallel(&batches);

        assert_eq!(errors.len(), 1);
        assert_eq!(parallel.sinogram(), sequential.sinogram());
        assert_eq!(parallel.stats(), sequential.stats());
    }
}
