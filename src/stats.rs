//! Bookkeeping of what happened to every event and projection of a run.

use std::fmt;
use std::ops::AddAssign;

use crate::utils::group_digits;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Time windows which were processed
    pub batches: u64,
    /// Batches which were not time windows, and were skipped
    pub malformed_batches: u64,
    /// Events in processed time windows
    pub events: u64,
    /// Events with exactly two hits
    pub two_hit_events: u64,
    /// Two-hit events with at least one hit off the reconstruction layer
    pub off_layer: u64,
    /// Projections which incremented the sinogram
    pub accepted: u64,
    /// Projections where the LOR was parallel to the diameter
    pub no_crossing: u64,
    /// Projections where the crossing lay outside the reconstruction circle
    pub outside_circle: u64,
    /// Projections whose bin fell outside the sinogram
    pub outside_sinogram: u64,
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Self) {
        self.batches           += rhs.batches;
        self.malformed_batches += rhs.malformed_batches;
        self.events            += rhs.events;
        self.two_hit_events    += rhs.two_hit_events;
        self.off_layer         += rhs.off_layer;
        self.accepted          += rhs.accepted;
        self.no_crossing       += rhs.no_crossing;
        self.outside_circle    += rhs.outside_circle;
        self.outside_sinogram  += rhs.outside_sinogram;
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let g = group_digits;
        writeln!(f, "batches          {:>15}  (malformed: {})", g(self.batches), g(self.malformed_batches))?;
        writeln!(f, "events           {:>15}", g(self.events))?;
        writeln!(f, "two-hit events   {:>15}  (off layer: {})", g(self.two_hit_events), g(self.off_layer))?;
        writeln!(f, "projections      {:>15}", g(self.accepted))?;
        write!  (f, "rejected: parallel {}, outside circle {}, outside sinogram {}",
                 g(self.no_crossing), g(self.outside_circle), g(self.outside_sinogram))
    }
}
