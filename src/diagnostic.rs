//! Optional mirror of accepted projections, for visual inspection.
//!
//! Sinogram contents never depend on whether a sink is attached.

use ndhistogram::{ndhistogram, axis::Uniform, Histogram, HistND};
use units::todo::{Anglef32, Lengthf32};

use crate::parameters::GeometryParameters;

pub trait DiagnosticSink: Send {
    /// Record an accepted projection at signed `distance` and angle `theta`
    fn fill(&mut self, distance: Lengthf32, theta: Anglef32);
    /// Number of projections recorded so far
    fn entries(&self) -> u64;
}

type Uniform2DHist = HistND<(Uniform<Lengthf32>, Uniform<Anglef32>), usize>;

/// Distance-angle histogram over `[-R, R) × [start, end)`, with as many bins
/// as the sinogram.
pub struct ReconstructionHistogram {
    histogram: Uniform2DHist,
}

impl ReconstructionHistogram {
    pub fn new(geometry: &GeometryParameters) -> Self {
        let r = geometry.radius();
        let angles = geometry.angles();
        Self {
            histogram: ndhistogram!(
                Uniform::new(geometry.max_distance(), -r, r),
                Uniform::new(geometry.max_theta(), angles.start, angles.end);
                usize
            )
        }
    }

    pub fn value(&self, distance: Lengthf32, theta: Anglef32) -> usize {
        *self.histogram.value(&(distance, theta)).unwrap_or(&0)
    }
}

impl DiagnosticSink for ReconstructionHistogram {
    fn fill(&mut self, distance: Lengthf32, theta: Anglef32) {
        self.histogram.fill(&(distance, theta));
    }

    fn entries(&self) -> u64 {
        self.histogram.values().map(|&n| n as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::AngleRange;

    fn histogram() -> ReconstructionHistogram {
        let g = GeometryParameters::from_f32s_in_mm(1, 50.0, AngleRange::default(), 1.0, 2).unwrap();
        ReconstructionHistogram::new(&g)
    }

    #[test]
    fn fill_and_retrieve() {
        let mut h = histogram();
        h.fill( 0.1, 30.2);
        h.fill( 0.2, 30.7);
        h.fill(-7.0, 90.0);
        assert_eq!(h.value( 0.15, 30.5), 2);
        assert_eq!(h.value(-7.0 , 90.1), 1);
        assert_eq!(h.value(20.0 , 10.0), 0);
        assert_eq!(h.entries(), 3);
    }
}
