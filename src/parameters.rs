//! Process-wide reconstruction geometry, fixed once at start-up.

use serde::Deserialize;
use units::{mm_, Length, todo::{Anglef32, Lengthf32}};

use crate::error::{Error, Result};
use crate::hit::LayerId;

/// Range of projection angles `[start, end)` swept in steps of `step`, all in
/// degrees.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct AngleRange {
    pub start: Anglef32,
    pub end  : Anglef32,
    pub step : Anglef32,
}

impl Default for AngleRange {
    fn default() -> Self { Self { start: 0.0, end: 180.0, step: 1.0 } }
}

/// Validated geometry of the reconstruction. Can only be obtained through
/// [`GeometryParameters::new`], so holding one proves that the structural
/// checks have passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryParameters {
    layer: LayerId,
    radius: Lengthf32,
    angles: AngleRange,
    accuracy: Lengthf32,
    scintillators: u32,
    max_distance: usize,
    max_theta: usize,
}

/// Upper limit on the number of bins along either sinogram axis
const MAX_AXIS_BINS: usize = 1 << 24;

impl GeometryParameters {

    pub fn new(
        layer: LayerId,
        radius: Length,
        angles: AngleRange,
        accuracy: Length,
        scintillators: u32,
    ) -> Result<Self> {
        Self::from_f32s_in_mm(layer, mm_(radius), angles, mm_(accuracy), scintillators)
    }

    /// Construct from `f32`s which are interpreted as lengths in `mm`
    pub fn from_f32s_in_mm(
        layer: LayerId,
        radius: Lengthf32,
        angles: AngleRange,
        accuracy: Lengthf32,
        scintillators: u32,
    ) -> Result<Self> {
        if scintillators % 2 != 0 { return Err(Error::OddScintillatorCount(scintillators)) }
        let invalid = |what: String| Err(Error::InvalidGeometry(what));
        let AngleRange { start, end, step } = angles;
        for (name, value) in [("layer radius", radius), ("distance accuracy", accuracy),
                              ("start angle", start), ("end angle", end), ("angle step", step)] {
            if !value.is_finite() { return invalid(format!("{name} must be finite, got {value}")) }
        }
        if !(radius   > 0.0) { return invalid(format!("layer radius must be positive, got {radius} mm")) }
        if !(accuracy > 0.0) { return invalid(format!("distance accuracy must be positive, got {accuracy} mm")) }
        if !(step     > 0.0) { return invalid(format!("angle step must be positive, got {step}°")) }
        if !(end   > start ) { return invalid(format!("empty angle range [{start}°, {end}°)")) }
        let max_theta = bin_count("angle", (end - start) / step)?;
        let max_distance = bin_count("distance", radius * 2.0 * (1.0 / accuracy))?
            .checked_add(1)
            .filter(|&n| n <= MAX_AXIS_BINS)
            .ok_or_else(|| Error::InvalidGeometry(format!("too many distance bins for radius {radius} mm")))?;
        if max_distance.checked_mul(max_theta).map_or(true, |n| n > isize::MAX as usize) {
            return invalid(format!("{max_distance} × {max_theta} sinogram cannot be allocated"))
        }
        Ok(Self { layer, radius, angles, accuracy, scintillators, max_distance, max_theta })
    }

    /// Identifier of the layer whose hits take part in the reconstruction
    pub fn layer(&self) -> LayerId { self.layer }
    /// Radius of the reconstruction layer in mm
    pub fn radius(&self) -> Lengthf32 { self.radius }
    pub fn angles(&self) -> AngleRange { self.angles }
    /// Width of distance bins in mm
    pub fn accuracy(&self) -> Lengthf32 { self.accuracy }
    pub fn scintillators(&self) -> u32 { self.scintillators }

    /// Number of angle bins: `ceil((end - start) / step)`
    pub fn max_theta(&self) -> usize { self.max_theta }

    /// Number of distance bins: `ceil(2R / accuracy) + 1`
    pub fn max_distance(&self) -> usize { self.max_distance }
}

fn bin_count(axis: &str, bins: f32) -> Result<usize> {
    let bins = bins.ceil();
    if bins.is_finite() && bins >= 0.0 && bins <= MAX_AXIS_BINS as f32 {
        Ok(bins as usize)
    } else {
        Err(Error::InvalidGeometry(format!("cannot represent {bins} {axis} bins")))
    }
}
