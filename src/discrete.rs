//! Conversion of continuous (distance, angle) projections into sinogram bin
//! indices.

use units::todo::{Anglef32, Lengthf32};

use crate::parameters::GeometryParameters;

/// Row (distance) and column (angle) of a sinogram cell
pub type Bin = (usize, usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Binning {
    geometry: GeometryParameters,
    max_distance: usize,
    max_theta: usize,
}

impl Binning {

    pub fn new(geometry: GeometryParameters) -> Self {
        Self {
            geometry,
            max_distance: geometry.max_distance(),
            max_theta:    geometry.max_theta(),
        }
    }

    pub fn geometry(&self) -> &GeometryParameters { &self.geometry }

    /// `(distance bins, angle bins)`
    pub fn shape(&self) -> (usize, usize) { (self.max_distance, self.max_theta) }

    /// Projection angles in sweep order: `start + i * step` for each angle bin.
    pub fn angles(&self) -> impl Iterator<Item = Anglef32> + Clone {
        let angles = self.geometry.angles();
        (0..self.max_theta).map(move |i| angles.start + i as Anglef32 * angles.step)
    }

    /// Unchecked distance index: `floor(R/ε + ε) + floor(d/ε + ε)`.
    ///
    /// The accuracy `ε` is also added as a bias before each `floor`. This
    /// reproduces the reference bin boundaries exactly, and must not be
    /// replaced with a separate rounding constant.
    pub fn distance_index(&self, distance: Lengthf32) -> i64 {
        let r   = self.geometry.radius();
        let eps = self.geometry.accuracy();
        ((r / eps + eps).floor() + (distance / eps + eps).floor()) as i64
    }

    /// Unchecked angle index: `round(θ / Δθ)`
    pub fn theta_index(&self, theta: Anglef32) -> i64 {
        (theta / self.geometry.angles().step).round() as i64
    }

    /// Sinogram cell for a projection at signed `distance` and angle `theta`,
    /// or `None` if either index falls outside the sinogram.
    pub fn bin(&self, distance: Lengthf32, theta: Anglef32) -> Option<Bin> {
        let d = checked(self.distance_index(distance), self.max_distance)?;
        let t = checked(self.theta_index(theta)      , self.max_theta   )?;
        Some((d, t))
    }
}

fn checked(index: i64, max: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < max)
}
