//! Projection of lines of response onto the rotating diameters of the
//! reconstruction circle.

use geometry::{line_intersection, Point};
use units::todo::{Anglef32, Lengthf32};

use crate::hit::{Hit, LayerId};

/// Selects the hits which belong to the reconstruction layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerFilter {
    layer: LayerId,
}

impl LayerFilter {
    pub fn new(layer: LayerId) -> Self { Self { layer } }
    #[inline]
    pub fn accepts(&self, hit: &Hit) -> bool { hit.layer == self.layer }
}

/// Line Of Response.
///
/// The line through the positions of the two hits of a coincidence.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub struct LOR {
    pub p1: Point,
    pub p2: Point,
}

impl LOR {
    pub fn new(p1: Point, p2: Point) -> Self { Self { p1, p2 } }

    /// Point where this LOR crosses the diameter of the reconstruction circle
    /// at angle `theta`.
    ///
    /// `None` if they are parallel, or if the LOR is degenerate (both hits at
    /// the same position).
    pub fn crossing(&self, theta: Anglef32, radius: Lengthf32) -> Option<Point> {
        line_intersection(diameter(theta, radius), (self.p1, self.p2))
    }

    /// Signed distance from the centre of the point where this LOR crosses
    /// the diameter at angle `theta`. See [`signed_distance`].
    pub fn projection(&self, theta: Anglef32, radius: Lengthf32) -> Option<Lengthf32> {
        self.crossing(theta, radius).and_then(|p| signed_distance(p, radius))
    }
}

impl From<(Hit, Hit)> for LOR {
    fn from((a, b): (Hit, Hit)) -> Self { Self::new(a.position, b.position) }
}

/// End points of the diameter of the circle of radius `radius` which makes
/// angle `theta` (degrees) with the x-axis.
pub fn diameter(theta: Anglef32, radius: Lengthf32) -> (Point, Point) {
    // Trigonometry in double precision, stored in single
    let theta = theta as f64 * (std::f64::consts::PI / 180.0);
    let x = (radius as f64 * theta.cos()) as Lengthf32;
    let y = (radius as f64 * theta.sin()) as Lengthf32;
    (Point::new(-x, -y), Point::new(x, y))
}

/// Distance of `crossing` from the centre, negated when the point lies at
/// negative x. `None` when it does not lie strictly inside the circle.
pub fn signed_distance(crossing: Point, radius: Lengthf32) -> Option<Lengthf32> {
    let distance = crossing.distance_from_origin();
    if !(distance < radius) { return None }
    Some(if crossing.x < 0.0 { -distance } else { distance })
}
