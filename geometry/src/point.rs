use std::ops::{Add, Sub};
use units::todo::Lengthf32;
use crate::Vector;

/// A position in the transverse (xy) plane of the detector, in mm.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: Lengthf32,
    pub y: Lengthf32,
}

impl Point {
    pub fn new(x: Lengthf32, y: Lengthf32) -> Self { Self { x, y } }

    pub fn origin() -> Self { Self::default() }

    /// Euclidean distance from the detector centre
    pub fn distance_from_origin(&self) -> Lengthf32 { (*self - Self::origin()).magnitude() }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Add<Vector> for Point {
    type Output = Self;
    fn add(self, rhs: Vector) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
