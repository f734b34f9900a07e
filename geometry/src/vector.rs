use std::ops::Mul;
use units::todo::Lengthf32;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector {
    pub x: Lengthf32,
    pub y: Lengthf32,
}

impl Mul<f32> for Vector {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Vector {

    pub fn new(x: Lengthf32, y: Lengthf32) -> Self { Self { x, y } }

    pub fn magnitude(&self) -> Lengthf32 {
        let &Self { x, y } = self;
        (x*x + y*y).sqrt()
    }

    /// z-component of the 3-d cross product of two vectors in the xy-plane
    pub fn cross(&self, other: &Self) -> Lengthf32 {
        self.x * other.y - self.y * other.x
    }
}
