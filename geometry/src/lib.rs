mod point;
mod vector;
mod intersection;

pub use point::Point;
pub use vector::Vector;
pub use intersection::line_intersection;
