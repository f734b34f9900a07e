use crate::Point;

/// Intersection of the infinite line through `a` and `b` with the infinite
/// line through `c` and `d`.
///
/// Returns `None` when the lines are parallel (including the degenerate case
/// of either pair of points coinciding), or when the intersection cannot be
/// represented by finite coordinates.
pub fn line_intersection((a, b): (Point, Point), (c, d): (Point, Point)) -> Option<Point> {
    // Each line as  `p x + q y = r`
    let p1 = b.y - a.y;
    let q1 = a.x - b.x;
    let r1 = p1 * a.x + q1 * a.y;

    let p2 = d.y - c.y;
    let q2 = c.x - d.x;
    let r2 = p2 * c.x + q2 * c.y;

    let determinant = p1 * q2 - p2 * q1;
    if determinant == 0.0 { return None }

    let x = (q2 * r1 - q1 * r2) / determinant;
    let y = (p1 * r2 - p2 * r1) / determinant;
    if !(x.is_finite() && y.is_finite()) { return None }
    Some(Point::new(x, y))
}
