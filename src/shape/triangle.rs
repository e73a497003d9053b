//! Definition of the triangle shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use na::Unit;

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product). Returns `None` for degenerate triangles.
    #[inline]
    pub fn normal(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.scaled_normal(), crate::math::DEFAULT_EPSILON)
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The edge vectors of this triangle: `[B - A, C - B, A - C]`.
    #[inline]
    pub fn edges_scaled_directions(&self) -> [Vector<Real>; 3] {
        [self.b - self.a, self.c - self.b, self.a - self.c]
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() * na::convert::<f64, Real>(0.5)
    }

    /// The AABB of this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::new(
            self.a.inf(&self.b).inf(&self.c),
            self.a.sup(&self.b).sup(&self.c),
        )
    }
}

#[cfg(test)]
mod test {
    use crate::math::Point;
    use crate::shape::Triangle;

    #[test]
    fn test_triangle_area() {
        let pa = Point::new(0.0, 5.0, 0.0);
        let pb = Point::new(0.0, 0.0, 0.0);
        let pc = Point::new(0.0, 0.0, 4.0);

        assert!(relative_eq!(Triangle::new(pa, pb, pc).area(), 10.0));
    }

    #[test]
    fn degenerate_triangle_has_no_normal() {
        let pa = Point::new(0.0, 0.0, 0.0);
        let pb = Point::new(1.0, 0.0, 0.0);
        let pc = Point::new(2.0, 0.0, 0.0);

        assert!(Triangle::new(pa, pb, pc).normal().is_none());
    }
}
