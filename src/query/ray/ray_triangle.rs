use crate::math::{Point, Real, Vector};
use crate::query::Ray;
use crate::shape::Triangle;

impl Triangle {
    /// Computes the time of impact of a ray on this triangle, if any.
    ///
    /// Both faces of the triangle are hit. Hits with a time of impact greater
    /// than `max_toi` are ignored.
    #[inline]
    pub fn cast_local_ray(&self, ray: &Ray, max_toi: Real) -> Option<Real> {
        let (toi, _) = local_ray_intersection_with_triangle(&self.a, &self.b, &self.c, ray)?;

        if toi <= max_toi {
            Some(toi)
        } else {
            None
        }
    }
}

/// Computes the intersection between a triangle and a ray.
///
/// If an intersection is found, the time of impact and the barycentric coordinates of
/// the intersection point are returned.
pub fn local_ray_intersection_with_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    ray: &Ray,
) -> Option<(Real, Vector<Real>)> {
    let ab = *b - *a;
    let ac = *c - *a;

    // normal
    let n = ab.cross(&ac);
    let d = n.dot(&ray.dir);

    // the normal and the ray direction are parallel
    if d == 0.0 {
        return None;
    }

    let ap = ray.origin - *a;
    let t = ap.dot(&n);

    // the ray does not intersect the halfspace defined by the triangle
    if (t < 0.0 && d < 0.0) || (t > 0.0 && d > 0.0) {
        return None;
    }

    let d = d.abs();

    //
    // intersection: compute barycentric coordinates
    //
    let e = -ray.dir.cross(&ap);

    let v;
    let w;
    let toi;

    if t < 0.0 {
        v = -ac.dot(&e);

        if v < 0.0 || v > d {
            return None;
        }

        w = ab.dot(&e);

        if w < 0.0 || v + w > d {
            return None;
        }

        toi = -t / d;
    } else {
        v = ac.dot(&e);

        if v < 0.0 || v > d {
            return None;
        }

        w = -ab.dot(&e);

        if w < 0.0 || v + w > d {
            return None;
        }

        toi = t / d;
    }

    let invd = 1.0 / d;
    let (v, w) = (v * invd, w * invd);

    Some((toi, Vector::new(-v - w + 1.0, v, w)))
}
