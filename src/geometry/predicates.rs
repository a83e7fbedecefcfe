//! Typed geometric predicates.
//!
//! Every function returns the exact answer for its inputs. Float coordinates
//! are filtered with interval arithmetic first; rational coordinates are
//! always evaluated exactly.

use std::cmp::Ordering;

use super::{Coordinate, Point2, Point3};
use crate::predicates::PredicateKind;
use crate::sign::Sign;

/// Turn direction of three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    CoLinear,
}

impl Orientation {
    pub fn from_sign(sign: Sign) -> Self {
        match sign {
            Sign::Positive => Orientation::CounterClockwise,
            Sign::Negative => Orientation::Clockwise,
            Sign::Zero => Orientation::CoLinear,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CoLinear => Orientation::CoLinear,
        }
    }
}

impl From<Sign> for Orientation {
    fn from(sign: Sign) -> Self {
        Orientation::from_sign(sign)
    }
}

/// Position of a point relative to a circle or sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Containment {
    Inside,
    OnBoundary,
    Outside,
}

/// Compute orientation of point `c` relative to line `ab`.
///
/// Returns CounterClockwise if `c` is to the left of `ab`,
/// Clockwise if to the right, CoLinear if collinear.
#[inline]
pub fn orient2d<T: Coordinate>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> Orientation {
    Orientation::from_sign(T::predicate_sign(
        PredicateKind::Orient2d,
        &[&a.x, &a.y, &b.x, &b.y, &c.x, &c.y],
    ))
}

/// Compute orientation of point `p` relative to a line through `a` in direction `v`.
///
/// This is equivalent to `orient2d(a, a + v, p)` but never rounds `a + v`.
#[inline]
pub fn orient2d_vec<T: Coordinate>(a: &Point2<T>, v: &Point2<T>, p: &Point2<T>) -> Orientation {
    Orientation::from_sign(T::predicate_sign(
        PredicateKind::Orient2dDirection,
        &[&a.x, &a.y, &v.x, &v.y, &p.x, &p.y],
    ))
}

pub fn is_colinear<T: Coordinate>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> bool {
    orient2d(a, b, c) == Orientation::CoLinear
}

/// Side of `p` relative to the directed line `a -> b`: positive on the left.
pub fn line_side<T: Coordinate>(a: &Point2<T>, b: &Point2<T>, p: &Point2<T>) -> Sign {
    T::predicate_sign(
        PredicateKind::Orient2d,
        &[&a.x, &a.y, &b.x, &b.y, &p.x, &p.y],
    )
}

/// Positive when `d` lies below the plane through `a, b, c`, that is, when
/// `a, b, c` appear counterclockwise seen from `d`'s opposite side.
pub fn orient3d<T: Coordinate>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> Sign {
    T::predicate_sign(
        PredicateKind::Orient3d,
        &[
            &a.x, &a.y, &a.z, &b.x, &b.y, &b.z, &c.x, &c.y, &c.z, &d.x, &d.y, &d.z,
        ],
    )
}

/// Side of `p` relative to the oriented plane through `a, b, c`.
pub fn plane_side<T: Coordinate>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    p: &Point3<T>,
) -> Sign {
    orient3d(a, b, c, p)
}

/// Positive when `d` is inside the circle through `a, b, c` and the triangle
/// is counterclockwise. The sign is reversed for a clockwise triangle.
pub fn incircle<T: Coordinate>(
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
) -> Sign {
    T::predicate_sign(
        PredicateKind::InCircle,
        &[&a.x, &a.y, &b.x, &b.y, &c.x, &c.y, &d.x, &d.y],
    )
}

/// Positive when `e` is inside the sphere through `a, b, c, d` and
/// `orient3d(a, b, c, d)` is positive. The sign is reversed otherwise.
pub fn insphere<T: Coordinate>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
) -> Sign {
    T::predicate_sign(
        PredicateKind::InSphere,
        &[
            &a.x, &a.y, &a.z, &b.x, &b.y, &b.z, &c.x, &c.y, &c.z, &d.x, &d.y, &d.z, &e.x, &e.y,
            &e.z,
        ],
    )
}

pub fn det2<T: Coordinate>(m: &[[T; 2]; 2]) -> Sign {
    T::predicate_sign(
        PredicateKind::Det2,
        &[&m[0][0], &m[0][1], &m[1][0], &m[1][1]],
    )
}

pub fn det3<T: Coordinate>(m: &[[T; 3]; 3]) -> Sign {
    let coords: Vec<&T> = m.iter().flatten().collect();
    T::predicate_sign(PredicateKind::Det3, &coords)
}

pub fn det4<T: Coordinate>(m: &[[T; 4]; 4]) -> Sign {
    let coords: Vec<&T> = m.iter().flatten().collect();
    T::predicate_sign(PredicateKind::Det4, &coords)
}

/// Compare squared distances from origin to p and q.
///
/// Returns Greater if dist(origin,p) > dist(origin,q), etc.
#[inline]
pub fn cmp_dist<T: Coordinate>(origin: &Point2<T>, p: &Point2<T>, q: &Point2<T>) -> Ordering {
    T::predicate_sign(
        PredicateKind::CmpDist,
        &[&origin.x, &origin.y, &p.x, &p.y, &q.x, &q.y],
    )
    .to_ordering()
}

/// Where `d` lies relative to the circle through `a, b, c`, whatever the
/// triangle's orientation. `None` when `a, b, c` are colinear.
pub fn circumcircle_containment<T: Coordinate>(
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
) -> Option<Containment> {
    let orientation = line_side(a, b, c);
    if orientation == Sign::Zero {
        return None;
    }
    Some(containment(incircle(a, b, c, d).product(orientation)))
}

/// Where `e` lies relative to the sphere through `a, b, c, d`, whatever the
/// tetrahedron's orientation. `None` when `a, b, c, d` are coplanar.
pub fn circumsphere_containment<T: Coordinate>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
) -> Option<Containment> {
    let orientation = orient3d(a, b, c, d);
    if orientation == Sign::Zero {
        return None;
    }
    Some(containment(insphere(a, b, c, d, e).product(orientation)))
}

fn containment(sign: Sign) -> Containment {
    match sign {
        Sign::Positive => Containment::Inside,
        Sign::Zero => Containment::OnBoundary,
        Sign::Negative => Containment::Outside,
    }
}
