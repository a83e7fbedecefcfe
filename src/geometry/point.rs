use crate::predicates::{sign, sign_cached, PredicateKind};
use crate::program::MAX_INPUTS;
use crate::rational::DynRational;
use crate::sign::Sign;

/// Scalar types the geometric predicates accept.
///
/// Floats go through the interval filter first. Cached rationals skip it and
/// are evaluated exactly.
pub trait Coordinate: Clone {
    fn predicate_sign(kind: PredicateKind, coords: &[&Self]) -> Sign;
}

macro_rules! float_coordinate {
    ($($t:ty),*) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn predicate_sign(kind: PredicateKind, coords: &[&Self]) -> Sign {
                    let mut buffer = [0.0 as $t; MAX_INPUTS];
                    for (dst, src) in buffer.iter_mut().zip(coords) {
                        *dst = **src;
                    }
                    sign(kind, &buffer[..coords.len()])
                }
            }
        )*
    };
}

float_coordinate!(f32, f64);

impl Coordinate for DynRational {
    fn predicate_sign(kind: PredicateKind, coords: &[&Self]) -> Sign {
        sign_cached(kind, coords)
    }
}

/// 2D point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point2<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point2<f64> {
    /// Exact copy for reuse across cached predicate calls.
    pub fn to_rational(&self) -> Point2<DynRational> {
        Point2::new(self.x.into(), self.y.into())
    }
}

impl<T> From<(T, T)> for Point2<T> {
    fn from(value: (T, T)) -> Self {
        Point2::new(value.0, value.1)
    }
}

impl<T> From<[T; 2]> for Point2<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Point2::new(x, y)
    }
}

/// 3D point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Point3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl Point3<f64> {
    pub fn to_rational(&self) -> Point3<DynRational> {
        Point3::new(self.x.into(), self.y.into(), self.z.into())
    }
}

impl<T> From<(T, T, T)> for Point3<T> {
    fn from(value: (T, T, T)) -> Self {
        Point3::new(value.0, value.1, value.2)
    }
}

impl<T> From<[T; 3]> for Point3<T> {
    fn from([x, y, z]: [T; 3]) -> Self {
        Point3::new(x, y, z)
    }
}
