mod point;
mod predicates;

pub use point::{Coordinate, Point2, Point3};
pub use predicates::{
    Containment, Orientation, circumcircle_containment, circumsphere_containment, cmp_dist, det2,
    det3, det4, incircle, insphere, is_colinear, line_side, orient2d, orient2d_vec, orient3d,
    plane_side,
};
