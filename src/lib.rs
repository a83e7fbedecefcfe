//! Exact sign predicates for computational geometry.
//!
//! Every predicate returns the exact sign of its polynomial at the exact input
//! values. Most calls finish with cheap interval arithmetic over `f64`;
//! near-degenerate inputs fall back to exact scientific-number arithmetic in a
//! scratch whose size is fixed at compile time.
//!
//! # Quick Start
//!
//! Use the typed geometric predicates:
//!
//! ```rust
//! use exact_predicates::{orient2d, Orientation, Point2};
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(1.0, 0.0);
//! let c = Point2::new(0.5, 1.0);
//!
//! match orient2d(&a, &b, &c) {
//!     Orientation::CounterClockwise => println!("c is left of ab"),
//!     Orientation::Clockwise => println!("c is right of ab"),
//!     Orientation::CoLinear => println!("c is on line ab"),
//! }
//! ```
//!
//! Or keep a reusable evaluator with a compile-time scratch:
//!
//! ```rust
//! use exact_predicates::budget::InSphereF64;
//! use exact_predicates::Sign;
//!
//! let mut insphere = InSphereF64::new();
//! let coords = [
//!     0.0, 0.0, 0.0, //
//!     1.0, 0.0, 0.0, //
//!     0.0, 1.0, 0.0, //
//!     0.0, 0.0, 1.0, //
//!     1.0, 1.0, 1.0,
//! ];
//! assert_eq!(insphere.sign(&coords), Sign::Zero);
//! ```
//!
//! # Available Predicates
//!
//! - [`orient2d`], [`orient2d_vec`], [`line_side`], [`is_colinear`]: orientation in the plane
//! - [`orient3d`], [`plane_side`]: orientation in space
//! - [`incircle`], [`insphere`] and their orientation-independent
//!   [`circumcircle_containment`], [`circumsphere_containment`]
//! - [`det2`], [`det3`], [`det4`]: determinant signs
//! - [`cmp_dist`]: compare squared distances from origin to two points
//!
//! # Layers
//!
//! - [`extint`]: unsigned integers over growable or fixed word storage
//! - [`scientific`]: exact `sign * mantissa * 2^exponent` numbers
//! - [`rational`]: exact ratios, compared by cross-multiplication
//! - [`interval`]: the directed-rounding filter
//! - [`program`]: the straight-line programs every tier replays
//! - [`budget`]: compile-time word budgets and evaluator aliases
//! - [`predicates`]: the two-tier evaluators and one-shot entry points

pub mod budget;
pub mod error;
pub mod extint;
pub mod float;
mod geometry;
pub mod interval;
pub mod predicates;
pub mod program;
pub mod rational;
pub mod scientific;
pub mod sign;

pub use error::ExactError;
pub use geometry::{
    Containment, Coordinate, Orientation, Point2, Point3, circumcircle_containment,
    circumsphere_containment, cmp_dist, det2, det3, det4, incircle, insphere, is_colinear,
    line_side, orient2d, orient2d_vec, orient3d, plane_side,
};
pub use predicates::{PredicateKind, sign_cached, sign};
pub use rational::DynRational;
pub use scientific::DynScientific;
pub use sign::{IntervalSign, Sign};
