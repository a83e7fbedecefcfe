//! The predicate polynomials, in Shewchuk's sign conventions.

use super::{Predicate, PredicateKind};
use crate::program::{Program, ProgramBuilder, Slot};

/// `p*q - r*s`
const fn minor2(b: &mut ProgramBuilder, p: Slot, q: Slot, r: Slot, s: Slot) -> Slot {
    let l = b.mul(p, q);
    let rr = b.mul(r, s);
    b.sub(l, rr)
}

/// `x^2 + y^2`
const fn lift2(b: &mut ProgramBuilder, x: Slot, y: Slot) -> Slot {
    let xx = b.square(x);
    let yy = b.square(y);
    b.add(xx, yy)
}

/// `x^2 + y^2 + z^2`
const fn lift3(b: &mut ProgramBuilder, x: Slot, y: Slot, z: Slot) -> Slot {
    let xy = lift2(b, x, y);
    let zz = b.square(z);
    b.add(xy, zz)
}

/// Orientation of three 2D points: positive when `a, b, c` turn
/// counterclockwise, zero when colinear.
///
/// Inputs: `ax, ay, bx, by, cx, cy`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orient2d;

impl Predicate for Orient2d {
    const KIND: PredicateKind = PredicateKind::Orient2d;
    const PROGRAM: Program = {
        let mut b = ProgramBuilder::new();
        let [ax, ay, bx, by, cx, cy] = b.inputs::<6>();
        let acx = b.sub(ax, cx);
        let bcx = b.sub(bx, cx);
        let acy = b.sub(ay, cy);
        let bcy = b.sub(by, cy);
        minor2(&mut b, acx, bcy, acy, bcx);
        b.finish()
    };
}

/// Side of `p` relative to the line through `a` with direction `v`:
/// `(ax - px) * vy - (ay - py) * vx`, the same sign as
/// `orient2d(a, a + v, p)` without forming `a + v`.
///
/// Inputs: `ax, ay, vx, vy, px, py`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orient2dDirection;

impl Predicate for Orient2dDirection {
    const KIND: PredicateKind = PredicateKind::Orient2dDirection;
    const PROGRAM: Program = {
        let mut b = ProgramBuilder::new();
        let [ax, ay, vx, vy, px, py] = b.inputs::<6>();
        let apx = b.sub(ax, px);
        let apy = b.sub(ay, py);
        minor2(&mut b, apx, vy, apy, vx);
        b.finish()
    };
}

/// Orientation of four 3D points: positive when `d` lies below the plane
/// through `a, b, c`, where "below" means `a, b, c` appear counterclockwise
/// when seen from above.
///
/// Inputs: `ax, ay, az, bx, .., dz`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orient3d;

impl Predicate for Orient3d {
    const KIND: PredicateKind = PredicateKind::Orient3d;
    const PROGRAM: Program = {
        let mut b = ProgramBuilder::new();
        let [ax, ay, az, bx, by, bz, cx, cy, cz, dx, dy, dz] = b.inputs::<12>();
        let adx = b.sub(ax, dx);
        let ady = b.sub(ay, dy);
        let adz = b.sub(az, dz);
        let bdx = b.sub(bx, dx);
        let bdy = b.sub(by, dy);
        let bdz = b.sub(bz, dz);
        let cdx = b.sub(cx, dx);
        let cdy = b.sub(cy, dy);
        let cdz = b.sub(cz, dz);
        let m0 = minor2(&mut b, bdy, cdz, bdz, cdy);
        let t0 = b.mul(adx, m0);
        let m1 = minor2(&mut b, cdy, adz, cdz, ady);
        let t1 = b.mul(bdx, m1);
        let m2 = minor2(&mut b, ady, bdz, adz, bdy);
        let t2 = b.mul(cdx, m2);
        let t01 = b.add(t0, t1);
        b.add(t01, t2);
        b.finish()
    };
}

/// 2x2 determinant, row-major inputs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Det2;

impl Predicate for Det2 {
    const KIND: PredicateKind = PredicateKind::Det2;
    const PROGRAM: Program = {
        let mut b = ProgramBuilder::new();
        let [m00, m01, m10, m11] = b.inputs::<4>();
        minor2(&mut b, m00, m11, m01, m10);
        b.finish()
    };
}

/// 3x3 determinant, row-major inputs, expanded along the first row.
#[derive(Clone, Copy, Debug, Default)]
pub struct Det3;

impl Predicate for Det3 {
    const KIND: PredicateKind = PredicateKind::Det3;
    const PROGRAM: Program = {
        let mut b = ProgramBuilder::new();
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = b.inputs::<9>();
        let c0 = minor2(&mut b, m11, m22, m12, m21);
        let c1 = minor2(&mut b, m10, m22, m12, m20);
        let c2 = minor2(&mut b, m10, m21, m11, m20);
        let t0 = b.mul(m00, c0);
        let t1 = b.mul(m01, c1);
        let t2 = b.mul(m02, c2);
        let t01 = b.sub(t0, t1);
        b.add(t01, t2);
        b.finish()
    };
}

/// 4x4 determinant, row-major inputs. The 2x2 minors of the last two rows
/// are shared between the four 3x3 cofactors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Det4;

impl Predicate for Det4 {
    const KIND: PredicateKind = PredicateKind::Det4;
    const PROGRAM: Program = {
        let mut b = ProgramBuilder::new();
        let [
            m00, m01, m02, m03,
            m10, m11, m12, m13,
            m20, m21, m22, m23,
            m30, m31, m32, m33,
        ] = b.inputs::<16>();
        let c01 = minor2(&mut b, m20, m31, m21, m30);
        let c02 = minor2(&mut b, m20, m32, m22, m30);
        let c03 = minor2(&mut b, m20, m33, m23, m30);
        let c12 = minor2(&mut b, m21, m32, m22, m31);
        let c13 = minor2(&mut b, m21, m33, m23, m31);
        let c23 = minor2(&mut b, m22, m33, m23, m32);

        let a = b.mul(m11, c23);
        let s = b.mul(m12, c13);
        let d = b.sub(a, s);
        let s = b.mul(m13, c12);
        let cof0 = b.add(d, s);

        let a = b.mul(m10, c23);
        let s = b.mul(m12, c03);
        let d = b.sub(a, s);
        let s = b.mul(m13, c02);
        let cof1 = b.add(d, s);

        let a = b.mul(m10, c13);
        let s = b.mul(m11, c03);
        let d = b.sub(a, s);
        let s = b.mul(m13, c01);
        let cof2 = b.add(d, s);

        let a = b.mul(m10, c12);
        let s = b.mul(m11, c02);
        let d = b.sub(a, s);
        let s = b.mul(m12, c01);
        let cof3 = b.add(d, s);

        let t0 = b.mul(m00, cof0);
        let t1 = b.mul(m01, cof1);
        let t2 = b.mul(m02, cof2);
        let t3 = b.mul(m03, cof3);
        let t = b.sub(t0, t1);
        let t = b.add(t, t2);
        b.sub(t, t3);
        b.finish()
    };
}

/// In-circle test: positive when `d` lies inside the circle through
/// `a, b, c`, given `a, b, c` counterclockwise. The sign flips for a
/// clockwise triangle.
///
/// Inputs: `ax, ay, bx, by, cx, cy, dx, dy`.
#[derive(Clone, Copy, Debug, Default)]
pub struct InCircle;

impl Predicate for InCircle {
    const KIND: PredicateKind = PredicateKind::InCircle;
    const PROGRAM: Program = {
        let mut b = ProgramBuilder::new();
        let [ax, ay, bx, by, cx, cy, dx, dy] = b.inputs::<8>();
        let adx = b.sub(ax, dx);
        let ady = b.sub(ay, dy);
        let bdx = b.sub(bx, dx);
        let bdy = b.sub(by, dy);
        let cdx = b.sub(cx, dx);
        let cdy = b.sub(cy, dy);
        let alift = lift2(&mut b, adx, ady);
        let blift = lift2(&mut b, bdx, bdy);
        let clift = lift2(&mut b, cdx, cdy);
        let bc = minor2(&mut b, bdx, cdy, cdx, bdy);
        let t0 = b.mul(alift, bc);
        let ca = minor2(&mut b, cdx, ady, adx, cdy);
        let t1 = b.mul(blift, ca);
        let ab = minor2(&mut b, adx, bdy, bdx, ady);
        let t2 = b.mul(clift, ab);
        let t01 = b.add(t0, t1);
        b.add(t01, t2);
        b.finish()
    };
}

/// In-sphere test: positive when `e` lies inside the sphere through
/// `a, b, c, d`, given a positive [`Orient3d`] for `a, b, c, d`.
///
/// Inputs: `ax, ay, az, .., ex, ey, ez`.
#[derive(Clone, Copy, Debug, Default)]
pub struct InSphere;

impl Predicate for InSphere {
    const KIND: PredicateKind = PredicateKind::InSphere;
    const PROGRAM: Program = {
        let mut b = ProgramBuilder::new();
        let [ax, ay, az, bx, by, bz, cx, cy, cz, dx, dy, dz, ex, ey, ez] = b.inputs::<15>();
        let aex = b.sub(ax, ex);
        let aey = b.sub(ay, ey);
        let aez = b.sub(az, ez);
        let bex = b.sub(bx, ex);
        let bey = b.sub(by, ey);
        let bez = b.sub(bz, ez);
        let cex = b.sub(cx, ex);
        let cey = b.sub(cy, ey);
        let cez = b.sub(cz, ez);
        let dex = b.sub(dx, ex);
        let dey = b.sub(dy, ey);
        let dez = b.sub(dz, ez);

        let ab = minor2(&mut b, aex, bey, bex, aey);
        let bc = minor2(&mut b, bex, cey, cex, bey);
        let cd = minor2(&mut b, cex, dey, dex, cey);
        let da = minor2(&mut b, dex, aey, aex, dey);
        let ac = minor2(&mut b, aex, cey, cex, aey);
        let bd = minor2(&mut b, bex, dey, dex, bey);

        let p = b.mul(aez, bc);
        let q = b.mul(bez, ac);
        let r = b.mul(cez, ab);
        let pq = b.sub(p, q);
        let abc = b.add(pq, r);

        let p = b.mul(bez, cd);
        let q = b.mul(cez, bd);
        let r = b.mul(dez, bc);
        let pq = b.sub(p, q);
        let bcd = b.add(pq, r);

        let p = b.mul(cez, da);
        let q = b.mul(dez, ac);
        let r = b.mul(aez, cd);
        let pq = b.add(p, q);
        let cda = b.add(pq, r);

        let p = b.mul(dez, ab);
        let q = b.mul(aez, bd);
        let r = b.mul(bez, da);
        let pq = b.add(p, q);
        let dab = b.add(pq, r);

        let alift = lift3(&mut b, aex, aey, aez);
        let blift = lift3(&mut b, bex, bey, bez);
        let clift = lift3(&mut b, cex, cey, cez);
        let dlift = lift3(&mut b, dex, dey, dez);

        let p = b.mul(dlift, abc);
        let q = b.mul(clift, dab);
        let left = b.sub(p, q);
        let p = b.mul(blift, cda);
        let q = b.mul(alift, bcd);
        let right = b.sub(p, q);
        b.add(left, right);
        b.finish()
    };
}

/// Distance comparison: the sign of `|p - o|^2 - |q - o|^2`.
///
/// Inputs: `ox, oy, px, py, qx, qy`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CmpDist;

impl Predicate for CmpDist {
    const KIND: PredicateKind = PredicateKind::CmpDist;
    const PROGRAM: Program = {
        let mut b = ProgramBuilder::new();
        let [ox, oy, px, py, qx, qy] = b.inputs::<6>();
        let pox = b.sub(px, ox);
        let poy = b.sub(py, oy);
        let qox = b.sub(qx, ox);
        let qoy = b.sub(qy, oy);
        let dp = lift2(&mut b, pox, poy);
        let dq = lift2(&mut b, qox, qoy);
        b.sub(dp, dq);
        b.finish()
    };
}

pub(super) static ORIENT2D: Program = Orient2d::PROGRAM;
pub(super) static ORIENT2D_DIRECTION: Program = Orient2dDirection::PROGRAM;
pub(super) static ORIENT3D: Program = Orient3d::PROGRAM;
pub(super) static DET2: Program = Det2::PROGRAM;
pub(super) static DET3: Program = Det3::PROGRAM;
pub(super) static DET4: Program = Det4::PROGRAM;
pub(super) static INCIRCLE: Program = InCircle::PROGRAM;
pub(super) static INSPHERE: Program = InSphere::PROGRAM;
pub(super) static CMP_DIST: Program = CmpDist::PROGRAM;
