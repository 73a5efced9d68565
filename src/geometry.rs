use std::ops::{Add, Sub, Mul};

#[cfg(feature="serde")]
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature="serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
impl Point {
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
    pub fn lerp(self, to: Point, t: f64) -> Point {
        self + (to - self) * t
    }
    pub fn approx_eq(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    /// Reflects `self` through `center`.
    pub fn reflect_on(self, center: Point) -> Point {
        center * 2.0 - self
    }
}
impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature="serde", derive(Serialize, Deserialize))]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
impl Frame {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Frame {
        Frame { x, y, width, height }
    }
    pub fn from_point(p: Point) -> Frame {
        Frame::new(p.x, p.y, 0., 0.)
    }
    pub fn from_corners(min: Point, max: Point) -> Frame {
        Frame::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }
    pub fn max(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
    pub fn union(self, other: Frame) -> Frame {
        let max = self.max();
        let other_max = other.max();
        Frame::from_corners(
            Point::new(self.x.min(other.x), self.y.min(other.y)),
            Point::new(max.x.max(other_max.x), max.y.max(other_max.y)),
        )
    }
    pub fn include(self, p: Point) -> Frame {
        self.union(Frame::from_point(p))
    }
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let max = self.max();
        p.x >= self.x - tolerance && p.x <= max.x + tolerance
            && p.y >= self.y - tolerance && p.y <= max.y + tolerance
    }
    /// `other` lies entirely inside `self` (edges included).
    pub fn contains(&self, other: &Frame, tolerance: f64) -> bool {
        self.contains_point(other.origin(), tolerance) && self.contains_point(other.max(), tolerance)
    }
    pub fn approx_eq(&self, other: &Frame, tolerance: f64) -> bool {
        self.origin().approx_eq(other.origin(), tolerance) && self.size().approx_eq(other.size(), tolerance)
    }
}

/// Affine map `x' = a x + c y + e`, `y' = b x + d y + f`, the SVG `matrix(a b c d e f)`.
///
/// `outer * inner` applies `inner` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}
impl Default for Transform {
    fn default() -> Transform {
        Transform::identity()
    }
}
impl Transform {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Transform {
        Transform { a, b, c, d, e, f }
    }
    pub const fn identity() -> Transform {
        Transform::new(1., 0., 0., 1., 0., 0.)
    }
    pub fn translate(tx: f64, ty: f64) -> Transform {
        Transform::new(1., 0., 0., 1., tx, ty)
    }
    pub fn scale(sx: f64, sy: f64) -> Transform {
        Transform::new(sx, 0., 0., sy, 0., 0.)
    }
    /// `angle` in degrees, clockwise in y-down coordinates.
    pub fn rotate(angle: f64) -> Transform {
        let (sin, cos) = angle.to_radians().sin_cos();
        Transform::new(cos, sin, -sin, cos, 0., 0.)
    }
    pub fn skew_x(angle: f64) -> Transform {
        Transform::new(1., 0., angle.to_radians().tan(), 1., 0., 0.)
    }
    pub fn skew_y(angle: f64) -> Transform {
        Transform::new(1., angle.to_radians().tan(), 0., 1., 0., 0.)
    }
    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}
impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }
}

/// One cubic bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}
impl Cubic {
    pub fn new(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Cubic {
        Cubic { from, ctrl1, ctrl2, to }
    }
    pub fn line(from: Point, to: Point) -> Cubic {
        Cubic::new(from, from, to, to)
    }
    pub fn is_line(&self) -> bool {
        self.ctrl1 == self.from && self.ctrl2 == self.to
    }
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        self.from * (mt * mt * mt)
            + self.ctrl1 * (3.0 * mt * mt * t)
            + self.ctrl2 * (3.0 * mt * t * t)
            + self.to * (t * t * t)
    }

    /// Tight bounds of the curve; the control points only count where the curve reaches them.
    pub fn bounds(&self) -> Frame {
        let mut frame = Frame::from_point(self.from).include(self.to);
        if self.is_line() {
            return frame;
        }
        let xs = stationary_ts(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x);
        let ys = stationary_ts(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y);
        for t in xs.iter().chain(ys.iter()).flatten() {
            frame = frame.include(self.eval(*t));
        }
        frame
    }

    /// Signed area between the curve and the origin (Green's theorem).
    ///
    /// Summed over a closed loop this is the enclosed area, positive for
    /// clockwise loops in y-down coordinates.
    pub fn signed_area(&self) -> f64 {
        let Cubic { from: p0, ctrl1: p1, ctrl2: p2, to: p3 } = *self;
        3.0 * ((p3.y - p0.y) * (p1.x + p2.x) - (p3.x - p0.x) * (p1.y + p2.y)
            + p1.y * (p0.x - p2.x) - p1.x * (p0.y - p2.y)
            + p3.y * (p2.x + p0.x / 3.0) - p3.x * (p2.y + p0.y / 3.0)) / 20.0
    }
}

/// Parameters in (0, 1) where the derivative of one coordinate vanishes.
fn stationary_ts(p0: f64, p1: f64, p2: f64, p3: f64) -> [Option<f64>; 2] {
    // B'(t) / 3 = a t^2 + b t + c
    let a = p3 - 3.0 * p2 + 3.0 * p1 - p0;
    let b = 2.0 * (p2 - 2.0 * p1 + p0);
    let c = p1 - p0;
    let inside = |t: f64| if t > 0.0 && t < 1.0 { Some(t) } else { None };

    if a.abs() < 1e-12 {
        if b.abs() < 1e-12 {
            return [None, None];
        }
        return [inside(-c / b), None];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return [None, None];
    }
    let sqrt_disc = disc.sqrt();
    [inside((-b + sqrt_disc) / (2.0 * a)), inside((-b - sqrt_disc) / (2.0 * a))]
}

#[cfg(test)]
fn assert_frame(actual: Frame, expected: [f64; 4]) {
    let expected = Frame::new(expected[0], expected[1], expected[2], expected[3]);
    assert!(actual.approx_eq(&expected, 1e-9), "{:?} != {:?}", actual, expected);
}

#[test]
fn test_cubic_bounds() {
    let arch = Cubic::new(Point::new(0., 0.), Point::new(0., 40.), Point::new(40., 40.), Point::new(40., 0.));
    assert_frame(arch.bounds(), [0., 0., 40., 30.]);

    let s = Cubic::new(Point::new(0., 0.), Point::new(20., 0.), Point::new(20., 20.), Point::new(40., 20.));
    assert_frame(s.bounds(), [0., 0., 40., 20.]);

    let line = Cubic::line(Point::new(5., 10.), Point::new(-5., 0.));
    assert_frame(line.bounds(), [-5., 0., 10., 10.]);
}

#[test]
fn test_square_area() {
    let p = [Point::new(0., 0.), Point::new(10., 0.), Point::new(10., 10.), Point::new(0., 10.)];
    let clockwise: f64 = (0..4).map(|i| Cubic::line(p[i], p[(i + 1) % 4]).signed_area()).sum();
    assert!((clockwise - 100.).abs() < 1e-9);
    let counter: f64 = (0..4).map(|i| Cubic::line(p[(i + 1) % 4], p[i]).signed_area()).sum();
    assert!((counter + 100.).abs() < 1e-9);
}

#[test]
fn test_frame_union_contains() {
    let a = Frame::new(0., 0., 10., 10.);
    let b = Frame::new(2., 2., 3., 3.);
    assert!(a.contains(&b, 0.));
    assert!(!b.contains(&a, 0.));
    assert!(a.contains(&a, 0.));
    assert_eq!(b.union(Frame::new(20., -1., 1., 1.)), Frame::new(2., -1., 19., 6.));
}

#[test]
fn test_transform_order() {
    // scale first, then translate
    let t = Transform::translate(10., 20.) * Transform::scale(2., 3.);
    assert_eq!(t.apply(Point::new(1., 1.)), Point::new(12., 23.));
    assert!(Transform::rotate(90.).apply(Point::new(1., 0.)).approx_eq(Point::new(0., 1.), 1e-12));
    assert!((Transform::identity() * Transform::identity()).is_identity());
    assert!(Transform::skew_x(45.).apply(Point::new(0., 1.)).approx_eq(Point::new(1., 1.), 1e-12));
}
