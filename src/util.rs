use svgtypes::{Length, LengthUnit, LengthListParser, TransformListParser, TransformListToken};
use crate::error::Error;
use crate::geometry::{Frame, Point, Transform};
use std::str::FromStr;

#[cfg(feature="profile")]
#[macro_export]
macro_rules! timed {
    ($label:expr, { $($t:tt)* }) => ({
        let t0 = ::std::time::Instant::now();
        let r = { $($t)* };
        info!("{}: {:?}", $label, t0.elapsed());
        r
    })
}

#[cfg(not(feature="profile"))]
#[macro_export]
macro_rules! timed {
    ($label:expr, { $($t:tt)* }) => ({
        $($t)*
    })
}

#[inline]
pub fn vec(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[inline]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

pub fn max_bounds(mut iter: impl Iterator<Item=Frame>) -> Option<Frame> {
    if let Some(mut b) = iter.next() {
        for r in iter {
            b = b.union(r);
        }
        Some(b)
    } else {
        None
    }
}

/// Parses a `transform` attribute into one matrix; earlier entries are outermost.
pub fn transform_list(value: &str) -> Result<Transform, Error> {
    let mut transform = Transform::identity();
    for op in TransformListParser::from(value) {
        let tr = match op? {
            TransformListToken::Matrix { a, b, c, d, e, f } => Transform::new(a, b, c, d, e, f),
            TransformListToken::Translate { tx, ty } => Transform::translate(tx, ty),
            TransformListToken::Scale { sx, sy } => Transform::scale(sx, sy),
            TransformListToken::Rotate { angle } => Transform::rotate(angle),
            TransformListToken::SkewX { angle } => Transform::skew_x(angle),
            TransformListToken::SkewY { angle } => Transform::skew_y(angle),
        };
        transform = transform * tr;
    }
    Ok(transform)
}

pub fn length(s: &str) -> Result<f64, Error> {
    let length = Length::from_str(s)?;
    user_units(length)
}

fn user_units(length: Length) -> Result<f64, Error> {
    match length.unit {
        LengthUnit::None | LengthUnit::Px => Ok(length.num),
        LengthUnit::Percent => Err(Error::InvalidAttributeValue(format!("{}%", length.num))),
        unit => {
            warn!("treating {:?} as user units", unit);
            Ok(length.num)
        }
    }
}

/// Parses a `viewBox` value: four numbers, `min-x min-y width height`.
pub fn view_box(s: &str) -> Result<Frame, Error> {
    let mut p = LengthListParser::from(s);
    let mut next = || -> Result<f64, Error> {
        let length = p.next().ok_or(Error::TooShort)??;
        user_units(length)
    };
    let x = next()?;
    let y = next()?;
    let width = next()?;
    let height = next()?;
    if width < 0. || height < 0. {
        return Err(Error::InvalidAttributeValue(s.into()));
    }
    Ok(Frame::new(x, y, width, height))
}

#[test]
fn test_view_box() {
    assert_eq!(view_box("0 0 24 24").unwrap(), Frame::new(0., 0., 24., 24.));
    assert_eq!(view_box("-1,2 30.5 40").unwrap(), Frame::new(-1., 2., 30.5, 40.));
    assert!(matches!(view_box("0 0 24"), Err(Error::TooShort)));
    assert!(view_box("0 0 -1 1").is_err());
}

#[test]
fn test_transform_list() {
    let t = transform_list("translate(10 20) scale(2)").unwrap();
    assert_eq!(t.apply(vec(1., 1.)), vec(12., 22.));
    let m = transform_list("matrix(1 0 0 1 5 6)").unwrap();
    assert_eq!(m, Transform::translate(5., 6.));
    assert!(transform_list("").unwrap().is_identity());
    assert!(transform_list("scale(").is_err());
}

#[test]
fn test_max_bounds() {
    let frames = vec![Frame::new(0., 0., 1., 1.), Frame::new(2., -1., 1., 1.)];
    assert_eq!(max_bounds(frames.into_iter()), Some(Frame::new(0., -1., 3., 2.)));
    assert_eq!(max_bounds(std::iter::empty()), None);
}
