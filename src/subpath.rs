use itertools::Itertools;
use std::fmt;
use crate::prelude::*;
use crate::normalize::Segment;

#[cfg(feature="serde")]
use serde::{Serialize, Deserialize};

/// A vertex of an outline with its bezier handles.
///
/// A handle that equals `position` means the adjacent segment leaves (or
/// enters) the vertex in a straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature="serde", derive(Serialize, Deserialize))]
pub struct CurvePoint {
    pub position: Point,
    pub incoming_handle: Point,
    pub outgoing_handle: Point,
    pub is_curved: bool,
}
impl CurvePoint {
    pub fn corner(position: Point) -> CurvePoint {
        CurvePoint {
            position,
            incoming_handle: position,
            outgoing_handle: position,
            is_curved: false,
        }
    }
    pub fn new(position: Point, incoming_handle: Point, outgoing_handle: Point) -> CurvePoint {
        CurvePoint {
            position,
            incoming_handle,
            outgoing_handle,
            is_curved: incoming_handle != position || outgoing_handle != position,
        }
    }
    fn with_incoming(self, incoming_handle: Point) -> CurvePoint {
        CurvePoint::new(self.position, incoming_handle, self.outgoing_handle)
    }
    fn with_outgoing(self, outgoing_handle: Point) -> CurvePoint {
        CurvePoint::new(self.position, self.incoming_handle, outgoing_handle)
    }
    /// Applies `f` to the position and both handles.
    pub fn map(self, f: impl Fn(Point) -> Point) -> CurvePoint {
        CurvePoint::new(f(self.position), f(self.incoming_handle), f(self.outgoing_handle))
    }
}

/// One contiguous stroke of a path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature="serde", derive(Serialize, Deserialize))]
pub struct Subpath {
    pub points: Vec<CurvePoint>,
    /// the last point connects back to the first
    pub closed: bool,
}
impl Subpath {
    pub fn new(points: Vec<CurvePoint>, closed: bool) -> Subpath {
        Subpath { points, closed }
    }

    /// The cubic segments between consecutive points, including the closing one.
    pub fn segments(&self) -> impl Iterator<Item=Cubic> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) if self.points.len() > 1 => Some((*last, *first)),
            _ => None
        };
        self.points.iter().copied().tuple_windows()
            .chain(closing)
            .map(|(a, b)| Cubic::new(a.position, a.outgoing_handle, b.incoming_handle, b.position))
    }

    pub fn bounds(&self) -> Option<Frame> {
        let first = self.points.first()?;
        Some(self.segments().fold(Frame::from_point(first.position), |frame, c| frame.union(c.bounds())))
    }

    /// Area enclosed by the outline; open subpaths are closed with a straight edge.
    ///
    /// Positive for clockwise outlines in y-down coordinates.
    pub fn signed_area(&self) -> f64 {
        let mut area: f64 = self.segments().map(|c| c.signed_area()).sum();
        if !self.closed {
            if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
                area += Cubic::line(last.position, first.position).signed_area();
            }
        }
        area
    }

    pub fn map(&self, f: impl Fn(Point) -> Point) -> Subpath {
        Subpath {
            points: self.points.iter().map(|p| p.map(&f)).collect(),
            closed: self.closed,
        }
    }

    /// Expresses every position and handle in the unit square of `frame`.
    ///
    /// An axis on which `frame` has no extent maps to 0.
    pub fn relative_to(&self, frame: &Frame) -> Subpath {
        let unit = |v: f64, origin: f64, extent: f64| if extent == 0.0 { 0.0 } else { (v - origin) / extent };
        self.map(|p| Point::new(unit(p.x, frame.x, frame.width), unit(p.y, frame.y, frame.height)))
    }
}

/// Absolute path data: `M`, then `L` or `C` per segment, `Z` when closed.
impl fmt::Display for Subpath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let first = match self.points.first() {
            Some(p) => p.position,
            None => return Ok(())
        };
        write!(f, "M{} {}", first.x, first.y)?;
        let n = self.segments().count();
        for (i, c) in self.segments().enumerate() {
            let closing = self.closed && i + 1 == n;
            if c.is_line() {
                if !closing {
                    write!(f, " L{} {}", c.to.x, c.to.y)?;
                }
            } else {
                write!(f, " C{} {} {} {} {} {}", c.ctrl1.x, c.ctrl1.y, c.ctrl2.x, c.ctrl2.y, c.to.x, c.to.y)?;
            }
        }
        if self.closed {
            write!(f, " Z")?;
        }
        Ok(())
    }
}

/// Collects normalized segments into subpaths.
pub struct SubpathBuilder {
    tolerance: f64,
    current: Vec<CurvePoint>,
    subpaths: Vec<Subpath>,
}
impl SubpathBuilder {
    pub fn new(tolerance: f64) -> SubpathBuilder {
        SubpathBuilder {
            tolerance,
            current: Vec::new(),
            subpaths: Vec::new(),
        }
    }

    fn flush(&mut self, closed: bool) {
        let points = std::mem::replace(&mut self.current, Vec::new());
        if points.len() < 2 {
            if !points.is_empty() {
                warn!("dropping subpath without segments at {:?}", points[0].position);
            }
            return;
        }
        self.subpaths.push(Subpath::new(points, closed));
    }

    pub fn push(&mut self, segment: Segment) -> Result<(), PathFault> {
        match segment {
            Segment::MoveTo(p) => {
                self.flush(false);
                self.current.push(CurvePoint::corner(p));
            }
            Segment::LineTo(p) => {
                if self.current.is_empty() {
                    return Err(PathFault::MissingMoveTo);
                }
                self.current.push(CurvePoint::corner(p));
            }
            Segment::CubicTo(c1, c2, p) => {
                let last = self.current.last_mut().ok_or(PathFault::MissingMoveTo)?;
                *last = last.with_outgoing(c1);
                self.current.push(CurvePoint::corner(p).with_incoming(c2));
            }
            Segment::Close => self.close()?,
        }
        Ok(())
    }

    /// The closing edge returns to the first point; a last point sitting on the
    /// first one is folded into it so the loop does not repeat a vertex.
    fn close(&mut self) -> Result<(), PathFault> {
        let first = match self.current.first() {
            Some(p) => p.position,
            None => return Err(PathFault::DanglingClose),
        };
        if self.current.len() > 1 {
            let last = self.current[self.current.len() - 1];
            if last.position.approx_eq(first, self.tolerance) {
                self.current.pop();
                self.current[0] = self.current[0].with_incoming(last.incoming_handle);
            }
        }
        self.flush(true);
        Ok(())
    }

    pub fn finish(mut self) -> Vec<Subpath> {
        self.flush(false);
        self.subpaths
    }
}

/// Builds the subpaths of a whole path.
pub fn build_subpaths(data: PathData, options: &ConvertOptions) -> Result<Vec<Subpath>, PathFault> {
    let segments = crate::normalize::normalize_path(data, options)?;
    let mut builder = SubpathBuilder::new(options.tolerance);
    for segment in segments {
        builder.push(segment)?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
fn subpaths(d: &str) -> Vec<Subpath> {
    build_subpaths(PathData::new(d).unwrap(), &ConvertOptions::default()).unwrap()
}

#[cfg(test)]
fn positions(s: &Subpath) -> Vec<(f64, f64)> {
    s.points.iter().map(|p| (p.position.x, p.position.y)).collect()
}

#[test]
fn test_compound() {
    let paths = subpaths("M0 0 H10 V10 H0 Z M2 2 L4 2 L4 4");
    assert_eq!(paths.len(), 2);
    assert!(paths[0].closed);
    assert_eq!(positions(&paths[0]), vec![(0., 0.), (10., 0.), (10., 10.), (0., 10.)]);
    assert!(!paths[1].closed);
    assert_eq!(positions(&paths[1]), vec![(2., 2.), (4., 2.), (4., 4.)]);
}

#[test]
fn test_no_empty_subpaths() {
    assert!(subpaths("M0 0 M5 5").is_empty());
    assert_eq!(subpaths("M0 0 M5 5 L6 6 M7 7").len(), 1);
}

#[test]
fn test_close_folds_last_point() {
    let paths = subpaths("M0 0 L10 0 C10 5 5 10 0 0 Z");
    let s = &paths[0];
    assert_eq!(positions(s), vec![(0., 0.), (10., 0.)]);
    assert_eq!(s.points[0].incoming_handle, vec(5., 10.));
    assert!(s.points[0].is_curved);
    assert_eq!(s.points[1].outgoing_handle, vec(10., 5.));
    assert_eq!(s.points[1].incoming_handle, vec(10., 0.));
}

#[test]
fn test_straight_handles() {
    let s = &subpaths("M0 0 L10 0 L10 10")[0];
    for p in &s.points {
        assert_eq!(p.incoming_handle, p.position);
        assert_eq!(p.outgoing_handle, p.position);
        assert!(!p.is_curved);
    }
}

#[test]
fn test_bounds_and_area() {
    let square = &subpaths("M0 0 H10 V10 H0 Z")[0];
    assert_eq!(square.bounds(), Some(Frame::new(0., 0., 10., 10.)));
    assert!((square.signed_area() - 100.).abs() < 1e-9);

    let open = &subpaths("M0 0 H10 V10 H0")[0];
    assert!((open.signed_area() - 100.).abs() < 1e-9);

    let reversed = &subpaths("M0 0 V10 H10 V0 Z")[0];
    assert!((reversed.signed_area() + 100.).abs() < 1e-9);
}

#[test]
fn test_display() {
    let s = &subpaths("M0 0 L10 0 L10 10 Z")[0];
    assert_eq!(s.to_string(), "M0 0 L10 0 L10 10 Z");
    let c = &subpaths("m0 0 c0 5 5 5 5 0")[0];
    assert_eq!(c.to_string(), "M0 0 C0 5 5 5 5 0");
}

#[test]
fn test_relative_to() {
    let s = &subpaths("M10 10 L20 10 L20 30")[0];
    let r = s.relative_to(&Frame::new(10., 10., 10., 20.));
    assert_eq!(positions(&r), vec![(0., 0.), (1., 0.), (1., 1.)]);
    let flat = s.relative_to(&Frame::new(10., 10., 0., 20.));
    assert_eq!(positions(&flat), vec![(0., 0.), (0., 0.), (0., 1.)]);
}

#[test]
fn test_builder_needs_move() {
    let mut builder = SubpathBuilder::new(1e-9);
    assert!(matches!(builder.push(Segment::LineTo(vec(1., 1.))), Err(PathFault::MissingMoveTo)));
    assert!(matches!(builder.push(Segment::Close), Err(PathFault::DanglingClose)));
    builder.push(Segment::MoveTo(vec(0., 0.))).unwrap();
    builder.push(Segment::CubicTo(vec(0., 1.), vec(1., 1.), vec(1., 0.))).unwrap();
    assert_eq!(builder.finish().len(), 1);
}
