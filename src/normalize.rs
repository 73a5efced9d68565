use svgtypes::PathSegment;
use crate::prelude::*;
use crate::arc::EllipticalArc;

/// A path command rewritten in absolute coordinates, with every curve as a cubic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// Pen state carried from one command to the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pub position: Point,
    /// where the current subpath started, `Z` returns here
    pub start: Point,
    started: bool,
    open: bool,
    last_cubic_ctrl: Option<Point>,
    last_quadratic_ctrl: Option<Point>,
}

impl Cursor {
    pub fn new() -> Cursor {
        Cursor::default()
    }

    fn resolve(&self, abs: bool, x: f64, y: f64) -> Point {
        if abs {
            vec(x, y)
        } else {
            self.position + vec(x, y)
        }
    }

    /// Drawing after a close continues from the start of the closed subpath.
    fn ensure_open(&mut self, out: &mut Vec<Segment>) -> Result<(), PathFault> {
        if !self.started {
            return Err(PathFault::MissingMoveTo);
        }
        if !self.open {
            out.push(Segment::MoveTo(self.start));
            self.open = true;
        }
        Ok(())
    }

    fn line_to(&mut self, p: Point, out: &mut Vec<Segment>) {
        out.push(Segment::LineTo(p));
        self.position = p;
        self.last_cubic_ctrl = None;
        self.last_quadratic_ctrl = None;
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point, out: &mut Vec<Segment>) {
        out.push(Segment::CubicTo(c1, c2, p));
        self.position = p;
        self.last_cubic_ctrl = Some(c2);
        self.last_quadratic_ctrl = None;
    }

    /// Degree elevation: the cubic handles sit two thirds of the way to the quadratic control.
    fn quadratic_to(&mut self, q: Point, p: Point, out: &mut Vec<Segment>) {
        let c1 = self.position.lerp(q, 2.0 / 3.0);
        let c2 = p.lerp(q, 2.0 / 3.0);
        out.push(Segment::CubicTo(c1, c2, p));
        self.position = p;
        self.last_cubic_ctrl = None;
        self.last_quadratic_ctrl = Some(q);
    }

    /// Rewrites one command, appending the result to `out` and advancing the cursor.
    pub fn normalize(&mut self, segment: PathSegment, options: &ConvertOptions, out: &mut Vec<Segment>) -> Result<(), PathFault> {
        trace!("{} {:?}", letter(&segment), arguments(&segment));
        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let p = self.resolve(abs, x, y);
                out.push(Segment::MoveTo(p));
                self.position = p;
                self.start = p;
                self.started = true;
                self.open = true;
                self.last_cubic_ctrl = None;
                self.last_quadratic_ctrl = None;
            }
            PathSegment::LineTo { abs, x, y } => {
                self.ensure_open(out)?;
                let p = self.resolve(abs, x, y);
                self.line_to(p, out);
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                self.ensure_open(out)?;
                let p = if abs {
                    vec(x, self.position.y)
                } else {
                    self.position + vec(x, 0.0)
                };
                self.line_to(p, out);
            }
            PathSegment::VerticalLineTo { abs, y } => {
                self.ensure_open(out)?;
                let p = if abs {
                    vec(self.position.x, y)
                } else {
                    self.position + vec(0.0, y)
                };
                self.line_to(p, out);
            }
            PathSegment::CurveTo { abs, x1, y1, x2, y2, x, y } => {
                self.ensure_open(out)?;
                let c1 = self.resolve(abs, x1, y1);
                let c2 = self.resolve(abs, x2, y2);
                let p = self.resolve(abs, x, y);
                self.cubic_to(c1, c2, p, out);
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                self.ensure_open(out)?;
                let c1 = match self.last_cubic_ctrl {
                    Some(c) => c.reflect_on(self.position),
                    None => self.position,
                };
                let c2 = self.resolve(abs, x2, y2);
                let p = self.resolve(abs, x, y);
                self.cubic_to(c1, c2, p, out);
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                self.ensure_open(out)?;
                let q = self.resolve(abs, x1, y1);
                let p = self.resolve(abs, x, y);
                self.quadratic_to(q, p, out);
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                self.ensure_open(out)?;
                let q = match self.last_quadratic_ctrl {
                    Some(c) => c.reflect_on(self.position),
                    None => self.position,
                };
                let p = self.resolve(abs, x, y);
                self.quadratic_to(q, p, out);
            }
            PathSegment::EllipticalArc { abs, rx, ry, x_axis_rotation, large_arc, sweep, x, y } => {
                self.ensure_open(out)?;
                let p = self.resolve(abs, x, y);
                let arc = EllipticalArc {
                    from: self.position,
                    to: p,
                    radii: vec(rx, ry),
                    x_axis_rotation,
                    large_arc,
                    sweep,
                };
                let cubics = arc.to_cubics(options.arc_max_angle);
                if cubics.is_empty() {
                    warn!("omitting arc without extent at {:?}", p);
                }
                for cubic in cubics {
                    if cubic.is_line() {
                        out.push(Segment::LineTo(cubic.to));
                    } else {
                        out.push(Segment::CubicTo(cubic.ctrl1, cubic.ctrl2, cubic.to));
                    }
                }
                self.position = p;
                self.last_cubic_ctrl = None;
                self.last_quadratic_ctrl = None;
            }
            PathSegment::ClosePath { .. } => {
                if !self.started {
                    return Err(PathFault::DanglingClose);
                }
                if self.open {
                    out.push(Segment::Close);
                    self.open = false;
                } else {
                    trace!("ignoring repeated close");
                }
                self.position = self.start;
                self.last_cubic_ctrl = None;
                self.last_quadratic_ctrl = None;
            }
        }
        Ok(())
    }
}

/// Normalizes a whole path.
pub fn normalize_path(data: PathData, options: &ConvertOptions) -> Result<Vec<Segment>, PathFault> {
    let mut cursor = Cursor::new();
    let mut out = Vec::new();
    for segment in data.commands() {
        cursor.normalize(segment?, options, &mut out)?;
    }
    Ok(out)
}

#[cfg(test)]
fn segments(d: &str) -> Vec<Segment> {
    normalize_path(PathData::new(d).unwrap(), &ConvertOptions::default()).unwrap()
}

#[test]
fn test_lines() {
    assert_eq!(segments("M 10 10 h 5 V 0 l -5 5 z"), vec![
        Segment::MoveTo(vec(10., 10.)),
        Segment::LineTo(vec(15., 10.)),
        Segment::LineTo(vec(15., 0.)),
        Segment::LineTo(vec(10., 5.)),
        Segment::Close,
    ]);
}

#[test]
fn test_implicit_repeats() {
    assert_eq!(segments("m 1 1 2 0 0 2"), vec![
        Segment::MoveTo(vec(1., 1.)),
        Segment::LineTo(vec(3., 1.)),
        Segment::LineTo(vec(3., 3.)),
    ]);
}

#[test]
fn test_quadratic_elevation() {
    assert_eq!(segments("M 0 0 Q 30 30 60 0"), vec![
        Segment::MoveTo(vec(0., 0.)),
        Segment::CubicTo(vec(20., 20.), vec(40., 20.), vec(60., 0.)),
    ]);
    // T reflects the previous control point
    assert_eq!(segments("M 0 0 Q 30 30 60 0 T 120 0")[2],
        Segment::CubicTo(vec(80., -20.), vec(100., -20.), vec(120., 0.)));
}

#[test]
fn test_smooth_cubic() {
    assert_eq!(segments("M 0 0 C 0 10 10 10 10 0 s 10 -10 10 0")[2],
        Segment::CubicTo(vec(10., -10.), vec(20., -10.), vec(20., 0.)));
    assert_eq!(segments("M 0 0 S 5 5 10 0")[1],
        Segment::CubicTo(vec(0., 0.), vec(5., 5.), vec(10., 0.)));
}

#[test]
fn test_draw_after_close() {
    assert_eq!(segments("M 5 5 L 10 5 Z l 0 5"), vec![
        Segment::MoveTo(vec(5., 5.)),
        Segment::LineTo(vec(10., 5.)),
        Segment::Close,
        Segment::MoveTo(vec(5., 5.)),
        Segment::LineTo(vec(5., 10.)),
    ]);
}

#[test]
fn test_arc_radius_zero_is_line() {
    assert_eq!(segments("M 0 0 A 0 0 0 0 1 10 10"), vec![
        Segment::MoveTo(vec(0., 0.)),
        Segment::LineTo(vec(10., 10.)),
    ]);
}

#[test]
fn test_close_without_move() {
    let mut cursor = Cursor::new();
    let mut out = Vec::new();
    let z = PathSegment::ClosePath { abs: true };
    assert!(matches!(cursor.normalize(z, &ConvertOptions::default(), &mut out), Err(PathFault::DanglingClose)));
    assert!(out.is_empty());
}

#[test]
fn test_draw_without_move() {
    let mut cursor = Cursor::new();
    let mut out = Vec::new();
    let l = PathSegment::LineTo { abs: true, x: 1., y: 1. };
    assert!(matches!(cursor.normalize(l, &ConvertOptions::default(), &mut out), Err(PathFault::MissingMoveTo)));
}
