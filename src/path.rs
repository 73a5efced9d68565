use svgtypes::{PathParser, PathSegment};
use crate::error::PathFault;

/// Raw path data, as found in a `d` attribute.
///
/// Iterating it is lazy and can be restarted any number of times.
#[derive(Debug, Clone, Copy)]
pub struct PathData<'a> {
    raw: &'a str,
}
impl<'a> PathData<'a> {
    pub fn new(raw: &'a str) -> Result<PathData<'a>, PathFault> {
        if raw.trim().is_empty() {
            return Err(PathFault::Empty);
        }
        Ok(PathData { raw })
    }
    pub fn raw(&self) -> &'a str {
        self.raw
    }
    pub fn commands(&self) -> Commands<'a> {
        Commands {
            raw: self.raw,
            parser: PathParser::from(self.raw),
            first: true,
            done: false,
        }
    }
}
impl<'a> IntoIterator for PathData<'a> {
    type Item = Result<PathSegment, PathFault>;
    type IntoIter = Commands<'a>;
    fn into_iter(self) -> Commands<'a> {
        self.commands()
    }
}

pub struct Commands<'a> {
    raw: &'a str,
    parser: PathParser<'a>,
    first: bool,
    done: bool,
}
impl<'a> Commands<'a> {
    fn fail(&mut self, fault: PathFault) -> Option<Result<PathSegment, PathFault>> {
        self.done = true;
        Some(Err(fault))
    }
}
impl<'a> Iterator for Commands<'a> {
    type Item = Result<PathSegment, PathFault>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            match self.raw.trim_start().chars().next() {
                Some('M') | Some('m') => {}
                Some('Z') | Some('z') => return self.fail(PathFault::DanglingClose),
                _ => return self.fail(PathFault::MissingMoveTo),
            }
        }
        let segment = match self.parser.next()? {
            Ok(segment) => segment,
            Err(e) => return self.fail(e.into()),
        };
        if !arguments(&segment).iter().all(|n| n.is_finite()) {
            return self.fail(PathFault::NonFinite);
        }
        Some(Ok(segment))
    }
}

/// The command letter; lowercase for relative commands.
pub fn letter(segment: &PathSegment) -> char {
    let (upper, abs) = match *segment {
        PathSegment::MoveTo { abs, .. } => ('M', abs),
        PathSegment::LineTo { abs, .. } => ('L', abs),
        PathSegment::HorizontalLineTo { abs, .. } => ('H', abs),
        PathSegment::VerticalLineTo { abs, .. } => ('V', abs),
        PathSegment::CurveTo { abs, .. } => ('C', abs),
        PathSegment::SmoothCurveTo { abs, .. } => ('S', abs),
        PathSegment::Quadratic { abs, .. } => ('Q', abs),
        PathSegment::SmoothQuadratic { abs, .. } => ('T', abs),
        PathSegment::EllipticalArc { abs, .. } => ('A', abs),
        PathSegment::ClosePath { abs } => ('Z', abs),
    };
    if abs { upper } else { upper.to_ascii_lowercase() }
}

/// The numeric arguments in written order; arc flags become 0 or 1.
pub fn arguments(segment: &PathSegment) -> Vec<f64> {
    let flag = |b: bool| if b { 1.0 } else { 0.0 };
    match *segment {
        PathSegment::MoveTo { x, y, .. } |
        PathSegment::LineTo { x, y, .. } |
        PathSegment::SmoothQuadratic { x, y, .. } => vec![x, y],
        PathSegment::HorizontalLineTo { x, .. } => vec![x],
        PathSegment::VerticalLineTo { y, .. } => vec![y],
        PathSegment::CurveTo { x1, y1, x2, y2, x, y, .. } => vec![x1, y1, x2, y2, x, y],
        PathSegment::SmoothCurveTo { x2, y2, x, y, .. } => vec![x2, y2, x, y],
        PathSegment::Quadratic { x1, y1, x, y, .. } => vec![x1, y1, x, y],
        PathSegment::EllipticalArc { rx, ry, x_axis_rotation, large_arc, sweep, x, y, .. } =>
            vec![rx, ry, x_axis_rotation, flag(large_arc), flag(sweep), x, y],
        PathSegment::ClosePath { .. } => vec![],
    }
}

#[cfg(test)]
fn letters(d: &str) -> String {
    PathData::new(d).unwrap().commands().map(|c| letter(&c.unwrap())).collect()
}

#[test]
fn test_letters() {
    assert_eq!(letters("M0 0 L10 10 h5 v-5 z"), "MLhvz");
    assert_eq!(letters("m1 2 3 4 5 6"), "mll");
    assert_eq!(letters("M0,0C1,1,2,2,3,3S4,4,5,5Q6,6,7,7T8,8A1,1,0,0,1,9,9Z"), "MCSQTAZ");
}

#[test]
fn test_restart() {
    let data = PathData::new("M 1 2 L 3 4").unwrap();
    let first: Vec<_> = data.commands().map(|c| c.unwrap()).collect();
    let second: Vec<_> = data.into_iter().map(|c| c.unwrap()).collect();
    assert_eq!(first, second);
    assert_eq!(arguments(&first[1]), vec![3., 4.]);
}

#[test]
fn test_faults() {
    assert!(matches!(PathData::new("  "), Err(PathFault::Empty)));

    let mut commands = PathData::new("Z").unwrap().commands();
    assert!(matches!(commands.next(), Some(Err(PathFault::DanglingClose))));
    assert!(commands.next().is_none());

    let mut commands = PathData::new(" L 10 10").unwrap().commands();
    assert!(matches!(commands.next(), Some(Err(PathFault::MissingMoveTo))));
    assert!(commands.next().is_none());

    let result: Result<Vec<_>, _> = PathData::new("M 0 0 L 10").unwrap().commands().collect();
    assert!(result.is_err());

    let result: Result<Vec<_>, _> = PathData::new("M 0 0 L 1e999 0").unwrap().commands().collect();
    assert!(result.is_err());
}
