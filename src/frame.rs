use crate::prelude::*;
use crate::scale::calc_frame_scale;

#[cfg(feature="serde")]
use serde::{Serialize, Deserialize};

/// How intrinsic geometry is mapped onto a placement frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature="serde", derive(Serialize, Deserialize))]
pub enum FitMode {
    /// Scale each axis independently so the bounds match the frame exactly.
    Stretch,
    /// Scale uniformly to fit inside the frame, centered.
    Contain,
}
impl Default for FitMode {
    fn default() -> FitMode {
        FitMode::Stretch
    }
}

/// Scale about `from`, then move `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    from: Point,
    scale: Point,
    to: Point,
}
impl Placement {
    pub fn identity() -> Placement {
        Placement {
            from: Point::default(),
            scale: Point::new(1., 1.),
            to: Point::default(),
        }
    }

    /// Maps `intrinsic` onto `target`. An axis without extent keeps scale 1.
    pub fn fit(intrinsic: &Frame, target: &Frame, mode: FitMode) -> Placement {
        let scale = match mode {
            FitMode::Stretch => Point::new(
                axis_scale(target.width, intrinsic.width),
                axis_scale(target.height, intrinsic.height),
            ),
            FitMode::Contain => {
                let s = match (intrinsic.width == 0.0, intrinsic.height == 0.0) {
                    (true, true) => 1.0,
                    (true, false) => target.height / intrinsic.height,
                    (false, true) => target.width / intrinsic.width,
                    (false, false) => calc_frame_scale(intrinsic, target),
                };
                let s = if s.is_finite() { s } else { 1.0 };
                Point::new(s, s)
            }
        };
        let to = match mode {
            FitMode::Stretch => target.origin(),
            FitMode::Contain => {
                let used = Point::new(intrinsic.width * scale.x, intrinsic.height * scale.y);
                target.origin() + (target.size() - used) * 0.5
            }
        };
        Placement { from: intrinsic.origin(), scale, to }
    }

    pub fn scale(&self) -> Point {
        self.scale
    }

    pub fn apply(&self, p: Point) -> Point {
        let d = p - self.from;
        self.to + Point::new(d.x * self.scale.x, d.y * self.scale.y)
    }

    /// The mapped rectangle, normalized to a non-negative size.
    pub fn apply_frame(&self, frame: &Frame) -> Frame {
        let a = self.apply(frame.origin());
        let b = self.apply(frame.max());
        Frame::from_corners(
            Point::new(a.x.min(b.x), a.y.min(b.y)),
            Point::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }
}

fn axis_scale(target: f64, intrinsic: f64) -> f64 {
    if intrinsic == 0.0 {
        1.0
    } else {
        target / intrinsic
    }
}

/// Moves every outline of the forest through `placement` and derives each node's frame.
pub fn place(forest: Vec<Nested>, placement: &Placement) -> Vec<ShapeNode> {
    forest.into_iter().map(|nested| {
        let outline = nested.outline.map(|p| placement.apply(p));
        let frame = outline.bounds().unwrap_or_default();
        ShapeNode {
            frame,
            outline,
            children: place(nested.children, placement),
        }
    }).collect()
}

/// Bounds of all subpaths together, in their own coordinates.
pub fn intrinsic_frame<'a>(subpaths: impl Iterator<Item=&'a Subpath>) -> Frame {
    max_bounds(subpaths.flat_map(|s| s.bounds())).unwrap_or_default()
}

#[test]
fn test_stretch() {
    let p = Placement::fit(&Frame::new(4., 4., 10., 20.), &Frame::new(-90., 0., 100., 100.), FitMode::Stretch);
    assert_eq!(p.scale(), Point::new(10., 5.));
    assert_eq!(p.apply(Point::new(4., 4.)), Point::new(-90., 0.));
    assert_eq!(p.apply(Point::new(14., 24.)), Point::new(10., 100.));
}

#[test]
fn test_zero_extent_axis() {
    let p = Placement::fit(&Frame::new(5., 0., 0., 10.), &Frame::new(0., 0., 50., 50.), FitMode::Stretch);
    assert_eq!(p.scale(), Point::new(1., 5.));
    assert_eq!(p.apply(Point::new(5., 10.)), Point::new(0., 50.));

    let single = Placement::fit(&Frame::new(3., 3., 0., 0.), &Frame::new(0., 0., 50., 50.), FitMode::Contain);
    assert_eq!(single.scale(), Point::new(1., 1.));
}

#[test]
fn test_contain_centers() {
    let p = Placement::fit(&Frame::new(0., 0., 100., 50.), &Frame::new(0., 0., 200., 200.), FitMode::Contain);
    assert_eq!(p.scale(), Point::new(2., 2.));
    assert_eq!(p.apply_frame(&Frame::new(0., 0., 100., 50.)), Frame::new(0., 50., 200., 100.));
}

#[test]
fn test_negative_target_mirrors() {
    let p = Placement::fit(&Frame::new(0., 0., 10., 10.), &Frame::new(0., 0., -10., 10.), FitMode::Stretch);
    assert_eq!(p.apply(Point::new(10., 0.)), Point::new(-10., 0.));
    assert_eq!(p.apply_frame(&Frame::new(0., 0., 10., 10.)), Frame::new(-10., 0., 10., 10.));
}
