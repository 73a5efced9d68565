use crate::geometry::Frame;

/// The largest uniform scale at which `origin` still fits inside `target`.
///
/// Equal aspect ratios give either ratio; otherwise the tighter axis wins.
pub fn calc_frame_scale(origin: &Frame, target: &Frame) -> f64 {
    let width = target.width / origin.width;
    let height = target.height / origin.height;
    width.min(height)
}

#[test]
fn test_same_aspect() {
    let origin = Frame::new(0., 0., 100., 100.);
    let target = Frame::new(0., 0., 200., 200.);
    assert_eq!(calc_frame_scale(&origin, &target), 2.);
}

#[test]
fn test_wider_origin() {
    let origin = Frame::new(0., 0., 100., 50.);
    let target = Frame::new(0., 0., 200., 200.);
    assert_eq!(calc_frame_scale(&origin, &target), 2.);
}

#[test]
fn test_taller_origin() {
    let origin = Frame::new(0., 0., 100., 200.);
    let target = Frame::new(0., 0., 100., 100.);
    assert_eq!(calc_frame_scale(&origin, &target), 0.5);
}

#[test]
fn test_position_is_ignored() {
    let origin = Frame::new(-40., 7., 30., 10.);
    let target = Frame::new(500., 500., 10., 10.);
    assert_eq!(calc_frame_scale(&origin, &target), 1. / 3.);
}
