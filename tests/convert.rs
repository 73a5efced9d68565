use svg_shape::prelude::*;
use svg_shape::{convert, convert_with, path_to_shape_group};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Square outline with a rounded-rect hole, plus an open rectangle beside it.
const COMPOUND: &str = "M0 0 H200 V200 H0 Z \
    M60 40 H140 A20 20 0 0 1 160 60 V140 A20 20 0 0 1 140 160 \
    H60 A20 20 0 0 1 40 140 V60 A20 20 0 0 1 60 40 Z \
    M220 20 H300 V100 H220";

const PLACEMENT: Frame = Frame::new(-90., 4., 600., 400.);

fn assert_frame(actual: &Frame, expected: &Frame) {
    assert!(actual.approx_eq(expected, 1e-9), "{:?} != {:?}", actual, expected);
}

fn positions(s: &Subpath) -> Vec<Point> {
    s.points.iter().map(|p| p.position).collect()
}

#[test]
fn compound_path_frames() {
    init();
    let group = convert(COMPOUND, &PLACEMENT).unwrap();
    assert_eq!(group.frame, PLACEMENT);

    assert_eq!(group.shapes.len(), 2);
    let square = &group.shapes[0];
    assert!(square.outline.closed);
    assert_frame(&square.frame, &Frame::new(-90., 4., 400., 400.));

    assert_eq!(square.children.len(), 1);
    let hole = &square.children[0];
    assert!(hole.outline.closed);
    assert_frame(&hole.frame, &Frame::new(-10., 84., 240., 240.));

    let open = &group.shapes[1];
    assert!(!open.outline.closed);
    assert!(open.children.is_empty());
    assert_frame(&open.frame, &Frame::new(350., 44., 160., 160.));

    for node in group.nodes() {
        assert!(group.frame.contains(&node.frame, 1e-9), "{:?} outside {:?}", node.frame, group.frame);
    }
}

#[test]
fn rounded_corners_are_curved() {
    let group = path_to_shape_group(COMPOUND).unwrap();
    let hole = &group.shapes[0].children[0].outline;
    // four straight edges, four corners of one cubic each
    assert_eq!(hole.points.len(), 8);
    assert!(hole.points.iter().all(|p| p.is_curved));
    assert_eq!(hole.segments().filter(|c| !c.is_line()).count(), 4);
}

#[test]
fn intrinsic_group() {
    let group = path_to_shape_group(COMPOUND).unwrap();
    assert_frame(&group.frame, &Frame::new(0., 0., 300., 200.));
    assert_eq!(positions(&group.shapes[1].outline), vec![
        Point::new(220., 20.), Point::new(300., 20.), Point::new(300., 100.), Point::new(220., 100.),
    ]);
}

#[test]
fn nested_subpath_is_child() {
    let group = convert("M0 0 H10 V10 H0 Z M2 2 H8 V8 H2 Z", &Frame::new(0., 0., 10., 10.)).unwrap();
    assert_eq!(group.shapes.len(), 1);
    assert_eq!(group.shapes[0].children.len(), 1);
}

#[test]
fn lone_close_is_rejected() {
    init();
    let err = convert("Z", &PLACEMENT).unwrap_err();
    assert_eq!(err.to_string(), "Error Path!\nData:Z\nPlease check whether the path is correct.");
    assert_eq!(err.data(), "Z");
}

#[test]
fn malformed_paths_are_rejected() {
    for d in &["", "   ", "L 10 10", "M 10", "M 0 0 L 5 5 5", "M 0 0 X 1 1"] {
        let err = path_to_shape_group(d).unwrap_err();
        assert!(err.to_string().starts_with("Error Path!\nData:"), "{:?}", d);
        assert_eq!(err.data(), *d);
    }
}

#[test]
fn same_input_same_output() {
    let a = convert(COMPOUND, &PLACEMENT).unwrap();
    let b = convert(COMPOUND, &PLACEMENT).unwrap();
    assert_eq!(a, b);
}

#[test]
fn straight_paths_round_trip() {
    let d = "M0 0 L10 0 L10 10 L0 10 Z M2 2 L8 2 L8 8 Z M20 0 L30 5";
    let group = path_to_shape_group(d).unwrap();
    let again = path_to_shape_group(&group.to_string()).unwrap();
    let outlines = |g: &ShapeGroup| g.nodes().iter().map(|n| (positions(&n.outline), n.outline.closed)).collect::<Vec<_>>();
    assert_eq!(outlines(&group), outlines(&again));
}

#[test]
fn circle_from_arcs() {
    let d = "M0 50 A50 50 0 1 0 100 50 A50 50 0 1 0 0 50 Z";
    let group = convert(d, &Frame::new(10., 10., 20., 20.)).unwrap();
    let circle = &group.shapes[0];
    assert_eq!(circle.outline.points.len(), 4);
    assert!(circle.outline.closed);
    assert!(circle.outline.points.iter().all(|p| p.is_curved));
    assert_frame(&circle.frame, &Frame::new(10., 10., 20., 20.));
}

#[test]
fn single_line_keeps_its_extent() {
    // zero height: that axis is not scaled
    let group = convert("M0 5 H10", &Frame::new(0., 0., 100., 100.)).unwrap();
    assert_eq!(group.frame, Frame::new(0., 0., 100., 100.));
    assert_frame(&group.shapes[0].frame, &Frame::new(0., 0., 100., 0.));
}

#[test]
fn handles_follow_points() {
    let group = convert("M0 0 C0 10 10 10 10 0", &Frame::new(0., 0., 20., 15.)).unwrap();
    let outline = &group.shapes[0].outline;
    // intrinsic height is 7.5, so y doubles
    assert_eq!(outline.points[0].outgoing_handle, Point::new(0., 20.));
    assert_eq!(outline.points[1].incoming_handle, Point::new(20., 20.));
}

#[test]
fn contain_fit() {
    let options = ConvertOptions::default().with_fit(FitMode::Contain);
    let group = convert_with("M0 0 H100 V50 H0 Z", &Frame::new(0., 0., 200., 200.), &options).unwrap();
    assert_eq!(group.frame, Frame::new(0., 0., 200., 200.));
    assert_frame(&group.shapes[0].frame, &Frame::new(0., 50., 200., 100.));
}

#[test]
fn refit_group() {
    let group = convert("M0 0 H100 V50 H0 Z", &Frame::new(0., 0., 100., 50.)).unwrap();
    let fitted = group.fit_into(&Frame::new(0., 0., 200., 200.));
    assert_frame(&fitted.frame, &Frame::new(0., 50., 200., 100.));
    assert_frame(&fitted.shapes[0].frame, &fitted.frame);
}

#[test]
fn relative_outline_is_unit_square() {
    let group = convert("M0 0 H10 V10 H0 Z", &Frame::new(40., 40., 20., 20.)).unwrap();
    let relative = group.shapes[0].relative_outline();
    assert_eq!(positions(&relative), vec![
        Point::new(0., 0.), Point::new(1., 0.), Point::new(1., 1.), Point::new(0., 1.),
    ]);
}

#[test]
fn frame_scale() {
    let scale = |o: Frame, t: Frame| calc_frame_scale(&o, &t);
    assert_eq!(scale(Frame::new(0., 0., 100., 100.), Frame::new(0., 0., 200., 200.)), 2.);
    assert_eq!(scale(Frame::new(0., 0., 100., 50.), Frame::new(0., 0., 200., 200.)), 2.);
    assert_eq!(scale(Frame::new(0., 0., 100., 200.), Frame::new(0., 0., 100., 100.)), 0.5);
}

#[test]
fn relative_rotated_arc() {
    // an upright half ellipse, drawn relative to the current point
    let group = path_to_shape_group("M5 5 a20 10 90 0 1 0 40").unwrap();
    assert_frame(&group.frame, &Frame::new(5., 5., 10., 40.));
    let outline = &group.shapes[0].outline;
    assert!(outline.points.last().unwrap().position.approx_eq(Point::new(5., 45.), 1e-9));
    for c in outline.segments() {
        for i in 0..=10 {
            let p = c.eval(i as f64 / 10.0);
            let on_ellipse = ((p.y - 25.) / 20.).powi(2) + ((p.x - 5.) / 10.).powi(2);
            assert!((on_ellipse - 1.).abs() < 0.01, "{:?}", p);
        }
    }
}

#[test]
fn tiny_arc_radii_stay_finite() {
    let group = convert("M0 0 A1e-300 1e-300 0 0 1 10 0 L10 10 Z", &Frame::new(0., 0., 100., 100.)).unwrap();
    for node in group.nodes() {
        for p in &node.outline.points {
            assert!(p.position.is_finite() && p.incoming_handle.is_finite() && p.outgoing_handle.is_finite(), "{:?}", p);
        }
    }
}

#[test]
fn coarser_arc_split() {
    let d = "M0 50 A50 50 0 1 0 100 50 A50 50 0 1 0 0 50 Z";
    let options = ConvertOptions::default().with_arc_max_angle(std::f64::consts::PI);
    let group = svg_shape::path_to_shape_group_with(d, &options).unwrap();
    assert_eq!(group.shapes[0].outline.points.len(), 2);
}

#[test]
fn close_tolerance() {
    let d = "M0 0 L10 0 L10 10 L0.001 0 Z";
    let exact = path_to_shape_group(d).unwrap();
    assert_eq!(exact.shapes[0].outline.points.len(), 4);

    let options = ConvertOptions::default().with_tolerance(0.01);
    let loose = svg_shape::path_to_shape_group_with(d, &options).unwrap();
    assert_eq!(loose.shapes[0].outline.points.len(), 3);
}
