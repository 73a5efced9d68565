//! Elliptical arcs in endpoint form, converted to cubic beziers.

use std::f64::consts::PI;
use crate::geometry::{Cubic, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    pub from: Point,
    pub to: Point,
    pub radii: Point,
    /// degrees
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcShape {
    Center {
        center: Point,
        radii: Point,
        theta1: f64,
        delta_theta: f64,
    },
    LineTo,
    Omit,
}

impl EllipticalArc {
    /// Endpoint to center parameterization, SVG 2 implementation notes B.2.4.
    ///
    /// Radii that cannot reach the end point are scaled up uniformly.
    pub fn shape(&self) -> ArcShape {
        let EllipticalArc { from, to, radii, x_axis_rotation, large_arc, sweep } = *self;
        if from == to {
            return ArcShape::Omit;
        }
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return ArcShape::LineTo;
        }
        let (mut rx, mut ry) = (radii.x, radii.y);
        let (sin_phi, cos_phi) = (x_axis_rotation * PI / 180.0).sin_cos();

        // rotate the half chord into the ellipse frame
        let mid = (from - to) * 0.5;
        let x1 = cos_phi * mid.x + sin_phi * mid.y;
        let y1 = -sin_phi * mid.x + cos_phi * mid.y;

        // sqrt(lambda) without squaring, tiny radii would overflow
        let reach = (x1 / rx).hypot(y1 / ry);
        if reach > 1.0 {
            rx *= reach;
            ry *= reach;
        }
        if !(rx.is_finite() && ry.is_finite()) {
            return ArcShape::LineTo;
        }

        let d = (rx * y1).powi(2) + (ry * x1).powi(2);
        if d == 0.0 {
            return ArcShape::Omit;
        }
        // scaled radii put the center on the chord
        let mut k = if reach > 1.0 { 0.0 } else { ((rx * ry).powi(2) / d - 1.0).abs().sqrt() };
        if sweep == large_arc {
            k = -k;
        }
        let cx1 = k * rx * y1 / ry;
        let cy1 = -k * ry * x1 / rx;

        let center = Point::new(
            cos_phi * cx1 - sin_phi * cy1 + (from.x + to.x) / 2.0,
            sin_phi * cx1 + cos_phi * cy1 + (from.y + to.y) / 2.0,
        );

        let u = Point::new((x1 - cx1) / rx, (y1 - cy1) / ry);
        let v = Point::new((-x1 - cx1) / rx, (-y1 - cy1) / ry);
        let theta1 = u.y.atan2(u.x);
        let mut delta_theta = (u.x * v.y - u.y * v.x).atan2(u.x * v.x + u.y * v.y);
        if sweep && delta_theta < 0.0 {
            delta_theta += 2.0 * PI;
        } else if !sweep && delta_theta > 0.0 {
            delta_theta -= 2.0 * PI;
        }

        if !(center.is_finite() && theta1.is_finite() && delta_theta.is_finite()) {
            warn!("arc from {:?} to {:?} has no usable center", from, to);
            return ArcShape::LineTo;
        }
        ArcShape::Center { center, radii: Point::new(rx, ry), theta1, delta_theta }
    }

    /// Approximates the arc with cubics, each sweeping at most `max_angle` radians.
    pub fn to_cubics(&self, max_angle: f64) -> Vec<Cubic> {
        let (center, radii, theta1, delta_theta) = match self.shape() {
            ArcShape::Omit => return vec![],
            ArcShape::LineTo => return vec![Cubic::line(self.from, self.to)],
            ArcShape::Center { center, radii, theta1, delta_theta } => (center, radii, theta1, delta_theta),
        };
        let max_angle = if max_angle > 0.0 { max_angle.min(PI) } else { PI / 2.0 };
        let n = (delta_theta.abs() / max_angle - 1e-9).ceil().max(1.0) as usize;
        let step = delta_theta / n as f64;
        let phi = self.x_axis_rotation * PI / 180.0;

        let mut from = self.from;
        (0..n).map(|i| {
            let th0 = theta1 + step * i as f64;
            let mut cubic = arc_segment(center, radii, phi, th0, th0 + step);
            cubic.from = from;
            if i == n - 1 {
                cubic.to = self.to;
            }
            from = cubic.to;
            cubic
        }).collect()
    }
}

/// One cubic for the ellipse sweep `th0..th1` (radians), rotated by `phi`.
fn arc_segment(center: Point, radii: Point, phi: f64, th0: f64, th1: f64) -> Cubic {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_th0, cos_th0) = th0.sin_cos();
    let (sin_th1, cos_th1) = th1.sin_cos();

    let t = 4.0 / 3.0 * ((th1 - th0) / 4.0).tan();
    let map = |x: f64, y: f64| Point::new(
        center.x + cos_phi * radii.x * x - sin_phi * radii.y * y,
        center.y + sin_phi * radii.x * x + cos_phi * radii.y * y,
    );

    Cubic::new(
        map(cos_th0, sin_th0),
        map(cos_th0 - t * sin_th0, sin_th0 + t * cos_th0),
        map(cos_th1 + t * sin_th1, sin_th1 - t * cos_th1),
        map(cos_th1, sin_th1),
    )
}

#[cfg(test)]
fn arc(from: (f64, f64), to: (f64, f64), r: (f64, f64), large_arc: bool, sweep: bool) -> EllipticalArc {
    EllipticalArc {
        from: Point::new(from.0, from.1),
        to: Point::new(to.0, to.1),
        radii: Point::new(r.0, r.1),
        x_axis_rotation: 0.0,
        large_arc,
        sweep,
    }
}

#[test]
fn test_semicircle() {
    let a = arc((0., 0.), (20., 0.), (10., 10.), false, true);
    match a.shape() {
        ArcShape::Center { center, radii, delta_theta, .. } => {
            assert!(center.approx_eq(Point::new(10., 0.), 1e-9));
            assert!(radii.approx_eq(Point::new(10., 10.), 1e-9));
            assert!((delta_theta - PI).abs() < 1e-9);
        }
        s => panic!("unexpected {:?}", s),
    }
    let cubics = a.to_cubics(PI / 2.0);
    assert_eq!(cubics.len(), 2);
    assert_eq!(cubics[0].from, Point::new(0., 0.));
    assert_eq!(cubics[1].to, Point::new(20., 0.));
    // the top of the circle, y-down with a positive sweep
    assert!(cubics[0].to.approx_eq(Point::new(10., -10.), 1e-9));
    // every curve point stays close to the circle
    for c in &cubics {
        for i in 0..=10 {
            let p = c.eval(i as f64 / 10.0);
            let r = ((p.x - 10.).powi(2) + p.y.powi(2)).sqrt();
            assert!((r - 10.).abs() < 0.01, "{}", r);
        }
    }
}

#[test]
fn test_large_arc_flag() {
    let small = arc((0., 0.), (10., 10.), (10., 10.), false, true);
    let large = arc((0., 0.), (10., 10.), (10., 10.), true, true);
    assert_eq!(small.to_cubics(PI / 2.0).len(), 1);
    assert_eq!(large.to_cubics(PI / 2.0).len(), 3);
}

#[test]
fn test_radii_scaled_up() {
    let a = arc((0., 0.), (100., 0.), (1., 1.), false, false);
    match a.shape() {
        ArcShape::Center { radii, .. } => assert!(radii.approx_eq(Point::new(50., 50.), 1e-9)),
        s => panic!("unexpected {:?}", s),
    }
}

#[test]
fn test_degenerate() {
    assert_eq!(arc((0., 0.), (10., 0.), (0., 5.), false, false).shape(), ArcShape::LineTo);
    assert_eq!(arc((0., 0.), (10., 0.), (-3., 5.), false, false).shape(), ArcShape::LineTo);
    assert_eq!(arc((5., 5.), (5., 5.), (3., 5.), false, false).shape(), ArcShape::Omit);
    assert_eq!(arc((0., 0.), (10., 0.), (0., 5.), false, false).to_cubics(1.0),
        vec![Cubic::line(Point::new(0., 0.), Point::new(10., 0.))]);
}

#[test]
fn test_tiny_radii() {
    // scaled up to the half chord: a semicircle of radius 5
    let a = arc((0., 0.), (10., 0.), (1e-300, 1e-300), false, true);
    match a.shape() {
        ArcShape::Center { center, radii, .. } => {
            assert!(center.approx_eq(Point::new(5., 0.), 1e-9));
            assert!(radii.approx_eq(Point::new(5., 5.), 1e-9));
        }
        s => panic!("unexpected {:?}", s),
    }
    for radius in &[1e-300, 1e-320, 5e-324] {
        let cubics = arc((0., 0.), (10., 0.), (*radius, *radius), false, true).to_cubics(PI / 2.0);
        assert!(!cubics.is_empty());
        for c in &cubics {
            assert!(c.ctrl1.is_finite() && c.ctrl2.is_finite() && c.to.is_finite(), "{:?}", c);
        }
    }
}

#[test]
fn test_rotated_arc() {
    // major axis turned upright: half an ellipse from the top to the bottom of it
    let a = EllipticalArc {
        from: Point::new(0., 0.),
        to: Point::new(0., 40.),
        radii: Point::new(20., 10.),
        x_axis_rotation: 90.,
        large_arc: false,
        sweep: true,
    };
    let cubics = a.to_cubics(PI / 2.0);
    assert_eq!(cubics.len(), 2);
    for c in &cubics {
        for i in 0..=10 {
            let p = c.eval(i as f64 / 10.0);
            let on_ellipse = ((p.y - 20.) / 20.).powi(2) + (p.x / 10.).powi(2);
            assert!((on_ellipse - 1.).abs() < 0.01, "{:?} {}", p, on_ellipse);
            assert!(p.x > -1e-9, "{:?}", p);
        }
    }
}
