use crate::foundation::core::{Affine, Point};
use crate::geometry::path::{PathParser, parse_path};

fn approx(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-6
}

#[test]
fn straight_contour_with_close() {
    let pts = parse_path("M0 0 L10 0 L10 10 Z");
    assert_eq!(pts.len(), 4);
    assert_eq!(pts[0], Point::new(0.0, 0.0));
    assert_eq!(pts[1], Point::new(10.0, 0.0));
    assert_eq!(pts[2], Point::new(10.0, 10.0));
    assert_eq!(pts[3], pts[0]);
}

#[test]
fn parsing_is_restartable() {
    let d = "M0 0 C0 10 10 10 10 0 S20 -10 20 0 Q25 5 30 0 T40 0 Z";
    let mut parser = PathParser::new();
    assert_eq!(parser.parse(d), parser.parse(d));
    assert_eq!(parser.parse(d), parse_path(d));
}

#[test]
fn relative_commands_accumulate() {
    let pts = parse_path("m10 10 l5 0 l0 5");
    assert_eq!(
        pts,
        vec![
            Point::new(10.0, 10.0),
            Point::new(15.0, 10.0),
            Point::new(15.0, 15.0)
        ]
    );
}

#[test]
fn axis_aligned_commands() {
    let pts = parse_path("M0 0 H10 V5 h-2 v-1");
    assert_eq!(
        pts,
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(8.0, 5.0),
            Point::new(8.0, 4.0)
        ]
    );
}

#[test]
fn move_consumes_a_single_pair() {
    // Extra coordinates after the first pair are not implicit line-tos.
    let pts = parse_path("M0 0 10 10 20 20");
    assert_eq!(pts, vec![Point::new(0.0, 0.0)]);
}

#[test]
fn terse_number_forms_lex_correctly() {
    let pts = parse_path("M1.5.5L-2e1 3");
    assert_eq!(pts[0], Point::new(1.5, 0.5));
    assert_eq!(pts[1], Point::new(-20.0, 3.0));
}

#[test]
fn cubic_flattening_lands_on_the_endpoint() {
    let pts = parse_path("M0 0 C0 10 10 10 10 0");
    assert!(pts.len() > 4, "curve should flatten into many points");
    assert!(approx(pts[pts.len() - 1], Point::new(10.0, 0.0)));
    assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    // The curve bulges toward positive y and stays inside its hull.
    assert!(pts.iter().any(|p| p.y > 5.0));
    assert!(pts.iter().all(|p| p.y <= 7.5 + 1e-9));
}

#[test]
fn arc_samples_lie_on_the_circle() {
    let pts = parse_path("M0 0 A5 5 0 0 1 10 0");
    let center = Point::new(5.0, 0.0);
    assert!(approx(pts[pts.len() - 1], Point::new(10.0, 0.0)));
    for p in &pts[1..] {
        assert!(((*p - center).hypot() - 5.0).abs() < 1e-6);
    }
}

#[test]
fn degenerate_arc_radius_draws_a_straight_line() {
    let pts = parse_path("M0 0 A0 5 0 0 1 10 0");
    assert_eq!(pts, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
}

#[test]
fn arc_to_the_same_point_draws_nothing() {
    let pts = parse_path("M3 4 A5 5 0 1 1 3 4");
    assert_eq!(pts, vec![Point::new(3.0, 4.0)]);
}

#[test]
fn undersized_arc_radii_are_scaled_up() {
    // Radii far too small for the endpoints still produce a finite arc
    // ending exactly at the target.
    let pts = parse_path("M0 0 A1 1 0 0 1 10 0");
    assert!(approx(pts[pts.len() - 1], Point::new(10.0, 0.0)));
    assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn transform_applies_to_every_emitted_point() {
    let mut parser = PathParser::with_transform(Affine::translate((100.0, -50.0)));
    let pts = parser.parse("M0 0 L1 0");
    assert_eq!(pts, vec![Point::new(100.0, -50.0), Point::new(101.0, -50.0)]);
}

#[test]
fn unknown_commands_and_junk_are_skipped() {
    let pts = parse_path("M0 0 X9 9 L1 1 \u{00e9}");
    assert_eq!(pts, vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
}
