//! Integration test: sample reference lines through the public API, from
//! plain polylines, `geo` geometries, and JSON.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::f64::consts::{FRAC_PI_2, PI};

use linemarks_sampler::{Extent, Point, Polyline, SampleConfig, SampleError, sample};

const EPS: f64 = 1e-9;

fn xy_angle(samples: &[linemarks_sampler::SamplePoint]) -> Vec<(f64, f64, f64)> {
    samples.iter().map(|s| (s.x, s.y, s.angle)).collect()
}

fn assert_close(actual: &[(f64, f64, f64)], expected: &[(f64, f64, f64)]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "expected {expected:?}, got {actual:?}"
    );
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a.0 - e.0).abs() < EPS && (a.1 - e.1).abs() < EPS && (a.2 - e.2).abs() < EPS,
            "expected {expected:?}, got {actual:?}",
        );
    }
}

fn horizontal() -> Polyline {
    Polyline::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)])
}

#[test]
fn horizontal_line_boundaries() {
    let samples = sample(&horizontal(), 5.0, &SampleConfig::default()).unwrap();
    assert_close(
        &xy_angle(&samples),
        &[
            (0.0, 0.0, FRAC_PI_2),
            (5.0, 0.0, FRAC_PI_2),
            (10.0, 0.0, FRAC_PI_2),
        ],
    );
}

#[test]
fn horizontal_line_mid_points() {
    let config = SampleConfig {
        mid_points: true,
        ..SampleConfig::default()
    };
    let samples = sample(&horizontal(), 5.0, &config).unwrap();
    assert_close(
        &xy_angle(&samples),
        &[(2.5, 0.0, FRAC_PI_2), (7.5, 0.0, FRAC_PI_2)],
    );
}

#[test]
fn horizontal_line_in_extent() {
    let config = SampleConfig {
        extent: Some(Extent::new(Point::new(6.0, -1.0), Point::new(11.0, 1.0))),
        ..SampleConfig::default()
    };
    let samples = sample(&horizontal(), 5.0, &config).unwrap();
    assert_close(&xy_angle(&samples), &[(10.0, 0.0, FRAC_PI_2)]);
}

#[test]
fn l_shape_turns_the_corner() {
    let line = Polyline::new(vec![
        Point::new(0.0, 0.0),
        Point::new(5.0, 0.0),
        Point::new(5.0, 5.0),
    ]);
    let samples = sample(&line, 5.0, &SampleConfig::default()).unwrap();
    assert_close(
        &xy_angle(&samples),
        &[
            (0.0, 0.0, FRAC_PI_2),
            (5.0, 0.0, FRAC_PI_2),
            (5.0, 5.0, 0.0),
        ],
    );
}

#[test]
fn screen_coordinates_flip_vertical_bearings() {
    // Going "down" in screen space (increasing y) points south on the page
    // without inversion, and up the page with it.
    let line = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(0.0, 4.0)]);
    let map = sample(&line, 2.0, &SampleConfig::default()).unwrap();
    let screen = sample(
        &line,
        2.0,
        &SampleConfig {
            invert_y: true,
            ..SampleConfig::default()
        },
    )
    .unwrap();
    assert_eq!(map.len(), screen.len());
    for (m, s) in map.iter().zip(&screen) {
        assert_eq!(m.point(), s.point());
        assert!(m.angle.abs() < EPS);
        assert!((s.angle - PI).abs() < EPS);
    }
}

#[test]
fn geo_geometries_are_accepted() {
    let line = geo::LineString::from(vec![(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
    let rect = geo::Rect::new(
        geo::coord! { x: 4.0, y: -1.0 },
        geo::coord! { x: 6.0, y: 6.0 },
    );
    let config = SampleConfig {
        extent: Some(rect.into()),
        ..SampleConfig::default()
    };
    let samples = sample(&Polyline::from(&line), 5.0, &config).unwrap();
    assert_close(
        &xy_angle(&samples),
        &[(5.0, 0.0, FRAC_PI_2), (5.0, 5.0, 0.0)],
    );
}

#[test]
fn polyline_and_config_from_json() {
    let line: Polyline =
        serde_json::from_str(r#"[{"x": 0.0, "y": 0.0}, {"x": 0.0, "y": 9.0}]"#).unwrap();
    let config: SampleConfig = serde_json::from_str(
        r#"{"mid_points": true, "extent": {"min": {"x": -1.0, "y": 0.0}, "max": {"x": 1.0, "y": 5.0}}}"#,
    )
    .unwrap();
    let samples = sample(&line, 3.0, &config).unwrap();
    // Centres at 1.5, 4.5 and 7.5; the last is outside the extent.
    assert_close(&xy_angle(&samples), &[(0.0, 1.5, 0.0), (0.0, 4.5, 0.0)]);

    let json = serde_json::to_string(&samples).unwrap();
    assert!(json.contains("\"angle\""));
}

#[test]
fn errors_are_reported_before_sampling() {
    let single = Polyline::new(vec![Point::new(0.0, 0.0)]);
    assert_eq!(
        sample(&single, 1.0, &SampleConfig::default()),
        Err(SampleError::TooFewVertices { count: 1 })
    );
    assert_eq!(
        sample(&horizontal(), 0.0, &SampleConfig::default()),
        Err(SampleError::InvalidSpacing(0.0))
    );
}
