use super::*;
use crate::core::SegmentType;
use crate::shared::path_approximator::approximate_bezier;
use approx::assert_relative_eq;
use std::cell::Cell;

fn straight_slider() -> SliderPath {
    SliderPath::new(
        vec![
            PathPoint::with_segment(Vec2::ZERO, SegmentType::Bezier),
            PathPoint::new(Vec2::new(100.0, 0.0)),
        ],
        100.0,
    )
}

fn curved_slider() -> SliderPath {
    SliderPath::new(
        vec![
            PathPoint::with_segment(Vec2::ZERO, SegmentType::Bezier),
            PathPoint::new(Vec2::new(40.0, 80.0)),
            PathPoint::new(Vec2::new(120.0, 40.0)),
            PathPoint::with_segment(Vec2::new(160.0, 0.0), SegmentType::PerfectCurve),
            PathPoint::new(Vec2::new(200.0, 40.0)),
            PathPoint::new(Vec2::new(240.0, 0.0)),
        ],
        250.0,
    )
}

#[test]
fn test_straight_bezier_scenario() {
    let path = straight_slider();
    assert_eq!(
        path.calculated_path().points(),
        &[Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]
    );
    assert_eq!(path.position_at(0.5), Vec2::new(50.0, 0.0));
    assert_relative_eq!(path.calculated_distance(), 100.0);
    assert_eq!(path.end_position(), Vec2::new(100.0, 0.0));
}

#[test]
fn test_path_is_computed_lazily_and_once() {
    let mut path = straight_slider();
    assert_eq!(path.computation_count(), 0);

    path.set_control_points(vec![
        PathPoint::with_segment(Vec2::ZERO, SegmentType::Linear),
        PathPoint::new(Vec2::new(0.0, 50.0)),
    ]);
    assert_eq!(path.computation_count(), 0);

    let _ = path.calculated_path();
    let _ = path.calculated_path();
    let _ = path.calculated_range();
    assert_eq!(path.computation_count(), 1);

    path.set_control_points(path.control_points().to_vec());
    assert_eq!(path.computation_count(), 1);
    let _ = path.calculated_path();
    assert_eq!(path.computation_count(), 2);
}

#[test]
fn test_expected_distance_only_invalidates_range() {
    let mut path = straight_slider();
    assert_eq!(path.end_position(), Vec2::new(100.0, 0.0));
    assert_eq!(path.computation_count(), 1);

    path.set_expected_distance(40.0);
    assert_eq!(path.end_position(), Vec2::new(40.0, 0.0));
    assert_eq!(path.computation_count(), 1);
}

#[test]
fn test_invalidated_signal_fires() {
    let fired = Rc::new(Cell::new(0));
    let mut path = straight_slider();
    let counter = fired.clone();
    let id = path.subscribe_invalidated(move || counter.set(counter.get() + 1));

    path.set_control_points(path.control_points().to_vec());
    assert_eq!(fired.get(), 1);

    // Bereich noch nicht berechnet: keine Benachrichtigung
    path.set_expected_distance(50.0);
    assert_eq!(fired.get(), 1);

    let _ = path.calculated_range();
    path.set_expected_distance(60.0);
    assert_eq!(fired.get(), 2);

    // Gleicher Wert: nichts passiert
    path.set_expected_distance(60.0);
    assert_eq!(fired.get(), 2);

    assert!(path.unsubscribe_invalidated(id));
    path.invalidate();
    assert_eq!(fired.get(), 2);
}

#[test]
fn test_empty_and_single_point_paths() {
    let empty = SliderPath::default();
    assert!(empty.calculated_path().is_empty());
    assert_eq!(empty.calculated_distance(), 0.0);
    assert_eq!(empty.end_position(), Vec2::ZERO);

    let single = SliderPath::new(
        vec![PathPoint::with_segment(Vec2::new(10.0, 10.0), SegmentType::Bezier)],
        100.0,
    );
    assert!(single.calculated_path().is_empty());
    assert_eq!(single.end_position(), Vec2::ZERO);
    assert_eq!(single.position_at(0.5), Vec2::ZERO);
}

#[test]
fn test_cumulative_distance_is_monotonic() {
    let path = curved_slider();
    let calculated = path.calculated_path();
    assert_eq!(calculated.points().len(), calculated.cumulative_distance().len());
    assert_eq!(calculated.cumulative_distance()[0], 0.0);

    for (w, d) in calculated
        .points()
        .windows(2)
        .zip(calculated.cumulative_distance().windows(2))
    {
        assert!(w[0] != w[1], "doppelter Punkt {:?}", w[0]);
        assert!(d[1] > d[0], "Distanz nicht streng steigend: {d:?}");
    }
}

#[test]
fn test_endpoints_match_position_queries() {
    let path = curved_slider();
    let calculated = path.calculated_path();
    let total = calculated.total_length();

    assert_eq!(path.position_at_distance(0.0), calculated.points()[0]);
    assert_eq!(
        path.position_at_distance(total),
        *calculated.points().last().unwrap()
    );
    assert!(path.position_at_distance(total).distance(Vec2::new(240.0, 0.0)) < 1e-3);
}

#[test]
fn test_position_at_distance_is_not_clipped_to_expected_distance() {
    let mut path = straight_slider();
    path.set_expected_distance(50.0);
    assert_eq!(path.position_at_distance(80.0), Vec2::new(80.0, 0.0));
    assert_eq!(path.end_position(), Vec2::new(50.0, 0.0));
}

#[test]
fn test_range_is_independent_of_cached_range() {
    let path = straight_slider();
    let range = path.range(20.0, 30.0);
    assert_eq!(range.end_position(), Vec2::new(30.0, 0.0));
    assert_eq!(path.calculated_range().end(), 100.0);
}

#[test]
fn test_collinear_perfect_curve_matches_bezier() {
    let points = [Vec2::ZERO, Vec2::new(50.0, 0.0), Vec2::new(100.0, 0.0)];
    let path = SliderPath::new(
        vec![
            PathPoint::with_segment(points[0], SegmentType::PerfectCurve),
            PathPoint::new(points[1]),
            PathPoint::new(points[2]),
        ],
        100.0,
    );
    let bezier = SliderPath::new(
        vec![
            PathPoint::with_segment(points[0], SegmentType::Bezier),
            PathPoint::new(points[1]),
            PathPoint::new(points[2]),
        ],
        100.0,
    );
    assert_eq!(path.calculated_path(), bezier.calculated_path());

    let mut expected = approximate_bezier(&points);
    expected.dedup();
    assert_eq!(path.calculated_path().points(), expected.as_slice());
}

#[test]
fn test_segments_are_derived_from_type_markers() {
    let path = curved_slider();
    let segments = path.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].segment_type, SegmentType::Bezier);
    assert_eq!(segments[1].segment_type, SegmentType::PerfectCurve);
    assert_eq!(segments[1].points.len(), 3);
}

#[test]
fn test_clone_keeps_geometry_but_not_subscribers() {
    let fired = Rc::new(Cell::new(0));
    let mut original = curved_slider();
    let counter = fired.clone();
    original.subscribe_invalidated(move || counter.set(counter.get() + 1));

    let mut copy = original.clone();
    assert_eq!(copy, original);
    copy.invalidate();
    assert_eq!(fired.get(), 0);
}

#[test]
fn test_serialized_form() {
    let path = straight_slider();
    let json = serde_json::to_value(&path).expect("serialisierbar");
    assert_eq!(
        json,
        serde_json::json!({
            "controlPoints": [
                { "x": 0.0, "y": 0.0, "type": "bezier" },
                { "x": 100.0, "y": 0.0, "type": null }
            ],
            "expectedDistance": 100.0
        })
    );

    let parsed: SliderPath = serde_json::from_value(json).expect("parsebar");
    assert_eq!(parsed, path);
    assert_eq!(parsed.position_at(1.0), Vec2::new(100.0, 0.0));
}

#[test]
fn test_non_finite_control_point_is_rejected_on_load() {
    let json = r#"{"controlPoints":[{"x":0,"y":0,"type":"bezier"},{"x":1e39,"y":5,"type":null},{"x":3,"y":0,"type":null}],"expectedDistance":10}"#;
    assert!(serde_json::from_str::<SliderPath>(json).is_err());
}

#[test]
fn test_huge_control_point_still_computes_path() {
    let json = r#"{"controlPoints":[{"x":0,"y":0,"type":"bezier"},{"x":1e12,"y":5,"type":null},{"x":3,"y":0,"type":null}],"expectedDistance":10}"#;
    let path: SliderPath = serde_json::from_str(json).expect("parsebar");

    let calculated = path.calculated_path();
    assert!(calculated.len() >= 2);
    assert!(calculated.points().iter().all(|p| p.is_finite()));
    assert!(path.end_position().is_finite());
}

#[test]
fn test_infinite_control_point_in_code_does_not_hang() {
    let path = SliderPath::new(
        vec![
            PathPoint::with_segment(Vec2::ZERO, SegmentType::Bezier),
            PathPoint::new(Vec2::new(f32::INFINITY, 5.0)),
            PathPoint::new(Vec2::new(3.0, 0.0)),
        ],
        10.0,
    );
    assert!(path.calculated_distance().is_finite());
    assert!(path.position_at(f32::NAN).is_finite());
}
