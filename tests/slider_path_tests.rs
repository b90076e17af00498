//! Integrationstests für die Slider-Pfad-Geometrie über alle Segment-Typen.

use approx::assert_relative_eq;
use glam::Vec2;
use osucad_editor_core::shared::path_approximator::approximate_bezier;
use osucad_editor_core::{PathPoint, SegmentType, SliderPath};

fn paths() -> Vec<(&'static str, SliderPath)> {
    vec![
        (
            "linear",
            SliderPath::new(
                vec![
                    PathPoint::with_segment(Vec2::ZERO, SegmentType::Linear),
                    PathPoint::new(Vec2::new(50.0, 0.0)),
                    PathPoint::new(Vec2::new(50.0, 50.0)),
                ],
                100.0,
            ),
        ),
        (
            "bezier",
            SliderPath::new(
                vec![
                    PathPoint::with_segment(Vec2::ZERO, SegmentType::Bezier),
                    PathPoint::new(Vec2::new(30.0, 90.0)),
                    PathPoint::new(Vec2::new(120.0, -40.0)),
                    PathPoint::new(Vec2::new(160.0, 60.0)),
                ],
                200.0,
            ),
        ),
        (
            "catmull",
            SliderPath::new(
                vec![
                    PathPoint::with_segment(Vec2::ZERO, SegmentType::Catmull),
                    PathPoint::new(Vec2::new(40.0, 40.0)),
                    PathPoint::new(Vec2::new(80.0, 0.0)),
                    PathPoint::new(Vec2::new(120.0, 40.0)),
                ],
                150.0,
            ),
        ),
        (
            "perfect",
            SliderPath::new(
                vec![
                    PathPoint::with_segment(Vec2::ZERO, SegmentType::PerfectCurve),
                    PathPoint::new(Vec2::new(50.0, 50.0)),
                    PathPoint::new(Vec2::new(100.0, 0.0)),
                ],
                120.0,
            ),
        ),
        (
            "gemischt",
            SliderPath::new(
                vec![
                    PathPoint::with_segment(Vec2::ZERO, SegmentType::Linear),
                    PathPoint::with_segment(Vec2::new(40.0, 0.0), SegmentType::PerfectCurve),
                    PathPoint::new(Vec2::new(80.0, 40.0)),
                    PathPoint::with_segment(Vec2::new(120.0, 0.0), SegmentType::Bezier),
                    PathPoint::new(Vec2::new(160.0, -40.0)),
                    PathPoint::new(Vec2::new(200.0, 0.0)),
                ],
                260.0,
            ),
        ),
    ]
}

#[test]
fn test_distanzen_streng_steigend() {
    for (name, path) in paths() {
        let calculated = path.calculated_path();
        assert!(!calculated.is_empty(), "{name}: leerer Pfad");
        assert_eq!(calculated.cumulative_distance()[0], 0.0, "{name}");
        for w in calculated.cumulative_distance().windows(2) {
            assert!(w[1] > w[0], "{name}: {w:?}");
        }
    }
}

#[test]
fn test_endpunkte_stimmen_mit_abfragen_ueberein() {
    for (name, path) in paths() {
        let calculated = path.calculated_path();
        let first = calculated.points()[0];
        let last = *calculated.points().last().expect("Punkte vorhanden");

        assert_eq!(path.position_at_distance(0.0), first, "{name}");
        assert_eq!(
            path.position_at_distance(calculated.total_length()),
            last,
            "{name}"
        );
        assert_eq!(path.position_at_distance(-10.0), first, "{name}");
        assert_eq!(path.position_at_distance(1e6), last, "{name}");
    }
}

#[test]
fn test_bereich_ist_auf_erwartete_laenge_begrenzt() {
    for (name, path) in paths() {
        let range = path.calculated_range();
        let expected = path.expected_distance().min(path.calculated_distance());
        assert_relative_eq!(range.distance(), expected, epsilon = 1e-3);
        assert_eq!(range.end_position(), path.end_position(), "{name}");
        assert_eq!(path.position_at(0.0), range.start_position(), "{name}");
    }
}

#[test]
fn test_kollinearer_kreisbogen_wie_bezier() {
    let points = [Vec2::ZERO, Vec2::new(20.0, 20.0), Vec2::new(40.0, 40.0)];
    let path = SliderPath::new(
        vec![
            PathPoint::with_segment(points[0], SegmentType::PerfectCurve),
            PathPoint::new(points[1]),
            PathPoint::new(points[2]),
        ],
        60.0,
    );

    let mut bezier = approximate_bezier(&points);
    bezier.dedup();
    assert_eq!(path.calculated_path().points(), bezier.as_slice());
}

#[test]
fn test_einfacher_slider_szenario() {
    let path = SliderPath::new(
        vec![
            PathPoint::with_segment(Vec2::ZERO, SegmentType::Bezier),
            PathPoint::new(Vec2::new(100.0, 0.0)),
        ],
        100.0,
    );
    assert_eq!(
        path.calculated_path().points(),
        &[Vec2::ZERO, Vec2::new(100.0, 0.0)]
    );
    assert_eq!(path.position_at(0.5), Vec2::new(50.0, 0.0));
}
