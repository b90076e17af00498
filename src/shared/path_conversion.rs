//! Umformungen von Kontrollpunkt-Listen: Umkehren und Kreisbogen → Bézier.

use super::path_approximator::circular_arc_properties;
use crate::core::{PathPoint, SegmentType, SliderPath};
use glam::{DVec2, Vec2};
use std::collections::VecDeque;
use std::f64::consts::TAU;

/// Kehrt die Kontrollpunkte eines Pfads um.
///
/// Der letzte Kontrollpunkt wird vorher auf die berechnete Endposition gesetzt.
/// Liefert die neuen Kontrollpunkte (relativ zum neuen Kopf) und den Versatz,
/// um den der Slider-Kopf verschoben werden muss. `None` bei leerem Pfad oder
/// inkonsistenten Segment-Markierungen.
pub fn reversed_control_points(path: &SliderPath) -> Option<(Vec<PathPoint>, Vec2)> {
    let mut control_points = path.control_points().to_vec();
    let last = control_points.last_mut()?;
    *last = last.with_position(path.end_position());
    let last_position = last.position;

    let mut segment_types: VecDeque<SegmentType> = control_points
        .iter()
        .filter_map(|p| p.segment_type)
        .collect();

    let count = control_points.len();
    let mut reversed = Vec::with_capacity(count);
    for (i, point) in control_points.iter().enumerate() {
        let segment_type = if i == count - 1 || (point.segment_type.is_some() && i != 0) {
            match segment_types.pop_front() {
                Some(t) => Some(t),
                None => {
                    log::warn!("Pfad ohne passende Segment-Typen, Umkehren abgebrochen");
                    return None;
                }
            }
        } else {
            None
        };
        reversed.push(PathPoint {
            position: point.position - last_position,
            segment_type,
        });
    }
    reversed.reverse();

    // Kreisbogen: Mittelpunkt neu auf die Bogenmitte legen
    if reversed.len() == 3 && reversed[0].segment_type == Some(SegmentType::PerfectCurve) {
        let positions: Vec<Vec2> = reversed.iter().map(|p| p.position).collect();
        if let Some(arc) = circular_arc_properties(&positions) {
            reversed[1] = reversed[1].with_position(arc.point_at(0.5));
        }
    }

    Some((reversed, last_position))
}

/// Ersetzt alle Kreisbogen-Segmente durch Bézier-Segmente.
///
/// Andere Segmente werden unverändert übernommen. Pfade mit höchstens zwei
/// Kontrollpunkten bleiben unverändert.
pub fn convert_path_to_bezier(control_points: &[PathPoint]) -> Vec<PathPoint> {
    if control_points.len() <= 2 {
        return control_points.to_vec();
    }

    let mut converted = Vec::with_capacity(control_points.len());
    let mut segment_type = control_points[0].segment_type;
    let mut segment_start = 0;

    for (i, point) in control_points.iter().enumerate().skip(1) {
        let is_last = i == control_points.len() - 1;
        if point.segment_type.is_none() && !is_last {
            continue;
        }

        let segment = &control_points[segment_start..=i];
        let mut new_segment = if segment_type == Some(SegmentType::PerfectCurve) {
            let positions: Vec<Vec2> = segment.iter().map(|p| p.position).collect();
            circular_arc_to_bezier(&positions)
        } else {
            segment.to_vec()
        };

        // Endpunkt gehört zum nächsten Segment
        if !is_last {
            new_segment.pop();
        }
        converted.extend(new_segment);

        segment_start = i;
        segment_type = point.segment_type;
    }

    converted
}

/// Bézier-Vorlage für einen Einheitskreisbogen bis `max_angle`.
struct CircleBezierPreset {
    max_angle: f64,
    points: &'static [DVec2],
}

const CIRCLE_PRESETS: [CircleBezierPreset; 5] = [
    CircleBezierPreset {
        max_angle: 0.4993379862754501,
        points: &[
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 0.2549893626632736),
            DVec2::new(0.8778997558480327, 0.47884446188920726),
        ],
    },
    CircleBezierPreset {
        max_angle: 1.7579419829169447,
        points: &[
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 0.6263026),
            DVec2::new(0.42931178, 1.0990661),
            DVec2::new(-0.18605515, 0.9825393),
        ],
    },
    CircleBezierPreset {
        max_angle: 3.1385246920140215,
        points: &[
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 0.87084764),
            DVec2::new(0.002304826, 1.5033062),
            DVec2::new(-0.9973236, 0.8739115),
            DVec2::new(-0.9999953, 0.0030679568),
        ],
    },
    CircleBezierPreset {
        max_angle: 5.69720464620727,
        points: &[
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.4137783),
            DVec2::new(-1.4305235, 2.0779421),
            DVec2::new(-2.3410065, -0.94017583),
            DVec2::new(0.05132711, -1.7309346),
            DVec2::new(0.8331702, -0.5530167),
        ],
    },
    CircleBezierPreset {
        max_angle: TAU,
        points: &[
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.2447058),
            DVec2::new(-0.8526471, 2.118367),
            DVec2::new(-2.6211002, 7.854936e-06),
            DVec2::new(-0.8526448, -2.118357),
            DVec2::new(1.0, -1.2447058),
            DVec2::new(1.0, -2.4492937e-16),
        ],
    },
];

const MAX_SUBDIVISION_ITERATIONS: usize = 64;

/// Approximiert einen Kreisbogen durch drei Punkte als einzelnes Bézier-Segment.
///
/// Ungültige Bögen (falsche Punktanzahl, kollinear) werden als Bézier durch
/// die gegebenen Punkte übernommen.
pub fn circular_arc_to_bezier(points: &[Vec2]) -> Vec<PathPoint> {
    let as_bezier = |points: Vec<Vec2>| -> Vec<PathPoint> {
        points
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                if i == 0 {
                    PathPoint::with_segment(p, SegmentType::Bezier)
                } else {
                    PathPoint::new(p)
                }
            })
            .collect()
    };

    let Some(arc) = circular_arc_properties(points) else {
        return as_bezier(points.to_vec());
    };
    let theta_range = f64::from(arc.theta_range);

    let preset = CIRCLE_PRESETS
        .iter()
        .find(|p| p.max_angle >= theta_range)
        .unwrap_or(&CIRCLE_PRESETS[CIRCLE_PRESETS.len() - 1]);

    // Vorlage per de Casteljau auf den benötigten Winkel kürzen
    let mut arc_points = preset.points.to_vec();
    let n = arc_points.len() - 1;
    let mut arc_length = preset.max_angle;
    let mut tf = theta_range / arc_length;
    let mut iterations = 0;

    while (tf - 1.0).abs() > 1e-7 && iterations < MAX_SUBDIVISION_ITERATIONS {
        for j in 0..n {
            for i in (j + 1..=n).rev() {
                arc_points[i] = arc_points[i] * tf + arc_points[i - 1] * (1.0 - tf);
            }
        }

        let end = arc_points[n];
        arc_length = end.y.atan2(end.x);
        if arc_length < 0.0 {
            arc_length += TAU;
        }
        tf = theta_range / arc_length;
        iterations += 1;
    }

    let centre = arc.centre.as_dvec2();
    let radius = f64::from(arc.radius);
    let direction = f64::from(arc.direction);
    let rotation = DVec2::from_angle(f64::from(arc.theta_start));

    as_bezier(
        arc_points
            .into_iter()
            .map(|p| {
                let scaled = DVec2::new(p.x * radius, p.y * radius * direction);
                (centre + rotation.rotate(scaled)).as_vec2()
            })
            .collect(),
    )
}
