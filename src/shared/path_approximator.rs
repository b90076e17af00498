//! Reine Geometrie-Funktionen zur Approximation von Pfad-Segmenten als Polyline.
//!
//! Layer-neutral: wird von `core::slider_path` und den Pfad-Konvertierungen
//! genutzt. Keine Funktion hier panikt; entartete Eingaben fallen auf die
//! Bézier-Approximation zurück.

use super::options::{BEZIER_TOLERANCE, CATMULL_DETAIL, CIRCULAR_ARC_TOLERANCE};
use crate::core::SegmentType;
use glam::Vec2;
use std::f32::consts::TAU;

/// Kreisbögen, die mehr Punkte bräuchten, werden als Bézier approximiert.
const MAX_ARC_POINTS: usize = 1000;

/// Obergrenze für Bézier-Unterteilungen, danach gilt das Kontrollpolygon.
const MAX_BEZIER_SUBDIVISIONS: usize = 1 << 16;

/// Approximiert ein Segment je nach Typ.
///
/// `PerfectCurve` mit ungleich drei Punkten fällt auf Bézier zurück.
pub fn approximate_segment(segment_type: SegmentType, points: &[Vec2]) -> Vec<Vec2> {
    match segment_type {
        SegmentType::Linear => approximate_linear(points),
        SegmentType::Catmull => approximate_catmull(points),
        SegmentType::PerfectCurve if points.len() == 3 => approximate_circular_arc(points),
        SegmentType::PerfectCurve | SegmentType::Bezier => approximate_bezier(points),
    }
}

/// Lineare Segmente sind bereits die Polyline.
pub fn approximate_linear(points: &[Vec2]) -> Vec<Vec2> {
    points.to_vec()
}

// ── Bézier ──────────────────────────────────────────────────────────

/// Approximiert eine Bézier-Kurve beliebigen Grades durch adaptive Unterteilung.
///
/// Kontrollpolygone werden so lange halbiert, bis jedes flach genug ist
/// (`BEZIER_TOLERANCE`). Arbeitet mit einem expliziten Stack statt Rekursion.
/// Nicht-endliche Punkte oder zu viele Unterteilungen liefern das Kontrollpolygon.
pub fn approximate_bezier(points: &[Vec2]) -> Vec<Vec2> {
    let count = points.len();
    let mut output = Vec::new();
    if count == 0 {
        return output;
    }
    if points.iter().any(|p| !p.is_finite()) {
        log::debug!("Bézier mit nicht-endlichen Punkten, nutze Kontrollpolygon");
        return points.to_vec();
    }

    let mut to_flatten: Vec<Vec<Vec2>> = vec![points.to_vec()];
    let mut left = vec![Vec2::ZERO; count * 2 - 1];
    let mut right = vec![Vec2::ZERO; count];
    let mut scratch = vec![Vec2::ZERO; count];
    let mut subdivisions = 0;

    while let Some(mut parent) = to_flatten.pop() {
        if bezier_is_flat_enough(&parent) {
            bezier_approximate(&parent, &mut output, &mut left, &mut right, &mut scratch);
            continue;
        }

        subdivisions += 1;
        if subdivisions > MAX_BEZIER_SUBDIVISIONS {
            log::debug!(
                "Bézier nach {} Unterteilungen abgebrochen, nutze Kontrollpolygon",
                MAX_BEZIER_SUBDIVISIONS
            );
            return points.to_vec();
        }

        let mut right_child = vec![Vec2::ZERO; count];
        bezier_subdivide(&parent, &mut left, &mut right_child, &mut scratch);
        parent.copy_from_slice(&left[..count]);

        // Linke Hälfte zuerst abarbeiten
        to_flatten.push(right_child);
        to_flatten.push(parent);
    }

    output.push(points[count - 1]);
    output
}

/// Prüft die diskrete zweite Ableitung des Kontrollpolygons gegen die Toleranz.
fn bezier_is_flat_enough(points: &[Vec2]) -> bool {
    let limit = BEZIER_TOLERANCE * BEZIER_TOLERANCE * 4.0;
    points
        .windows(3)
        .all(|w| (w[0] - 2.0 * w[1] + w[2]).length_squared() <= limit)
}

/// De-Casteljau-Teilung bei t = 0.5 in linkes und rechtes Kontrollpolygon.
fn bezier_subdivide(points: &[Vec2], left: &mut [Vec2], right: &mut [Vec2], midpoints: &mut [Vec2]) {
    let count = points.len();
    midpoints[..count].copy_from_slice(points);

    for i in 0..count {
        left[i] = midpoints[0];
        right[count - i - 1] = midpoints[count - i - 1];

        for j in 0..count - i - 1 {
            midpoints[j] = (midpoints[j] + midpoints[j + 1]) * 0.5;
        }
    }
}

/// Gibt die Punkte eines flachen Kontrollpolygons aus (ohne den Endpunkt).
fn bezier_approximate(
    points: &[Vec2],
    output: &mut Vec<Vec2>,
    left: &mut [Vec2],
    right: &mut [Vec2],
    scratch: &mut [Vec2],
) {
    let count = points.len();
    bezier_subdivide(points, left, right, scratch);

    for i in 0..count - 1 {
        left[count + i] = right[i + 1];
    }

    output.push(points[0]);
    for i in 1..count - 1 {
        let index = 2 * i;
        output.push(0.25 * (left[index - 1] + 2.0 * left[index] + left[index + 1]));
    }
}

// ── Catmull-Rom ─────────────────────────────────────────────────────

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (t ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2.
pub fn catmull_rom_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Catmull-Rom-Spline durch alle `points`, `CATMULL_DETAIL` Abtastungen je Spanne.
///
/// An den Rändern werden Phantom-Punkte gespiegelt, damit die Kurve
/// durch den ersten und letzten Punkt läuft.
pub fn approximate_catmull(points: &[Vec2]) -> Vec<Vec2> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }

    let mut result = Vec::with_capacity((n - 1) * (CATMULL_DETAIL + 1));

    for i in 0..n - 1 {
        let v1 = if i > 0 { points[i - 1] } else { points[i] };
        let v2 = points[i];
        let v3 = points[i + 1];
        let v4 = if i + 2 < n { points[i + 2] } else { 2.0 * v3 - v2 };

        for c in 0..=CATMULL_DETAIL {
            let t = c as f32 / CATMULL_DETAIL as f32;
            result.push(catmull_rom_point(v1, v2, v3, v4, t));
        }
    }

    result
}

// ── Kreisbogen ──────────────────────────────────────────────────────

/// Kenngrößen eines Kreisbogens durch drei Punkte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArcProperties {
    /// Mittelpunkt des Kreises
    pub centre: Vec2,
    /// Radius
    pub radius: f32,
    /// Winkel des ersten Punkts (Radiant)
    pub theta_start: f32,
    /// Überstrichener Winkel, immer positiv (Radiant)
    pub theta_range: f32,
    /// Umlaufsinn: +1 oder -1
    pub direction: f32,
}

impl CircularArcProperties {
    /// Punkt auf dem Bogen beim Anteil `fraction` ∈ [0, 1].
    pub fn point_at(&self, fraction: f32) -> Vec2 {
        let theta = self.theta_start + self.direction * fraction * self.theta_range;
        self.centre + Vec2::new(theta.cos(), theta.sin()) * self.radius
    }
}

/// Bestimmt Mittelpunkt, Radius und Winkelbereich des Kreises durch `a`, `b`, `c`.
///
/// Gibt `None` zurück wenn die Punkte (nahezu) kollinear sind.
pub fn circular_arc_properties(points: &[Vec2]) -> Option<CircularArcProperties> {
    let [a, b, c] = <[Vec2; 3]>::try_from(points).ok()?;

    // Kollinear: kein eindeutiger Kreis
    if ((b.y - a.y) * (c.x - a.x) - (b.x - a.x) * (c.y - a.y)).abs() < 1e-3 {
        return None;
    }

    let d = 2.0 * (a.x * (b - c).y + b.x * (c - a).y + c.x * (a - b).y);
    if d == 0.0 {
        return None;
    }

    let a_sq = a.length_squared();
    let b_sq = b.length_squared();
    let c_sq = c.length_squared();

    let centre = Vec2::new(
        a_sq * (b - c).y + b_sq * (c - a).y + c_sq * (a - b).y,
        a_sq * (c - b).x + b_sq * (a - c).x + c_sq * (b - a).x,
    ) / d;

    let d_a = a - centre;
    let d_c = c - centre;
    let radius = d_a.length();

    let theta_start = d_a.y.atan2(d_a.x);
    let mut theta_end = d_c.y.atan2(d_c.x);
    while theta_end < theta_start {
        theta_end += TAU;
    }

    let mut direction = 1.0;
    let mut theta_range = theta_end - theta_start;

    // Liegt b rechts der Sehne a→c, läuft der Bogen andersherum
    let ortho_a_to_c = Vec2::new((c - a).y, -(c - a).x);
    if ortho_a_to_c.dot(b - a) < 0.0 {
        direction = -direction;
        theta_range = TAU - theta_range;
    }

    if !centre.is_finite() || !radius.is_finite() {
        return None;
    }

    Some(CircularArcProperties {
        centre,
        radius,
        theta_start,
        theta_range,
        direction,
    })
}

/// Approximiert einen Kreisbogen durch genau drei Punkte.
///
/// Die Punktanzahl wird so gewählt, dass die Sehnenabweichung unter
/// `CIRCULAR_ARC_TOLERANCE` bleibt. Entartete Bögen fallen auf Bézier zurück.
pub fn approximate_circular_arc(points: &[Vec2]) -> Vec<Vec2> {
    let Some(arc) = circular_arc_properties(points) else {
        return approximate_bezier(points);
    };

    let amount_points = if 2.0 * arc.radius <= CIRCULAR_ARC_TOLERANCE {
        2
    } else {
        let step = 2.0 * (1.0 - CIRCULAR_ARC_TOLERANCE / arc.radius).acos();
        ((arc.theta_range / step).ceil() as usize).max(2)
    };

    if amount_points >= MAX_ARC_POINTS {
        log::debug!(
            "Kreisbogen bräuchte {} Punkte, verwende Bézier-Approximation",
            amount_points
        );
        return approximate_bezier(points);
    }

    (0..amount_points)
        .map(|i| arc.point_at(i as f32 / (amount_points - 1) as f32))
        .collect()
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
