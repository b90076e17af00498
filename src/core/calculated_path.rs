//! Dichte Polyline eines Slider-Pfads mit kumulativer Bogenlängen-Tabelle.

use super::path_point::{split_segments, PathPoint};
use crate::shared::path_approximator::approximate_segment;
use glam::Vec2;

/// Unveränderliche Polyline + Bogenlängen-Tabelle.
///
/// Invarianten: `points` und `cumulative_distance` sind gleich lang,
/// `cumulative_distance[0] == 0`, die Tabelle ist monoton steigend und
/// aufeinanderfolgende Punkte sind nie identisch. Alle Distanzen sind endlich.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatedPath {
    points: Vec<Vec2>,
    cumulative_distance: Vec<f32>,
}

impl CalculatedPath {
    /// Leerer Pfad (weniger als zwei Kontrollpunkte).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Baut den Pfad komplett aus den Kontrollpunkten neu auf.
    ///
    /// Die Polyline beginnt immer im lokalen Ursprung.
    pub fn from_control_points(control_points: &[PathPoint]) -> Self {
        if control_points.len() < 2 {
            return Self::empty();
        }

        let mut points = Vec::with_capacity(100);
        let mut cumulative_distance = Vec::with_capacity(100);
        points.push(Vec2::ZERO);
        cumulative_distance.push(0.0f32);

        let mut segment_points = Vec::new();
        for segment in split_segments(control_points) {
            segment_points.clear();
            segment_points.extend(segment.points.iter().map(|p| p.position));

            for p in approximate_segment(segment.segment_type, &segment_points) {
                let (Some(&last), Some(&last_distance)) =
                    (points.last(), cumulative_distance.last())
                else {
                    continue;
                };
                let distance = last.distance(p);
                if distance == 0.0 || !distance.is_finite() {
                    continue;
                }
                points.push(p);
                cumulative_distance.push(last_distance + distance);
            }
        }

        Self {
            points,
            cumulative_distance,
        }
    }

    /// Alle Punkte der Polyline.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Kumulative Bogenlänge je Punkt.
    pub fn cumulative_distance(&self) -> &[f32] {
        &self.cumulative_distance
    }

    /// Anzahl der Punkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` wenn der Pfad keine Punkte hat.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gesamtlänge, 0 für leere Pfade.
    pub fn total_length(&self) -> f32 {
        self.cumulative_distance.last().copied().unwrap_or(0.0)
    }

    /// Position bei Bogenlänge `distance`, auf `[0, total_length]` geklemmt.
    pub fn position_at_distance(&self, distance: f32) -> Vec2 {
        let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) else {
            return Vec2::ZERO;
        };

        let total = self.total_length();
        if self.points.len() < 2 || distance.is_nan() || total <= 0.0 {
            return first;
        }

        let distance = distance.clamp(0.0, total);
        if distance <= 0.0 {
            return first;
        }
        if distance >= total {
            return last;
        }

        let index = self.index_at_distance(distance);
        let d0 = self.cumulative_distance[index - 1];
        let d1 = self.cumulative_distance[index];
        let p0 = self.points[index - 1];
        let p1 = self.points[index];

        let span = d1 - d0;
        if span <= f32::EPSILON {
            return p0;
        }
        p0.lerp(p1, (distance - d0) / span)
    }

    /// Index des ersten Punkts mit kumulativer Distanz >= `distance` (mindestens 1).
    pub(crate) fn index_at_distance(&self, distance: f32) -> usize {
        self.cumulative_distance
            .partition_point(|&d| d < distance)
            .clamp(1, self.cumulative_distance.len().saturating_sub(1).max(1))
    }
}
