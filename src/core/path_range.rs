//! Ausschnitt `[start, end]` (Bogenlänge) eines berechneten Pfads.

use super::CalculatedPath;
use glam::Vec2;
use std::rc::Rc;

/// Sicht auf einen Bogenlängen-Bereich eines `CalculatedPath`.
///
/// Start und Ende werden beim Erstellen auf die Pfadlänge geklemmt.
#[derive(Debug, Clone)]
pub struct PathRange {
    path: Rc<CalculatedPath>,
    start: f32,
    end: f32,
}

impl PathRange {
    /// Erstellt einen Bereich; `end < start` ergibt einen leeren Bereich bei `start`.
    pub fn new(path: Rc<CalculatedPath>, start: f32, end: f32) -> Self {
        let total = path.total_length();
        let start = start.clamp(0.0, total);
        let end = end.clamp(start, total);
        Self { path, start, end }
    }

    /// Zugrunde liegender Pfad.
    pub fn path(&self) -> &CalculatedPath {
        &self.path
    }

    /// Bogenlänge am Bereichsanfang.
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Bogenlänge am Bereichsende.
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Länge des Bereichs.
    pub fn distance(&self) -> f32 {
        self.end - self.start
    }

    /// Position am Bereichsanfang.
    pub fn start_position(&self) -> Vec2 {
        self.path.position_at_distance(self.start)
    }

    /// Position am Bereichsende; Ursprung bei leerem Pfad.
    pub fn end_position(&self) -> Vec2 {
        self.path.position_at_distance(self.end)
    }

    /// Position bei absoluter Bogenlänge, auf den Bereich geklemmt.
    pub fn position_at_distance(&self, distance: f32) -> Vec2 {
        self.path.position_at_distance(distance.clamp(self.start, self.end))
    }

    /// Position beim Fortschritt `progress` ∈ [0, 1] innerhalb des Bereichs.
    pub fn position_at(&self, progress: f32) -> Vec2 {
        let progress = progress.clamp(0.0, 1.0);
        self.path.position_at_distance(self.start + progress * self.distance())
    }

    /// Extrahiert die Polyline innerhalb des Bereichs inklusive interpolierter Ränder.
    pub fn points(&self) -> Vec<Vec2> {
        if self.path.is_empty() {
            return Vec::new();
        }

        let mut result = vec![self.start_position()];
        let distances = self.path.cumulative_distance();
        let first_inner = distances.partition_point(|&d| d <= self.start);

        for (p, &d) in self.path.points()[first_inner..]
            .iter()
            .zip(&distances[first_inner..])
        {
            if d >= self.end {
                break;
            }
            result.push(*p);
        }

        let end = self.end_position();
        if result.last() != Some(&end) {
            result.push(end);
        }
        result
    }
}
