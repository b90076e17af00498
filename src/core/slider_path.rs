//! Slider-Pfad: Kontrollpunkte + erwartete Länge mit lazy berechneter Geometrie.

use super::path_point::{split_segments, PathPoint, PathSegment};
use super::{CalculatedPath, PathRange};
use crate::shared::{Signal, SubscriptionId};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// Besitzt die Kontrollpunkte eines Sliders und cached Pfad + Bereich.
///
/// Neue Kontrollpunkte invalidieren Pfad und Bereich, eine neue erwartete
/// Länge nur den Bereich. Neuberechnung erfolgt erst beim nächsten Lesen.
#[derive(Serialize, Deserialize)]
#[serde(from = "SerializedSliderPath", into = "SerializedSliderPath")]
pub struct SliderPath {
    control_points: Vec<PathPoint>,
    expected_distance: f32,
    calculated_path: OnceCell<Rc<CalculatedPath>>,
    calculated_range: OnceCell<PathRange>,
    invalidated: Signal,
    #[cfg(test)]
    computations: std::cell::Cell<usize>,
}

impl SliderPath {
    /// Erstellt einen Pfad aus Kontrollpunkten und erwarteter Länge.
    pub fn new(control_points: Vec<PathPoint>, expected_distance: f32) -> Self {
        Self {
            control_points,
            expected_distance,
            calculated_path: OnceCell::new(),
            calculated_range: OnceCell::new(),
            invalidated: Signal::new(),
            #[cfg(test)]
            computations: std::cell::Cell::new(0),
        }
    }

    /// Kontrollpunkte (read-only; Änderungen nur über `set_control_points`).
    pub fn control_points(&self) -> &[PathPoint] {
        &self.control_points
    }

    /// Ersetzt alle Kontrollpunkte und invalidiert Pfad und Bereich.
    pub fn set_control_points(&mut self, control_points: Vec<PathPoint>) {
        self.control_points = control_points;
        self.invalidate();
    }

    /// Erwartete Länge (Zielwert aus Timing und Slider-Velocity).
    pub fn expected_distance(&self) -> f32 {
        self.expected_distance
    }

    /// Setzt die erwartete Länge; invalidiert nur den Bereich.
    pub fn set_expected_distance(&mut self, expected_distance: f32) {
        if self.expected_distance == expected_distance {
            return;
        }
        self.expected_distance = expected_distance;

        if self.calculated_range.take().is_some() {
            self.invalidated.emit();
        }
    }

    /// Verwirft Pfad und Bereich und benachrichtigt Abonnenten.
    pub fn invalidate(&mut self) {
        self.calculated_path.take();
        self.calculated_range.take();
        self.invalidated.emit();
    }

    /// Registriert einen Callback für Invalidierungen.
    pub fn subscribe_invalidated(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.invalidated.subscribe(callback)
    }

    /// Meldet einen Invalidierungs-Callback ab.
    pub fn unsubscribe_invalidated(&mut self, id: SubscriptionId) -> bool {
        self.invalidated.unsubscribe(id)
    }

    /// Berechneter Pfad; wird bei Bedarf neu aufgebaut.
    pub fn calculated_path(&self) -> &CalculatedPath {
        self.shared_path()
    }

    /// Berechneter Bereich `[0, expected_distance]`; wird bei Bedarf neu aufgebaut.
    pub fn calculated_range(&self) -> &PathRange {
        self.calculated_range
            .get_or_init(|| PathRange::new(self.shared_path().clone(), 0.0, self.expected_distance))
    }

    fn shared_path(&self) -> &Rc<CalculatedPath> {
        self.calculated_path.get_or_init(|| {
            #[cfg(test)]
            self.computations.set(self.computations.get() + 1);
            Rc::new(CalculatedPath::from_control_points(&self.control_points))
        })
    }

    /// Abgeleitete Segmente der Kontrollpunkte.
    pub fn segments(&self) -> Vec<PathSegment<'_>> {
        split_segments(&self.control_points)
    }

    /// Tatsächliche Länge des berechneten Pfads.
    pub fn calculated_distance(&self) -> f32 {
        self.calculated_path().total_length()
    }

    /// Position beim Fortschritt `progress` ∈ [0, 1] bezogen auf die erwartete Länge.
    pub fn position_at(&self, progress: f32) -> Vec2 {
        self.position_at_distance(progress * self.expected_distance)
    }

    /// Position bei Bogenlänge `distance`, nicht auf die erwartete Länge begrenzt.
    pub fn position_at_distance(&self, distance: f32) -> Vec2 {
        self.calculated_path().position_at_distance(distance)
    }

    /// Neuer, vom Cache unabhängiger Bereich.
    pub fn range(&self, start: f32, end: f32) -> PathRange {
        PathRange::new(self.shared_path().clone(), start, end)
    }

    /// Endposition des berechneten Bereichs, Ursprung bei leerem Pfad.
    pub fn end_position(&self) -> Vec2 {
        self.calculated_range().end_position()
    }

    #[cfg(test)]
    pub(crate) fn computation_count(&self) -> usize {
        self.computations.get()
    }
}

impl Default for SliderPath {
    fn default() -> Self {
        Self::new(Vec::new(), 0.0)
    }
}

/// Klont Kontrollpunkte und Caches, aber keine Abonnenten.
impl Clone for SliderPath {
    fn clone(&self) -> Self {
        Self {
            control_points: self.control_points.clone(),
            expected_distance: self.expected_distance,
            calculated_path: self.calculated_path.clone(),
            calculated_range: self.calculated_range.clone(),
            invalidated: Signal::new(),
            #[cfg(test)]
            computations: std::cell::Cell::new(0),
        }
    }
}

impl PartialEq for SliderPath {
    fn eq(&self, other: &Self) -> bool {
        self.control_points == other.control_points
            && self.expected_distance == other.expected_distance
    }
}

impl fmt::Debug for SliderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderPath")
            .field("control_points", &self.control_points)
            .field("expected_distance", &self.expected_distance)
            .field("path_valid", &self.calculated_path.get().is_some())
            .field("range_valid", &self.calculated_range.get().is_some())
            .finish()
    }
}

/// JSON-Form: `{ controlPoints: [...], expectedDistance: n }`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedSliderPath {
    control_points: Vec<PathPoint>,
    expected_distance: f32,
}

impl From<SerializedSliderPath> for SliderPath {
    fn from(value: SerializedSliderPath) -> Self {
        Self::new(value.control_points, value.expected_distance)
    }
}

impl From<SliderPath> for SerializedSliderPath {
    fn from(value: SliderPath) -> Self {
        Self {
            control_points: value.control_points,
            expected_distance: value.expected_distance,
        }
    }
}

#[cfg(test)]
mod tests;
