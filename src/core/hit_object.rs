//! Hit-Objects eines Beatmaps.

use super::SliderPath;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Eindeutige ID eines Hit-Objects innerhalb eines Beatmaps.
pub type HitObjectId = u64;

/// Art des Hit-Objects inklusive typspezifischer Daten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HitObjectKind {
    /// Einfacher Kreis
    Circle,
    /// Slider mit Pfad und Wiederholungen
    #[serde(rename_all = "camelCase")]
    Slider {
        /// Pfad relativ zum Slider-Kopf
        path: SliderPath,
        /// Anzahl der Wiederholungen (0 = keine)
        repeats: u32,
    },
}

/// Ein Hit-Object im Editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitObject {
    /// Eindeutige ID
    pub id: HitObjectId,
    /// Startzeit in Millisekunden
    pub start_time: f64,
    /// Position auf dem Spielfeld
    pub position: Vec2,
    /// Startet eine neue Combo
    #[serde(default)]
    pub new_combo: bool,
    /// Typspezifische Daten
    #[serde(flatten)]
    pub kind: HitObjectKind,
}

impl HitObject {
    /// Erstellt einen Kreis.
    pub fn circle(id: HitObjectId, start_time: f64, position: Vec2) -> Self {
        Self {
            id,
            start_time,
            position,
            new_combo: false,
            kind: HitObjectKind::Circle,
        }
    }

    /// Erstellt einen Slider ohne Wiederholungen.
    pub fn slider(id: HitObjectId, start_time: f64, position: Vec2, path: SliderPath) -> Self {
        Self {
            id,
            start_time,
            position,
            new_combo: false,
            kind: HitObjectKind::Slider { path, repeats: 0 },
        }
    }

    /// Slider-Pfad, falls es ein Slider ist.
    pub fn path(&self) -> Option<&SliderPath> {
        match &self.kind {
            HitObjectKind::Slider { path, .. } => Some(path),
            HitObjectKind::Circle => None,
        }
    }

    /// `true` für Slider.
    pub fn is_slider(&self) -> bool {
        matches!(self.kind, HitObjectKind::Slider { .. })
    }

    /// Endposition: Slider-Ende bei Slidern, sonst die Position.
    pub fn end_position(&self) -> Vec2 {
        match &self.kind {
            HitObjectKind::Slider { path, .. } => self.position + path.end_position(),
            HitObjectKind::Circle => self.position,
        }
    }
}
