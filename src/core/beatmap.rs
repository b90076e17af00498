//! Das Beatmap-Dokument, auf dem alle Commands arbeiten.

use super::{HitObject, HitObjectId};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Container für alle Hit-Objects, indexiert nach ID in Einfügereihenfolge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SerializedBeatmap", into = "SerializedBeatmap")]
pub struct Beatmap {
    hit_objects: IndexMap<HitObjectId, HitObject>,
}

impl Beatmap {
    /// Erstellt ein leeres Beatmap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt ein Hit-Object ein oder ersetzt eines mit gleicher ID.
    pub fn insert(&mut self, hit_object: HitObject) -> Option<HitObject> {
        self.hit_objects.insert(hit_object.id, hit_object)
    }

    /// Fügt ein Hit-Object an Position `index` ein (auf die Länge geklemmt).
    ///
    /// Eine vorhandene ID wird an ihrer bisherigen Position ersetzt.
    pub fn insert_at(&mut self, index: usize, hit_object: HitObject) -> Option<HitObject> {
        if self.contains(hit_object.id) {
            return self.insert(hit_object);
        }
        let index = index.min(self.hit_objects.len());
        self.hit_objects.shift_insert(index, hit_object.id, hit_object)
    }

    /// Entfernt ein Hit-Object; die Reihenfolge der übrigen bleibt erhalten.
    pub fn remove(&mut self, id: HitObjectId) -> Option<HitObject> {
        self.hit_objects.shift_remove(&id)
    }

    /// Findet ein Hit-Object.
    pub fn get(&self, id: HitObjectId) -> Option<&HitObject> {
        self.hit_objects.get(&id)
    }

    /// Findet ein Hit-Object zum Ändern.
    pub fn get_mut(&mut self, id: HitObjectId) -> Option<&mut HitObject> {
        self.hit_objects.get_mut(&id)
    }

    /// Position eines Hit-Objects in der Einfügereihenfolge.
    pub fn index_of(&self, id: HitObjectId) -> Option<usize> {
        self.hit_objects.get_index_of(&id)
    }

    /// Prüft ob ein Hit-Object existiert.
    pub fn contains(&self, id: HitObjectId) -> bool {
        self.hit_objects.contains_key(&id)
    }

    /// Iterator über alle Hit-Objects in Einfügereihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &HitObject> {
        self.hit_objects.values()
    }

    /// Alle Hit-Objects nach Startzeit sortiert (stabil bei gleicher Zeit).
    pub fn sorted_by_start_time(&self) -> Vec<&HitObject> {
        let mut sorted: Vec<&HitObject> = self.hit_objects.values().collect();
        sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        sorted
    }

    /// Anzahl der Hit-Objects.
    pub fn len(&self) -> usize {
        self.hit_objects.len()
    }

    /// `true` wenn keine Hit-Objects vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.hit_objects.is_empty()
    }

    /// Berechnet die nächste freie ID.
    pub fn next_id(&self) -> HitObjectId {
        self.hit_objects.keys().max().copied().unwrap_or(0) + 1
    }

    /// Parsed ein Beatmap aus JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Beatmap-JSON ungültig")
    }

    /// Serialisiert das Beatmap als JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Beatmap nicht serialisierbar")
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedBeatmap {
    #[serde(default)]
    hit_objects: Vec<HitObject>,
}

impl From<SerializedBeatmap> for Beatmap {
    fn from(value: SerializedBeatmap) -> Self {
        let mut beatmap = Beatmap::new();
        for hit_object in value.hit_objects {
            if let Some(previous) = beatmap.insert(hit_object) {
                log::warn!("Doppelte Hit-Object-ID {} beim Laden, behalte letzte", previous.id);
            }
        }
        beatmap
    }
}

impl From<Beatmap> for SerializedBeatmap {
    fn from(value: Beatmap) -> Self {
        Self {
            hit_objects: value.hit_objects.into_values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PathPoint, SegmentType, SliderPath};
    use glam::Vec2;

    fn sample() -> Beatmap {
        let mut beatmap = Beatmap::new();
        beatmap.insert(HitObject::circle(1, 2000.0, Vec2::new(10.0, 10.0)));
        beatmap.insert(HitObject::slider(
            2,
            1000.0,
            Vec2::new(100.0, 100.0),
            SliderPath::new(
                vec![
                    PathPoint::with_segment(Vec2::ZERO, SegmentType::PerfectCurve),
                    PathPoint::new(Vec2::new(50.0, 50.0)),
                    PathPoint::new(Vec2::new(100.0, 0.0)),
                ],
                120.0,
            ),
        ));
        beatmap
    }

    #[test]
    fn next_id_is_max_plus_one() {
        assert_eq!(Beatmap::new().next_id(), 1);
        assert_eq!(sample().next_id(), 3);
    }

    #[test]
    fn remove_keeps_order() {
        let mut beatmap = sample();
        beatmap.insert(HitObject::circle(3, 3000.0, Vec2::ZERO));
        beatmap.remove(2);
        let ids: Vec<_> = beatmap.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn insert_at_restores_position() {
        let mut beatmap = sample();
        beatmap.insert(HitObject::circle(3, 3000.0, Vec2::ZERO));
        let removed = beatmap.remove(2).expect("Slider vorhanden");

        beatmap.insert_at(1, removed);
        let ids: Vec<_> = beatmap.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(beatmap.index_of(3), Some(2));

        // Index hinter dem Ende wird geklemmt, vorhandene IDs bleiben an Ort und Stelle
        beatmap.insert_at(99, HitObject::circle(4, 0.0, Vec2::ONE));
        beatmap.insert_at(0, HitObject::circle(3, 500.0, Vec2::ONE));
        let ids: Vec<_> = beatmap.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(beatmap.get(3).map(|h| h.start_time), Some(500.0));
    }

    #[test]
    fn sorted_view_orders_by_start_time() {
        let beatmap = sample();
        let ids: Vec<_> = beatmap.sorted_by_start_time().iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn json_roundtrip_keeps_paths() {
        let beatmap = sample();
        let json = beatmap.to_json().expect("serialisierbar");
        let parsed = Beatmap::from_json(&json).expect("parsebar");
        assert_eq!(parsed, beatmap);
        assert!(json.contains("\"expectedDistance\""));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = Beatmap::from_json("{\"hitObjects\": 5}").unwrap_err();
        assert!(format!("{err:#}").contains("Beatmap-JSON"));
    }
}
