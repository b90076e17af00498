//! Use-Cases: Slider-Pfade bearbeiten (setzen, Punkt einfügen, umkehren, zu Bézier).
//!
//! Alle Änderungen laufen als `UpdateHitObject` über den `CommandManager` und
//! sind damit rückgängig machbar und innerhalb einer offenen Transaktion mergebar.

use crate::app::commands::{HitObjectPatch, UpdateHitObject};
use crate::app::CommandManager;
use crate::core::{CalculatedPath, HitObjectId, PathPoint, SliderPath};
use crate::shared::path_conversion::{convert_path_to_bezier, reversed_control_points};
use glam::Vec2;

/// Sucht den Slider-Pfad zu `id`; loggt und liefert `None` bei Kreisen/unbekannten IDs.
fn slider_path(manager: &CommandManager, id: HitObjectId) -> Option<&SliderPath> {
    let Some(hit_object) = manager.beatmap().get(id) else {
        log::warn!("Hit-Object {} nicht gefunden", id);
        return None;
    };
    let path = hit_object.path();
    if path.is_none() {
        log::debug!("Hit-Object {} ist kein Slider", id);
    }
    path
}

/// Ersetzt die Kontrollpunkte eines Sliders.
///
/// Die erwartete Länge wird auf die Länge des neuen Pfads gesetzt.
pub fn set_path(
    manager: &mut CommandManager,
    id: HitObjectId,
    control_points: Vec<PathPoint>,
    commit: bool,
) -> bool {
    if slider_path(manager, id).is_none() {
        return false;
    }

    let expected_distance = CalculatedPath::from_control_points(&control_points).total_length();
    manager.submit(
        UpdateHitObject::new(
            id,
            HitObjectPatch::default()
                .with_path(control_points)
                .with_expected_distance(expected_distance),
        ),
        commit,
    );
    true
}

/// Fügt einen Kontrollpunkt ohne Segment-Markierung bei `index` ein.
///
/// `position` ist relativ zum Slider-Kopf.
pub fn insert_control_point(
    manager: &mut CommandManager,
    id: HitObjectId,
    index: usize,
    position: Vec2,
    commit: bool,
) -> bool {
    let Some(path) = slider_path(manager, id) else {
        return false;
    };

    let mut control_points = path.control_points().to_vec();
    if index > control_points.len() {
        log::warn!(
            "Kontrollpunkt-Index {} außerhalb des Pfads ({} Punkte)",
            index,
            control_points.len()
        );
        return false;
    }
    control_points.insert(index, PathPoint::new(position));

    set_path(manager, id, control_points, commit)
}

/// Kehrt die Richtung eines Sliders um; der Kopf wandert an das bisherige Ende.
pub fn reverse_slider(manager: &mut CommandManager, id: HitObjectId, commit: bool) -> bool {
    let Some(hit_object) = manager.beatmap().get(id) else {
        log::warn!("Hit-Object {} nicht gefunden", id);
        return false;
    };
    let position = hit_object.position;
    let Some((control_points, head_offset)) = hit_object.path().and_then(reversed_control_points)
    else {
        log::debug!("Hit-Object {} kann nicht umgekehrt werden", id);
        return false;
    };

    manager.submit(
        UpdateHitObject::new(
            id,
            HitObjectPatch::default()
                .with_position(position + head_offset)
                .with_path(control_points),
        ),
        commit,
    );
    log::info!("Slider {} umgekehrt", id);
    true
}

/// Ersetzt alle Kreisbogen-Segmente eines Sliders durch Bézier-Segmente und committed.
pub fn convert_to_bezier(manager: &mut CommandManager, id: HitObjectId) -> bool {
    let Some(path) = slider_path(manager, id) else {
        return false;
    };
    if path.control_points().len() <= 2 {
        return false;
    }

    let converted = convert_path_to_bezier(path.control_points());
    manager.submit(
        UpdateHitObject::new(id, HitObjectPatch::default().with_path(converted)),
        true,
    );
    true
}
