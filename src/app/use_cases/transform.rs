//! Use-Cases: Hit-Objects spiegeln und rotieren.

use crate::app::commands::{HitObjectPatch, UpdateHitObject};
use crate::app::CommandManager;
use crate::core::{Beatmap, HitObjectId};
use crate::shared::options::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use glam::{Affine2, Vec2};

/// Spiegelachse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAxis {
    /// Horizontal spiegeln (x wird negiert)
    X,
    /// Vertikal spiegeln (y wird negiert)
    Y,
}

/// Achsparallele Hülle aus Positionen und Slider-Enden.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Hülle der angegebenen Hit-Objects; `None` wenn keines existiert.
pub fn selection_bounds(beatmap: &Beatmap, ids: &[HitObjectId]) -> Option<Bounds> {
    ids.iter()
        .filter_map(|id| beatmap.get(*id))
        .flat_map(|h| [h.position, h.end_position()])
        .fold(None, |bounds: Option<Bounds>, p| {
            Some(match bounds {
                Some(b) => Bounds {
                    min: b.min.min(p),
                    max: b.max.max(p),
                },
                None => Bounds { min: p, max: p },
            })
        })
}

/// Spiegelt Hit-Objects an `axis`, um die Spielfeldmitte oder um die Mitte der Auswahl.
pub fn mirror_hit_objects(
    manager: &mut CommandManager,
    ids: &[HitObjectId],
    axis: MirrorAxis,
    around_center: bool,
    commit: bool,
) {
    let center = if around_center {
        match selection_bounds(manager.beatmap(), ids) {
            Some(bounds) => bounds.center(),
            None => return,
        }
    } else {
        Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0)
    };

    let scale = match axis {
        MirrorAxis::X => Vec2::new(-1.0, 1.0),
        MirrorAxis::Y => Vec2::new(1.0, -1.0),
    };
    let transform = Affine2::from_translation(center)
        * Affine2::from_scale(scale)
        * Affine2::from_translation(-center);

    transform_hit_objects(manager, ids, transform, commit);
}

/// Rotiert Hit-Objects um `center` (Winkel in Radiant).
pub fn rotate_hit_objects(
    manager: &mut CommandManager,
    ids: &[HitObjectId],
    center: Vec2,
    angle: f32,
    commit: bool,
) {
    let transform = Affine2::from_translation(center)
        * Affine2::from_angle(angle)
        * Affine2::from_translation(-center);

    transform_hit_objects(manager, ids, transform, commit);
}

/// Wendet eine affine Transformation an.
///
/// Positionen werden vollständig transformiert, Slider-Kontrollpunkte (relativ
/// zum Kopf) nur mit dem linearen Anteil.
pub fn transform_hit_objects(
    manager: &mut CommandManager,
    ids: &[HitObjectId],
    transform: Affine2,
    commit: bool,
) {
    if ids.is_empty() {
        return;
    }

    for &id in ids {
        let Some(hit_object) = manager.beatmap().get(id) else {
            log::warn!("Hit-Object {} nicht gefunden, Transformation übersprungen", id);
            continue;
        };

        let mut patch =
            HitObjectPatch::default().with_position(transform.transform_point2(hit_object.position));
        if let Some(path) = hit_object.path() {
            patch = patch.with_path(
                path.control_points()
                    .iter()
                    .map(|p| p.with_position(transform.transform_vector2(p.position)))
                    .collect(),
            );
        }

        manager.submit(UpdateHitObject::new(id, patch), false);
    }

    if commit {
        manager.commit();
    }
}
