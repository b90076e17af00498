//! Teil-Update eines Hit-Objects.

use super::{Command, CommandContext, CommandHandler, CommandOrigin};
use crate::core::{HitObject, HitObjectId, HitObjectKind, PathPoint};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Geänderte Felder eines Hit-Objects; `None` bedeutet unverändert.
///
/// Slider-Felder (`path`, `expected_distance`, `repeats`) werden bei Kreisen ignoriert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitObjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_combo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_distance: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeats: Option<u32>,
}

impl HitObjectPatch {
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_start_time(mut self, start_time: f64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_new_combo(mut self, new_combo: bool) -> Self {
        self.new_combo = Some(new_combo);
        self
    }

    pub fn with_path(mut self, path: Vec<PathPoint>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_expected_distance(mut self, expected_distance: f32) -> Self {
        self.expected_distance = Some(expected_distance);
        self
    }

    pub fn with_repeats(mut self, repeats: u32) -> Self {
        self.repeats = Some(repeats);
        self
    }

    /// `true` wenn kein Feld gesetzt ist.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Überlagert `self` mit `newer`; Felder aus `newer` gewinnen.
    pub fn merged_with(&self, newer: &HitObjectPatch) -> HitObjectPatch {
        HitObjectPatch {
            position: newer.position.or(self.position),
            start_time: newer.start_time.or(self.start_time),
            new_combo: newer.new_combo.or(self.new_combo),
            path: newer.path.clone().or_else(|| self.path.clone()),
            expected_distance: newer.expected_distance.or(self.expected_distance),
            repeats: newer.repeats.or(self.repeats),
        }
    }

    /// Aktuelle Werte des Hit-Objects für alle in `self` gesetzten Felder.
    pub fn capture(&self, hit_object: &HitObject) -> HitObjectPatch {
        let (path, expected_distance, repeats) = match &hit_object.kind {
            HitObjectKind::Slider { path, repeats } => (
                self.path.as_ref().map(|_| path.control_points().to_vec()),
                self.expected_distance.map(|_| path.expected_distance()),
                self.repeats.map(|_| *repeats),
            ),
            HitObjectKind::Circle => (None, None, None),
        };

        HitObjectPatch {
            position: self.position.map(|_| hit_object.position),
            start_time: self.start_time.map(|_| hit_object.start_time),
            new_combo: self.new_combo.map(|_| hit_object.new_combo),
            path,
            expected_distance,
            repeats,
        }
    }

    /// `true` wenn das Anwenden das Hit-Object verändern würde.
    pub fn changes(&self, hit_object: &HitObject) -> bool {
        let current = self.capture(hit_object);
        let relevant = HitObjectPatch {
            path: current.path.as_ref().and(self.path.clone()),
            expected_distance: current.expected_distance.and(self.expected_distance),
            repeats: current.repeats.and(self.repeats),
            ..self.clone()
        };
        current != relevant
    }

    /// Schreibt alle gesetzten Felder in das Hit-Object.
    pub fn apply_to(&self, hit_object: &mut HitObject) {
        if let Some(position) = self.position {
            hit_object.position = position;
        }
        if let Some(start_time) = self.start_time {
            hit_object.start_time = start_time;
        }
        if let Some(new_combo) = self.new_combo {
            hit_object.new_combo = new_combo;
        }

        if let HitObjectKind::Slider { path, repeats } = &mut hit_object.kind {
            if let Some(control_points) = &self.path {
                path.set_control_points(control_points.clone());
            }
            if let Some(expected_distance) = self.expected_distance {
                path.set_expected_distance(expected_distance);
            }
            if let Some(new_repeats) = self.repeats {
                *repeats = new_repeats;
            }
        }
    }
}

/// Ändert einzelne Felder eines Hit-Objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateHitObject {
    pub id: HitObjectId,
    pub patch: HitObjectPatch,
}

impl UpdateHitObject {
    pub fn new(id: HitObjectId, patch: HitObjectPatch) -> Self {
        Self { id, patch }
    }
}

/// Handler für [`UpdateHitObject`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateHitObjectHandler;

impl CommandHandler for UpdateHitObjectHandler {
    type Command = UpdateHitObject;

    fn apply(&self, ctx: &mut CommandContext, command: &UpdateHitObject, _origin: CommandOrigin) {
        match ctx.beatmap_mut().get_mut(command.id) {
            Some(hit_object) => command.patch.apply_to(hit_object),
            None => log::warn!("Update für unbekanntes Hit-Object {}", command.id),
        }
    }

    fn create_undo_command(&self, ctx: &CommandContext, command: &UpdateHitObject) -> Option<Command> {
        let hit_object = ctx.beatmap().get(command.id)?;
        Some(UpdateHitObject::new(command.id, command.patch.capture(hit_object)).into())
    }

    fn merge(
        &self,
        _ctx: &CommandContext,
        older: &UpdateHitObject,
        newer: &UpdateHitObject,
    ) -> Option<UpdateHitObject> {
        if older.id != newer.id {
            return None;
        }
        Some(UpdateHitObject::new(newer.id, older.patch.merged_with(&newer.patch)))
    }

    fn can_be_ignored(&self, ctx: &CommandContext, command: &UpdateHitObject) -> bool {
        match ctx.beatmap().get(command.id) {
            Some(hit_object) => !command.patch.changes(hit_object),
            None => true,
        }
    }
}
