//! Einfügen eines Hit-Objects.

use super::{Command, CommandContext, CommandHandler, CommandOrigin, DeleteHitObject};
use crate::core::HitObject;
use serde::{Deserialize, Serialize};

/// Fügt ein vollständiges Hit-Object ein.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHitObject {
    pub hit_object: HitObject,
    /// Position in der Beatmap-Reihenfolge, sonst am Ende
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl CreateHitObject {
    /// Hängt das Hit-Object an das Ende an.
    pub fn new(hit_object: HitObject) -> Self {
        Self {
            hit_object,
            index: None,
        }
    }

    /// Fügt das Hit-Object an Position `index` ein.
    pub fn at_index(hit_object: HitObject, index: usize) -> Self {
        Self {
            hit_object,
            index: Some(index),
        }
    }
}

/// Handler für [`CreateHitObject`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateHitObjectHandler;

impl CommandHandler for CreateHitObjectHandler {
    type Command = CreateHitObject;

    fn apply(&self, ctx: &mut CommandContext, command: &CreateHitObject, origin: CommandOrigin) {
        let id = command.hit_object.id;
        let hit_object = command.hit_object.clone();
        let replaced = match command.index {
            Some(index) => ctx.beatmap_mut().insert_at(index, hit_object),
            None => ctx.beatmap_mut().insert(hit_object),
        };
        if replaced.is_some() {
            log::warn!("Hit-Object {} existierte bereits und wurde ersetzt ({:?})", id, origin);
        }
    }

    fn create_undo_command(&self, ctx: &CommandContext, command: &CreateHitObject) -> Option<Command> {
        // Vorhandene ID: Command wird ignoriert, Undo darf nichts löschen
        if ctx.beatmap().contains(command.hit_object.id) {
            return None;
        }
        Some(
            DeleteHitObject {
                id: command.hit_object.id,
            }
            .into(),
        )
    }

    fn can_be_ignored(&self, ctx: &CommandContext, command: &CreateHitObject) -> bool {
        ctx.beatmap().contains(command.hit_object.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Beatmap;
    use glam::Vec2;

    #[test]
    fn create_inserts_and_undo_deletes() {
        let mut ctx = CommandContext::new(Beatmap::new());
        let command = CreateHitObject::new(HitObject::circle(5, 300.0, Vec2::new(64.0, 48.0)));

        assert!(!CreateHitObjectHandler.can_be_ignored(&ctx, &command));
        let undo = CreateHitObjectHandler
            .create_undo_command(&ctx, &command)
            .expect("Undo vorhanden");
        assert_eq!(undo, Command::from(DeleteHitObject { id: 5 }));

        CreateHitObjectHandler.apply(&mut ctx, &command, CommandOrigin::Local);
        assert!(ctx.beatmap().contains(5));
        assert!(CreateHitObjectHandler.can_be_ignored(&ctx, &command));
    }

    #[test]
    fn create_with_existing_id_is_ignored() {
        let mut beatmap = Beatmap::new();
        beatmap.insert(HitObject::circle(1, 0.0, Vec2::new(10.0, 10.0)));
        let ctx = CommandContext::new(beatmap);

        let other = CreateHitObject::new(HitObject::circle(1, 500.0, Vec2::new(99.0, 99.0)));
        assert!(CreateHitObjectHandler.can_be_ignored(&ctx, &other));
        assert!(CreateHitObjectHandler
            .create_undo_command(&ctx, &other)
            .is_none());
    }

    #[test]
    fn create_at_index_keeps_order() {
        let mut beatmap = Beatmap::new();
        beatmap.insert(HitObject::circle(1, 0.0, Vec2::ZERO));
        beatmap.insert(HitObject::circle(3, 0.0, Vec2::ZERO));
        let mut ctx = CommandContext::new(beatmap);

        let command = CreateHitObject::at_index(HitObject::circle(2, 0.0, Vec2::ZERO), 1);
        CreateHitObjectHandler.apply(&mut ctx, &command, CommandOrigin::Local);

        let ids: Vec<_> = ctx.beatmap().iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn index_is_omitted_in_json_when_unset() {
        let json = serde_json::to_value(CreateHitObject::new(HitObject::circle(1, 0.0, Vec2::ZERO)))
            .expect("serialisierbar");
        assert!(json.get("index").is_none());

        let json = serde_json::to_value(CreateHitObject::at_index(
            HitObject::circle(1, 0.0, Vec2::ZERO),
            4,
        ))
        .expect("serialisierbar");
        assert_eq!(json["index"], 4);
    }
}
