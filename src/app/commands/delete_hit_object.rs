//! Entfernen eines Hit-Objects.

use super::{Command, CommandContext, CommandHandler, CommandOrigin, CreateHitObject};
use crate::core::HitObjectId;
use serde::{Deserialize, Serialize};

/// Entfernt ein Hit-Object anhand seiner ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteHitObject {
    pub id: HitObjectId,
}

/// Handler für [`DeleteHitObject`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteHitObjectHandler;

impl CommandHandler for DeleteHitObjectHandler {
    type Command = DeleteHitObject;

    fn apply(&self, ctx: &mut CommandContext, command: &DeleteHitObject, _origin: CommandOrigin) {
        if ctx.beatmap_mut().remove(command.id).is_none() {
            log::debug!("Hit-Object {} bereits entfernt", command.id);
        }
    }

    fn create_undo_command(&self, ctx: &CommandContext, command: &DeleteHitObject) -> Option<Command> {
        let beatmap = ctx.beatmap();
        let hit_object = beatmap.get(command.id)?.clone();
        let index = beatmap.index_of(command.id)?;
        Some(CreateHitObject::at_index(hit_object, index).into())
    }

    fn can_be_ignored(&self, ctx: &CommandContext, command: &DeleteHitObject) -> bool {
        !ctx.beatmap().contains(command.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::{CommandPayload, CreateHitObjectHandler};
    use crate::core::{Beatmap, HitObject};
    use glam::Vec2;

    #[test]
    fn delete_removes_and_undo_recreates() {
        let mut beatmap = Beatmap::new();
        let circle = HitObject::circle(3, 100.0, Vec2::new(1.0, 2.0));
        beatmap.insert(circle.clone());
        let mut ctx = CommandContext::new(beatmap);
        let command = DeleteHitObject { id: 3 };

        let undo = DeleteHitObjectHandler
            .create_undo_command(&ctx, &command)
            .expect("Undo vorhanden");
        assert_eq!(undo, Command::from(CreateHitObject::at_index(circle, 0)));

        DeleteHitObjectHandler.apply(&mut ctx, &command, CommandOrigin::Local);
        assert!(ctx.beatmap().is_empty());
        assert!(DeleteHitObjectHandler.can_be_ignored(&ctx, &command));
        assert!(DeleteHitObjectHandler
            .create_undo_command(&ctx, &command)
            .is_none());
    }

    #[test]
    fn undo_recreates_at_previous_position() {
        let mut beatmap = Beatmap::new();
        for id in 1..=3 {
            beatmap.insert(HitObject::circle(id, id as f64 * 100.0, Vec2::ZERO));
        }
        let mut ctx = CommandContext::new(beatmap);
        let command = DeleteHitObject { id: 2 };

        let undo = DeleteHitObjectHandler
            .create_undo_command(&ctx, &command)
            .expect("Undo vorhanden");
        DeleteHitObjectHandler.apply(&mut ctx, &command, CommandOrigin::Local);
        let create = match undo.payload {
            CommandPayload::CreateHitObject(create) => create,
            other => panic!("Undo ist kein CreateHitObject: {other:?}"),
        };
        assert_eq!(create.index, Some(1));

        CreateHitObjectHandler.apply(&mut ctx, &create, CommandOrigin::Local);
        let ids: Vec<_> = ctx.beatmap().iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
