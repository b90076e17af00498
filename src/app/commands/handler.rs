//! Handler-Traits: typisiert für die Implementierung, typ-gelöscht für die Registry.

use super::{Command, CommandContext, CommandKind, CommandOrigin, EditorCommand};

/// Führt Commands eines Typs aus und beschreibt deren Umkehrung.
pub trait CommandHandler {
    /// Behandelter Command-Typ
    type Command: EditorCommand;

    /// Wendet den Command auf den Kontext an.
    fn apply(&self, ctx: &mut CommandContext, command: &Self::Command, origin: CommandOrigin);

    /// Erzeugt das Inverse gegen den aktuellen Zustand (vor `apply`).
    fn create_undo_command(&self, ctx: &CommandContext, command: &Self::Command) -> Option<Command>;

    /// Verschmilzt einen älteren mit einem neueren Command desselben Typs.
    fn merge(
        &self,
        _ctx: &CommandContext,
        _older: &Self::Command,
        _newer: &Self::Command,
    ) -> Option<Self::Command> {
        None
    }

    /// `true` wenn der Command keine Wirkung hätte.
    fn can_be_ignored(&self, _ctx: &CommandContext, _command: &Self::Command) -> bool {
        false
    }
}

/// Objekt-sichere Sicht auf einen `CommandHandler`.
///
/// Passt die Art eines übergebenen Commands nicht, verhalten sich alle
/// Methoden neutral (kein Effekt, kein Inverses, kein Merge).
pub trait ErasedCommandHandler {
    /// Behandelte Command-Art
    fn kind(&self) -> CommandKind;

    /// Siehe [`CommandHandler::apply`].
    fn apply(&self, ctx: &mut CommandContext, command: &Command, origin: CommandOrigin);

    /// Siehe [`CommandHandler::create_undo_command`].
    fn create_undo_command(&self, ctx: &CommandContext, command: &Command) -> Option<Command>;

    /// Siehe [`CommandHandler::merge`]. Das Ergebnis trägt die Version von `newer`.
    fn merge(&self, ctx: &CommandContext, older: &Command, newer: &Command) -> Option<Command>;

    /// Siehe [`CommandHandler::can_be_ignored`].
    fn can_be_ignored(&self, ctx: &CommandContext, command: &Command) -> bool;
}

impl<H: CommandHandler> ErasedCommandHandler for H {
    fn kind(&self) -> CommandKind {
        H::Command::KIND
    }

    fn apply(&self, ctx: &mut CommandContext, command: &Command, origin: CommandOrigin) {
        match H::Command::from_payload(&command.payload) {
            Some(typed) => CommandHandler::apply(self, ctx, typed, origin),
            None => log::error!(
                "Handler für '{}' erhielt Command '{}'",
                H::Command::KIND,
                command.kind()
            ),
        }
    }

    fn create_undo_command(&self, ctx: &CommandContext, command: &Command) -> Option<Command> {
        let typed = H::Command::from_payload(&command.payload)?;
        CommandHandler::create_undo_command(self, ctx, typed)
    }

    fn merge(&self, ctx: &CommandContext, older: &Command, newer: &Command) -> Option<Command> {
        let older_typed = H::Command::from_payload(&older.payload)?;
        let newer_typed = H::Command::from_payload(&newer.payload)?;
        let merged = CommandHandler::merge(self, ctx, older_typed, newer_typed)?;
        Some(Command {
            version: newer.version,
            payload: merged.into(),
        })
    }

    fn can_be_ignored(&self, ctx: &CommandContext, command: &Command) -> bool {
        match H::Command::from_payload(&command.payload) {
            Some(typed) => CommandHandler::can_be_ignored(self, ctx, typed),
            None => true,
        }
    }
}
