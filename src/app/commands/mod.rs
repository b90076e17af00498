//! Editor-Commands: serialisierbare Beschreibungen einzelner Änderungen.
//!
//! Ein `Command` besteht aus einer vom `CommandManager` vergebenen Version und
//! einer getaggten Nutzlast (`CommandPayload`). Die Ausführung übernimmt der
//! für die `CommandKind` registrierte `CommandHandler`.

mod create_hit_object;
mod delete_hit_object;
mod handler;
mod registry;
mod update_hit_object;

pub use create_hit_object::{CreateHitObject, CreateHitObjectHandler};
pub use delete_hit_object::{DeleteHitObject, DeleteHitObjectHandler};
pub use handler::{CommandHandler, ErasedCommandHandler};
pub use registry::CommandHandlerRegistry;
pub use update_hit_object::{HitObjectPatch, UpdateHitObject, UpdateHitObjectHandler};

use crate::core::Beatmap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Art eines Commands, Schlüssel der Handler-Registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Felder eines Hit-Objects ändern
    UpdateHitObject,
    /// Hit-Object einfügen
    CreateHitObject,
    /// Hit-Object entfernen
    DeleteHitObject,
}

impl CommandKind {
    /// Typ-Tag wie im serialisierten Command.
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::UpdateHitObject => "updateHitObject",
            CommandKind::CreateHitObject => "createHitObject",
            CommandKind::DeleteHitObject => "deleteHitObject",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Herkunft eines angewendeten Commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOrigin {
    /// Vom lokalen Benutzer ausgelöst
    Local,
    /// Von einem anderen Teilnehmer der Session empfangen
    Remote,
}

/// Getaggte Nutzlast eines Commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CommandPayload {
    /// Siehe [`UpdateHitObject`]
    UpdateHitObject(UpdateHitObject),
    /// Siehe [`CreateHitObject`]
    CreateHitObject(CreateHitObject),
    /// Siehe [`DeleteHitObject`]
    DeleteHitObject(DeleteHitObject),
}

impl CommandPayload {
    /// Art der Nutzlast.
    pub fn kind(&self) -> CommandKind {
        match self {
            CommandPayload::UpdateHitObject(_) => CommandKind::UpdateHitObject,
            CommandPayload::CreateHitObject(_) => CommandKind::CreateHitObject,
            CommandPayload::DeleteHitObject(_) => CommandKind::DeleteHitObject,
        }
    }
}

/// Ein Command mit Version und Nutzlast.
///
/// Serialisiert als `{ "type": ..., "version": n, ...payload }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Vom `CommandManager` beim Submit vergeben; nur für Reihenfolge/Debugging
    #[serde(default)]
    pub version: u64,
    /// Nutzlast
    #[serde(flatten)]
    pub payload: CommandPayload,
}

impl Command {
    /// Erstellt einen Command mit Version 0.
    pub fn new(payload: impl Into<CommandPayload>) -> Self {
        Self {
            version: 0,
            payload: payload.into(),
        }
    }

    /// Art des Commands.
    pub fn kind(&self) -> CommandKind {
        self.payload.kind()
    }
}

impl From<CommandPayload> for Command {
    fn from(payload: CommandPayload) -> Self {
        Self::new(payload)
    }
}

/// Typisierte Nutzlast mit fester `CommandKind`.
pub trait EditorCommand: Clone + Into<CommandPayload> {
    /// Registry-Schlüssel dieses Command-Typs
    const KIND: CommandKind;

    /// Extrahiert die typisierte Nutzlast, falls die Art passt.
    fn from_payload(payload: &CommandPayload) -> Option<&Self>;
}

macro_rules! editor_command {
    ($ty:ident) => {
        impl EditorCommand for $ty {
            const KIND: CommandKind = CommandKind::$ty;

            fn from_payload(payload: &CommandPayload) -> Option<&Self> {
                match payload {
                    CommandPayload::$ty(command) => Some(command),
                    _ => None,
                }
            }
        }

        impl From<$ty> for CommandPayload {
            fn from(command: $ty) -> Self {
                CommandPayload::$ty(command)
            }
        }

        impl From<$ty> for Command {
            fn from(command: $ty) -> Self {
                Command::new(command)
            }
        }
    };
}

editor_command!(UpdateHitObject);
editor_command!(CreateHitObject);
editor_command!(DeleteHitObject);

/// Zustand, auf dem Commands arbeiten. Wird exklusiv vom `CommandManager` gehalten.
#[derive(Debug, Default)]
pub struct CommandContext {
    beatmap: Beatmap,
}

impl CommandContext {
    /// Erstellt einen Kontext für ein Beatmap.
    pub fn new(beatmap: Beatmap) -> Self {
        Self { beatmap }
    }

    /// Das Beatmap (read-only).
    pub fn beatmap(&self) -> &Beatmap {
        &self.beatmap
    }

    /// Das Beatmap zum Ändern; nur für Handler.
    pub fn beatmap_mut(&mut self) -> &mut Beatmap {
        &mut self.beatmap
    }

    /// Gibt das Beatmap frei.
    pub fn into_beatmap(self) -> Beatmap {
        self.beatmap
    }
}
