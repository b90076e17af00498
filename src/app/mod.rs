//! Application-Layer: Commands, Historie, Command-Manager und Use-Cases.

pub mod command_log;
pub mod command_manager;
pub mod commands;
pub mod history;
pub mod use_cases;

pub use command_log::{CommandLog, LoggedCommand};
pub use command_manager::{CommandManager, NoopHooks, SubmitHooks};
pub use commands::{
    Command, CommandContext, CommandHandler, CommandHandlerRegistry, CommandKind, CommandOrigin,
    CommandPayload, CreateHitObject, DeleteHitObject, EditorCommand, ErasedCommandHandler,
    HitObjectPatch, UpdateHitObject,
};
pub use history::{EditHistory, HistoryEntry, Transaction};
