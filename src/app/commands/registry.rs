//! Registry: `CommandKind` → Handler.

use super::{
    Command, CommandHandler, CommandKind, CreateHitObjectHandler, DeleteHitObjectHandler,
    EditorCommand, ErasedCommandHandler, UpdateHitObjectHandler,
};
use std::collections::HashMap;
use std::fmt;

/// Ordnet jeder Command-Art genau einen Handler zu.
#[derive(Default)]
pub struct CommandHandlerRegistry {
    handlers: HashMap<CommandKind, Box<dyn ErasedCommandHandler>>,
}

impl CommandHandlerRegistry {
    /// Leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry mit den Standard-Handlern für Hit-Objects.
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        registry.register(UpdateHitObjectHandler);
        registry.register(CreateHitObjectHandler);
        registry.register(DeleteHitObjectHandler);
        registry
    }

    /// Registriert einen Handler. Ein vorhandener Handler derselben Art wird ersetzt.
    pub fn register<H>(&mut self, handler: H)
    where
        H: CommandHandler + 'static,
    {
        let kind = H::Command::KIND;
        if self.handlers.insert(kind, Box::new(handler)).is_some() {
            log::warn!("Handler für '{}' bereits registriert, wird ersetzt", kind);
        } else {
            log::debug!("Handler für '{}' registriert", kind);
        }
    }

    /// Handler für die Art des Commands.
    pub fn lookup(&self, command: &Command) -> Option<&dyn ErasedCommandHandler> {
        self.handler(command.kind())
    }

    /// Handler für eine Command-Art.
    pub fn handler(&self, kind: CommandKind) -> Option<&dyn ErasedCommandHandler> {
        self.handlers.get(&kind).map(|h| h.as_ref())
    }

    /// Anzahl registrierter Handler.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// `true` wenn kein Handler registriert ist.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for CommandHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHandlerRegistry")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::{DeleteHitObject, UpdateHitObject};

    #[test]
    fn default_registry_covers_all_kinds() {
        let registry = CommandHandlerRegistry::with_default_handlers();
        assert_eq!(registry.len(), 3);
        for kind in [
            CommandKind::UpdateHitObject,
            CommandKind::CreateHitObject,
            CommandKind::DeleteHitObject,
        ] {
            let handler = registry.handler(kind).expect("Handler vorhanden");
            assert_eq!(handler.kind(), kind);
        }
    }

    #[test]
    fn lookup_on_empty_registry_is_none() {
        let registry = CommandHandlerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup(&DeleteHitObject { id: 1 }.into()).is_none());
    }

    #[test]
    fn duplicate_registration_replaces_handler() {
        let mut registry = CommandHandlerRegistry::new();
        registry.register(UpdateHitObjectHandler);
        registry.register(UpdateHitObjectHandler);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry
                .lookup(&UpdateHitObject::new(1, Default::default()).into())
                .map(|h| h.kind()),
            Some(CommandKind::UpdateHitObject)
        );
    }
}
