//! Command-Manager: einziger Schreibzugriff auf das Beatmap.
//!
//! Lokale Commands laufen über `submit`: Version vergeben, Hook fragen,
//! Inverses aufzeichnen (mit Merge innerhalb der offenen Transaktion) und
//! anwenden. `commit` schließt die Transaktion ab; `undo`/`redo` spielen
//! ganze Transaktionen in umgekehrter Reihenfolge ab, ohne selbst neue
//! Einträge aufzuzeichnen. Remote-Commands werden nur angewendet.

use super::command_log::CommandLog;
use super::commands::{Command, CommandContext, CommandHandlerRegistry, CommandOrigin};
use super::history::{EditHistory, HistoryEntry};
use crate::core::Beatmap;
use crate::shared::{Bindable, EditorOptions, SubscriptionId};
use std::fmt;

/// Erweiterungspunkte rund um lokale Submits.
pub trait SubmitHooks {
    /// Wird nach dem Vergeben der Version aufgerufen; `false` verwirft den Command.
    fn before_command_submit(&mut self, _command: &Command) -> bool {
        true
    }

    /// Wird nach dem Anwenden eines lokalen Commands aufgerufen.
    fn after_command_submit(&mut self, _command: &Command) {}
}

/// Hooks ohne Verhalten.
#[derive(Debug, Default)]
pub struct NoopHooks;

impl SubmitHooks for NoopHooks {}

/// Verwaltet Beatmap, Handler, Historie und Undo/Redo.
pub struct CommandManager {
    context: CommandContext,
    registry: CommandHandlerRegistry,
    history: EditHistory,
    command_log: CommandLog,
    hooks: Box<dyn SubmitHooks>,
    command_version: u64,
    trace_commands: bool,
    can_undo: Bindable<bool>,
    can_redo: Bindable<bool>,
}

impl CommandManager {
    /// Erstellt einen Manager mit Standard-Optionen.
    pub fn new(beatmap: Beatmap, registry: CommandHandlerRegistry) -> Self {
        Self::with_options(beatmap, registry, &EditorOptions::default())
    }

    /// Erstellt einen Manager mit den gegebenen Optionen.
    pub fn with_options(
        beatmap: Beatmap,
        registry: CommandHandlerRegistry,
        options: &EditorOptions,
    ) -> Self {
        Self {
            context: CommandContext::new(beatmap),
            registry,
            history: EditHistory::new_with_capacity(options.history_max_depth),
            command_log: CommandLog::new(options.command_log_max_entries),
            hooks: Box::new(NoopHooks),
            command_version: 0,
            trace_commands: options.trace_commands,
            can_undo: Bindable::new(false),
            can_redo: Bindable::new(false),
        }
    }

    /// Ersetzt die Submit-Hooks.
    pub fn set_hooks(&mut self, hooks: impl SubmitHooks + 'static) {
        self.hooks = Box::new(hooks);
    }

    // ── Lesen ───────────────────────────────────────────────────────

    pub fn beatmap(&self) -> &Beatmap {
        self.context.beatmap()
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn command_log(&self) -> &CommandLog {
        &self.command_log
    }

    /// Zuletzt vergebene Command-Version.
    pub fn version(&self) -> u64 {
        self.command_version
    }

    /// `true` solange eine Transaktion offen ist.
    pub fn has_pending_transaction(&self) -> bool {
        self.history.has_pending()
    }

    pub fn can_undo(&self) -> bool {
        *self.can_undo.value()
    }

    pub fn can_redo(&self) -> bool {
        *self.can_redo.value()
    }

    /// Benachrichtigt bei Änderungen von `can_undo`.
    pub fn subscribe_can_undo(&mut self, callback: impl FnMut(&bool) + 'static) -> SubscriptionId {
        self.can_undo.subscribe(callback)
    }

    /// Benachrichtigt bei Änderungen von `can_redo`.
    pub fn subscribe_can_redo(&mut self, callback: impl FnMut(&bool) + 'static) -> SubscriptionId {
        self.can_redo.subscribe(callback)
    }

    pub fn unsubscribe_can_undo(&mut self, id: SubscriptionId) -> bool {
        self.can_undo.unsubscribe(id)
    }

    pub fn unsubscribe_can_redo(&mut self, id: SubscriptionId) -> bool {
        self.can_redo.unsubscribe(id)
    }

    /// Gibt das Beatmap frei.
    pub fn into_beatmap(self) -> Beatmap {
        self.context.into_beatmap()
    }

    // ── Schreiben ───────────────────────────────────────────────────

    /// Führt einen lokalen Command aus und zeichnet ihn auf.
    ///
    /// Mit `commit == true` wird die offene Transaktion danach abgeschlossen.
    pub fn submit(&mut self, command: impl Into<Command>, commit: bool) {
        self.submit_internal(command.into(), true);
        if commit {
            self.commit();
        }
    }

    /// Schließt die offene Transaktion ab. `false` wenn nichts offen war.
    pub fn commit(&mut self) -> bool {
        let committed = self.history.commit();
        if committed {
            log::debug!("Transaktion committed ({} auf Undo-Stack)", self.history.undo_len());
            self.update_can_undo_redo();
        }
        committed
    }

    /// Macht die letzte Transaktion rückgängig.
    pub fn undo(&mut self) -> bool {
        let Some(transaction) = self.history.pop_undo() else {
            log::debug!("Undo: nichts zu tun");
            return false;
        };

        let mut redo_transaction = Vec::with_capacity(transaction.len());
        for entry in transaction.into_iter().rev() {
            let Some(reverse) = entry.reverse else {
                continue;
            };
            let fresh = self
                .registry
                .lookup(&reverse)
                .and_then(|handler| handler.create_undo_command(&self.context, &reverse));
            let applied = self.submit_internal(reverse, false);
            if let Some(fresh) = fresh {
                redo_transaction.push(HistoryEntry {
                    command: applied,
                    reverse: Some(fresh),
                });
            }
        }

        if !redo_transaction.is_empty() {
            self.history.push_redo(redo_transaction);
        }
        self.update_can_undo_redo();
        log::info!("Undo ausgeführt");
        true
    }

    /// Stellt die zuletzt rückgängig gemachte Transaktion wieder her.
    pub fn redo(&mut self) -> bool {
        let Some(transaction) = self.history.pop_redo() else {
            log::debug!("Redo: nichts zu tun");
            return false;
        };

        let mut undo_transaction = Vec::with_capacity(transaction.len());
        for entry in transaction.into_iter().rev() {
            let Some(reverse) = entry.reverse else {
                continue;
            };
            let applied = self.submit_internal(reverse, false);
            undo_transaction.push(HistoryEntry {
                command: applied,
                reverse: Some(entry.command),
            });
        }

        if !undo_transaction.is_empty() {
            self.history.push_undo(undo_transaction);
        }
        self.update_can_undo_redo();
        log::info!("Redo ausgeführt");
        true
    }

    /// Wendet einen Command eines anderen Teilnehmers an, ohne ihn aufzuzeichnen.
    pub fn apply_remote(&mut self, command: Command) -> bool {
        let applied = self.handle(&command, CommandOrigin::Remote);
        if applied {
            self.command_log.record(&command, CommandOrigin::Remote);
        }
        applied
    }

    fn submit_internal(&mut self, mut command: Command, record_history: bool) -> Command {
        self.command_version += 1;
        command.version = self.command_version;

        if !self.hooks.before_command_submit(&command) {
            log::debug!("Command '{}' v{} durch Hook verworfen", command.kind(), command.version);
            return command;
        }

        if record_history {
            self.record(&command);
        }

        if self.handle(&command, CommandOrigin::Local) {
            self.hooks.after_command_submit(&command);
            self.command_log.record(&command, CommandOrigin::Local);
        }
        command
    }

    fn record(&mut self, command: &Command) {
        let Some(handler) = self.registry.lookup(command) else {
            return;
        };
        let ctx = &self.context;

        let mut recorded = command.clone();
        let mut reverse = handler.create_undo_command(ctx, command);

        // Rückwärts über die offene Transaktion: gleiche Art wird gemergt
        let transaction = self.history.pending_mut();
        let mut i = transaction.len();
        while i > 0 {
            i -= 1;
            if transaction[i].command.kind() != recorded.kind() {
                continue;
            }
            let Some(merged) = handler.merge(ctx, &transaction[i].command, &recorded) else {
                continue;
            };
            let previous = transaction.remove(i);
            recorded = merged;

            reverse = match (reverse, previous.reverse) {
                (Some(newer), Some(older)) => Some(
                    self.registry
                        .lookup(&newer)
                        .filter(|_| newer.kind() == older.kind())
                        .and_then(|h| h.merge(ctx, &newer, &older))
                        .unwrap_or(newer),
                ),
                (newer, _) => newer,
            };
        }

        transaction.push(HistoryEntry {
            command: recorded,
            reverse,
        });
    }

    fn handle(&mut self, command: &Command, origin: CommandOrigin) -> bool {
        let Some(handler) = self.registry.lookup(command) else {
            log::error!("Kein Handler für Command '{}' registriert", command.kind());
            return false;
        };

        if handler.can_be_ignored(&self.context, command) {
            log::trace!("Command '{}' v{} ohne Wirkung", command.kind(), command.version);
            return false;
        }

        handler.apply(&mut self.context, command, origin);
        if self.trace_commands {
            log::trace!("Command angewendet ({:?}): {:?}", origin, command);
        }
        true
    }

    fn update_can_undo_redo(&mut self) {
        self.can_undo.set(self.history.can_undo());
        self.can_redo.set(self.history.can_redo());
    }
}

impl fmt::Debug for CommandManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandManager")
            .field("version", &self.command_version)
            .field("hit_objects", &self.context.beatmap().len())
            .field("undo", &self.history.undo_len())
            .field("redo", &self.history.redo_len())
            .field("pending", &self.history.pending().len())
            .finish()
    }
}
