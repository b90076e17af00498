//! Command-Log aller angewendeten Commands (lokal und remote).

use super::commands::{Command, CommandOrigin};

/// Ein Log-Eintrag.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedCommand {
    pub command: Command,
    pub origin: CommandOrigin,
}

/// Speichert angewendete Commands in Reihenfolge.
#[derive(Debug)]
pub struct CommandLog {
    entries: Vec<LoggedCommand>,
    max_entries: usize,
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::new(crate::shared::options::COMMAND_LOG_MAX_ENTRIES)
    }
}

impl CommandLog {
    /// Erstellt ein leeres Command-Log; `max_entries == 0` deaktiviert das Log.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Fügt einen angewendeten Command hinzu.
    /// Begrenzt auf `max_entries`, die ältere Hälfte wird beim Überlauf verworfen.
    pub fn record(&mut self, command: &Command, origin: CommandOrigin) {
        if self.max_entries == 0 {
            return;
        }
        if self.entries.len() >= self.max_entries {
            self.entries.drain(..(self.max_entries / 2).max(1));
        }
        self.entries.push(LoggedCommand {
            command: command.clone(),
            origin,
        });
    }

    /// Gibt die Anzahl der geloggten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[LoggedCommand] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::DeleteHitObject;

    #[test]
    fn drops_older_half_on_overflow() {
        let mut log = CommandLog::new(4);
        for id in 1..=5 {
            log.record(&DeleteHitObject { id }.into(), CommandOrigin::Local);
        }
        let kept: Vec<Command> = log.entries().iter().map(|e| e.command.clone()).collect();
        assert_eq!(
            kept,
            (3..=5)
                .map(|id| Command::from(DeleteHitObject { id }))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn zero_capacity_disables_log() {
        let mut log = CommandLog::new(0);
        log.record(&DeleteHitObject { id: 1 }.into(), CommandOrigin::Remote);
        assert!(log.is_empty());
    }
}
