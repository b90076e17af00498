//! Zentrale Konfiguration des Editor-Kerns.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::Context;
use serde::{Deserialize, Serialize};

// ── Pfad-Approximation ──────────────────────────────────────────────

/// Maximale Abweichung eines Bézier-Kontrollpolygons von der Geraden (Osu-Pixel).
pub const BEZIER_TOLERANCE: f32 = 0.25;
/// Maximale Sehnenabweichung bei Kreisbögen (Osu-Pixel).
pub const CIRCULAR_ARC_TOLERANCE: f32 = 0.1;
/// Abtastungen je Catmull-Rom-Spanne.
pub const CATMULL_DETAIL: usize = 50;

// ── Spielfeld ───────────────────────────────────────────────────────

/// Breite des Spielfelds in Osu-Pixeln.
pub const PLAYFIELD_WIDTH: f32 = 512.0;
/// Höhe des Spielfelds in Osu-Pixeln.
pub const PLAYFIELD_HEIGHT: f32 = 384.0;

// ── History ─────────────────────────────────────────────────────────

/// Maximale Anzahl Undo- bzw. Redo-Transaktionen.
pub const HISTORY_MAX_DEPTH: usize = 200;
/// Maximale Anzahl Einträge im Command-Log.
pub const COMMAND_LOG_MAX_ENTRIES: usize = 1000;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen des Editor-Kerns.
/// Wird als `osucad_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    /// Maximale Anzahl Undo- bzw. Redo-Transaktionen (0 = unbegrenzt)
    pub history_max_depth: usize,
    /// Maximale Anzahl Einträge im Command-Log
    #[serde(default = "default_command_log_max_entries")]
    pub command_log_max_entries: usize,
    /// Ausgeführte Commands zusätzlich per `log::trace!` ausgeben
    #[serde(default)]
    pub trace_commands: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_max_depth: HISTORY_MAX_DEPTH,
            command_log_max_entries: COMMAND_LOG_MAX_ENTRIES,
            trace_commands: false,
        }
    }
}

/// Serde-Default für `command_log_max_entries` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_command_log_max_entries() -> usize {
    COMMAND_LOG_MAX_ENTRIES
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Optionen nicht serialisierbar")?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen nicht schreibbar: {}", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }
}
