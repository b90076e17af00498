//! Geteilte Bausteine ohne Abhängigkeit auf den Command-Layer.
//!
//! Enthält Konfiguration, Pfad-Approximation, Pfad-Umformungen und
//! einfache Signale für Invalidierungen und Zustandsanzeigen.

pub mod options;
pub mod path_approximator;
pub mod path_conversion;
mod signal;

pub use options::EditorOptions;
pub use signal::{Bindable, Signal, SubscriptionId};
