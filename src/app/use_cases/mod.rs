//! Use-Cases der Application-Layer-Orchestrierung.
//!
//! Jeder Use-Case liest über `CommandManager::beatmap` und schreibt
//! ausschließlich per `CommandManager::submit`.

pub mod slider_editing;
pub mod transform;

pub use slider_editing::{convert_to_bezier, insert_control_point, reverse_slider, set_path};
pub use transform::{
    mirror_hit_objects, rotate_hit_objects, selection_bounds, transform_hit_objects, Bounds,
    MirrorAxis,
};
