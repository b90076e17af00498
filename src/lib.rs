//! osucad Editor-Kern.
//! Command/Undo-Engine und Slider-Pfad-Geometrie als Library für Editor und Tests.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    Command, CommandHandlerRegistry, CommandManager, CommandOrigin, HitObjectPatch,
    UpdateHitObject,
};
pub use core::{
    Beatmap, CalculatedPath, HitObject, HitObjectId, HitObjectKind, PathPoint, PathRange,
    SegmentType, SliderPath,
};
pub use shared::EditorOptions;
